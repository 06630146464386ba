//! Error types for the errgen generation pipeline.
//!
//! The hierarchy mirrors the pipeline stages:
//!
//! - [`TableError`] - reading and splitting the input table
//! - [`ModelError`] - header and row validation while building the model
//! - [`ConfigError`] - loading and validating generator configuration
//! - [`GenerateError`] - top-level orchestration errors
//!
//! [`WriteFailure`] is not an error type: a failed output write is recorded in
//! the generation report while the remaining outputs are still written.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Table Errors
// =============================================================================

/// Errors while reading or splitting the input table.
#[derive(Debug, Error)]
pub enum TableError {
    /// The input resource is missing or not readable.
    #[error("InputUnreadable: cannot read '{path}': {source}")]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input has no lines at all, so there is no header.
    #[error("EmptyInput: input table has no header line")]
    EmptyInput,

    /// The input bytes could not be decoded as text.
    #[error("Decode: input is not valid {encoding}")]
    Decode { encoding: String },
}

// =============================================================================
// Model Errors
// =============================================================================

/// Errors while turning parsed rows into the keyed model.
///
/// Row numbers are 1-based line numbers of the input (the header is line 1).
/// Column numbers are 1-based header positions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// A data row carries more fields than the header declares.
    #[error("RowOverflow: line {row} has {fields} fields, header declares {expected}")]
    RowOverflow {
        row: usize,
        fields: usize,
        expected: usize,
    },

    /// Two rows normalize to the same key.
    #[error("DuplicateKey: key '{key}' on line {row} already defined on line {first_row}")]
    DuplicateKey {
        key: String,
        first_row: usize,
        row: usize,
    },

    /// A row's first field normalizes to an empty key.
    #[error("EmptyKey: line {row} has an empty key column")]
    EmptyKey { row: usize },

    /// A key is not a bare identifier.
    #[error("InvalidKey: line {row} key '{key}' is not a valid identifier")]
    InvalidKey { row: usize, key: String },

    /// Two header columns produce the same identifier.
    #[error("DuplicateAttribute: column {column} '{name}' collides with column {first_column}")]
    DuplicateAttribute {
        name: String,
        first_column: usize,
        column: usize,
    },

    /// A header column produces no identifier.
    #[error("EmptyAttribute: header column {column} has no usable name")]
    EmptyAttribute { column: usize },

    /// A header column name cannot become an identifier.
    #[error("InvalidAttribute: header column {column} '{name}' is not a valid identifier")]
    InvalidAttribute { column: usize, name: String },
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors while loading generator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid JSON.
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Unsupported target language.
    #[error("Unknown language '{0}' (expected one of: rust, kotlin, java, javascript, python, go)")]
    UnknownLanguage(String),

    /// The enum name is not an identifier.
    #[error("Invalid enum name '{0}'")]
    InvalidEnumName(String),

    /// The Go package clause is not an identifier.
    #[error("Invalid Go package name '{0}'")]
    InvalidGoPackage(String),

    /// The separator cannot split fields.
    #[error("Invalid separator {0:?}: whitespace cannot separate fields")]
    InvalidSeparator(char),
}

// =============================================================================
// Generate Errors (top-level)
// =============================================================================

/// Top-level errors returned by [`crate::pipeline::generate`].
///
/// Any of these aborts the run before a single output is written.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Input table error.
    #[error(transparent)]
    Table(#[from] TableError),

    /// Model building error.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The output directory could not be created.
    #[error("OutputDirectory: cannot create '{path}': {source}")]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Two outputs would land in the same file, e.g. an attribute named like
    /// the enum, or `HTTP status` and `http status` for snake-case languages.
    #[error("OutputNameCollision: '{first}' and '{second}' both map to '{file_name}'")]
    OutputNameCollision {
        file_name: String,
        first: String,
        second: String,
    },
}

// =============================================================================
// Write failures (non-fatal)
// =============================================================================

/// One output that could not be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteFailure {
    pub path: PathBuf,
    pub reason: String,
}

impl std::fmt::Display for WriteFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OutputWriteFailure: '{}': {}", self.path.display(), self.reason)
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for table parsing.
pub type TableResult<T> = Result<T, TableError>;

/// Result type for model building.
pub type ModelResult<T> = Result<T, ModelError>;

/// Result type for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for a generation run.
pub type GenerateResult<T> = Result<T, GenerateError>;
