//! # errgen - error-code table code generator
//!
//! errgen reads a `|`-delimited table of error codes (header of attribute
//! names, then one row per code) and generates source files: one constant
//! table per attribute plus one aggregate enum carrying every attribute as a
//! typed field.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Table file  │────▶│   Parser    │────▶│    Model    │────▶│  Renderers  │
//! │  (a | b |)  │     │  (auto-enc) │     │ (validated) │     │ N+1 outputs │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use errgen::{generate, GeneratorConfig, LocalFs};
//! use std::path::Path;
//!
//! let report = generate(
//!     &LocalFs,
//!     Path::new("errors.txt"),
//!     Path::new("src/generated"),
//!     &GeneratorConfig::default(),
//! )?;
//! assert!(report.is_success());
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`naming`] - Key normalization and case conversion
//! - [`parser`] - Delimited table parsing with encoding detection
//! - [`models`] - Attribute schema, records and the validated model
//! - [`render`] - Constant and enum renderers per target language
//! - [`config`] - Generator configuration
//! - [`output`] - File-system capability (disk and in-memory)
//! - [`pipeline`] - End-to-end generation
//! - [`logs`] - tracing subscriber setup

// Core modules
pub mod error;
pub mod models;
pub mod naming;

// Parsing
pub mod parser;

// Rendering
pub mod render;

// Configuration
pub mod config;

// I/O
pub mod output;
pub mod pipeline;

// Logging
pub mod logs;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ConfigError,
    GenerateError,
    ModelError,
    TableError,
    WriteFailure,
};

// =============================================================================
// Re-exports - Naming
// =============================================================================

pub use naming::{normalize_key, to_camel_case, to_pascal_case, to_snake_case};

// =============================================================================
// Re-exports - Parsing and model
// =============================================================================

pub use parser::{parse_bytes, parse_str, ParsedTable, RawRow, DEFAULT_SEPARATOR};
pub use models::{build_model, AttributeSchema, Model, Record};

// =============================================================================
// Re-exports - Rendering
// =============================================================================

pub use render::{render_all, render_constants, render_enum, Language, RenderedOutput};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use config::GeneratorConfig;
pub use output::{FileSystem, LocalFs, MemoryFs};
pub use pipeline::{generate, load_model, preview, GenerateReport, LoadedModel};
