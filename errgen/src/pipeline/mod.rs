//! High-level generation API.
//!
//! Combines every stage of a run:
//!
//! ```text
//! input ─▶ FileSystem::read ─▶ parse_bytes ─▶ build_model ─▶ render_all
//!                                                               │
//!                         output_dir ◀─ write_file (per output) ◀┘
//! ```
//!
//! Everything before the writes is all-or-nothing: a table, model or config
//! error aborts the run with zero outputs written. Writes are independent;
//! failures are collected in the [`GenerateReport`].
//!
//! # Example
//!
//! ```rust,ignore
//! use errgen::config::GeneratorConfig;
//! use errgen::output::LocalFs;
//! use errgen::pipeline::generate;
//! use std::path::Path;
//!
//! let report = generate(
//!     &LocalFs,
//!     Path::new("errors.txt"),
//!     Path::new("src/generated"),
//!     &GeneratorConfig::default(),
//! )?;
//! println!("{}", report.summary());
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span, warn};

use crate::config::GeneratorConfig;
use crate::error::{GenerateError, GenerateResult, TableError, WriteFailure};
use crate::models::{build_model, Model};
use crate::output::FileSystem;
use crate::parser::parse_bytes;
use crate::render::{render_all, RenderedOutput};

/// A model together with how its input was decoded.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub model: Model,
    pub encoding: String,
}

/// Outcome of a run that got as far as writing.
#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    /// Directory the outputs were written to
    pub output_dir: PathBuf,

    /// Paths written successfully, in render order
    pub written: Vec<PathBuf>,

    /// Outputs that could not be written
    pub failures: Vec<WriteFailure>,

    /// Number of error codes in the model
    pub rows: usize,

    /// Number of attributes (key included)
    pub attributes: usize,

    /// Encoding the input was decoded with
    pub encoding: String,
}

impl GenerateReport {
    /// True when every output was written.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total outputs attempted.
    pub fn total(&self) -> usize {
        self.written.len() + self.failures.len()
    }

    /// One-line human summary.
    pub fn summary(&self) -> String {
        let mut line = format!(
            "{} error codes, {} attributes: wrote {}/{} files to {}",
            self.rows,
            self.attributes,
            self.written.len(),
            self.total(),
            self.output_dir.display()
        );
        if !self.is_success() {
            line.push_str(&format!(" ({} failed)", self.failures.len()));
        }
        line
    }
}

/// Read, parse and build the model of `input`.
pub fn load_model<F: FileSystem + ?Sized>(
    fs: &F,
    input: &Path,
    config: &GeneratorConfig,
) -> GenerateResult<LoadedModel> {
    let bytes = fs.read(input).map_err(|source| TableError::InputUnreadable {
        path: input.to_path_buf(),
        source,
    })?;
    debug!(bytes = bytes.len(), "input read");

    let parsed = parse_bytes(&bytes, config.separator)?;
    let model = build_model(parsed.table)?;
    info!(
        rows = model.len(),
        attributes = model.schema().len(),
        encoding = %parsed.encoding,
        "model built"
    );

    Ok(LoadedModel {
        model,
        encoding: parsed.encoding,
    })
}

/// Render every output and reject runs where two outputs share a file name.
pub fn render_checked(
    model: &Model,
    config: &GeneratorConfig,
) -> GenerateResult<Vec<RenderedOutput>> {
    let outputs = render_all(model, config);

    let mut seen: HashMap<&str, &str> = HashMap::new();
    for output in &outputs {
        if let Some(first) = seen.insert(output.file_name.as_str(), output.name.as_str()) {
            return Err(GenerateError::OutputNameCollision {
                file_name: output.file_name.clone(),
                first: first.to_string(),
                second: output.name.clone(),
            });
        }
    }

    Ok(outputs)
}

/// Load the model of `input` and render it without writing anything.
pub fn preview<F: FileSystem + ?Sized>(
    fs: &F,
    input: &Path,
    config: &GeneratorConfig,
) -> GenerateResult<Vec<RenderedOutput>> {
    config.validate()?;
    let loaded = load_model(fs, input, config)?;
    render_checked(&loaded.model, config)
}

/// Write rendered outputs into `output_dir`, creating it first.
///
/// Directory creation failure is fatal. A failed file write is recorded and
/// the remaining files are still attempted.
pub fn write_outputs<F: FileSystem + ?Sized>(
    fs: &F,
    output_dir: &Path,
    outputs: &[RenderedOutput],
) -> GenerateResult<(Vec<PathBuf>, Vec<WriteFailure>)> {
    fs.ensure_dir(output_dir)
        .map_err(|source| GenerateError::OutputDirectory {
            path: output_dir.to_path_buf(),
            source,
        })?;

    let mut written = Vec::with_capacity(outputs.len());
    let mut failures = Vec::new();

    for output in outputs {
        let path = output_dir.join(&output.file_name);
        match fs.write_file(&path, output.content.as_bytes()) {
            Ok(()) => {
                info!(path = %path.display(), "wrote {}", output.name);
                written.push(path);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "write failed");
                failures.push(WriteFailure {
                    path,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok((written, failures))
}

/// Run a full generation: read `input`, build the model and write the
/// `N + 1` outputs into `output_dir`.
pub fn generate<F: FileSystem + ?Sized>(
    fs: &F,
    input: &Path,
    output_dir: &Path,
    config: &GeneratorConfig,
) -> GenerateResult<GenerateReport> {
    let _span = info_span!("generate", input = %input.display()).entered();

    config.validate()?;
    let loaded = load_model(fs, input, config)?;
    let outputs = render_checked(&loaded.model, config)?;
    debug!(outputs = outputs.len(), language = %config.language, "rendered");

    let (written, failures) = write_outputs(fs, output_dir, &outputs)?;

    Ok(GenerateReport {
        output_dir: output_dir.to_path_buf(),
        written,
        failures,
        rows: loaded.model.len(),
        attributes: loaded.model.schema().len(),
        encoding: loaded.encoding,
    })
}
