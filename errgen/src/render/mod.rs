//! Rendering of the model into source files.
//!
//! This module provides:
//! - `constants`: one key → value table per attribute
//! - `enums`: the single aggregate enumeration
//! - `syntax`: per-language literals, file names and the generated notice
//!
//! ## Usage Flow
//!
//! ```text
//! Model ─┬─▶ render_constants ─▶ N outputs (one per attribute)
//!        └─▶ render_enum      ─▶ 1 output
//! ```
//!
//! Both renderers are pure: the same model and config always produce
//! byte-identical content.

pub mod constants;
pub mod enums;
pub mod syntax;

pub use constants::{render_constant, render_constants};
pub use enums::render_enum;
pub use syntax::{Language, GENERATED_NOTICE};

use crate::config::GeneratorConfig;
use crate::models::Model;

/// One generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOutput {
    /// Declared type/module name (Pascal case attribute or enum name).
    pub name: String,
    /// File name inside the output directory.
    pub file_name: String,
    pub content: String,
}

/// Render every output of a run: the constant tables in schema order, then
/// the enum.
pub fn render_all(model: &Model, config: &GeneratorConfig) -> Vec<RenderedOutput> {
    let mut outputs = render_constants(model, config);
    outputs.push(render_enum(model, config));
    outputs
}
