//! Per-attribute constant tables.
//!
//! Every attribute, the key attribute included, becomes one output mapping
//! each row key to that attribute's value.

use crate::config::GeneratorConfig;
use crate::models::Model;
use crate::naming::to_pascal_case;

use super::syntax::Language;
use super::RenderedOutput;

/// Render one constant table per attribute, in schema order.
pub fn render_constants(model: &Model, config: &GeneratorConfig) -> Vec<RenderedOutput> {
    model
        .schema()
        .names()
        .iter()
        .enumerate()
        .map(|(column, attribute)| render_constant(model, config, column, attribute))
        .collect()
}

/// Render the constant table of a single attribute.
pub fn render_constant(
    model: &Model,
    config: &GeneratorConfig,
    column: usize,
    attribute: &str,
) -> RenderedOutput {
    let language = config.language;
    let name = language.type_ident(&to_pascal_case(attribute));
    let entries: Vec<(&str, String)> = model
        .iter()
        .map(|(key, record)| (key, language.quote(record.value(column))))
        .collect();

    let mut content = language.notice();
    content.push('\n');
    content.push_str(&match language {
        Language::Rust => rust(&name, &entries),
        Language::Kotlin => kotlin(&name, &entries),
        Language::Java => java(&name, &entries),
        Language::JavaScript => javascript(&entries),
        Language::Python => python(&name, &entries),
        Language::Go => go(&name, &entries, &config.go_package),
    });

    RenderedOutput {
        file_name: language.file_name(&name),
        name,
        content,
    }
}

fn rust(name: &str, entries: &[(&str, String)]) -> String {
    let mut out = format!("#[allow(non_snake_case)]\npub mod {} {{\n", name);
    for (key, value) in entries {
        out.push_str(&format!("    pub const {}: &str = {};\n", key, value));
    }
    out.push_str("}\n");
    out
}

fn kotlin(name: &str, entries: &[(&str, String)]) -> String {
    let mut out = format!("object {} {{\n", name);
    for (key, value) in entries {
        out.push_str(&format!("    const val {} = {}\n", key, value));
    }
    out.push_str("}\n");
    out
}

fn java(name: &str, entries: &[(&str, String)]) -> String {
    let mut out = format!("public interface {} {{\n", name);
    for (key, value) in entries {
        out.push_str(&format!("    String {} = {};\n", key, value));
    }
    out.push_str("}\n");
    out
}

fn javascript(entries: &[(&str, String)]) -> String {
    let mut out = String::from("module.exports = Object.freeze({\n");
    for (key, value) in entries {
        out.push_str(&format!("    {}: {},\n", key, value));
    }
    out.push_str("});\n");
    out
}

fn python(name: &str, entries: &[(&str, String)]) -> String {
    let mut out = format!("class {}:\n", name);
    if entries.is_empty() {
        out.push_str("    pass\n");
    }
    for (key, value) in entries {
        out.push_str(&format!("    {} = {}\n", key, value));
    }
    out
}

// Go has one namespace per package, so each constant carries its table name.
fn go(name: &str, entries: &[(&str, String)], package: &str) -> String {
    let mut out = format!("package {}\n\nconst (\n", package);
    for (key, value) in entries {
        out.push_str(&format!("\t{}_{} = {}\n", name, key, value));
    }
    out.push_str(")\n");
    out
}
