//! The aggregate enumeration.
//!
//! One entry per row key carrying every attribute but the key as a string
//! field. Field names are the camel-cased attribute names, declared in schema
//! order.

use crate::config::GeneratorConfig;
use crate::models::Model;
use crate::naming::{to_camel_case, to_pascal_case};

use super::syntax::Language;
use super::RenderedOutput;

/// One enum entry: key plus quoted field values in field order.
struct Entry<'a> {
    key: &'a str,
    values: Vec<String>,
}

/// Render the enum output.
pub fn render_enum(model: &Model, config: &GeneratorConfig) -> RenderedOutput {
    let language = config.language;
    let name = language.type_ident(&config.enum_name);
    let name = name.as_str();
    let fields: Vec<String> = model
        .schema()
        .fields()
        .iter()
        .map(|attribute| language.ident(&to_camel_case(attribute)))
        .collect();
    let entries: Vec<Entry<'_>> = model
        .iter()
        .map(|(key, record)| Entry {
            key,
            values: record
                .field_values()
                .iter()
                .map(|value| language.quote(value))
                .collect(),
        })
        .collect();

    let mut content = language.notice();
    content.push('\n');
    content.push_str(&match language {
        Language::Rust => rust(name, &fields, &entries),
        Language::Kotlin => kotlin(name, &fields, &entries),
        Language::Java => java(name, &fields, &entries),
        Language::JavaScript => javascript(&fields, &entries),
        Language::Python => python(name, &fields, &entries),
        Language::Go => go(name, &fields, &entries, &config.go_package),
    });

    RenderedOutput {
        name: name.to_string(),
        file_name: language.file_name(name),
        content,
    }
}

fn rust(name: &str, fields: &[String], entries: &[Entry<'_>]) -> String {
    let mut out = String::from("#[allow(non_camel_case_types)]\n");
    out.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]\n");
    out.push_str(&format!("pub enum {} {{\n", name));
    for entry in entries {
        out.push_str(&format!("    {},\n", entry.key));
    }
    out.push_str("}\n\n");

    out.push_str(&format!("#[allow(non_snake_case)]\nimpl {} {{\n", name));
    let all: Vec<String> = entries
        .iter()
        .map(|entry| format!("{}::{}", name, entry.key))
        .collect();
    out.push_str(&format!(
        "    pub const ALL: &'static [{}] = &[{}];\n",
        name,
        all.join(", ")
    ));

    for (i, field) in fields.iter().enumerate() {
        out.push_str(&format!(
            "\n    pub const fn {}(&self) -> &'static str {{\n        match *self {{\n",
            field
        ));
        for entry in entries {
            out.push_str(&format!(
                "            {}::{} => {},\n",
                name, entry.key, entry.values[i]
            ));
        }
        out.push_str("        }\n    }\n");
    }
    out.push_str("}\n");
    out
}

fn kotlin(name: &str, fields: &[String], entries: &[Entry<'_>]) -> String {
    let mut out = if fields.is_empty() {
        format!("enum class {} {{\n", name)
    } else {
        let params: Vec<String> = fields.iter().map(|f| format!("val {}: String", f)).collect();
        format!("enum class {}({}) {{\n", name, params.join(", "))
    };
    out.push_str(&jvm_entries(fields, entries));
    out.push_str("}\n");
    out
}

fn java(name: &str, fields: &[String], entries: &[Entry<'_>]) -> String {
    let mut out = format!("public enum {} {{\n", name);
    out.push_str(&jvm_entries(fields, entries));

    if !fields.is_empty() {
        out.push('\n');
        for field in fields {
            out.push_str(&format!("    private final String {};\n", field));
        }

        let params: Vec<String> = fields.iter().map(|f| format!("String {}", f)).collect();
        out.push_str(&format!("\n    {}({}) {{\n", name, params.join(", ")));
        for field in fields {
            out.push_str(&format!("        this.{} = {};\n", field, field));
        }
        out.push_str("    }\n");

        for field in fields {
            out.push_str(&format!(
                "\n    public String {}() {{\n        return {};\n    }}\n",
                java_getter(field),
                field
            ));
        }
    }
    out.push_str("}\n");
    out
}

// Object.getClass and Enum.getDeclaringClass are final.
fn java_getter(field: &str) -> String {
    let getter = format!("get{}", to_pascal_case(field));
    match getter.as_str() {
        "getClass" | "getDeclaringClass" => format!("{}_", getter),
        _ => getter,
    }
}

/// Kotlin/Java entry list: comma separated, terminated by `;`.
fn jvm_entries(fields: &[String], entries: &[Entry<'_>]) -> String {
    let lines: Vec<String> = entries
        .iter()
        .map(|entry| {
            if fields.is_empty() {
                format!("    {}", entry.key)
            } else {
                format!("    {}({})", entry.key, entry.values.join(", "))
            }
        })
        .collect();
    if lines.is_empty() {
        "    ;\n".to_string()
    } else {
        format!("{};\n", lines.join(",\n"))
    }
}

fn javascript(fields: &[String], entries: &[Entry<'_>]) -> String {
    let mut out = String::from("module.exports = Object.freeze({\n");
    for entry in entries {
        let props: Vec<String> = fields
            .iter()
            .zip(&entry.values)
            .map(|(field, value)| format!("{}: {}", field, value))
            .collect();
        if props.is_empty() {
            out.push_str(&format!("    {}: Object.freeze({{}}),\n", entry.key));
        } else {
            out.push_str(&format!(
                "    {}: Object.freeze({{ {} }}),\n",
                entry.key,
                props.join(", ")
            ));
        }
    }
    out.push_str("});\n");
    out
}

// Values lead with the key: members with equal values would become aliases.
fn python(name: &str, fields: &[String], entries: &[Entry<'_>]) -> String {
    let mut out = format!("from enum import Enum\n\n\nclass {}(Enum):\n", name);
    for entry in entries {
        let mut items = vec![format!("\"{}\"", entry.key)];
        items.extend(entry.values.iter().cloned());
        let tuple = if items.len() == 1 {
            format!("({},)", items[0])
        } else {
            format!("({})", items.join(", "))
        };
        out.push_str(&format!("    {} = {}\n", entry.key, tuple));
    }
    if !entries.is_empty() {
        out.push('\n');
    }

    let params: Vec<String> = fields.iter().map(|f| format!(", {}", f)).collect();
    out.push_str(&format!("    def __init__(self, _key{}):\n", params.concat()));
    if fields.is_empty() {
        out.push_str("        pass\n");
    }
    for field in fields {
        out.push_str(&format!("        self._{} = {}\n", field, field));
    }

    for field in fields {
        out.push_str(&format!(
            "\n    @property\n    def {}(self):\n        return self._{}\n",
            field, field
        ));
    }
    out
}

fn go(name: &str, fields: &[String], entries: &[Entry<'_>], package: &str) -> String {
    let mut out = format!("package {}\n\n", package);

    out.push_str(&format!("type {} struct {{\n", name));
    for field in fields {
        out.push_str(&format!("\t{} string\n", field));
    }
    out.push_str("}\n\n");

    let receiver = name.chars().next().map(|c| c.to_ascii_lowercase()).unwrap_or('e');
    for field in fields {
        out.push_str(&format!(
            "func ({} {}) {}() string {{\n\treturn {}.{}\n}}\n\n",
            receiver,
            name,
            to_pascal_case(field),
            receiver,
            field
        ));
    }

    out.push_str("var (\n");
    for entry in entries {
        out.push_str(&format!("\t{} = {}{{{}}}\n", entry.key, name, entry.values.join(", ")));
    }
    out.push_str(")\n\n");

    let keys: Vec<&str> = entries.iter().map(|entry| entry.key).collect();
    out.push_str(&format!("var {}Values = []{}{{{}}}\n", name, name, keys.join(", ")));
    out
}
