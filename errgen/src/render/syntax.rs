//! Target language syntax shared by both renderers.
//!
//! Each [`Language`] knows its file extension, how output names map to file
//! stems, and how to write a string literal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::naming::to_snake_case;

/// First line of every generated file (after the comment marker).
pub const GENERATED_NOTICE: &str = "Code generated by errgen. DO NOT EDIT.";

/// Target language of the generated sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Rust,
    Kotlin,
    Java,
    #[serde(alias = "js")]
    JavaScript,
    #[serde(alias = "py")]
    Python,
    #[serde(alias = "golang")]
    Go,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::Rust,
        Language::Kotlin,
        Language::Java,
        Language::JavaScript,
        Language::Python,
        Language::Go,
    ];

    /// Lowercase name as accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Language::Rust => "rust",
            Language::Kotlin => "kotlin",
            Language::Java => "java",
            Language::JavaScript => "javascript",
            Language::Python => "python",
            Language::Go => "go",
        }
    }

    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Language::Rust => "rs",
            Language::Kotlin => "kt",
            Language::Java => "java",
            Language::JavaScript => "js",
            Language::Python => "py",
            Language::Go => "go",
        }
    }

    /// File name for an output named `name` (a Pascal-case identifier).
    ///
    /// Rust, Python and Go module files are snake case; the JVM languages
    /// need the file to match the declared type. Snake-case stems that
    /// cannot be imported (`class.py`, `self.rs`) or that Go would treat as
    /// test files (`*_test.go`) get a trailing `_`.
    pub fn file_name(self, name: &str) -> String {
        let mut stem = match self {
            Language::Rust | Language::Python | Language::Go => to_snake_case(name),
            Language::Kotlin | Language::Java | Language::JavaScript => name.to_string(),
        };
        let unusable = match self {
            Language::Rust => RUST_PATH_SEGMENTS.contains(&stem.as_str()),
            Language::Python => PYTHON_KEYWORDS.contains(&stem.as_str()),
            Language::Go => stem.ends_with("_test"),
            Language::Kotlin | Language::Java | Language::JavaScript => false,
        };
        if unusable {
            stem.push('_');
        }
        format!("{}.{}", stem, self.extension())
    }

    /// Whether `ident` is reserved and cannot name a declaration.
    pub fn is_reserved(self, ident: &str) -> bool {
        let words: &[&str] = match self {
            Language::Rust if RUST_PATH_SEGMENTS.contains(&ident) || ident == "Self" => return true,
            Language::Rust => RUST_KEYWORDS,
            Language::Kotlin => KOTLIN_KEYWORDS,
            Language::Java => JAVA_KEYWORDS,
            // property names and exports may be reserved words
            Language::JavaScript => &[],
            Language::Python => PYTHON_KEYWORDS,
            Language::Go => GO_KEYWORDS,
        };
        words.contains(&ident)
    }

    /// Make `ident` usable as a declared type name: reserved words get a
    /// trailing `_`.
    pub fn type_ident(self, ident: &str) -> String {
        if self.is_reserved(ident) {
            format!("{}_", ident)
        } else {
            ident.to_string()
        }
    }

    /// Make `ident` usable as an enum field, parameter or accessor name.
    ///
    /// Rust uses raw identifiers and Kotlin backticks where possible. Names
    /// the language cannot escape, or that clash with members every enum
    /// already has (`name` in Kotlin and Python), get a trailing `_`.
    pub fn ident(self, ident: &str) -> String {
        match self {
            Language::Rust => rust_ident(ident),
            Language::Kotlin if KOTLIN_ENUM_MEMBERS.contains(&ident) => format!("{}_", ident),
            Language::Kotlin if KOTLIN_KEYWORDS.contains(&ident) => format!("`{}`", ident),
            Language::Python if PYTHON_ENUM_MEMBERS.contains(&ident) => format!("{}_", ident),
            _ => self.type_ident(ident),
        }
    }

    /// Generated-file notice as a line comment.
    pub fn notice(self) -> String {
        match self {
            Language::Python => format!("# {}\n", GENERATED_NOTICE),
            _ => format!("// {}\n", GENERATED_NOTICE),
        }
    }

    /// Double-quoted string literal for `value`.
    pub fn quote(self, value: &str) -> String {
        let mut out = String::with_capacity(value.len() + 2);
        out.push('"');
        for c in value.chars() {
            match c {
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                '$' if self == Language::Kotlin => out.push_str("\\$"),
                c if c.is_control() => out.push_str(&self.control_escape(c)),
                c => out.push(c),
            }
        }
        out.push('"');
        out
    }

    fn control_escape(self, c: char) -> String {
        let code = c as u32;
        match self {
            Language::Rust => format!("\\u{{{:x}}}", code),
            Language::Python => format!("\\x{:02x}", code),
            // \u escapes are unicode-preprocessed by javac, octal is not
            Language::Java => format!("\\{:03o}", code),
            Language::Kotlin | Language::JavaScript | Language::Go => format!("\\u{:04x}", code),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rust" | "rs" => Ok(Language::Rust),
            "kotlin" | "kt" => Ok(Language::Kotlin),
            "java" => Ok(Language::Java),
            "javascript" | "js" => Ok(Language::JavaScript),
            "python" | "py" => Ok(Language::Python),
            "go" | "golang" => Ok(Language::Go),
            _ => Err(ConfigError::UnknownLanguage(s.to_string())),
        }
    }
}

const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe",
    "unsized", "use", "virtual", "where", "while",
];

// Keywords that cannot be written as raw identifiers.
const RUST_PATH_SEGMENTS: &[&str] = &["self", "super", "crate"];

const KOTLIN_KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

// Final members of kotlin.Enum; a constructor property cannot shadow them.
const KOTLIN_ENUM_MEMBERS: &[&str] = &["name", "ordinal"];

const JAVA_KEYWORDS: &[&str] = &[
    "_", "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
    "const", "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "null", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw",
    "throws", "transient", "true", "try", "void", "volatile", "while",
];

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

// `self` is the first `__init__` parameter; `name` and `value` are Enum properties.
const PYTHON_ENUM_MEMBERS: &[&str] = &["self", "name", "value"];

const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var",
];

/// Make `ident` usable as a Rust item name.
fn rust_ident(ident: &str) -> String {
    if RUST_PATH_SEGMENTS.contains(&ident) || ident == "Self" {
        format!("{}_", ident)
    } else if RUST_KEYWORDS.contains(&ident) {
        format!("r#{}", ident)
    } else {
        ident.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        assert_eq!(Language::Rust.file_name("ErrorMessage"), "error_message.rs");
        assert_eq!(Language::Python.file_name("ErrorEnum"), "error_enum.py");
        assert_eq!(Language::Go.file_name("Message"), "message.go");
        assert_eq!(Language::Kotlin.file_name("ErrorEnum"), "ErrorEnum.kt");
        assert_eq!(Language::Java.file_name("Message"), "Message.java");
        assert_eq!(Language::JavaScript.file_name("Message"), "Message.js");
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(Language::Rust.quote(r#"say "hi" \o/"#), r#""say \"hi\" \\o/""#);
        assert_eq!(Language::Kotlin.quote("costs $5"), r#""costs \$5""#);
        assert_eq!(Language::Java.quote("costs $5"), r#""costs $5""#);
        assert_eq!(Language::Go.quote("a\tb"), r#""a\tb""#);
    }

    #[test]
    fn test_control_escapes() {
        let bell = "\u{7}";
        assert_eq!(Language::Rust.quote(bell), r#""\u{7}""#);
        assert_eq!(Language::Python.quote(bell), r#""\x07""#);
        assert_eq!(Language::Java.quote(bell), r#""\007""#);
        assert_eq!(Language::JavaScript.quote(bell), r#""\u0007""#);
    }

    #[test]
    fn test_parse_language() {
        assert_eq!("Rust".parse::<Language>().unwrap(), Language::Rust);
        assert_eq!("js".parse::<Language>().unwrap(), Language::JavaScript);
        assert_eq!("golang".parse::<Language>().unwrap(), Language::Go);
        assert!(matches!(
            "cobol".parse::<Language>(),
            Err(ConfigError::UnknownLanguage(_))
        ));
    }

    #[test]
    fn test_language_serde() {
        let lang: Language = serde_json::from_str("\"kotlin\"").unwrap();
        assert_eq!(lang, Language::Kotlin);
        let lang: Language = serde_json::from_str("\"py\"").unwrap();
        assert_eq!(lang, Language::Python);
        assert_eq!(serde_json::to_string(&Language::JavaScript).unwrap(), "\"javascript\"");
    }

    #[test]
    fn test_java_octal_escape_is_fixed_width() {
        // a following digit must not extend the escape
        assert_eq!(Language::Java.quote("\u{1}2x"), r#""\0012x""#);
        assert_eq!(Language::Java.quote("\u{1f}7"), r#""\0377""#);
        assert_eq!(Language::Java.quote("\u{9f}"), r#""\237""#);
    }

    #[test]
    fn test_rust_ident() {
        assert_eq!(Language::Rust.ident("message"), "message");
        assert_eq!(Language::Rust.ident("type"), "r#type");
        assert_eq!(Language::Rust.ident("self"), "self_");
        assert_eq!(Language::Rust.type_ident("Self"), "Self_");
    }

    #[test]
    fn test_kotlin_ident() {
        assert_eq!(Language::Kotlin.ident("class"), "`class`");
        assert_eq!(Language::Kotlin.ident("name"), "name_");
        assert_eq!(Language::Kotlin.ident("ordinal"), "ordinal_");
        assert_eq!(Language::Kotlin.ident("default"), "default");
    }

    #[test]
    fn test_java_ident() {
        assert_eq!(Language::Java.ident("default"), "default_");
        assert_eq!(Language::Java.ident("class"), "class_");
        assert_eq!(Language::Java.ident("type"), "type");
    }

    #[test]
    fn test_python_ident() {
        assert_eq!(Language::Python.ident("class"), "class_");
        assert_eq!(Language::Python.ident("self"), "self_");
        assert_eq!(Language::Python.ident("value"), "value_");
        assert_eq!(Language::Python.ident("type"), "type");
        assert_eq!(Language::Python.type_ident("None"), "None_");
    }

    #[test]
    fn test_go_ident() {
        assert_eq!(Language::Go.ident("type"), "type_");
        assert_eq!(Language::Go.ident("default"), "default_");
        assert_eq!(Language::Go.ident("string"), "string");
    }

    #[test]
    fn test_javascript_ident_unchanged() {
        assert_eq!(Language::JavaScript.ident("default"), "default");
    }

    #[test]
    fn test_unusable_file_stems() {
        assert_eq!(Language::Python.file_name("Class"), "class_.py");
        assert_eq!(Language::Rust.file_name("Self_"), "self_.rs");
        assert_eq!(Language::Go.file_name("UnitTest"), "unit_test_.go");
        assert_eq!(Language::Rust.file_name("Type"), "type.rs");
    }
}
