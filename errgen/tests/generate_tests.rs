//! End-to-end generation against a real temporary directory.

use std::fs;
use std::path::Path;

use errgen::{generate, GenerateError, GeneratorConfig, Language, LocalFs, ModelError};
use tempfile::TempDir;

const TABLE: &str = "code | message | status\n\
                     not found | Resource not found | 404\n\
                     \n\
                     server error | Internal error | 500\n\
                     rate limited | Slow down \"please\"\n";

fn write_input(dir: &TempDir, content: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join("errors.txt");
    fs::write(&path, content).unwrap();
    path
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_generate_rust_into_nested_dir() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, TABLE.as_bytes());
    let out = dir.path().join("src").join("generated");

    let report = generate(&LocalFs, &input, &out, &GeneratorConfig::default()).unwrap();

    assert!(report.is_success());
    assert_eq!(report.rows, 3);
    assert_eq!(report.attributes, 3);
    assert_eq!(report.written.len(), 4);

    let mut files: Vec<String> = fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    files.sort();
    assert_eq!(files, vec!["code.rs", "error_enum.rs", "message.rs", "status.rs"]);

    let message = read(&out.join("message.rs"));
    assert!(message.contains("pub const RATE_LIMITED: &str = \"Slow down \\\"please\\\"\";"));

    // short row padded with an empty status
    let status = read(&out.join("status.rs"));
    assert!(status.contains("pub const RATE_LIMITED: &str = \"\";"));

    let enum_file = read(&out.join("error_enum.rs"));
    assert!(enum_file.contains("pub enum ErrorEnum {\n    NOT_FOUND,\n    SERVER_ERROR,\n    RATE_LIMITED,\n}"));
    assert!(enum_file.contains("pub const fn status(&self) -> &'static str"));
}

#[test]
fn test_regenerate_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, TABLE.as_bytes());
    let out = dir.path().join("gen");
    let config = GeneratorConfig {
        language: Language::Python,
        ..GeneratorConfig::default()
    };

    let first = generate(&LocalFs, &input, &out, &config).unwrap();
    let before: Vec<String> = first.written.iter().map(|p| read(p)).collect();

    let second = generate(&LocalFs, &input, &out, &config).unwrap();
    let after: Vec<String> = second.written.iter().map(|p| read(p)).collect();

    assert_eq!(first.written, second.written);
    assert_eq!(before, after);
}

#[test]
fn test_build_error_leaves_no_output_dir() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, b"code|message\nerr a|first\nERR_A|second\n");
    let out = dir.path().join("gen");

    let err = generate(&LocalFs, &input, &out, &GeneratorConfig::default()).unwrap_err();

    match err {
        GenerateError::Model(ModelError::DuplicateKey { key, first_row, row }) => {
            assert_eq!(key, "ERR_A");
            assert_eq!(first_row, 2);
            assert_eq!(row, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!out.exists());
}

#[test]
fn test_missing_input_is_reported() {
    let dir = TempDir::new().unwrap();
    let err = generate(
        &LocalFs,
        &dir.path().join("nope.txt"),
        &dir.path().join("gen"),
        &GeneratorConfig::default(),
    )
    .unwrap_err();

    assert!(err.to_string().starts_with("InputUnreadable"));
}

#[test]
fn test_every_language_writes_n_plus_one() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, TABLE.as_bytes());

    for language in Language::ALL {
        let out = dir.path().join(language.name());
        let config = GeneratorConfig {
            language,
            ..GeneratorConfig::default()
        };
        let report = generate(&LocalFs, &input, &out, &config).unwrap();
        assert_eq!(report.written.len(), 4, "{}", language);
        for path in &report.written {
            assert_eq!(
                path.extension().and_then(|e| e.to_str()),
                Some(language.extension())
            );
        }
    }
}
