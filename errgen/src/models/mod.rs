//! Domain models for the generation pipeline.
//!
//! - [`AttributeSchema`] - ordered attribute names from the header
//! - [`Record`] - one row's values bound to the schema
//! - [`Model`] - ordered key → record mapping shared by every renderer
//!
//! The model is built once per run by [`build_model`] and never mutated
//! afterwards.

use serde_json::{json, Map, Value};
use std::collections::HashMap;
use tracing::debug;

use crate::error::{ModelError, ModelResult};
use crate::naming::{is_identifier, normalize_key, to_pascal_case};
use crate::parser::ParsedTable;

// =============================================================================
// Attribute Schema
// =============================================================================

/// Ordered attribute names taken from the header row.
///
/// The first attribute is the key attribute; the rest become enum fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSchema {
    names: Vec<String>,
}

impl AttributeSchema {
    /// Validate header names and build the schema.
    ///
    /// Every name must yield a non-empty identifier once Pascal-cased, and no
    /// two names may yield the same one.
    pub fn from_headers(headers: Vec<String>) -> ModelResult<Self> {
        if headers.is_empty() {
            return Err(ModelError::EmptyAttribute { column: 1 });
        }

        let mut seen: HashMap<String, usize> = HashMap::new();
        for (idx, name) in headers.iter().enumerate() {
            let column = idx + 1;
            let ident = to_pascal_case(name);
            if ident.is_empty() {
                return Err(ModelError::EmptyAttribute { column });
            }
            if !is_identifier(&ident) {
                return Err(ModelError::InvalidAttribute {
                    column,
                    name: name.clone(),
                });
            }
            if let Some(&first_column) = seen.get(&ident) {
                return Err(ModelError::DuplicateAttribute {
                    name: name.clone(),
                    first_column,
                    column,
                });
            }
            seen.insert(ident, column);
        }

        Ok(Self { names: headers })
    }

    /// Number of attributes (columns).
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false for a validated schema.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All attribute names in column order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Attributes carried as enum fields: every column but the key.
    pub fn fields(&self) -> &[String] {
        &self.names[1..]
    }

    /// Column index of an attribute.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

// =============================================================================
// Record
// =============================================================================

/// One data row, padded to the schema width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Input line the row came from.
    pub line: usize,
    values: Vec<String>,
}

impl Record {
    /// Values in schema order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Value at a column index.
    pub fn value(&self, column: usize) -> &str {
        self.values.get(column).map(String::as_str).unwrap_or("")
    }

    /// Value for a named attribute.
    pub fn get<'a>(&'a self, schema: &AttributeSchema, attribute: &str) -> Option<&'a str> {
        schema.position(attribute).map(|i| self.value(i))
    }

    /// Values of the enum fields (every column but the key).
    pub fn field_values(&self) -> &[String] {
        &self.values[1..]
    }
}

// =============================================================================
// Model
// =============================================================================

/// Ordered key → record mapping, in input row order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    schema: AttributeSchema,
    entries: Vec<(String, Record)>,
    index: HashMap<String, usize>,
}

impl Model {
    pub fn schema(&self) -> &AttributeSchema {
        &self.schema
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records with their keys, in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Record)> {
        self.entries.iter().map(|(key, record)| (key.as_str(), record))
    }

    /// Keys in input order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Look up a record by key.
    pub fn get(&self, key: &str) -> Option<&Record> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    /// JSON view of the model: attributes plus one object per record.
    pub fn to_json_value(&self) -> Value {
        let records: Vec<Value> = self
            .iter()
            .map(|(key, record)| {
                let mut values = Map::new();
                for (name, value) in self.schema.names().iter().zip(record.values()) {
                    values.insert(name.clone(), Value::String(value.clone()));
                }
                json!({
                    "key": key,
                    "line": record.line,
                    "values": values,
                })
            })
            .collect();

        json!({
            "attributes": self.schema.names(),
            "records": records,
        })
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Build the model from a parsed table.
///
/// Short rows are padded with empty strings; rows whose fields are all empty
/// are skipped. Overflowing rows and empty, invalid or duplicate keys abort
/// the build.
pub fn build_model(table: ParsedTable) -> ModelResult<Model> {
    let schema = AttributeSchema::from_headers(table.headers)?;
    let width = schema.len();

    let mut entries: Vec<(String, Record)> = Vec::with_capacity(table.rows.len());
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in table.rows {
        if row.fields.iter().all(String::is_empty) {
            debug!(line = row.line, "skipping blank row");
            continue;
        }

        if row.fields.len() > width {
            return Err(ModelError::RowOverflow {
                row: row.line,
                fields: row.fields.len(),
                expected: width,
            });
        }

        let mut values = row.fields;
        values.resize(width, String::new());

        let key = normalize_key(&values[0]).ok_or(ModelError::EmptyKey { row: row.line })?;
        if !is_identifier(&key) {
            return Err(ModelError::InvalidKey { row: row.line, key });
        }
        if let Some(&existing) = index.get(&key) {
            return Err(ModelError::DuplicateKey {
                key,
                first_row: entries[existing].1.line,
                row: row.line,
            });
        }

        debug!(line = row.line, %key, "record");
        index.insert(key.clone(), entries.len());
        entries.push((
            key,
            Record {
                line: row.line,
                values,
            },
        ));
    }

    Ok(Model {
        schema,
        entries,
        index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;

    fn model(input: &str) -> ModelResult<Model> {
        build_model(parse_str(input, '|').unwrap())
    }

    #[test]
    fn test_row_and_value_counts() {
        let m = model("code|message|status\nA|a|1\nB|b|2\nC|c|3").unwrap();

        assert_eq!(m.len(), 3);
        for (_, record) in m.iter() {
            assert_eq!(record.values().len(), 3);
        }
    }

    #[test]
    fn test_order_preserved() {
        let m = model("code|message\nzeta|z\nalpha|a\nmid|m").unwrap();

        let keys: Vec<&str> = m.keys().collect();
        assert_eq!(keys, vec!["ZETA", "ALPHA", "MID"]);
        assert_eq!(m.schema().names(), &["code", "message"]);
        assert_eq!(m.schema().fields(), &["message"]);
    }

    #[test]
    fn test_short_row_padded() {
        let m = model("code|message|status|hint\nERR_A").unwrap();

        let record = m.get("ERR_A").unwrap();
        assert_eq!(record.values(), &["ERR_A", "", "", ""]);
        assert_eq!(record.get(m.schema(), "hint"), Some(""));
    }

    #[test]
    fn test_row_overflow() {
        let err = model("code|message\nA|a\nB|b|extra").unwrap_err();
        assert_eq!(
            err,
            ModelError::RowOverflow {
                row: 3,
                fields: 3,
                expected: 2
            }
        );
    }

    #[test]
    fn test_duplicate_key() {
        let err = model("code|message\nerr a|first\nERR_A|second").unwrap_err();
        assert_eq!(
            err,
            ModelError::DuplicateKey {
                key: "ERR_A".into(),
                first_row: 2,
                row: 3
            }
        );
    }

    #[test]
    fn test_empty_key() {
        let err = model("code|message\n   |orphan message").unwrap_err();
        assert_eq!(err, ModelError::EmptyKey { row: 2 });
    }

    #[test]
    fn test_invalid_key() {
        let err = model("code|message\n404 not found|missing").unwrap_err();
        assert!(matches!(err, ModelError::InvalidKey { row: 2, .. }));
    }

    #[test]
    fn test_blank_rows_skipped() {
        let m = model("code|message\nA|a\n\n   \nB|b\n").unwrap();
        assert_eq!(m.len(), 2);
        assert_eq!(m.get("B").unwrap().line, 5);
    }

    #[test]
    fn test_duplicate_attribute() {
        let err = model("code|error message|error_message\nA|x|y").unwrap_err();
        assert_eq!(
            err,
            ModelError::DuplicateAttribute {
                name: "error_message".into(),
                first_column: 2,
                column: 3
            }
        );
    }

    #[test]
    fn test_empty_attribute() {
        let err = model("code||message\nA|x|y").unwrap_err();
        assert_eq!(err, ModelError::EmptyAttribute { column: 2 });
    }

    #[test]
    fn test_invalid_attribute() {
        let err = model("code|2xx status\nA|x").unwrap_err();
        assert!(matches!(err, ModelError::InvalidAttribute { column: 2, .. }));
    }

    #[test]
    fn test_header_only() {
        let m = model("code|message").unwrap();
        assert!(m.is_empty());
        assert_eq!(m.schema().len(), 2);
    }

    #[test]
    fn test_json_view() {
        let m = model("code|message\nnot found|Resource not found").unwrap();
        let json = m.to_json_value();

        assert_eq!(json["attributes"][1], "message");
        assert_eq!(json["records"][0]["key"], "NOT_FOUND");
        assert_eq!(json["records"][0]["line"], 2);
        assert_eq!(json["records"][0]["values"]["message"], "Resource not found");
    }
}
