//! Delimited table parser with encoding auto-detection.
//!
//! Splits each line on a literal separator (`|` by default) and trims every
//! field. The first line is the header. No quoting or escaping of the
//! separator is supported.

use tracing::{debug, warn};

use crate::error::{TableError, TableResult};

/// Separator used when none is configured.
pub const DEFAULT_SEPARATOR: char = '|';

/// A data row as read from the input, before padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line number in the input (the header is line 1).
    pub line: usize,
    /// Trimmed fields in column order.
    pub fields: Vec<String>,
}

/// Header plus data rows, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// Result of parsing raw bytes
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub table: ParsedTable,
    /// Detected encoding the input was decoded with
    pub encoding: String,
}

/// Charset used for non-UTF-8 input when chardet has no confident guess.
pub const FALLBACK_ENCODING: &str = "windows-1252";

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" | "utf-8-sig" => "utf-8".to_string(),
        "iso-8859-1" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to a string using the given encoding.
///
/// UTF-8 is decoded strictly; invalid sequences are an error, never replaced.
/// A leading byte order mark is dropped.
pub fn decode_content(bytes: &[u8], encoding: &str) -> TableResult<String> {
    let decode_error = || TableError::Decode {
        encoding: encoding.to_string(),
    };

    let text = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => {
            String::from_utf8(bytes.to_vec()).map_err(|_| decode_error())?
        }
        // windows-1252 agrees with Latin-1 on every printable code point
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()
        }
        label => {
            let codec = encoding_rs::Encoding::for_label(label.as_bytes()).ok_or_else(decode_error)?;
            let (text, _, had_errors) = codec.decode(bytes);
            if had_errors {
                return Err(decode_error());
            }
            text.into_owned()
        }
    };

    Ok(match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

/// Split one line into trimmed fields.
pub fn split_row(line: &str, separator: char) -> Vec<String> {
    line.split(separator).map(|field| field.trim().to_string()).collect()
}

/// Parse already-split lines.
///
/// The first line becomes the header. Blank lines are kept as rows with a
/// single empty field; the model builder decides what to do with them.
pub fn parse_lines<I, S>(lines: I, separator: char) -> TableResult<ParsedTable>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut lines = lines.into_iter();

    let header_line = lines.next().ok_or(TableError::EmptyInput)?;
    let headers = split_row(header_line.as_ref(), separator);

    let rows: Vec<RawRow> = lines
        .enumerate()
        .map(|(idx, line)| RawRow {
            line: idx + 2, // +1 for 0-index, +1 for header
            fields: split_row(line.as_ref(), separator),
        })
        .collect();

    debug!(columns = headers.len(), rows = rows.len(), "parsed table");

    Ok(ParsedTable { headers, rows })
}

/// Parse table text.
pub fn parse_str(content: &str, separator: char) -> TableResult<ParsedTable> {
    parse_lines(content.lines(), separator)
}

// The bytes are known not to be UTF-8, so a "utf-8" guess means chardet gave up.
fn non_utf8_encoding(detected: String) -> String {
    if detected == "utf-8" {
        FALLBACK_ENCODING.to_string()
    } else {
        detected
    }
}

/// Parse raw input bytes with encoding auto-detection.
pub fn parse_bytes(bytes: &[u8], separator: char) -> TableResult<ParseResult> {
    if bytes.is_empty() {
        return Err(TableError::EmptyInput);
    }

    // chardet only for inputs that are not valid UTF-8
    let encoding = match std::str::from_utf8(bytes) {
        Ok(_) => "utf-8".to_string(),
        Err(_) => non_utf8_encoding(detect_encoding(bytes)),
    };
    if encoding != "utf-8" {
        warn!(%encoding, "input is not UTF-8, decoding with detected charset");
    }
    let content = decode_content(bytes, &encoding)?;
    let table = parse_str(&content, separator)?;

    Ok(ParseResult { table, encoding })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_table() {
        let table = parse_str("code | message\nnot found | Resource not found", '|').unwrap();

        assert_eq!(table.headers, vec!["code", "message"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].line, 2);
        assert_eq!(table.rows[0].fields, vec!["not found", "Resource not found"]);
    }

    #[test]
    fn test_fields_are_trimmed() {
        assert_eq!(split_row("  a |b  |   c   ", '|'), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_short_row_is_not_padded_here() {
        let table = parse_str("a|b|c|d\nERR_A", '|').unwrap();
        assert_eq!(table.rows[0].fields, vec!["ERR_A"]);
    }

    #[test]
    fn test_blank_line_kept() {
        let table = parse_str("a|b\nX|1\n\nY|2", '|').unwrap();

        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[1].fields, vec![""]);
        assert_eq!(table.rows[2].line, 4);
    }

    #[test]
    fn test_crlf_lines() {
        let table = parse_str("code|message\r\nA|first\r\n", '|').unwrap();
        assert_eq!(table.headers, vec!["code", "message"]);
        assert_eq!(table.rows[0].fields, vec!["A", "first"]);
    }

    #[test]
    fn test_custom_separator() {
        let table = parse_str("code;message\nA;first", ';').unwrap();
        assert_eq!(table.rows[0].fields, vec!["A", "first"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse_str("", '|'), Err(TableError::EmptyInput)));
        assert!(matches!(parse_bytes(b"", '|'), Err(TableError::EmptyInput)));
        let no_lines: Vec<&str> = Vec::new();
        assert!(matches!(parse_lines(no_lines, '|'), Err(TableError::EmptyInput)));
    }

    #[test]
    fn test_bom_stripped() {
        let bytes = b"\xEF\xBB\xBFcode|message\nA|first";
        let result = parse_bytes(bytes, '|').unwrap();
        assert_eq!(result.encoding, "utf-8");
        assert_eq!(result.table.headers, vec!["code", "message"]);
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1").unwrap();
        assert_eq!(decoded, "Société");
    }

    #[test]
    fn test_latin1_symbols_not_read_as_latin9() {
        // 0xA4 and 0xBD are the euro sign and oe ligature in ISO-8859-15
        let decoded = decode_content(b"Prix \xA4\xBD", "iso-8859-1").unwrap();
        assert_eq!(decoded, "Prix \u{a4}\u{bd}");
        assert_eq!(decoded, "Prix ¤½");
    }

    #[test]
    fn test_parse_bytes_detects_non_utf8() {
        // windows-1252 / Latin-1 bytes, invalid as UTF-8
        let bytes: &[u8] = b"code|message\n\
            bad request|Requ\xEAte invalide pour cette ressource\n\
            already deleted|La ressource a d\xE9j\xE0 \xE9t\xE9 supprim\xE9e\n";
        assert!(std::str::from_utf8(bytes).is_err());

        let result = parse_bytes(bytes, '|').unwrap();

        assert_ne!(result.encoding, "utf-8");
        assert_eq!(result.table.headers, vec!["code", "message"]);
        assert_eq!(result.table.rows.len(), 2);
        assert_eq!(
            result.table.rows[0].fields,
            vec!["bad request", "Requête invalide pour cette ressource"]
        );
        assert_eq!(
            result.table.rows[1].fields,
            vec!["already deleted", "La ressource a déjà été supprimée"]
        );
    }

    #[test]
    fn test_undetected_charset_falls_back() {
        assert_eq!(non_utf8_encoding("utf-8".to_string()), FALLBACK_ENCODING);
        assert_eq!(non_utf8_encoding("iso-8859-9".to_string()), "iso-8859-9");
        assert_eq!(decode_content(b"\xE9", FALLBACK_ENCODING).unwrap(), "é");
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let err = decode_content(&[0x66, 0xFF, 0x6F], "utf-8").unwrap_err();
        assert!(matches!(err, TableError::Decode { .. }));
    }

    #[test]
    fn test_unknown_encoding_rejected() {
        let err = decode_content(b"abc", "klingon-8").unwrap_err();
        assert!(matches!(err, TableError::Decode { .. }));
    }
}
