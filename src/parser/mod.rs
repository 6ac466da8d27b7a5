//! # Parser سند redirect‌ها
//!
//! بایت‌های یک سند YAML یا JSON رو به لیست مرتب `PathRecord` تبدیل میکنه.
//!
//! ```yaml
//! - path: /some-path
//!   url: https://www.some-url.com/demo
//! - path: /other
//!   url: https://example.org/
//! ```
//!
//! ## روند کار
//! 1. بررسی UTF-8
//! 2. decode کل سند به درخت `serde_yaml::Value` یا `serde_json::Value`
//! 3. خوندن جداگانه هر عنصر، تا خطا بتونه شماره رکورد خراب رو بگه
//!
//! اگه حتی یک رکورد خراب باشه، هیچ رکوردی برنمیگرده.

use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;
use tracing::debug;

use crate::{
    error::ParseError,
    models::{DocumentFormat, PathRecord},
};

/// parse سند YAML
///
/// # Errors
/// `ParseError` اگه سند خراب باشه یا یه رکورد `path`/`url` رشته‌ای نداشته باشه.
///
/// # مثال
/// ```rust
/// use url_redirector::parser::parse_yaml;
///
/// let records = parse_yaml(b"- path: /dogs\n  url: https://en.wikipedia.org/wiki/Dog\n").unwrap();
/// assert_eq!(records[0].path, "/dogs");
/// ```
pub fn parse_yaml(data: &[u8]) -> Result<Vec<PathRecord>, ParseError> {
    parse_document(data, DocumentFormat::Yaml)
}

/// parse سند JSON با همون ساختار (`[{"path": ..., "url": ...}]`)
///
/// # Errors
/// مثل `parse_yaml`.
pub fn parse_json(data: &[u8]) -> Result<Vec<PathRecord>, ParseError> {
    parse_document(data, DocumentFormat::Json)
}

/// parse سند با فرمت مشخص
///
/// سند خالی (یا فقط whitespace) و سند `null` لیست خالی میدن.
///
/// # Errors
/// - `ParseError::Encoding`: بایت‌ها UTF-8 نیستن
/// - `ParseError::Syntax`: سند خرابه
/// - `ParseError::NotASequence`: سطح بالا لیست نیست
/// - `ParseError::InvalidRecord`: یه عنصر ساختار `{path, url}` نداره
pub fn parse_document(
    data: &[u8],
    format: DocumentFormat,
) -> Result<Vec<PathRecord>, ParseError> {
    let text = std::str::from_utf8(data).map_err(|e| ParseError::Encoding(e.to_string()))?;

    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let records = match format {
        DocumentFormat::Yaml => {
            let document: YamlValue = serde_yaml::from_str(text).map_err(|e| syntax(format, e))?;
            yaml_records(document)?
        }
        DocumentFormat::Json => {
            let document: JsonValue = serde_json::from_str(text).map_err(|e| syntax(format, e))?;
            json_records(document)?
        }
    };
    debug!(format = %format, records = records.len(), "Parsed redirect document");

    Ok(records)
}

fn syntax(format: DocumentFormat, error: impl std::fmt::Display) -> ParseError {
    ParseError::Syntax {
        format: format.name(),
        message: error.to_string(),
    }
}

// =====================================
// YAML
// =====================================
/// رکوردها از درخت YAML
///
/// mapping در YAML میتونه کلید غیر رشته‌ای یا مقدار tag دار داشته باشه.
/// فقط `path` و `url` خونده میشن و بقیه کلیدها، هر شکلی داشته باشن، نادیده گرفته میشن.
fn yaml_records(document: YamlValue) -> Result<Vec<PathRecord>, ParseError> {
    let items = match document {
        YamlValue::Null => return Ok(Vec::new()),
        YamlValue::Sequence(items) => items,
        other => {
            return Err(ParseError::NotASequence {
                found: yaml_kind(&other),
            })
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| yaml_record(index, &item))
        .collect()
}

fn yaml_record(index: usize, item: &YamlValue) -> Result<PathRecord, ParseError> {
    let YamlValue::Mapping(fields) = item else {
        return Err(ParseError::InvalidRecord {
            index,
            reason: format!(
                "expected a mapping with `path` and `url`, found {}",
                yaml_kind(item)
            ),
        });
    };

    let field = |name: &str| -> Result<String, ParseError> {
        match fields.get(name) {
            Some(YamlValue::String(value)) => Ok(value.clone()),
            Some(other) => Err(ParseError::InvalidRecord {
                index,
                reason: format!(
                    "field `{}` must be a string, found {}",
                    name,
                    yaml_kind(other)
                ),
            }),
            None => Err(ParseError::InvalidRecord {
                index,
                reason: format!("missing field `{}`", name),
            }),
        }
    };

    Ok(PathRecord {
        path: field("path")?,
        url: field("url")?,
    })
}

fn yaml_kind(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "null",
        YamlValue::Bool(_) => "a boolean",
        YamlValue::Number(_) => "a number",
        YamlValue::String(_) => "a string",
        YamlValue::Sequence(_) => "a sequence",
        YamlValue::Mapping(_) => "a mapping",
        YamlValue::Tagged(_) => "a tagged value",
    }
}

// =====================================
// JSON
// =====================================
/// رکوردها از درخت JSON؛ هر عنصر جدا deserialize میشه تا اندیسش معلوم باشه
fn json_records(document: JsonValue) -> Result<Vec<PathRecord>, ParseError> {
    let items = match document {
        JsonValue::Null => return Ok(Vec::new()),
        JsonValue::Array(items) => items,
        other => {
            return Err(ParseError::NotASequence {
                found: json_kind(&other),
            })
        }
    };

    // collect روی Result با اولین خطا متوقف میشه
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<PathRecord>(item).map_err(|e| ParseError::InvalidRecord {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "a sequence",
        JsonValue::Object(_) => "a mapping",
    }
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;

    const TWO_RECORDS: &str = "\
- path: /dogs
  url: https://en.wikipedia.org/wiki/Dog
- path: /cats
  url: https://en.wikipedia.org/wiki/Cat
";

    #[test]
    fn test_parse_preserves_document_order() {
        let records = parse_yaml(TWO_RECORDS.as_bytes()).unwrap();

        assert_eq!(
            records,
            vec![
                PathRecord::new("/dogs", "https://en.wikipedia.org/wiki/Dog"),
                PathRecord::new("/cats", "https://en.wikipedia.org/wiki/Cat"),
            ]
        );
    }

    #[test]
    fn test_field_order_and_extra_keys_are_irrelevant() {
        let doc = b"- url: https://example.org/\n  title: ignored\n  path: /other\n";
        let records = parse_yaml(doc).unwrap();

        assert_eq!(records, vec![PathRecord::new("/other", "https://example.org/")]);
    }

    #[test]
    fn test_exotic_extra_keys_are_ignored() {
        let expected = vec![PathRecord::new("/x", "https://x")];

        let tagged = b"- path: /x\n  url: https://x\n  note: !custom hello\n";
        assert_eq!(parse_yaml(tagged).unwrap(), expected);

        let complex_key = b"- path: /x\n  url: https://x\n  ? [a, b]\n  : extra\n";
        assert_eq!(parse_yaml(complex_key).unwrap(), expected);

        let nested = b"- path: /x\n  url: https://x\n  meta:\n    tags: [a, b]\n    owner: {name: n}\n";
        assert_eq!(parse_yaml(nested).unwrap(), expected);

        let scalar_keys = b"- path: /x\n  url: https://x\n  1: one\n  ~: nothing\n  true: yes\n";
        assert_eq!(parse_yaml(scalar_keys).unwrap(), expected);
    }

    #[test]
    fn test_tagged_url_is_not_a_string() {
        let err = parse_yaml(b"- path: /x\n  url: !custom https://x\n").unwrap_err();
        assert_eq!(err.record_index(), Some(0));
        assert!(err.to_string().contains("tagged"), "{err}");
    }

    #[test]
    fn test_numeric_url_is_rejected() {
        let err = parse_yaml(b"- path: /x\n  url: 42\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidRecord { index: 0, .. }));
    }

    #[test]
    fn test_values_pass_through_verbatim() {
        let doc = b"- path: no-leading-slash\n  url: not a url\n- path: /empty\n  url: ''\n";
        let records = parse_yaml(doc).unwrap();

        assert_eq!(records[0].path, "no-leading-slash");
        assert_eq!(records[0].url, "not a url");
        assert_eq!(records[1].url, "");
    }

    #[test]
    fn test_missing_url_is_rejected() {
        let err = parse_yaml(b"- path: /x").unwrap_err();

        assert_eq!(err.record_index(), Some(0));
        assert!(err.to_string().contains("url"), "{err}");
    }

    #[test]
    fn test_offending_record_is_identified() {
        let doc = b"- path: /ok\n  url: https://ok\n- path: /bad\n";
        let err = parse_yaml(doc).unwrap_err();

        assert_eq!(err.record_index(), Some(1));
    }

    #[test]
    fn test_non_string_field_is_rejected() {
        let err = parse_yaml(b"- path: /x\n  url: [1, 2]\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidRecord { index: 0, .. }));

        let err = parse_json(br#"[{"path": "/x", "url": 42}]"#).unwrap_err();
        assert!(matches!(err, ParseError::InvalidRecord { index: 0, .. }));
    }

    #[test]
    fn test_non_mapping_element_is_rejected() {
        let err = parse_yaml(b"- /just-a-string\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidRecord { index: 0, .. }));
    }

    #[test]
    fn test_top_level_must_be_a_sequence() {
        let err = parse_yaml(b"path: /x\nurl: https://x\n").unwrap_err();
        assert_eq!(err, ParseError::NotASequence { found: "a mapping" });
    }

    #[test]
    fn test_malformed_document() {
        let err = parse_yaml(b"- path: [unclosed\n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { format: "YAML", .. }));

        let err = parse_json(b"[{\"path\": ").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { format: "JSON", .. }));
    }

    #[test]
    fn test_invalid_utf8() {
        let err = parse_yaml(&[b'-', b' ', 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, ParseError::Encoding(_)));
    }

    #[test]
    fn test_empty_documents() {
        assert!(parse_yaml(b"").unwrap().is_empty());
        assert!(parse_yaml(b"  \n\n").unwrap().is_empty());
        assert!(parse_yaml(b"[]").unwrap().is_empty());
        assert!(parse_json(b"[]").unwrap().is_empty());
        assert!(parse_json(b"null").unwrap().is_empty());
    }

    #[test]
    fn test_json_document() {
        let doc = br#"[
            {"path": "/dogs", "url": "https://en.wikipedia.org/wiki/Dog"},
            {"url": "https://en.wikipedia.org/wiki/Cat", "path": "/cats", "extra": true}
        ]"#;
        let records = parse_json(doc).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1], PathRecord::new("/cats", "https://en.wikipedia.org/wiki/Cat"));
    }
}
