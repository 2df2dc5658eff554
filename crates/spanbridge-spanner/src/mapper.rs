//! MySQL-to-Spanner column type mapping.
//!
//! Maps a raw MySQL type string (as reported by `DESCRIBE`, e.g.
//! `varchar(255)` or `bigint unsigned`) to a Spanner column type fragment.
//! The first parenthesized parameter is kept as a size hint; everything in
//! parentheses plus all whitespace is stripped to obtain the bare keyword
//! the mapping dispatches on.

use crate::error::{CompileError, Result};

/// Maximum STRING length Cloud Spanner accepts.
pub const MAX_STRING_LENGTH: u64 = 2_621_440;

/// Maximum BYTES length Cloud Spanner accepts.
pub const MAX_BYTES_LENGTH: u64 = 10_485_760;

/// A mapped column type: the Spanner type fragment plus an optional
/// trailing options clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedType {
    /// Spanner type fragment, e.g. `STRING(255)` or `INT64`.
    pub fragment: String,
    /// Trailing options clause, e.g. `OPTIONS (allow_commit_timestamp=true)`.
    pub options: Option<String>,
}

impl MappedType {
    fn plain(fragment: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
            options: None,
        }
    }
}

/// Maps a raw MySQL type to its Spanner rendering.
///
/// An unmapped keyword ending in `unsigned` is retried with the suffix
/// stripped, so unsigned variants degrade to their base type.
///
/// # Errors
///
/// Returns [`CompileError::UnmappedType`] when neither the keyword nor its
/// unsigned-stripped form has a mapping.
pub fn map_type(raw_type: &str, default_value: Option<&str>) -> Result<MappedType> {
    let (keyword, param) = split_raw_type(raw_type);

    if let Some(mapped) = render(&keyword, param.as_deref(), default_value) {
        return Ok(mapped);
    }
    if let Some(base) = keyword.strip_suffix("unsigned") {
        if let Some(mapped) = render(base, param.as_deref(), default_value) {
            return Ok(mapped);
        }
    }
    Err(CompileError::UnmappedType { type_name: keyword })
}

/// Splits a raw type into its bare keyword and first parenthesized parameter.
///
/// All parenthesized groups and whitespace are removed from the keyword;
/// an empty parameter list counts as absent.
pub(crate) fn split_raw_type(raw_type: &str) -> (String, Option<String>) {
    let mut keyword = String::new();
    let mut param: Option<String> = None;
    let mut current = String::new();
    let mut depth = 0usize;

    for c in raw_type.chars() {
        match c {
            '(' => depth += 1,
            ')' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    if param.is_none() && !current.is_empty() {
                        param = Some(current.clone());
                    }
                    current.clear();
                }
            }
            _ if depth > 0 => current.push(c),
            _ if c.is_whitespace() => {}
            _ => keyword.push(c),
        }
    }

    (keyword, param)
}

fn render(keyword: &str, param: Option<&str>, default_value: Option<&str>) -> Option<MappedType> {
    let mapped = match keyword {
        "char" | "varchar" | "tinytext" => {
            MappedType::plain(format!("STRING({})", param.unwrap_or("255")))
        }
        "text" => MappedType::plain("STRING(65535)"),
        "mediumtext" | "longtext" | "json" => {
            MappedType::plain(format!("STRING({MAX_STRING_LENGTH})"))
        }
        "decimal" => MappedType::plain("NUMERIC"),
        "double" | "float" => MappedType::plain("FLOAT64"),
        "bool" | "boolean" => MappedType::plain("BOOL"),
        // tinyint(1) is MySQL's boolean; any other display width is a count
        "tinyint" => match param {
            Some(p) if p != "1" => MappedType::plain("INT64"),
            _ => MappedType::plain("BOOL"),
        },
        "int" | "integer" | "smallint" | "mediumint" | "bigint" | "bigintegerunsigned"
        | "mediumintegerunsigned" | "smallintegerunsigned" => MappedType::plain("INT64"),
        "date" => MappedType::plain("DATE"),
        "datetime" | "timestamp" => MappedType {
            fragment: "TIMESTAMP".to_string(),
            options: (default_value == Some("CURRENT_TIMESTAMP"))
                .then(|| "OPTIONS (allow_commit_timestamp=true)".to_string()),
        },
        "time" => MappedType::plain("STRING(50)"),
        "enum" => MappedType::plain("STRING(255)"),
        "year" => MappedType::plain("STRING(4)"),
        "set" => MappedType::plain("ARRAY<STRING(255)>"),
        "blob" => MappedType::plain(format!("BYTES({})", bytes_size(param, 65535))),
        "tinyblob" => MappedType::plain(format!("BYTES({})", bytes_size(param, 255))),
        "mediumblob" | "longblob" | "varbinary" | "binary" => {
            MappedType::plain(format!("BYTES({})", bytes_size(param, MAX_BYTES_LENGTH)))
        }
        // spatial types Spanner does not support degrade to a bounded string
        "geometry" | "geometrycollection" | "point" | "linestring" | "polygon" | "multipoint"
        | "multipolygon" => MappedType::plain("STRING(1000)"),
        _ => return None,
    };
    Some(mapped)
}

fn bytes_size(param: Option<&str>, fallback: u64) -> u64 {
    param
        .and_then(|p| {
            let digits: String = p.chars().take_while(char::is_ascii_digit).collect();
            digits.parse().ok()
        })
        .unwrap_or(fallback)
}
