//! Typed records for MySQL table introspection output.
//!
//! MySQL exposes table structure through `DESCRIBE <table>` and key
//! constraints through `INFORMATION_SCHEMA.KEY_COLUMN_USAGE`. The types here
//! give both result sets a single well-defined shape, and the guard
//! functions normalize raw JSON rows (as a driver would hand them over)
//! into those types before anything downstream sees them.

use serde::{Deserialize, Serialize};

use crate::error::{DescribeError, Result};

/// Key marker reported in the `Key` field of a DESCRIBE row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KeyMarker {
    /// No key participation (empty `Key` field).
    #[default]
    None,
    /// `PRI` — part of the primary key.
    Primary,
    /// `MUL` — first column of a non-unique index, or a foreign/composite key member.
    Multi,
    /// `UNI` — first column of a unique index.
    Unique,
}

impl KeyMarker {
    /// Parses the marker string MySQL reports in the `Key` column.
    ///
    /// # Errors
    ///
    /// Returns [`DescribeError::InvalidKeyMarker`] for anything outside
    /// `""`, `"PRI"`, `"MUL"` and `"UNI"`.
    pub fn parse(marker: &str) -> Result<Self> {
        match marker {
            "" => Ok(Self::None),
            "PRI" => Ok(Self::Primary),
            "MUL" => Ok(Self::Multi),
            "UNI" => Ok(Self::Unique),
            other => Err(DescribeError::InvalidKeyMarker(other.to_string())),
        }
    }

    /// Returns the marker string as MySQL reports it.
    #[must_use]
    pub fn as_mysql(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Primary => "PRI",
            Self::Multi => "MUL",
            Self::Unique => "UNI",
        }
    }
}

/// One column of a described table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name (`Field`).
    pub name: String,
    /// Raw MySQL type as reported, e.g. `varchar(255)` or `bigint unsigned`.
    pub raw_type: String,
    /// Whether the column accepts NULL (`Null` != "NO").
    pub nullable: bool,
    /// Default value (`Default`), if any.
    pub default_value: Option<String>,
    /// Key participation marker (`Key`).
    pub key: KeyMarker,
    /// Extra attributes (`Extra`), e.g. `auto_increment`.
    pub extra: String,
}

impl ColumnDescriptor {
    /// Creates a nullable, unkeyed column descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>, raw_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_type: raw_type.into(),
            nullable: true,
            default_value: None,
            key: KeyMarker::None,
            extra: String::new(),
        }
    }

    /// Marks the column NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Sets the key marker.
    #[must_use]
    pub fn key(mut self, marker: KeyMarker) -> Self {
        self.key = marker;
        self
    }

    /// Sets the extra attributes string.
    #[must_use]
    pub fn extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = extra.into();
        self
    }
}

/// One row of `INFORMATION_SCHEMA.KEY_COLUMN_USAGE` for the table.
///
/// A non-null [`referenced_table`](Self::referenced_table) distinguishes a
/// foreign-key usage from a plain unique/composite-key usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyUsage {
    /// Table owning the constraint.
    #[serde(rename = "TABLE_NAME")]
    pub table_name: String,
    /// Participating column.
    #[serde(rename = "COLUMN_NAME")]
    pub column_name: String,
    /// Constraint name.
    #[serde(rename = "CONSTRAINT_NAME")]
    pub constraint_name: String,
    /// Referenced table, for foreign keys.
    #[serde(rename = "REFERENCED_TABLE_NAME")]
    pub referenced_table: Option<String>,
    /// Referenced column, for foreign keys.
    #[serde(rename = "REFERENCED_COLUMN_NAME")]
    pub referenced_column: Option<String>,
}

impl KeyUsage {
    /// Creates a usage record without a referenced table (unique/composite key).
    #[must_use]
    pub fn unique(
        table_name: impl Into<String>,
        column_name: impl Into<String>,
        constraint_name: impl Into<String>,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            column_name: column_name.into(),
            constraint_name: constraint_name.into(),
            referenced_table: None,
            referenced_column: None,
        }
    }

    /// Creates a foreign-key usage record.
    #[must_use]
    pub fn foreign(
        table_name: impl Into<String>,
        column_name: impl Into<String>,
        constraint_name: impl Into<String>,
        referenced_table: impl Into<String>,
        referenced_column: impl Into<String>,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            column_name: column_name.into(),
            constraint_name: constraint_name.into(),
            referenced_table: Some(referenced_table.into()),
            referenced_column: Some(referenced_column.into()),
        }
    }
}

/// Raw DESCRIBE row, exactly as the driver reports it.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDescribeRow {
    #[serde(rename = "Field")]
    field: String,
    #[serde(rename = "Type")]
    column_type: String,
    #[serde(rename = "Null")]
    null: String,
    #[serde(rename = "Key")]
    key: String,
    #[serde(rename = "Default")]
    default: Option<String>,
    #[serde(rename = "Extra", default)]
    extra: String,
}

/// Normalizes raw DESCRIBE rows into [`ColumnDescriptor`] records.
///
/// # Errors
///
/// Returns [`DescribeError::MalformedInput`] when a row carries field names
/// outside `{Field, Type, Null, Key, Default, Extra}`, and
/// [`DescribeError::InvalidKeyMarker`] when a `Key` value is unrecognized.
pub fn columns_from_rows(rows: &[serde_json::Value]) -> Result<Vec<ColumnDescriptor>> {
    rows.iter()
        .map(|row| {
            let raw: RawDescribeRow = serde_json::from_value(row.clone())
                .map_err(|_| DescribeError::MalformedInput { origin: "described table" })?;
            Ok(ColumnDescriptor {
                name: raw.field,
                raw_type: raw.column_type,
                nullable: raw.null != "NO",
                default_value: raw.default,
                key: KeyMarker::parse(&raw.key)?,
                extra: raw.extra,
            })
        })
        .collect()
}

/// Normalizes raw `KEY_COLUMN_USAGE` rows into [`KeyUsage`] records.
///
/// # Errors
///
/// Returns [`DescribeError::MalformedInput`] when a row carries field names
/// outside the five documented `KEY_COLUMN_USAGE` columns.
pub fn keys_from_rows(rows: &[serde_json::Value]) -> Result<Vec<KeyUsage>> {
    rows.iter()
        .map(|row| {
            serde_json::from_value(row.clone())
                .map_err(|_| DescribeError::MalformedInput { origin: "described keys" })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_marker_parse() {
        assert_eq!(KeyMarker::parse("").unwrap(), KeyMarker::None);
        assert_eq!(KeyMarker::parse("PRI").unwrap(), KeyMarker::Primary);
        assert_eq!(KeyMarker::parse("MUL").unwrap(), KeyMarker::Multi);
        assert_eq!(KeyMarker::parse("UNI").unwrap(), KeyMarker::Unique);
    }

    #[test]
    fn test_key_marker_parse_rejects_unknown() {
        let err = KeyMarker::parse("SPATIAL").unwrap_err();
        assert!(matches!(err, DescribeError::InvalidKeyMarker(ref m) if m == "SPATIAL"));
    }

    #[test]
    fn test_column_descriptor_builder() {
        let col = ColumnDescriptor::new("id", "bigint unsigned")
            .not_null()
            .key(KeyMarker::Primary)
            .extra("auto_increment");

        assert_eq!(col.name, "id");
        assert_eq!(col.raw_type, "bigint unsigned");
        assert!(!col.nullable);
        assert_eq!(col.key, KeyMarker::Primary);
        assert_eq!(col.extra, "auto_increment");
    }

    #[test]
    fn test_columns_from_rows() {
        let rows = vec![json!({
            "Field": "airline",
            "Type": "varchar(255)",
            "Null": "YES",
            "Key": "",
            "Default": null,
            "Extra": ""
        })];

        let columns = columns_from_rows(&rows).unwrap();
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].name, "airline");
        assert_eq!(columns[0].raw_type, "varchar(255)");
        assert!(columns[0].nullable);
        assert_eq!(columns[0].key, KeyMarker::None);
        assert_eq!(columns[0].default_value, None);
    }

    #[test]
    fn test_columns_from_rows_rejects_unknown_field() {
        let rows = vec![json!({
            "Field": "airline",
            "Error": "varchar(255)",
            "Null": "YES",
            "Key": "",
            "Default": null,
            "Extra": ""
        })];

        let err = columns_from_rows(&rows).unwrap_err();
        assert_eq!(
            err.to_string(),
            "There's invalid column keys for the described table"
        );
    }

    #[test]
    fn test_keys_from_rows() {
        let rows = vec![json!({
            "TABLE_NAME": "flights",
            "COLUMN_NAME": "airline_id",
            "CONSTRAINT_NAME": "flights_airline_fk",
            "REFERENCED_TABLE_NAME": "airlines",
            "REFERENCED_COLUMN_NAME": "id"
        })];

        let keys = keys_from_rows(&rows).unwrap();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].constraint_name, "flights_airline_fk");
        assert_eq!(keys[0].referenced_table.as_deref(), Some("airlines"));
    }

    #[test]
    fn test_keys_from_rows_rejects_unknown_field() {
        let rows = vec![json!({
            "TABLE_NAME": "flights",
            "COLUMN_NAME_ERROR": "id",
            "CONSTRAINT_NAME": "PRIMARY",
            "REFERENCED_TABLE_NAME": null,
            "REFERENCED_COLUMN_NAME": null
        })];

        let err = keys_from_rows(&rows).unwrap_err();
        assert_eq!(
            err.to_string(),
            "There's invalid column keys for the described keys"
        );
    }
}
