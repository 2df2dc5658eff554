//! Row-value transformation for the target store.
//!
//! MySQL drivers report some scalar values in forms Spanner clients will
//! not accept as-is; notably, decimals arrive as strings. This module
//! rewrites row values per column, keyed by the same cleaned type name the
//! DDL mapper dispatches on. Unhandled types pass through untouched.

use serde_json::{Number, Value};
use spanbridge_mysql::ColumnDescriptor;

use crate::mapper::split_raw_type;

/// Transforms every row, rewriting values of columns whose type needs it.
///
/// Row fields without a matching described column pass through unchanged,
/// as do non-object rows.
#[must_use]
pub fn transform_rows(columns: &[ColumnDescriptor], rows: Vec<Value>) -> Vec<Value> {
    rows.into_iter()
        .map(|mut row| {
            if let Value::Object(fields) = &mut row {
                for (name, value) in fields.iter_mut() {
                    if let Some(column) = columns.iter().find(|c| c.name == *name) {
                        let (keyword, _) = split_raw_type(&column.raw_type);
                        *value = transform_value(&keyword, value.take());
                    }
                }
            }
            row
        })
        .collect()
}

fn transform_value(keyword: &str, value: Value) -> Value {
    match keyword {
        // Spanner NUMERIC values travel as 64-bit floats
        "decimal" => match value {
            Value::String(s) => match s.parse::<f64>().ok().and_then(Number::from_f64) {
                Some(n) => Value::Number(n),
                None => Value::String(s),
            },
            Value::Number(n) => match n.as_f64().and_then(Number::from_f64) {
                Some(f) => Value::Number(f),
                None => Value::Number(n),
            },
            other => other,
        },
        _ => value,
    }
}
