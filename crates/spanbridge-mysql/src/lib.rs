//! MySQL introspection model for schema translation.
//!
//! This crate covers the source side of a MySQL-to-Spanner schema
//! migration: it defines typed records for what MySQL's introspection
//! facilities return and the queries that produce them.
//!
//! - [`describe`] - the described-table and key-usage record types, plus
//!   guard functions that normalize raw driver rows into them.
//! - [`grammar`] - the `DESCRIBE` and `KEY_COLUMN_USAGE` query templates.
//!
//! The DDL compiler itself lives in the `spanbridge-spanner` crate and
//! consumes these types.

pub mod describe;
pub mod error;
pub mod grammar;

pub use describe::{columns_from_rows, keys_from_rows, ColumnDescriptor, KeyMarker, KeyUsage};
pub use error::{DescribeError, Result};
