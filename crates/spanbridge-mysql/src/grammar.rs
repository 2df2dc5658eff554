//! Introspection query templates for the source database.
//!
//! These are the two statements a migration tool runs against MySQL to
//! obtain the inputs the DDL compiler consumes: the described table and its
//! key-usage records.

/// Returns the statement describing a table's columns.
#[must_use]
pub fn table_details(table_name: &str) -> String {
    format!("DESCRIBE {table_name};")
}

/// Returns the statement fetching a table's key-usage records.
#[must_use]
pub fn table_key_details(table_name: &str) -> String {
    format!(
        "SELECT TABLE_NAME, COLUMN_NAME, CONSTRAINT_NAME, \
         REFERENCED_TABLE_NAME, REFERENCED_COLUMN_NAME \
         FROM INFORMATION_SCHEMA.KEY_COLUMN_USAGE \
         WHERE TABLE_NAME = '{table_name}';"
    )
}
