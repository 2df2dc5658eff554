//! Error types for the Spanner DDL compiler.

use spanbridge_mysql::DescribeError;

/// Errors that can occur while compiling a described table to Spanner DDL.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// A `UNI`-marked column has no matching key-usage record.
    #[error("Details for the key {column} not found, provide them in the key-usage records")]
    MissingKeyDetail {
        /// The column whose constraint detail is missing.
        column: String,
    },

    /// The table has no primary key and synthesis is disabled.
    #[error("The table has no primary key and primary key assignment is disabled")]
    PrimaryKeyNotFound,

    /// A column type has no Spanner mapping and no viable fallback.
    #[error("No Spanner mapping for MySQL type '{type_name}'")]
    UnmappedType {
        /// The cleaned source type keyword.
        type_name: String,
    },

    /// The raw introspection input failed boundary validation.
    #[error(transparent)]
    Describe(#[from] DescribeError),
}

/// Result type for compiler operations.
pub type Result<T> = std::result::Result<T, CompileError>;
