//! Error types for the introspection boundary.

/// Errors raised while normalizing introspection output into typed records.
#[derive(Debug, thiserror::Error)]
pub enum DescribeError {
    /// An introspection row carries field names outside the documented set.
    #[error("There's invalid column keys for the {origin}")]
    MalformedInput {
        /// Which record set was malformed ("described table" or "described keys").
        origin: &'static str,
    },

    /// A column key marker is not one of "", "PRI", "MUL" or "UNI".
    #[error("Column key type must be \"PRI\", \"MUL\" or \"UNI\", got \"{0}\"")]
    InvalidKeyMarker(String),
}

/// Result type for introspection-boundary operations.
pub type Result<T> = std::result::Result<T, DescribeError>;
