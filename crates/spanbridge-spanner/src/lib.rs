//! Cloud Spanner DDL compiler for described MySQL tables.
//!
//! Given a table's `DESCRIBE` output and its `KEY_COLUMN_USAGE` records
//! (typed by the `spanbridge-mysql` crate), this crate produces the Spanner
//! DDL a migration tool applies: one `CREATE TABLE` statement, the unique
//! and secondary `CREATE INDEX` statements, and the foreign-key
//! `ALTER TABLE` constraints.
//!
//! # Architecture
//!
//! - **[`mapper`]** - maps raw MySQL column types to Spanner type fragments,
//!   including default sizes and unsupported-type degradation.
//! - **[`classifier`]** - resolves the ambiguous per-column key markers into
//!   primary/foreign/unique/secondary buckets and synthesizes a primary key
//!   when the table has none.
//! - **[`assembler`]** - renders the statement text, byte-exact.
//! - **[`compiler`]** - the orchestrator tying the three together.
//! - **[`transform`]** - rewrites row values (e.g. decimal strings) into
//!   target-native scalars for data copies.
//!
//! # Example
//!
//! ```rust
//! use spanbridge_mysql::{ColumnDescriptor, KeyMarker, KeyUsage};
//! use spanbridge_spanner::prelude::*;
//!
//! let request = CompileRequest::new("test")
//!     .columns(vec![
//!         ColumnDescriptor::new("id", "integer").not_null().key(KeyMarker::Primary),
//!         ColumnDescriptor::new("email", "varchar(255)").not_null().key(KeyMarker::Unique),
//!     ])
//!     .keys(vec![KeyUsage::unique("test", "email", "test_email_unique")]);
//!
//! let schema = SchemaCompiler::new().compile(&request)?;
//! assert!(schema.tables[0].starts_with("CREATE TABLE `test` ("));
//! assert_eq!(schema.indexes.len(), 1);
//! # Ok::<(), spanbridge_spanner::CompileError>(())
//! ```

pub mod assembler;
pub mod classifier;
pub mod compiler;
pub mod error;
pub mod mapper;
pub mod transform;

pub use compiler::{CompileRequest, CompilerConfig, SchemaCompiler};
pub use error::{CompileError, Result};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::assembler::{CompiledColumn, CompiledSchema};
    pub use crate::classifier::{classify, KeyBuckets, UniqueGroup};
    pub use crate::compiler::{CompileRequest, CompilerConfig, SchemaCompiler};
    pub use crate::error::{CompileError, Result};
    pub use crate::mapper::{map_type, MappedType, MAX_BYTES_LENGTH, MAX_STRING_LENGTH};
    pub use crate::transform::transform_rows;
}
