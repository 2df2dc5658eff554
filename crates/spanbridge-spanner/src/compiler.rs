//! The schema compiler orchestrator.
//!
//! Drives classification, type mapping, and statement assembly over one
//! described table. All working state lives in locals inside [`SchemaCompiler::compile`],
//! so an instance is freely reusable and a failed call leaves nothing
//! behind for the next one.

use serde_json::Value;
use spanbridge_mysql::{columns_from_rows, keys_from_rows, ColumnDescriptor, KeyUsage};
use tracing::debug;

use crate::assembler::{assemble, CompiledColumn, CompiledSchema};
use crate::classifier::classify;
use crate::error::Result;
use crate::mapper::map_type;

/// Compiler configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerConfig {
    /// Column name used when a primary key must be synthesized.
    pub default_id_name: String,
    /// Whether to synthesize a primary key when the table declares none.
    pub assign_primary_key: bool,
    /// Whether to terminate every statement with `;`.
    pub assign_terminator: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            default_id_name: "id".to_string(),
            assign_primary_key: true,
            assign_terminator: true,
        }
    }
}

/// One table's worth of compiler input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileRequest {
    /// Table to create on the target side.
    pub table_name: String,
    /// Described columns, in table order.
    pub columns: Vec<ColumnDescriptor>,
    /// Key-usage records for the table.
    pub keys: Vec<KeyUsage>,
}

impl CompileRequest {
    /// Creates a request with no columns or keys.
    #[must_use]
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            columns: Vec::new(),
            keys: Vec::new(),
        }
    }

    /// Sets the described columns.
    #[must_use]
    pub fn columns(mut self, columns: Vec<ColumnDescriptor>) -> Self {
        self.columns = columns;
        self
    }

    /// Sets the key-usage records.
    #[must_use]
    pub fn keys(mut self, keys: Vec<KeyUsage>) -> Self {
        self.keys = keys;
        self
    }
}

/// Compiles described MySQL tables into Cloud Spanner DDL.
#[derive(Debug, Clone, Default)]
pub struct SchemaCompiler {
    config: CompilerConfig,
}

impl SchemaCompiler {
    /// Creates a compiler with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a compiler with the given configuration.
    #[must_use]
    pub fn with_config(config: CompilerConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compiles one described table into its DDL statement groups.
    ///
    /// The request is not mutated; the column sequence is copied so
    /// primary-key synthesis can prepend to it.
    ///
    /// # Errors
    ///
    /// Fails with the classification and type-mapping errors documented on
    /// [`crate::error::CompileError`]; no partial output is produced.
    pub fn compile(&self, request: &CompileRequest) -> Result<CompiledSchema> {
        let table_name = request.table_name.to_lowercase();
        debug!(table = %table_name, columns = request.columns.len(), "compiling described table");

        let mut columns = request.columns.clone();
        let buckets = classify(
            &mut columns,
            &request.keys,
            &self.config.default_id_name,
            self.config.assign_primary_key,
        )?;

        let compiled: Vec<CompiledColumn> = columns
            .iter()
            .map(|column| {
                Ok(CompiledColumn {
                    name: column.name.clone(),
                    mapped: map_type(&column.raw_type, column.default_value.as_deref())?,
                    not_null: !column.nullable,
                })
            })
            .collect::<Result<_>>()?;

        let schema = assemble(&table_name, &compiled, &buckets, self.config.assign_terminator);
        debug!(
            table = %table_name,
            indexes = schema.indexes.len(),
            constraints = schema.constraints.len(),
            "compiled schema"
        );
        Ok(schema)
    }

    /// Compiles raw introspection rows, running them through the shape
    /// guard first.
    ///
    /// # Errors
    ///
    /// Fails with `MalformedInput`/`InvalidKeyMarker` when the rows do not
    /// match the documented introspection shape, or with any error
    /// [`compile`](Self::compile) produces.
    pub fn compile_rows(
        &self,
        table_name: &str,
        column_rows: &[Value],
        key_rows: &[Value],
    ) -> Result<CompiledSchema> {
        let request = CompileRequest::new(table_name)
            .columns(columns_from_rows(column_rows)?)
            .keys(keys_from_rows(key_rows)?);
        self.compile(&request)
    }
}
