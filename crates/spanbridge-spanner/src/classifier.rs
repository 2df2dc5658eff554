//! Key classification for described tables.
//!
//! A MySQL `DESCRIBE` row only carries an ambiguous per-column marker
//! (`PRI`, `MUL`, `UNI`); the key-usage records disambiguate it. This module
//! sorts every keyed column into one of four buckets and synthesizes a
//! primary key when the table declares none.

use spanbridge_mysql::{ColumnDescriptor, KeyMarker, KeyUsage};

use crate::error::{CompileError, Result};

/// Source type given to a synthesized primary-key column.
const SYNTHESIZED_PK_TYPE: &str = "biginteger unsigned";

/// A unique index rendered from one constraint name.
///
/// Multiple columns sharing a constraint name collapse into a single group,
/// with participating columns in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueGroup {
    /// Constraint name, used as the index name.
    pub constraint_name: String,
    /// Table the index is created on (from the key-usage record).
    pub table_name: String,
    /// Participating columns, first-seen order, deduplicated.
    pub columns: Vec<String>,
    /// Whether any participating column is nullable.
    pub null_filtered: bool,
}

/// The four key buckets a classified table resolves into.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyBuckets {
    /// Primary-key column names, insertion order.
    pub primary_keys: Vec<String>,
    /// Foreign-key usage records, insertion order.
    pub foreign_keys: Vec<KeyUsage>,
    /// Unique-index groups, first-seen constraint order.
    pub unique_groups: Vec<UniqueGroup>,
    /// Columns carrying a plain non-unique index.
    pub secondary_indexes: Vec<String>,
}

/// Classifies every keyed column into the four buckets.
///
/// Dispatch per marker:
/// - `PRI` resolves directly into the primary keys.
/// - `UNI` requires a matching key-usage record and joins that constraint's
///   unique group.
/// - `MUL` with a record referencing another table is a foreign key; with a
///   record referencing nothing it joins a unique group (composite unique
///   keys surface as `MUL` across their columns); with no record at all it
///   becomes a secondary index.
///
/// When no primary key emerges, a column named `default_id_name` is either
/// promoted (if it already exists) or synthesized and prepended to
/// `columns` so it renders first.
///
/// # Errors
///
/// Returns [`CompileError::MissingKeyDetail`] for a `UNI` column without a
/// usage record, and [`CompileError::PrimaryKeyNotFound`] when the table
/// has no primary key and `allow_synthesis` is false.
pub fn classify(
    columns: &mut Vec<ColumnDescriptor>,
    keys: &[KeyUsage],
    default_id_name: &str,
    allow_synthesis: bool,
) -> Result<KeyBuckets> {
    let mut buckets = KeyBuckets::default();

    for column in columns.iter() {
        let detail = keys.iter().find(|k| k.column_name == column.name);
        match column.key {
            KeyMarker::None => {}
            KeyMarker::Primary => buckets.primary_keys.push(column.name.clone()),
            KeyMarker::Unique => {
                let record = detail.ok_or_else(|| CompileError::MissingKeyDetail {
                    column: column.name.clone(),
                })?;
                add_unique_group(&mut buckets.unique_groups, record, keys, columns);
            }
            KeyMarker::Multi => match detail {
                Some(record) if record.referenced_table.is_some() => {
                    buckets.foreign_keys.push(record.clone());
                }
                Some(record) => {
                    add_unique_group(&mut buckets.unique_groups, record, keys, columns);
                }
                None => buckets.secondary_indexes.push(column.name.clone()),
            },
        }
    }

    if buckets.primary_keys.is_empty() {
        if !allow_synthesis {
            return Err(CompileError::PrimaryKeyNotFound);
        }
        // an existing column with the default id name is promoted instead of
        // inserting a duplicate
        if !columns.iter().any(|c| c.name == default_id_name) {
            columns.insert(
                0,
                ColumnDescriptor::new(default_id_name, SYNTHESIZED_PK_TYPE)
                    .not_null()
                    .key(KeyMarker::Primary)
                    .extra("auto_increment"),
            );
        }
        buckets.primary_keys.push(default_id_name.to_string());
    }

    Ok(buckets)
}

/// Folds a key-usage record into its unique group, creating the group from
/// every record sharing the constraint name on first sight.
fn add_unique_group(
    groups: &mut Vec<UniqueGroup>,
    record: &KeyUsage,
    keys: &[KeyUsage],
    columns: &[ColumnDescriptor],
) {
    if groups.iter().any(|g| g.constraint_name == record.constraint_name) {
        return;
    }

    let mut group_columns: Vec<String> = Vec::new();
    for usage in keys.iter().filter(|k| k.constraint_name == record.constraint_name) {
        if !group_columns.contains(&usage.column_name) {
            group_columns.push(usage.column_name.clone());
        }
    }

    // a column absent from the described table counts as nullable
    let null_filtered = group_columns.iter().any(|name| {
        columns
            .iter()
            .find(|c| c.name == *name)
            .map_or(true, |c| c.nullable)
    });

    groups.push(UniqueGroup {
        constraint_name: record.constraint_name.clone(),
        table_name: record.table_name.clone(),
        columns: group_columns,
        null_filtered,
    });
}
