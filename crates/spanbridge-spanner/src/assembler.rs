//! Rendering of Spanner DDL statements.
//!
//! Takes mapped columns and classified key buckets and produces the final
//! statement text. Layout is byte-exact: one newline between column lines,
//! backquoted identifiers, and an optional `;` terminator controlled by a
//! single toggle.

use crate::classifier::KeyBuckets;
use crate::mapper::MappedType;

/// A column ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledColumn {
    /// Column name.
    pub name: String,
    /// Mapped Spanner type.
    pub mapped: MappedType,
    /// Whether to append `NOT NULL`.
    pub not_null: bool,
}

/// The compiled DDL, grouped the way a migration tool applies it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledSchema {
    /// Table-creation statements (single element).
    pub tables: Vec<String>,
    /// Index-creation statements, unique indexes before secondary ones.
    pub indexes: Vec<String>,
    /// Foreign-key constraint statements.
    pub constraints: Vec<String>,
}

/// Renders the table, index, and constraint statements.
#[must_use]
pub fn assemble(
    table_name: &str,
    columns: &[CompiledColumn],
    buckets: &KeyBuckets,
    assign_terminator: bool,
) -> CompiledSchema {
    let terminator = if assign_terminator { ";" } else { "" };

    let mut indexes = render_unique_indexes(buckets, terminator);
    indexes.extend(render_secondary_indexes(table_name, buckets, terminator));

    CompiledSchema {
        tables: vec![render_table(table_name, columns, buckets, terminator)],
        indexes,
        constraints: render_foreign_keys(table_name, buckets, terminator),
    }
}

fn render_table(
    table_name: &str,
    columns: &[CompiledColumn],
    buckets: &KeyBuckets,
    terminator: &str,
) -> String {
    let mut sql = format!("CREATE TABLE `{table_name}` (\n");

    for (i, column) in columns.iter().enumerate() {
        sql.push('`');
        sql.push_str(&column.name);
        sql.push_str("` ");
        sql.push_str(&column.mapped.fragment);
        if column.not_null {
            sql.push_str(" NOT NULL");
        }
        if let Some(options) = &column.mapped.options {
            sql.push(' ');
            sql.push_str(options);
        }
        if i + 1 < columns.len() {
            sql.push_str(",\n");
        }
    }

    sql.push_str("\n) PRIMARY KEY (");
    sql.push_str(&buckets.primary_keys.join(","));
    sql.push(')');
    sql.push_str(terminator);
    sql
}

fn render_unique_indexes(buckets: &KeyBuckets, terminator: &str) -> Vec<String> {
    buckets
        .unique_groups
        .iter()
        .map(|group| {
            let null_filtered = if group.null_filtered { " NULL_FILTERED" } else { "" };
            format!(
                "CREATE UNIQUE{null_filtered} INDEX `{}` ON `{}` (`{}`){terminator}",
                group.constraint_name,
                group.table_name,
                group.columns.join("`, `"),
            )
        })
        .collect()
}

fn render_secondary_indexes(
    table_name: &str,
    buckets: &KeyBuckets,
    terminator: &str,
) -> Vec<String> {
    buckets
        .secondary_indexes
        .iter()
        .map(|column| {
            let index_name = format!("{}By{}", ucfirst(table_name), ucfirst(column));
            format!("CREATE INDEX `{index_name}` ON `{table_name}` (`{column}`){terminator}")
        })
        .collect()
}

fn render_foreign_keys(table_name: &str, buckets: &KeyBuckets, terminator: &str) -> Vec<String> {
    buckets
        .foreign_keys
        .iter()
        .map(|foreign| {
            format!(
                "ALTER TABLE `{table_name}` ADD CONSTRAINT `{}` FOREIGN KEY (`{}`) \
                 REFERENCES `{}` (`{}`){terminator}",
                foreign.constraint_name,
                foreign.column_name,
                foreign.referenced_table.as_deref().unwrap_or_default(),
                foreign.referenced_column.as_deref().unwrap_or_default(),
            )
        })
        .collect()
}

fn ucfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::UniqueGroup;
    use spanbridge_mysql::KeyUsage;

    fn col(name: &str, fragment: &str, not_null: bool) -> CompiledColumn {
        CompiledColumn {
            name: name.to_string(),
            mapped: MappedType {
                fragment: fragment.to_string(),
                options: None,
            },
            not_null,
        }
    }

    fn pk_buckets() -> KeyBuckets {
        KeyBuckets {
            primary_keys: vec!["id".to_string()],
            ..KeyBuckets::default()
        }
    }

    #[test]
    fn test_render_table() {
        let columns = vec![col("id", "INT64", true), col("airline", "STRING(255)", false)];
        let schema = assemble("flights", &columns, &pk_buckets(), true);

        assert_eq!(
            schema.tables,
            vec![
                "CREATE TABLE `flights` (\n\
                 `id` INT64 NOT NULL,\n\
                 `airline` STRING(255)\n\
                 ) PRIMARY KEY (id);"
            ]
        );
    }

    #[test]
    fn test_render_table_without_terminator() {
        let columns = vec![col("id", "INT64", true)];
        let schema = assemble("flights", &columns, &pk_buckets(), false);

        assert!(schema.tables[0].ends_with(") PRIMARY KEY (id)"));
    }

    #[test]
    fn test_render_column_options() {
        let columns = vec![
            col("id", "INT64", true),
            CompiledColumn {
                name: "created_at".to_string(),
                mapped: MappedType {
                    fragment: "TIMESTAMP".to_string(),
                    options: Some("OPTIONS (allow_commit_timestamp=true)".to_string()),
                },
                not_null: true,
            },
        ];
        let schema = assemble("flights", &columns, &pk_buckets(), true);

        assert!(schema.tables[0]
            .contains("`created_at` TIMESTAMP NOT NULL OPTIONS (allow_commit_timestamp=true)"));
    }

    #[test]
    fn test_composite_primary_key_join() {
        let columns = vec![col("a", "INT64", true), col("b", "INT64", true)];
        let buckets = KeyBuckets {
            primary_keys: vec!["a".to_string(), "b".to_string()],
            ..KeyBuckets::default()
        };
        let schema = assemble("pairs", &columns, &buckets, true);

        assert!(schema.tables[0].ends_with(") PRIMARY KEY (a,b);"));
    }

    #[test]
    fn test_render_unique_index() {
        let buckets = KeyBuckets {
            primary_keys: vec!["id".to_string()],
            unique_groups: vec![UniqueGroup {
                constraint_name: "users_email_unique".to_string(),
                table_name: "users".to_string(),
                columns: vec!["email".to_string()],
                null_filtered: false,
            }],
            ..KeyBuckets::default()
        };
        let schema = assemble("users", &[col("id", "INT64", true)], &buckets, true);

        assert_eq!(
            schema.indexes,
            vec!["CREATE UNIQUE INDEX `users_email_unique` ON `users` (`email`);"]
        );
    }

    #[test]
    fn test_render_null_filtered_unique_index() {
        let buckets = KeyBuckets {
            primary_keys: vec!["id".to_string()],
            unique_groups: vec![UniqueGroup {
                constraint_name: "users_nick_unique".to_string(),
                table_name: "users".to_string(),
                columns: vec!["nick".to_string()],
                null_filtered: true,
            }],
            ..KeyBuckets::default()
        };
        let schema = assemble("users", &[col("id", "INT64", true)], &buckets, true);

        assert_eq!(
            schema.indexes,
            vec!["CREATE UNIQUE NULL_FILTERED INDEX `users_nick_unique` ON `users` (`nick`);"]
        );
    }

    #[test]
    fn test_render_multi_column_unique_index() {
        let buckets = KeyBuckets {
            primary_keys: vec!["id".to_string()],
            unique_groups: vec![UniqueGroup {
                constraint_name: "projects_org_slug_unique".to_string(),
                table_name: "projects".to_string(),
                columns: vec!["org".to_string(), "slug".to_string()],
                null_filtered: false,
            }],
            ..KeyBuckets::default()
        };
        let schema = assemble("projects", &[col("id", "INT64", true)], &buckets, true);

        assert_eq!(
            schema.indexes,
            vec!["CREATE UNIQUE INDEX `projects_org_slug_unique` ON `projects` (`org`, `slug`);"]
        );
    }

    #[test]
    fn test_render_secondary_index() {
        let buckets = KeyBuckets {
            primary_keys: vec!["id".to_string()],
            secondary_indexes: vec!["status".to_string()],
            ..KeyBuckets::default()
        };
        let schema = assemble("orders", &[col("id", "INT64", true)], &buckets, true);

        assert_eq!(
            schema.indexes,
            vec!["CREATE INDEX `OrdersByStatus` ON `orders` (`status`);"]
        );
    }

    #[test]
    fn test_render_foreign_key() {
        let buckets = KeyBuckets {
            primary_keys: vec!["id".to_string()],
            foreign_keys: vec![KeyUsage::foreign("posts", "user_id", "posts_user_fk", "users", "id")],
            ..KeyBuckets::default()
        };
        let schema = assemble("posts", &[col("id", "INT64", true)], &buckets, true);

        assert_eq!(
            schema.constraints,
            vec![
                "ALTER TABLE `posts` ADD CONSTRAINT `posts_user_fk` FOREIGN KEY (`user_id`) \
                 REFERENCES `users` (`id`);"
            ]
        );
    }

    #[test]
    fn test_unique_indexes_render_before_secondary() {
        let buckets = KeyBuckets {
            primary_keys: vec!["id".to_string()],
            unique_groups: vec![UniqueGroup {
                constraint_name: "t_a_unique".to_string(),
                table_name: "t".to_string(),
                columns: vec!["a".to_string()],
                null_filtered: false,
            }],
            secondary_indexes: vec!["b".to_string()],
            ..KeyBuckets::default()
        };
        let schema = assemble("t", &[col("id", "INT64", true)], &buckets, true);

        assert_eq!(schema.indexes.len(), 2);
        assert!(schema.indexes[0].starts_with("CREATE UNIQUE"));
        assert!(schema.indexes[1].starts_with("CREATE INDEX"));
    }
}
