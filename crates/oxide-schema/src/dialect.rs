//! SQL dialect support.
//!
//! A [`Dialect`] translates the ORM model into one database product's SQL:
//! native type names, identifier quoting and DDL. The shared renderers
//! (`column_string`, `create_index_sql`, ...) are default methods so a
//! dialect only overrides what its product does differently.

use crate::column::Column;
use crate::filter::Filter;
use crate::index::{Index, IndexKind};
use crate::table::Table;
use crate::uri::{DbType, Uri};
use crate::value::SqlValue;

/// Trait for dialect-specific SQL generation.
pub trait Dialect {
    /// Returns the database product.
    fn db_type(&self) -> DbType;

    /// Returns the connection descriptor the dialect was built from.
    fn uri(&self) -> &Uri;

    /// Schema used to qualify catalog lookups.
    fn schema(&self) -> &str {
        &self.uri().schema
    }

    /// Maps a column's abstract type to the native SQL type.
    fn sql_type(&self, col: &Column) -> String;

    /// Returns whether `name` is a reserved keyword.
    fn is_reserved(&self, name: &str) -> bool;

    /// Quotes an identifier.
    fn quote(&self, name: &str) -> String;

    /// Keyword appended to auto-increment primary keys.
    fn auto_incr_str(&self) -> &'static str;

    fn supports_insert_many(&self) -> bool;

    fn supports_engine(&self) -> bool;

    fn supports_charset(&self) -> bool;

    /// Whether index names are scoped to their table.
    fn index_on_table(&self) -> bool;

    /// Query and arguments checking whether an index exists.
    fn index_check_sql(&self, table_name: &str, index_name: &str) -> (String, Vec<SqlValue>);

    /// Query and arguments checking whether a table exists.
    fn table_check_sql(&self, table_name: &str) -> (String, Vec<SqlValue>);

    /// DROP INDEX statement.
    fn drop_index_sql(&self, table_name: &str, index: &Index) -> String;

    /// CREATE TABLE statement for `table`, optionally under another name.
    ///
    /// An empty string means the statement could not be built.
    fn create_table_sql(&self, table: &Table, table_name: Option<&str>) -> String;

    /// Filters applied to raw SQL before execution.
    fn filters(&self) -> Vec<Box<dyn Filter>>;

    /// Renders a column definition: quoted name, native type, default and
    /// nullability, plus an inline primary key when asked.
    fn column_string(&self, col: &Column, include_primary_key: bool) -> String {
        let mut sql = String::new();
        sql.push_str(&self.quote(&col.name));
        sql.push(' ');
        sql.push_str(&self.sql_type(col));

        if include_primary_key && col.is_primary_key {
            sql.push_str(" PRIMARY KEY");
            if col.is_auto_increment {
                sql.push(' ');
                sql.push_str(self.auto_incr_str());
            }
        }

        if col.has_default() {
            sql.push_str(" DEFAULT ");
            sql.push_str(&col.default);
        }

        if col.nullable {
            sql.push_str(" NULL");
        } else {
            sql.push_str(" NOT NULL");
        }

        sql
    }

    /// CREATE INDEX statement using the index naming convention.
    fn create_index_sql(&self, table_name: &str, index: &Index) -> String {
        let unique = if index.kind == IndexKind::Unique {
            " UNIQUE"
        } else {
            ""
        };
        let cols: Vec<String> = index.cols.iter().map(|c| self.quote(c)).collect();
        format!(
            "CREATE{unique} INDEX {} ON {} ({})",
            self.quote(&index.x_name(table_name)),
            self.quote(table_name),
            cols.join(",")
        )
    }

    /// DROP TABLE statement.
    fn drop_table_sql(&self, table_name: &str) -> String {
        format!("DROP TABLE {}", self.quote(table_name))
    }

    /// ALTER TABLE ... ADD statement for a new column.
    fn add_column_sql(&self, table_name: &str, col: &Column) -> String {
        format!(
            "ALTER TABLE {} ADD {}",
            self.quote(table_name),
            self.column_string(col, true)
        )
    }

    /// ALTER TABLE ... MODIFY statement for an existing column.
    fn modify_column_sql(&self, table_name: &str, col: &Column) -> String {
        format!(
            "ALTER TABLE {} MODIFY {}",
            self.quote(table_name),
            self.column_string(col, false)
        )
    }
}
