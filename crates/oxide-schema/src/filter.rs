//! Raw SQL rewriting applied before execution.

use crate::dialect::Dialect;
use crate::table::Table;

/// Rewrites raw SQL for a dialect.
pub trait Filter {
    fn apply(&self, sql: &str, dialect: &dyn Dialect, table: Option<&Table>) -> String;
}

/// Replaces the `(id)` placeholder with the table's quoted primary key.
///
/// Only tables with a single-column primary key are rewritten.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdFilter;

impl Filter for IdFilter {
    fn apply(&self, sql: &str, dialect: &dyn Dialect, table: Option<&Table>) -> String {
        let Some(table) = table else {
            return sql.to_string();
        };
        let [pk] = table.primary_keys.as_slice() else {
            return sql.to_string();
        };
        let replacement = format!(" {} ", dialect.quote(pk));
        sql.replace(" `(id)` ", &replacement)
            .replace(&format!(" {} ", dialect.quote("(id)")), &replacement)
            .replace(" (id) ", &replacement)
    }
}
