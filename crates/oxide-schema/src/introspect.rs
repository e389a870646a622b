//! Schema introspection trait.
//!
//! Dialect crates implement [`Introspect`] to read the current database
//! schema through any [`Queryer`]. The core crate defines only the trait so
//! it stays driver-agnostic.

use std::collections::HashMap;

use crate::column::Column;
use crate::db::Queryer;
use crate::index::Index;
use crate::table::Table;

/// Reads tables, columns and indexes from a live connection.
///
/// Every method drains its result set completely and fails as a whole on
/// the first query or scan error; no partial results are returned.
pub trait Introspect {
    /// Error type for introspection failures.
    type Error: std::error::Error;

    /// Lists user tables. Returned tables carry only their name.
    fn get_tables<Q: Queryer>(&self, db: &Q) -> Result<Vec<Table>, Self::Error>;

    /// Returns column names in catalog order and the columns keyed by name.
    fn get_columns<Q: Queryer>(
        &self,
        db: &Q,
        table_name: &str,
    ) -> Result<(Vec<String>, HashMap<String, Column>), Self::Error>;

    /// Returns the table's non-primary-key indexes keyed by display name.
    fn get_indexes<Q: Queryer>(
        &self,
        db: &Q,
        table_name: &str,
    ) -> Result<HashMap<String, Index>, Self::Error>;

    /// Loads one table with its columns, primary key and indexes.
    fn load_table<Q: Queryer>(&self, db: &Q, table_name: &str) -> Result<Table, Self::Error> {
        let (seq, mut columns) = self.get_columns(db, table_name)?;
        let mut table = Table::new(table_name);
        for name in seq {
            if let Some(col) = columns.remove(&name) {
                table.add_column(col);
            }
        }
        for (_, index) in self.get_indexes(db, table_name)? {
            table.add_index(index);
        }
        Ok(table)
    }
}
