//! Table model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::index::Index;

/// A table with its columns in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Table name, unquoted.
    pub name: String,
    /// Columns in DDL order.
    #[serde(default)]
    pub columns: Vec<Column>,
    /// Primary-key column names, in key order.
    #[serde(default)]
    pub primary_keys: Vec<String>,
    /// Indexes keyed by display name.
    #[serde(default)]
    pub indexes: BTreeMap<String, Index>,
    /// Table comment.
    #[serde(default)]
    pub comment: String,
}

impl Table {
    /// Creates a table without columns.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a column, registering it as a primary key when flagged.
    #[must_use]
    pub fn column(mut self, column: Column) -> Self {
        self.add_column(column);
        self
    }

    /// Adds an index under its display name.
    #[must_use]
    pub fn index(mut self, index: Index) -> Self {
        self.add_index(index);
        self
    }

    /// Adds a column in place.
    pub fn add_column(&mut self, column: Column) {
        if column.is_primary_key && !self.primary_keys.contains(&column.name) {
            self.primary_keys.push(column.name.clone());
        }
        self.columns.push(column);
    }

    /// Adds an index in place and records membership on its columns.
    pub fn add_index(&mut self, index: Index) {
        for col_name in &index.cols {
            if let Some(col) = self.get_column_mut(col_name) {
                col.indexes.insert(index.name.clone(), index.kind);
            }
        }
        self.indexes.insert(index.name.clone(), index);
    }

    /// Column names in declaration order.
    pub fn columns_seq(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Looks up a mutable column by name.
    #[must_use]
    pub fn get_column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    /// Primary-key columns, in key order.
    pub fn pk_columns(&self) -> impl Iterator<Item = &Column> {
        self.primary_keys
            .iter()
            .filter_map(|name| self.get_column(name))
    }

    /// Re-derives the primary-key list from the column flags.
    ///
    /// Keeps the existing key order, drops names that are not columns and
    /// appends flagged columns that are missing. Used after deserializing a
    /// table written by hand.
    pub fn sync_primary_keys(&mut self) {
        let columns = &self.columns;
        self.primary_keys
            .retain(|name| columns.iter().any(|c| &c.name == name));
        for col in &self.columns {
            if col.is_primary_key && !self.primary_keys.contains(&col.name) {
                self.primary_keys.push(col.name.clone());
            }
        }
    }
}
