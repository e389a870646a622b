//! Column model shared by every dialect.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::index::IndexKind;
use crate::types::SqlType;

/// A table column as seen by the ORM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name, unquoted.
    pub name: String,
    /// Abstract type.
    pub sql_type: SqlType,
    /// First length parameter, zero when unspecified.
    #[serde(default)]
    pub length: usize,
    /// Second length parameter, zero when unspecified.
    #[serde(default)]
    pub length2: usize,
    /// Whether the column accepts NULL.
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    /// Default value as a SQL fragment.
    #[serde(default)]
    pub default: String,
    /// Set when the column has no default at all, as opposed to a default
    /// that happens to be the empty string.
    #[serde(default = "default_default_is_empty")]
    pub default_is_empty: bool,
    /// Part of the primary key.
    #[serde(default)]
    pub is_primary_key: bool,
    /// Backed by an identity column or sequence.
    #[serde(default)]
    pub is_auto_increment: bool,
    /// Free-text column comment.
    #[serde(default)]
    pub comment: String,
    /// Indexes this column belongs to.
    #[serde(default)]
    pub indexes: HashMap<String, IndexKind>,
}

const fn default_nullable() -> bool {
    true
}

const fn default_default_is_empty() -> bool {
    true
}

impl Column {
    /// Creates a nullable column without default.
    #[must_use]
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            name: name.into(),
            length: sql_type.default_length,
            length2: sql_type.default_length2,
            sql_type,
            nullable: true,
            default: String::new(),
            default_is_empty: true,
            is_primary_key: false,
            is_auto_increment: false,
            comment: String::new(),
            indexes: HashMap::new(),
        }
    }

    /// Sets the length parameters.
    #[must_use]
    pub fn length(mut self, length: usize, length2: usize) -> Self {
        self.length = length;
        self.length2 = length2;
        self
    }

    /// Sets the column as NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default(mut self, value: impl Into<String>) -> Self {
        self.default = value.into();
        self.default_is_empty = false;
        self
    }

    /// Marks the column as part of the primary key.
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self.nullable = false;
        self
    }

    /// Marks the column as auto-incrementing.
    #[must_use]
    pub fn auto_increment(mut self) -> Self {
        self.is_auto_increment = true;
        self
    }

    /// Sets the column comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Returns whether a DEFAULT clause should be rendered.
    #[must_use]
    pub fn has_default(&self) -> bool {
        !self.default_is_empty && !self.default.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BIG_INT, VARCHAR};

    #[test]
    fn builder_sets_flags() {
        let col = Column::new("id", SqlType::new(BIG_INT))
            .primary_key()
            .auto_increment();

        assert_eq!(col.name, "id");
        assert!(col.is_primary_key);
        assert!(col.is_auto_increment);
        assert!(!col.nullable);
        assert!(!col.has_default());
    }

    #[test]
    fn lengths_come_from_type_defaults() {
        let col = Column::new("name", SqlType::with_lengths(VARCHAR, 64, 0));
        assert_eq!(col.length, 64);
        assert_eq!(col.length2, 0);
    }

    #[test]
    fn empty_default_string_is_not_rendered() {
        let col = Column::new("name", SqlType::new(VARCHAR)).default("");
        assert!(!col.default_is_empty);
        assert!(!col.has_default());

        let col = Column::new("name", SqlType::new(VARCHAR)).default("'x'");
        assert!(col.has_default());
    }

    #[test]
    fn deserializes_with_defaults() {
        let col: Column =
            serde_json::from_str(r#"{"name":"age","sql_type":{"name":"INT"}}"#).unwrap();
        assert!(col.nullable);
        assert!(col.default_is_empty);
        assert_eq!(col.length, 0);
        assert!(col.indexes.is_empty());
    }
}
