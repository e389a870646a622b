//! Abstract column type vocabulary.
//!
//! Dialects translate these names into native SQL types when generating DDL
//! and map native catalog types back onto them during introspection. Every
//! name a dialect may produce on the way back must be present in the global
//! registry ([`type_class`]); unknown names are rejected so that invalid DDL
//! is never generated from an introspected schema later on.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

pub const BIT: &str = "BIT";
pub const UNSIGNED_BIT: &str = "UNSIGNED BIT";
pub const TINY_INT: &str = "TINYINT";
pub const UNSIGNED_TINY_INT: &str = "UNSIGNED TINYINT";
pub const SMALL_INT: &str = "SMALLINT";
pub const MEDIUM_INT: &str = "MEDIUMINT";
pub const INT: &str = "INT";
pub const UNSIGNED_INT: &str = "UNSIGNED INT";
pub const INTEGER: &str = "INTEGER";
pub const BIG_INT: &str = "BIGINT";
pub const UNSIGNED_BIG_INT: &str = "UNSIGNED BIGINT";

pub const ENUM: &str = "ENUM";
pub const SET: &str = "SET";

pub const CHAR: &str = "CHAR";
pub const VARCHAR: &str = "VARCHAR";
pub const NCHAR: &str = "NCHAR";
pub const NVARCHAR: &str = "NVARCHAR";
pub const TINY_TEXT: &str = "TINYTEXT";
pub const TEXT: &str = "TEXT";
pub const NTEXT: &str = "NTEXT";
pub const CLOB: &str = "CLOB";
pub const MEDIUM_TEXT: &str = "MEDIUMTEXT";
pub const LONG_TEXT: &str = "LONGTEXT";
pub const UUID: &str = "UUID";
pub const SYS_NAME: &str = "SYSNAME";

pub const DATE: &str = "DATE";
pub const DATE_TIME: &str = "DATETIME";
pub const SMALL_DATE_TIME: &str = "SMALLDATETIME";
pub const TIME: &str = "TIME";
pub const TIME_STAMP: &str = "TIMESTAMP";
pub const TIME_STAMPZ: &str = "TIMESTAMPZ";
pub const YEAR: &str = "YEAR";

pub const DECIMAL: &str = "DECIMAL";
pub const NUMERIC: &str = "NUMERIC";
pub const NUMBER: &str = "NUMBER";
pub const MONEY: &str = "MONEY";
pub const SMALL_MONEY: &str = "SMALLMONEY";

pub const REAL: &str = "REAL";
pub const FLOAT: &str = "FLOAT";
pub const DOUBLE: &str = "DOUBLE";

pub const BINARY: &str = "BINARY";
pub const VAR_BINARY: &str = "VARBINARY";
pub const TINY_BLOB: &str = "TINYBLOB";
pub const BLOB: &str = "BLOB";
pub const MEDIUM_BLOB: &str = "MEDIUMBLOB";
pub const LONG_BLOB: &str = "LONGBLOB";
pub const BYTEA: &str = "BYTEA";
pub const UNIQUE_IDENTIFIER: &str = "UNIQUEIDENTIFIER";

pub const BOOL: &str = "BOOL";
pub const BOOLEAN: &str = "BOOLEAN";

pub const SERIAL: &str = "SERIAL";
pub const BIG_SERIAL: &str = "BIGSERIAL";

pub const JSON: &str = "JSON";
pub const JSONB: &str = "JSONB";
pub const XML: &str = "XML";
pub const ARRAY: &str = "ARRAY";

/// Broad family a registered type name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeClass {
    Text,
    Blob,
    Time,
    Numeric,
    Bool,
    Array,
}

static SQL_TYPES: LazyLock<HashMap<&'static str, TypeClass>> = LazyLock::new(|| {
    use TypeClass::{Array, Blob, Bool, Numeric, Text, Time};

    HashMap::from([
        (BIT, Numeric),
        (UNSIGNED_BIT, Numeric),
        (TINY_INT, Numeric),
        (UNSIGNED_TINY_INT, Numeric),
        (SMALL_INT, Numeric),
        (MEDIUM_INT, Numeric),
        (INT, Numeric),
        (UNSIGNED_INT, Numeric),
        (INTEGER, Numeric),
        (BIG_INT, Numeric),
        (UNSIGNED_BIG_INT, Numeric),
        (ENUM, Text),
        (SET, Text),
        (JSON, Text),
        (JSONB, Text),
        (XML, Text),
        (CHAR, Text),
        (VARCHAR, Text),
        (NCHAR, Text),
        (NVARCHAR, Text),
        (TINY_TEXT, Text),
        (TEXT, Text),
        (NTEXT, Text),
        (MEDIUM_TEXT, Text),
        (LONG_TEXT, Text),
        (UUID, Text),
        (CLOB, Text),
        (SYS_NAME, Text),
        (DATE, Time),
        (DATE_TIME, Time),
        (SMALL_DATE_TIME, Time),
        (TIME, Time),
        (TIME_STAMP, Time),
        (TIME_STAMPZ, Time),
        (YEAR, Time),
        (DECIMAL, Numeric),
        (NUMERIC, Numeric),
        (NUMBER, Numeric),
        (MONEY, Numeric),
        (SMALL_MONEY, Numeric),
        (REAL, Numeric),
        (FLOAT, Numeric),
        (DOUBLE, Numeric),
        (BINARY, Blob),
        (VAR_BINARY, Blob),
        (TINY_BLOB, Blob),
        (BLOB, Blob),
        (MEDIUM_BLOB, Blob),
        (LONG_BLOB, Blob),
        (BYTEA, Blob),
        (UNIQUE_IDENTIFIER, Blob),
        (BOOL, Bool),
        (BOOLEAN, Bool),
        (SERIAL, Numeric),
        (BIG_SERIAL, Numeric),
        (ARRAY, Array),
    ])
});

/// Looks up a type name in the global registry.
#[must_use]
pub fn type_class(name: &str) -> Option<TypeClass> {
    SQL_TYPES.get(name).copied()
}

/// Returns whether `name` is a registered abstract type.
#[must_use]
pub fn is_registered(name: &str) -> bool {
    SQL_TYPES.contains_key(name)
}

/// An abstract column type with its declared default lengths.
///
/// A length of zero means "not specified".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SqlType {
    /// Registered type name, e.g. `VARCHAR`.
    pub name: String,
    /// First length parameter (length or precision).
    #[serde(default)]
    pub default_length: usize,
    /// Second length parameter (scale).
    #[serde(default)]
    pub default_length2: usize,
}

impl SqlType {
    /// Creates a type without length parameters.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_length: 0,
            default_length2: 0,
        }
    }

    /// Creates a type with both length parameters.
    #[must_use]
    pub fn with_lengths(name: impl Into<String>, length: usize, length2: usize) -> Self {
        Self {
            name: name.into(),
            default_length: length,
            default_length2: length2,
        }
    }

    #[must_use]
    pub fn class(&self) -> Option<TypeClass> {
        type_class(&self.name)
    }

    #[must_use]
    pub fn is_registered(&self) -> bool {
        is_registered(&self.name)
    }

    #[must_use]
    pub fn is_time(&self) -> bool {
        self.class() == Some(TypeClass::Time)
    }

    #[must_use]
    pub fn is_bool(&self) -> bool {
        self.class() == Some(TypeClass::Bool)
    }
}
