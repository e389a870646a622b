//! Parsed connection descriptor.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Database product a connection targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DbType {
    Postgres,
    Sqlite,
    Mysql,
    Mssql,
    Oracle,
    Dameng,
}

impl DbType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
            Self::Mysql => "mysql",
            Self::Mssql => "mssql",
            Self::Oracle => "oracle",
            Self::Dameng => "dameng",
        }
    }
}

impl fmt::Display for DbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured connection parameters, produced once by a driver's parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Uri {
    pub db_type: DbType,
    /// URL scheme, e.g. `dm`.
    pub proto: String,
    pub host: String,
    pub port: Option<u16>,
    pub db_name: String,
    pub user: String,
    #[serde(default, skip_serializing)]
    pub passwd: String,
    /// Schema used for catalog lookups.
    pub schema: String,
}

impl Uri {
    /// Creates a descriptor that only carries a schema, for offline use.
    #[must_use]
    pub fn for_schema(db_type: DbType, schema: impl Into<String>) -> Self {
        let schema = schema.into();
        Self {
            db_type,
            proto: String::new(),
            host: String::new(),
            port: None,
            db_name: schema.clone(),
            user: String::new(),
            passwd: String::new(),
            schema,
        }
    }
}
