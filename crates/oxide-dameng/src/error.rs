//! Error types for the Dameng dialect.

use oxide_schema::{BoxError, ScanError};

/// Errors that can occur while parsing connection strings or introspecting
/// a Dameng schema.
#[derive(Debug, thiserror::Error)]
pub enum DamengError {
    /// The connection string carries no user-info section.
    #[error("user/password needed")]
    MissingCredentials,

    /// The connection string is not a valid URL.
    #[error("invalid data source name: {0}")]
    InvalidDsn(#[from] url::ParseError),

    /// A user or password component is not valid percent-encoded UTF-8.
    #[error("invalid percent-encoding in {0}")]
    InvalidEncoding(&'static str),

    /// Query execution or row iteration failed in the driver.
    #[error("driver error: {0}")]
    Driver(#[source] BoxError),

    /// A row value could not be scanned.
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),

    /// The catalog returned a NULL column name.
    #[error("column name is nil")]
    NullColumnName,

    /// A native type mapped to a name missing from the type registry.
    #[error("unknown colType {data_type} {sql_type}")]
    UnknownColumnType {
        /// Native type as reported by the catalog.
        data_type: String,
        /// Abstract type name it mapped to.
        sql_type: String,
    },
}

/// Result type for Dameng dialect operations.
pub type Result<T> = std::result::Result<T, DamengError>;
