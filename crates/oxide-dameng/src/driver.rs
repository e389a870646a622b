//! Connection string parsing.
//!
//! Dameng data source names look like
//! `dm://user:password@host:port?schema=NAME`. The schema defaults to the
//! user name when the `schema` parameter is absent or empty.

use oxide_schema::{DbType, Uri};
use tracing::debug;
use url::Url;

use crate::error::{DamengError, Result};

/// Parser for Dameng data source names.
#[derive(Debug, Clone, Copy, Default)]
pub struct DamengDriver;

impl DamengDriver {
    /// Parses `dsn` into a connection descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`DamengError::InvalidDsn`] when `dsn` is not a URL and
    /// [`DamengError::MissingCredentials`] when it carries no user info.
    pub fn parse(driver_name: &str, dsn: &str) -> Result<Uri> {
        let url = Url::parse(dsn)?;

        if url.username().is_empty() && url.password().is_none() {
            return Err(DamengError::MissingCredentials);
        }

        let user = percent_decode(url.username(), "user")?;
        let passwd = url
            .password()
            .map(|p| percent_decode(p, "password"))
            .transpose()?
            .unwrap_or_default();

        let db_name = url
            .query_pairs()
            .find(|(key, _)| key == "schema")
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| user.clone());

        let host = url
            .host_str()
            .map(|h| h.trim_start_matches('[').trim_end_matches(']'))
            .unwrap_or_default()
            .to_string();

        debug!(
            driver = driver_name,
            host = %host,
            port = ?url.port(),
            schema = %db_name,
            "Parsed data source name"
        );

        Ok(Uri {
            db_type: DbType::Dameng,
            proto: url.scheme().to_string(),
            host,
            port: url.port(),
            schema: db_name.clone(),
            db_name,
            user,
            passwd,
        })
    }
}

fn percent_decode(s: &str, field: &'static str) -> Result<String> {
    percent_encoding::percent_decode_str(s)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .map_err(|_| DamengError::InvalidEncoding(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_dsn() {
        let uri = DamengDriver::parse("dm", "dm://SYSDBA:secret@db.local:5236?schema=APP").unwrap();
        assert_eq!(uri.db_type, DbType::Dameng);
        assert_eq!(uri.proto, "dm");
        assert_eq!(uri.host, "db.local");
        assert_eq!(uri.port, Some(5236));
        assert_eq!(uri.user, "SYSDBA");
        assert_eq!(uri.passwd, "secret");
        assert_eq!(uri.db_name, "APP");
        assert_eq!(uri.schema, "APP");
    }

    #[test]
    fn schema_defaults_to_user() {
        let uri = DamengDriver::parse("dm", "dm://SYSDBA:pw@localhost").unwrap();
        assert_eq!(uri.schema, "SYSDBA");
        assert_eq!(uri.db_name, "SYSDBA");
        assert_eq!(uri.port, None);

        let uri = DamengDriver::parse("dm", "dm://SYSDBA:pw@localhost?schema=").unwrap();
        assert_eq!(uri.schema, "SYSDBA");
    }

    #[test]
    fn missing_user_info_is_rejected() {
        let err = DamengDriver::parse("dm", "dm://localhost:5236").unwrap_err();
        assert!(matches!(err, DamengError::MissingCredentials));
        assert_eq!(err.to_string(), "user/password needed");
    }

    #[test]
    fn malformed_dsn_is_rejected() {
        let err = DamengDriver::parse("dm", "not a url").unwrap_err();
        assert!(matches!(err, DamengError::InvalidDsn(_)));
    }

    #[test]
    fn credentials_are_percent_decoded() {
        let uri = DamengDriver::parse("dm", "dm://app%20user:p%40ss@localhost").unwrap();
        assert_eq!(uri.user, "app user");
        assert_eq!(uri.passwd, "p@ss");
        assert_eq!(uri.schema, "app user");
    }

    #[test]
    fn ipv6_host_loses_brackets() {
        let uri = DamengDriver::parse("dm", "dm://u:p@[::1]:5236").unwrap();
        assert_eq!(uri.host, "::1");
        assert_eq!(uri.port, Some(5236));
    }

    #[test]
    fn user_without_password() {
        let uri = DamengDriver::parse("dm", "dm://reader@localhost").unwrap();
        assert_eq!(uri.user, "reader");
        assert!(uri.passwd.is_empty());
    }
}
