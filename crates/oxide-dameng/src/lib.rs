//! # oxide-dameng
//!
//! Dameng (DM) support for the oxide ORM.
//!
//! - [`DamengDialect`]: native type mapping, identifier quoting and DDL
//! - [`Introspect`](oxide_schema::Introspect) for reading tables, columns
//!   and indexes from the Dameng catalog through any
//!   [`Queryer`](oxide_schema::Queryer)
//! - [`DamengDriver`]: `dm://user:password@host:port?schema=NAME` parsing
//! - [`ClobScanner`]: scan target for nullable large-text values
//!
//! ## Example
//!
//! ```rust
//! use oxide_dameng::DamengDialect;
//! use oxide_schema::types::{BIG_INT, VARCHAR};
//! use oxide_schema::{Column, Dialect, SqlType, Table};
//!
//! let dialect = DamengDialect::from_dsn("dm://SYSDBA:secret@localhost:5236?schema=APP")?;
//!
//! let table = Table::new("users")
//!     .column(Column::new("id", SqlType::new(BIG_INT)).primary_key())
//!     .column(Column::new("name", SqlType::new(VARCHAR)).length(64, 0));
//!
//! assert_eq!(
//!     dialect.create_table_sql(&table, None),
//!     r#"create table "users" ("id" BIGINT NOT NULL, "name" VARCHAR2(64) NULL, CONSTRAINT PK_users PRIMARY KEY ("id"))"#
//! );
//! # Ok::<(), oxide_dameng::DamengError>(())
//! ```

pub mod clob;
pub mod dialect;
pub mod driver;
pub mod error;
pub mod introspect;
pub mod reserved;

pub use clob::ClobScanner;
pub use dialect::{seq_name, DamengDialect};
pub use driver::DamengDriver;
pub use error::{DamengError, Result};
pub use introspect::{decompose_native_type, parse_native_type, table_exists};
