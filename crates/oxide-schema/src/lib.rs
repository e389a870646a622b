//! # oxide-schema
//!
//! The ORM-side schema model that database dialects plug into.
//!
//! This crate provides:
//! - An abstract column type vocabulary with a global registry ([`types`])
//! - [`Table`], [`Column`] and [`Index`] descriptors
//! - The [`Dialect`] trait with shared column and DDL rendering
//! - A generic identifier [`Quoter`] and raw SQL [`Filter`]s
//! - A driver-agnostic query handle ([`Queryer`]) and the [`Introspect`]
//!   trait that dialects implement on top of it
//!
//! ## Example
//!
//! ```rust
//! use oxide_schema::{Column, SqlType, Table};
//! use oxide_schema::types::{BIG_INT, VARCHAR};
//!
//! let table = Table::new("users")
//!     .column(Column::new("id", SqlType::new(BIG_INT)).primary_key())
//!     .column(Column::new("name", SqlType::with_lengths(VARCHAR, 255, 0)));
//!
//! assert_eq!(table.primary_keys, vec!["id"]);
//! ```

pub mod column;
pub mod db;
pub mod dialect;
pub mod filter;
pub mod index;
pub mod introspect;
pub mod quoter;
pub mod table;
pub mod types;
pub mod uri;
pub mod value;

pub use column::Column;
pub use db::{BoxError, FromValue, LobHandle, Queryer, Row, ScanError, Value};
pub use dialect::Dialect;
pub use filter::{Filter, IdFilter};
pub use index::{Index, IndexKind};
pub use introspect::Introspect;
pub use quoter::Quoter;
pub use table::Table;
pub use types::{SqlType, TypeClass};
pub use uri::{DbType, Uri};
pub use value::SqlValue;
