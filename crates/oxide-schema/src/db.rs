//! Driver-agnostic query handle.
//!
//! Dialects introspect schemas through [`Queryer`], which a database driver
//! implements. A query yields an iterator of [`Row`]s; dropping the iterator
//! releases the underlying cursor, so every early return from a scan loop
//! frees it. Row values are read positionally through [`FromValue`].

use std::fmt;
use std::sync::Arc;

use crate::value::SqlValue;

/// Boxed error produced by a driver.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A large-object handle a driver hands out instead of inlining the data.
pub trait LobHandle: Send + Sync {
    /// Length of the object in characters.
    fn length(&self) -> Result<u64, BoxError>;

    /// Reads `len` characters starting at the 1-based `offset`.
    fn read_string(&self, offset: u64, len: usize) -> Result<String, BoxError>;
}

/// A single column value as returned by a driver.
#[derive(Clone)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Lob(Arc<dyn LobHandle>),
}

impl Value {
    /// Short name of the representation, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Lob(_) => "lob",
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Int(n) => f.debug_tuple("Int").field(n).finish(),
            Self::Float(n) => f.debug_tuple("Float").field(n).finish(),
            Self::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Self::Bytes(b) => f.debug_tuple("Bytes").field(b).finish(),
            Self::Lob(_) => f.write_str("Lob(..)"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Errors raised while reading values out of a row.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The row has fewer columns than requested.
    #[error("column index {index} out of range for row of {len} columns")]
    OutOfRange {
        /// Requested position.
        index: usize,
        /// Number of values in the row.
        len: usize,
    },

    /// A NULL was read into a non-optional target.
    #[error("column {index}: unexpected NULL")]
    UnexpectedNull {
        /// Column position.
        index: usize,
    },

    /// The value has the right representation but cannot be converted.
    #[error("column {index}: cannot convert {value:?} to {target}")]
    Invalid {
        /// Column position.
        index: usize,
        /// Offending value, rendered.
        value: String,
        /// Target type name.
        target: &'static str,
    },

    /// The driver supplied a representation the target cannot accept.
    #[error("cannot convert {from} as {target}")]
    Unsupported {
        /// Representation supplied by the driver.
        from: &'static str,
        /// Target type name.
        target: &'static str,
    },

    /// Reading a large object failed.
    #[error("reading large object: {0}")]
    Lob(#[source] BoxError),
}

/// Conversion from a driver value into a Rust scan target.
pub trait FromValue: Sized {
    /// Converts the value at position `index`.
    fn from_value(value: &Value, index: usize) -> Result<Self, ScanError>;
}

impl FromValue for Option<String> {
    fn from_value(value: &Value, index: usize) -> Result<Self, ScanError> {
        match value {
            Value::Null => Ok(None),
            Value::Text(s) => Ok(Some(s.clone())),
            Value::Bytes(b) => String::from_utf8(b.clone())
                .map(Some)
                .map_err(|e| ScanError::Invalid {
                    index,
                    value: format!("{:?}", e.as_bytes()),
                    target: "string",
                }),
            Value::Int(n) => Ok(Some(n.to_string())),
            Value::Float(n) => Ok(Some(n.to_string())),
            Value::Lob(_) => Err(ScanError::Unsupported {
                from: value.type_name(),
                target: "string",
            }),
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value, index: usize) -> Result<Self, ScanError> {
        Option::<Self>::from_value(value, index)?.ok_or(ScanError::UnexpectedNull { index })
    }
}

impl FromValue for Option<i64> {
    fn from_value(value: &Value, index: usize) -> Result<Self, ScanError> {
        match value {
            Value::Null => Ok(None),
            Value::Int(n) => Ok(Some(*n)),
            Value::Text(s) => s.trim().parse().map(Some).map_err(|_| ScanError::Invalid {
                index,
                value: s.clone(),
                target: "i64",
            }),
            Value::Bytes(b) => std::str::from_utf8(b)
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .map(Some)
                .ok_or_else(|| ScanError::Invalid {
                    index,
                    value: String::from_utf8_lossy(b).into_owned(),
                    target: "i64",
                }),
            Value::Float(f) => whole_float(*f).map(Some).ok_or_else(|| ScanError::Invalid {
                index,
                value: f.to_string(),
                target: "i64",
            }),
            Value::Lob(_) => Err(ScanError::Unsupported {
                from: value.type_name(),
                target: "i64",
            }),
        }
    }
}

/// Converts a float with no fractional part that fits in `i64`.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn whole_float(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.is_finite() && f.fract() == 0.0 && in_range).then(|| f as i64)
}

impl FromValue for i64 {
    fn from_value(value: &Value, index: usize) -> Result<Self, ScanError> {
        Option::<Self>::from_value(value, index)?.ok_or(ScanError::UnexpectedNull { index })
    }
}

/// One result row.
#[derive(Debug, Clone, Default)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    #[must_use]
    pub const fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the raw value at `index`.
    pub fn value(&self, index: usize) -> Result<&Value, ScanError> {
        self.values.get(index).ok_or(ScanError::OutOfRange {
            index,
            len: self.values.len(),
        })
    }

    /// Reads the value at `index` into `T`.
    pub fn get<T: FromValue>(&self, index: usize) -> Result<T, ScanError> {
        T::from_value(self.value(index)?, index)
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

/// A database handle able to run parameterized queries.
pub trait Queryer {
    /// Row cursor. Dropping it releases the query's resources.
    type Rows<'a>: Iterator<Item = Result<Row, BoxError>>
    where
        Self: 'a;

    /// Runs `sql` with `args` bound to its `?` placeholders.
    fn query<'a>(&'a self, sql: &str, args: &[SqlValue]) -> Result<Self::Rows<'a>, BoxError>;

    /// Returns whether `sql` yields at least one row.
    fn has_records(&self, sql: &str, args: &[SqlValue]) -> Result<bool, BoxError> {
        let mut rows = self.query(sql, args)?;
        rows.next().transpose().map(|row| row.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EmptyLob;

    impl LobHandle for EmptyLob {
        fn length(&self) -> Result<u64, BoxError> {
            Ok(0)
        }

        fn read_string(&self, _offset: u64, _len: usize) -> Result<String, BoxError> {
            Ok(String::new())
        }
    }

    #[test]
    fn reads_optional_strings() {
        let row = Row::new(vec![
            Value::from("a"),
            Value::Null,
            Value::Bytes(b"b".to_vec()),
            Value::Int(7),
        ]);
        assert_eq!(row.get::<Option<String>>(0).unwrap(), Some("a".to_string()));
        assert_eq!(row.get::<Option<String>>(1).unwrap(), None);
        assert_eq!(row.get::<String>(2).unwrap(), "b");
        assert_eq!(row.get::<String>(3).unwrap(), "7");
    }

    #[test]
    fn null_into_required_target_fails() {
        let row = Row::new(vec![Value::Null]);
        assert!(matches!(
            row.get::<String>(0),
            Err(ScanError::UnexpectedNull { index: 0 })
        ));
        assert!(matches!(
            row.get::<i64>(0),
            Err(ScanError::UnexpectedNull { index: 0 })
        ));
    }

    #[test]
    fn reads_integers_from_text() {
        let row = Row::new(vec![Value::from(" 42 "), Value::from("x"), Value::Int(3)]);
        assert_eq!(row.get::<i64>(0).unwrap(), 42);
        assert!(matches!(row.get::<i64>(1), Err(ScanError::Invalid { .. })));
        assert_eq!(row.get::<Option<i64>>(2).unwrap(), Some(3));
    }

    #[test]
    fn out_of_range_is_reported() {
        let row = Row::new(vec![Value::Null]);
        assert!(matches!(
            row.get::<Option<String>>(4),
            Err(ScanError::OutOfRange { index: 4, len: 1 })
        ));
    }

    #[test]
    fn unsupported_representation_names_type() {
        let row = Row::new(vec![Value::Lob(Arc::new(EmptyLob))]);
        let err = row.get::<i64>(0).unwrap_err();
        assert_eq!(err.to_string(), "cannot convert lob as i64");
    }

    #[test]
    fn reads_integers_from_whole_floats() {
        let row = Row::new(vec![
            Value::Float(10.0),
            Value::Float(-3.0),
            Value::Float(2.5),
            Value::Float(f64::NAN),
            Value::Float(1e19),
        ]);
        assert_eq!(row.get::<i64>(0).unwrap(), 10);
        assert_eq!(row.get::<Option<i64>>(1).unwrap(), Some(-3));
        assert!(matches!(
            row.get::<i64>(2),
            Err(ScanError::Invalid { index: 2, target: "i64", .. })
        ));
        assert!(matches!(row.get::<i64>(3), Err(ScanError::Invalid { .. })));
        assert!(matches!(row.get::<i64>(4), Err(ScanError::Invalid { .. })));
    }
}
