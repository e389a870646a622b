//! Scan target for nullable CLOB / large-text columns.
//!
//! Dameng drivers return `data_default` and similar columns either as a
//! large-object handle, as raw bytes or as a plain string. [`ClobScanner`]
//! folds all three into a `(valid, data)` pair.

use oxide_schema::{FromValue, LobHandle, ScanError, Value};

/// Normalized large-text value.
///
/// `valid == false` means SQL NULL. A zero-length handle is valid and empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClobScanner {
    pub valid: bool,
    pub data: String,
}

impl ClobScanner {
    const TARGET: &'static str = "ClobScanner";

    /// Returns the text when the value was not NULL.
    #[must_use]
    pub fn into_option(self) -> Option<String> {
        self.valid.then_some(self.data)
    }

    fn from_handle(handle: &dyn LobHandle) -> Result<Self, ScanError> {
        let len = handle.length().map_err(ScanError::Lob)?;
        if len == 0 {
            return Ok(Self {
                valid: true,
                data: String::new(),
            });
        }
        let len = usize::try_from(len).map_err(|e| ScanError::Lob(Box::new(e)))?;
        let data = handle.read_string(1, len).map_err(ScanError::Lob)?;
        Ok(Self { valid: true, data })
    }

    fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            valid: true,
            data: String::from_utf8_lossy(bytes).into_owned(),
        }
    }

    fn from_text(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        Self {
            valid: true,
            data: text.to_string(),
        }
    }
}

impl FromValue for ClobScanner {
    fn from_value(value: &Value, _index: usize) -> Result<Self, ScanError> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Lob(handle) => Self::from_handle(handle.as_ref()),
            Value::Bytes(bytes) => Ok(Self::from_bytes(bytes)),
            Value::Text(text) => Ok(Self::from_text(text)),
            Value::Int(_) | Value::Float(_) => Err(ScanError::Unsupported {
                from: value.type_name(),
                target: Self::TARGET,
            }),
        }
    }
}
