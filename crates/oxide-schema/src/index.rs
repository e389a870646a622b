//! Index model.

use serde::{Deserialize, Serialize};

/// Index uniqueness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IndexKind {
    #[default]
    Index,
    Unique,
}

impl IndexKind {
    /// Prefix used by the generated index naming convention.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Index => "IDX_",
            Self::Unique => "UQE_",
        }
    }
}

/// An index over one or more columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    /// Display name. For regular indexes this is the name without the
    /// `IDX_<table>_` / `UQE_<table>_` prefix.
    pub name: String,
    /// Unique or plain.
    #[serde(default)]
    pub kind: IndexKind,
    /// Whether the stored name follows the generated naming convention.
    #[serde(default = "default_regular")]
    pub is_regular: bool,
    /// Member columns in index order.
    #[serde(default)]
    pub cols: Vec<String>,
}

const fn default_regular() -> bool {
    true
}

impl Index {
    /// Creates a regular index without columns.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: IndexKind) -> Self {
        Self {
            name: name.into(),
            kind,
            is_regular: true,
            cols: Vec::new(),
        }
    }

    /// Adds member columns.
    #[must_use]
    pub fn columns(mut self, cols: &[&str]) -> Self {
        self.cols.extend(cols.iter().map(|c| (*c).to_string()));
        self
    }

    /// Marks the name as explicit rather than convention-derived.
    #[must_use]
    pub fn explicit(mut self) -> Self {
        self.is_regular = false;
        self
    }

    /// Appends a member column.
    pub fn add_column(&mut self, col: impl Into<String>) {
        self.cols.push(col.into());
    }

    /// Returns the stored name for `table_name` under the naming convention.
    ///
    /// Names that already carry a convention prefix are returned unchanged.
    /// Quotes and any schema qualifier are stripped from the table name.
    #[must_use]
    pub fn x_name(&self, table_name: &str) -> String {
        if self.name.starts_with(IndexKind::Index.prefix())
            || self.name.starts_with(IndexKind::Unique.prefix())
        {
            return self.name.clone();
        }
        let unquoted = table_name.replace('"', "");
        let table = unquoted.rsplit('.').next().unwrap_or(unquoted.as_str());
        format!("{}{}_{}", self.kind.prefix(), table, self.name)
    }

    /// Splits a stored index name into its display name and regular flag.
    ///
    /// Only a `IDX_<table>_` or `UQE_<table>_` prefix with a non-empty
    /// remainder is stripped; anything else is returned verbatim.
    #[must_use]
    pub fn strip_regular_name(stored: &str, table_name: &str) -> (String, bool) {
        for kind in [IndexKind::Index, IndexKind::Unique] {
            let prefix = format!("{}{}_", kind.prefix(), table_name);
            if let Some(rest) = stored.strip_prefix(&prefix) {
                if !rest.is_empty() {
                    return (rest.to_string(), true);
                }
            }
        }
        (stored.to_string(), false)
    }
}
