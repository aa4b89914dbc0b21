//! Table options such as `ENGINE = InnoDB` or `DEFAULT CHARACTER SET = utf8`.

/// A single table option. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableOption {
    key: String,
    value: String,
    need_quotes: bool,
}

impl TableOption {
    /// Creates a new option. `need_quotes` tells a DDL printer to quote
    /// the value.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>, need_quotes: bool) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            need_quotes,
        }
    }

    /// Identity of the option, derived from its key.
    #[must_use]
    pub fn id(&self) -> String {
        format!("tableopt#{}", self.key)
    }

    /// Option key, e.g. `ENGINE`.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Option value, empty when absent.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the value is rendered quoted.
    #[must_use]
    pub const fn need_quotes(&self) -> bool {
        self.need_quotes
    }
}
