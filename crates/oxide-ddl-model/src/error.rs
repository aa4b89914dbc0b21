//! Error types for the schema model.

/// Errors that can occur while building schema model values.
///
/// Lookups and normalization never fail; these errors only come out of
/// the string conversions a statement parser uses and of validating
/// constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// A column type keyword that is not part of the supported set.
    #[error("Unknown column type: {0}")]
    UnknownColumnType(String),

    /// An index kind keyword that is not recognized.
    #[error("Unknown index kind: {0}")]
    UnknownIndexKind(String),

    /// An index type (`USING ...`) that is not recognized.
    #[error("Unknown index type: {0}")]
    UnknownIndexType(String),

    /// A table was declared without a name.
    #[error("Table name must not be empty")]
    EmptyTableName,
}

/// Result type for schema model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
