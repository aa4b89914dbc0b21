//! Index definitions.

use core::fmt;
use std::borrow::Cow;
use std::str::FromStr;

use crate::error::{ModelError, Result};

/// Kind of index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IndexKind {
    /// `PRIMARY KEY`.
    PrimaryKey,
    /// `UNIQUE INDEX`.
    Unique,
    /// Plain, non-unique `INDEX`.
    #[default]
    Normal,
    /// `FULLTEXT INDEX`.
    FullText,
    /// `SPATIAL INDEX`.
    Spatial,
}

impl IndexKind {
    /// Returns the SQL keyword(s) for this kind.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::PrimaryKey => "PRIMARY KEY",
            Self::Unique => "UNIQUE INDEX",
            Self::Normal => "INDEX",
            Self::FullText => "FULLTEXT INDEX",
            Self::Spatial => "SPATIAL INDEX",
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for IndexKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        let upper = s.to_ascii_uppercase();
        let words: Vec<&str> = upper.split_whitespace().collect();
        let kind = match words.as_slice() {
            ["PRIMARY"] | ["PRIMARY", "KEY"] => Self::PrimaryKey,
            ["UNIQUE"] | ["UNIQUE", "KEY" | "INDEX"] => Self::Unique,
            ["KEY"] | ["INDEX"] => Self::Normal,
            ["FULLTEXT"] | ["FULLTEXT", "KEY" | "INDEX"] => Self::FullText,
            ["SPATIAL"] | ["SPATIAL", "KEY" | "INDEX"] => Self::Spatial,
            _ => return Err(ModelError::UnknownIndexKind(s.to_string())),
        };
        Ok(kind)
    }
}

/// Index storage type (`USING ...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IndexType {
    /// No `USING` clause.
    #[default]
    None,
    /// `USING BTREE`.
    BTree,
    /// `USING HASH`.
    Hash,
}

impl IndexType {
    /// Returns the `USING` clause, or an empty string for [`IndexType::None`].
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::None => "",
            Self::BTree => "USING BTREE",
            Self::Hash => "USING HASH",
        }
    }
}

impl fmt::Display for IndexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for IndexType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_ascii_uppercase();
        let ty = match upper.strip_prefix("USING").map_or(upper.as_str(), str::trim) {
            "" => Self::None,
            "BTREE" => Self::BTree,
            "HASH" => Self::Hash,
            _ => return Err(ModelError::UnknownIndexType(s.to_string())),
        };
        Ok(ty)
    }
}

/// Sort direction of an index column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortDirection {
    /// No direction given.
    #[default]
    None,
    /// `ASC`.
    Asc,
    /// `DESC`.
    Desc,
}

/// A column reference inside an index definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexColumn {
    name: String,
    length: Option<u32>,
    direction: SortDirection,
}

impl IndexColumn {
    /// Creates a reference to the column `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            length: None,
            direction: SortDirection::None,
        }
    }

    /// Sets the prefix length, e.g. `name(10)`.
    #[must_use]
    pub fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Sets the sort direction.
    #[must_use]
    pub fn direction(mut self, direction: SortDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Identity of the indexed column.
    #[must_use]
    pub fn id(&self) -> String {
        format!("indexcol#{}", self.name)
    }

    /// Name of the indexed column.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Prefix length, as in `name(10)`.
    #[must_use]
    pub const fn prefix_length(&self) -> Option<u32> {
        self.length
    }

    /// Declared sort direction.
    #[must_use]
    pub const fn sort_direction(&self) -> SortDirection {
        self.direction
    }
}

/// An index definition: `PRIMARY KEY (...)`, `UNIQUE KEY name (...)`, etc.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Index {
    kind: IndexKind,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    ty: IndexType,
    name: Option<String>,
    table_id: String,
    columns: Vec<IndexColumn>,
}

impl Index {
    /// Creates an empty index of `kind` owned by the table `table_id`.
    #[must_use]
    pub fn new(kind: IndexKind, table_id: impl Into<String>) -> Self {
        Self {
            kind,
            ty: IndexType::None,
            name: None,
            table_id: table_id.into(),
            columns: Vec::new(),
        }
    }

    /// Sets the index name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the index type.
    #[must_use]
    pub fn with_type(mut self, ty: IndexType) -> Self {
        self.ty = ty;
        self
    }

    /// Appends an indexed column.
    #[must_use]
    pub fn with_column(mut self, column: IndexColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Deterministic identity of this index.
    ///
    /// Indexes are frequently unnamed, so the identity also covers the
    /// owning table, kind, type and indexed columns.
    #[must_use]
    pub fn id(&self) -> String {
        let mut id = String::from("index");
        if let Some(name) = &self.name {
            id.push('#');
            id.push_str(name);
        }
        id.push('#');
        id.push_str(&self.table_id);
        id.push('.');
        id.push_str(self.kind.as_sql());
        id.push('.');
        id.push_str(self.ty.as_sql());
        for column in &self.columns {
            id.push('.');
            id.push_str(&column.id());
        }
        id
    }

    /// Kind of the index.
    #[must_use]
    pub const fn kind(&self) -> IndexKind {
        self.kind
    }

    /// Whether this is the `PRIMARY KEY`.
    #[must_use]
    pub const fn is_primary_key(&self) -> bool {
        matches!(self.kind, IndexKind::PrimaryKey)
    }

    /// Whether this is a `UNIQUE` index.
    #[must_use]
    pub const fn is_unique(&self) -> bool {
        matches!(self.kind, IndexKind::Unique)
    }

    /// Index algorithm (`USING ...`).
    #[must_use]
    pub const fn index_type(&self) -> IndexType {
        self.ty
    }

    /// Sets the index algorithm.
    pub fn set_type(&mut self, ty: IndexType) -> &mut Self {
        self.ty = ty;
        self
    }

    /// Whether the index was given a name.
    #[must_use]
    pub const fn has_name(&self) -> bool {
        self.name.is_some()
    }

    /// Index name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Sets the index name.
    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    /// Identity of the owning table.
    #[must_use]
    pub fn table_id(&self) -> &str {
        &self.table_id
    }

    /// Appends columns to the index.
    pub fn add_columns(&mut self, columns: impl IntoIterator<Item = IndexColumn>) -> &mut Self {
        self.columns.extend(columns);
        self
    }

    /// Indexed columns, in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[IndexColumn] {
        &self.columns
    }

    /// Rewrites the index into the form MySQL reports back for it.
    ///
    /// An unnamed index other than the primary key takes the name of
    /// its first column, and `ASC` (the default) is dropped from index
    /// columns.
    #[must_use]
    pub fn normalize(&self) -> Cow<'_, Self> {
        let mut index = Cow::Borrowed(self);

        if self.name.is_none() && !self.is_primary_key() {
            if let Some(first) = self.columns.first() {
                index.to_mut().name = Some(first.name.clone());
            }
        }

        if self
            .columns
            .iter()
            .any(|c| c.direction == SortDirection::Asc)
        {
            for column in &mut index.to_mut().columns {
                if column.direction == SortDirection::Asc {
                    column.direction = SortDirection::None;
                }
            }
        }

        index
    }
}
