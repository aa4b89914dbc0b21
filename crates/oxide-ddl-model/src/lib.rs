//! # oxide-ddl-model
//!
//! An in-memory model of CREATE TABLE statements, with a normalizer that
//! rewrites a table into a canonical form for structural comparison.
//!
//! A statement parser builds a [`Table`] and attaches [`Column`],
//! [`Index`] and [`TableOption`] values to it. Before two tables are
//! compared, each side is passed through [`Table::normalize`], which:
//!
//! - lifts inline `PRIMARY KEY` / `UNIQUE` column constraints into
//!   explicit indexes, ahead of the declared indexes,
//! - fills in missing character sets and collations of text columns from
//!   the table defaults,
//! - normalizes every column and index (type synonyms, display widths,
//!   implicit index names, ...).
//!
//! ```rust
//! use std::borrow::Cow;
//!
//! use oxide_ddl_model::prelude::*;
//!
//! let table = Table::new("t");
//! table
//!     .add_column(Column::new("id", ColumnType::Int).primary_key())
//!     .add_column(Column::new("name", ColumnType::VarChar).length(10))
//!     .add_option(TableOption::new("DEFAULT CHARACTER SET", "latin1", false));
//!
//! let normalized = table.normalize();
//! assert!(matches!(normalized, Cow::Owned(_)));
//!
//! let primary = normalized.indexes().next().unwrap();
//! assert_eq!(primary.kind(), IndexKind::PrimaryKey);
//!
//! let name = normalized.lookup_column("name").unwrap();
//! assert_eq!(name.collation(), Some("latin1_swedish_ci"));
//!
//! // Normalizing again is a no-op.
//! assert!(matches!(normalized.normalize(), Cow::Borrowed(_)));
//! ```
//!
//! ## Features
//!
//! - `serde` (default): `Serialize`/`Deserialize` for all model types.

pub mod collation;
pub mod column;
pub mod error;
pub mod index;
mod normalize;
pub mod option;
pub mod table;

pub use collation::default_collation_for;
pub use column::{Column, ColumnLength, ColumnType, DefaultValue, NullState};
pub use error::{ModelError, Result};
pub use index::{Index, IndexColumn, IndexKind, IndexType, SortDirection};
pub use option::TableOption;
pub use table::Table;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::column::{Column, ColumnLength, ColumnType, DefaultValue, NullState};
    pub use crate::error::{ModelError, Result};
    pub use crate::index::{Index, IndexColumn, IndexKind, IndexType, SortDirection};
    pub use crate::option::TableOption;
    pub use crate::table::Table;
}
