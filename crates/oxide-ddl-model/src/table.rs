//! The table aggregate.
//!
//! A [`Table`] owns its columns, indexes and options behind a single
//! reader/writer lock, so a table can be shared between threads and
//! extended through `&self`. Every mutation, including index and option
//! mutation, is serialized on that lock; lookups take the shared side.
//!
//! Columns, indexes and options are stored as `Arc`s and never mutated
//! once attached, so the snapshots handed out by [`Table::columns`] and
//! friends are cheap and can outlive later mutations of the table.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::column::Column;
use crate::error::{ModelError, Result};
use crate::index::Index;
use crate::option::TableOption;

/// A table definition, as produced from a CREATE TABLE statement.
#[derive(Debug)]
pub struct Table {
    name: String,
    state: RwLock<TableState>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TableState {
    pub(crate) if_not_exists: bool,
    pub(crate) temporary: bool,
    pub(crate) like_table: Option<String>,
    pub(crate) columns: Vec<Arc<Column>>,
    /// Column name to position in `columns`.
    column_positions: HashMap<String, usize>,
    pub(crate) indexes: Vec<Arc<Index>>,
    pub(crate) options: Vec<Arc<TableOption>>,
}

impl Table {
    /// Creates an empty table.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: RwLock::new(TableState::default()),
        }
    }

    /// Creates an empty table, rejecting an empty name.
    pub fn try_new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(ModelError::EmptyTableName);
        }
        Ok(Self::new(name))
    }

    /// Identity of this table. Not globally unique: two tables with the
    /// same name share it.
    #[must_use]
    pub fn id(&self) -> String {
        format!("table#{}", self.name)
    }

    /// Table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn state(&self) -> RwLockReadGuard<'_, TableState> {
        self.state.read()
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn lookup_column(&self, name: &str) -> Option<Arc<Column>> {
        let state = self.state.read();
        let position = *state.column_positions.get(name)?;
        Some(Arc::clone(&state.columns[position]))
    }

    /// Position of the column `name` in declaration order.
    #[must_use]
    pub fn lookup_column_order(&self, name: &str) -> Option<usize> {
        self.state.read().column_positions.get(name).copied()
    }

    /// The column declared immediately before `name`.
    ///
    /// Returns `None` if `name` does not exist or is the first column.
    #[must_use]
    pub fn lookup_column_before(&self, name: &str) -> Option<Arc<Column>> {
        let state = self.state.read();
        let position = *state.column_positions.get(name)?;
        let before = position.checked_sub(1)?;
        Some(Arc::clone(&state.columns[before]))
    }

    /// Looks up an index by its [`Index::id`].
    #[must_use]
    pub fn lookup_index(&self, id: &str) -> Option<Arc<Index>> {
        self.state
            .read()
            .indexes
            .iter()
            .find(|index| index.id() == id)
            .cloned()
    }

    /// Appends a column.
    ///
    /// A column that is still shared with someone else (for example
    /// because it is attached to another table) is copied first, so two
    /// tables never hold the same column instance.
    pub fn add_column(&self, column: impl Into<Arc<Column>>) -> &Self {
        let column = column.into();
        if let Some(owner) = column.table_id() {
            tracing::trace!(
                table = %self.name,
                column = column.name(),
                owner,
                "attaching column already owned by a table"
            );
        }
        let mut column = Arc::unwrap_or_clone(column);
        column.set_table_id(self.id());

        let mut state = self.state.write();
        let position = state.columns.len();
        state
            .column_positions
            .insert(column.name().to_string(), position);
        state.columns.push(Arc::new(column));
        drop(state);
        self
    }

    /// Appends an index. Duplicates are not rejected.
    pub fn add_index(&self, index: impl Into<Arc<Index>>) -> &Self {
        self.state.write().indexes.push(index.into());
        self
    }

    /// Appends an option. Repeated keys are kept.
    pub fn add_option(&self, option: impl Into<Arc<TableOption>>) -> &Self {
        self.state.write().options.push(option.into());
        self
    }

    /// Whether the table was declared `IF NOT EXISTS`.
    #[must_use]
    pub fn is_if_not_exists(&self) -> bool {
        self.state.read().if_not_exists
    }

    /// Sets the `IF NOT EXISTS` flag.
    pub fn set_if_not_exists(&self, if_not_exists: bool) -> &Self {
        self.state.write().if_not_exists = if_not_exists;
        self
    }

    /// Whether the table is `TEMPORARY`.
    #[must_use]
    pub fn is_temporary(&self) -> bool {
        self.state.read().temporary
    }

    /// Sets the `TEMPORARY` flag.
    pub fn set_temporary(&self, temporary: bool) -> &Self {
        self.state.write().temporary = temporary;
        self
    }

    /// Whether the table was declared as `LIKE <other>`.
    #[must_use]
    pub fn has_like_table(&self) -> bool {
        self.state.read().like_table.is_some()
    }

    /// Name of the table this one was declared `LIKE`, if any.
    #[must_use]
    pub fn like_table(&self) -> Option<String> {
        self.state.read().like_table.clone()
    }

    /// Sets the `LIKE` source table.
    pub fn set_like_table(&self, like_table: impl Into<String>) -> &Self {
        self.state.write().like_table = Some(like_table.into());
        self
    }

    /// Snapshot of the columns, in declaration order.
    pub fn columns(&self) -> impl ExactSizeIterator<Item = Arc<Column>> {
        self.state.read().columns.clone().into_iter()
    }

    /// Snapshot of the indexes.
    pub fn indexes(&self) -> impl ExactSizeIterator<Item = Arc<Index>> {
        self.state.read().indexes.clone().into_iter()
    }

    /// Snapshot of the options.
    pub fn options(&self) -> impl ExactSizeIterator<Item = Arc<TableOption>> {
        self.state.read().options.clone().into_iter()
    }
}

impl Clone for Table {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            state: RwLock::new(self.state.read().clone()),
        }
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        if self.name != other.name {
            return false;
        }
        // Never hold both guards: with writers queued on both tables, two
        // threads comparing `a == b` and `b == a` would wait on each other.
        let state = self.state.read().clone();
        state == *other.state.read()
    }
}

impl Eq for Table {}

#[cfg(feature = "serde")]
#[derive(serde::Serialize)]
struct TableRef<'a> {
    name: &'a str,
    if_not_exists: bool,
    temporary: bool,
    like_table: Option<&'a str>,
    columns: Vec<&'a Column>,
    indexes: Vec<&'a Index>,
    options: Vec<&'a TableOption>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct TableDef {
    name: String,
    #[serde(default)]
    if_not_exists: bool,
    #[serde(default)]
    temporary: bool,
    #[serde(default)]
    like_table: Option<String>,
    #[serde(default)]
    columns: Vec<Column>,
    #[serde(default)]
    indexes: Vec<Index>,
    #[serde(default)]
    options: Vec<TableOption>,
}

#[cfg(feature = "serde")]
impl TryFrom<TableDef> for Table {
    type Error = ModelError;

    fn try_from(def: TableDef) -> Result<Self> {
        let table = Self::try_new(def.name)?;
        table
            .set_if_not_exists(def.if_not_exists)
            .set_temporary(def.temporary);
        if let Some(like_table) = def.like_table {
            table.set_like_table(like_table);
        }
        for column in def.columns {
            table.add_column(column);
        }
        for index in def.indexes {
            table.add_index(index);
        }
        for option in def.options {
            table.add_option(option);
        }
        Ok(table)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Table {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        let state = self.state.read();
        let table = TableRef {
            name: &self.name,
            if_not_exists: state.if_not_exists,
            temporary: state.temporary,
            like_table: state.like_table.as_deref(),
            columns: state.columns.iter().map(AsRef::as_ref).collect(),
            indexes: state.indexes.iter().map(AsRef::as_ref).collect(),
            options: state.options.iter().map(AsRef::as_ref).collect(),
        };
        serde::Serialize::serialize(&table, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Table {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let def = <TableDef as serde::Deserialize>::deserialize(deserializer)?;
        Self::try_from(def).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnType;
    use crate::index::{IndexColumn, IndexKind};

    fn users() -> Table {
        let table = Table::new("users");
        table
            .add_column(Column::new("id", ColumnType::BigInt))
            .add_column(Column::new("name", ColumnType::VarChar).length(255))
            .add_column(Column::new("email", ColumnType::VarChar).length(255));
        table
    }

    #[test]
    fn test_table_identity() {
        let table = Table::new("users");
        assert_eq!(table.id(), "table#users");
        assert_eq!(table.name(), "users");
    }

    #[test]
    fn test_try_new_rejects_empty_name() {
        assert_eq!(Table::try_new("").unwrap_err(), ModelError::EmptyTableName);
        assert!(Table::try_new("t").is_ok());
    }

    #[test]
    fn test_lookup_column() {
        let table = users();

        let name = table.lookup_column("name").unwrap();
        assert_eq!(name.name(), "name");
        assert_eq!(name.table_id(), Some("table#users"));
        assert!(table.lookup_column("missing").is_none());
    }

    #[test]
    fn test_lookup_column_order() {
        let table = users();
        assert_eq!(table.lookup_column_order("id"), Some(0));
        assert_eq!(table.lookup_column_order("email"), Some(2));
        assert_eq!(table.lookup_column_order("missing"), None);
    }

    #[test]
    fn test_lookup_column_before() {
        let table = users();
        assert!(table.lookup_column_before("id").is_none());
        assert_eq!(table.lookup_column_before("name").unwrap().name(), "id");
        assert_eq!(table.lookup_column_before("email").unwrap().name(), "name");
        assert!(table.lookup_column_before("missing").is_none());
    }

    #[test]
    fn test_duplicate_column_name_last_wins() {
        let table = Table::new("t");
        table
            .add_column(Column::new("a", ColumnType::Int))
            .add_column(Column::new("a", ColumnType::Text));

        assert_eq!(table.columns().len(), 2);
        assert_eq!(table.lookup_column_order("a"), Some(1));
        assert_eq!(
            table.lookup_column("a").unwrap().column_type(),
            ColumnType::Text
        );
    }

    #[test]
    fn test_lookup_index() {
        let table = users();
        let index = Index::new(IndexKind::Unique, table.id())
            .with_name("uniq_email")
            .with_column(IndexColumn::new("email"));
        let id = index.id();
        table.add_index(index);

        assert_eq!(table.lookup_index(&id).unwrap().name(), Some("uniq_email"));
        assert!(table.lookup_index("index#nope").is_none());
    }

    #[test]
    fn test_add_column_copies_owned_column() {
        let a = Table::new("a");
        let b = Table::new("b");
        let shared = Arc::new(Column::new("id", ColumnType::Int));

        a.add_column(Arc::clone(&shared));
        b.add_column(a.lookup_column("id").unwrap());

        let in_a = a.lookup_column("id").unwrap();
        let in_b = b.lookup_column("id").unwrap();
        assert!(!Arc::ptr_eq(&in_a, &in_b));
        assert!(!Arc::ptr_eq(&shared, &in_a));
        assert_eq!(in_a.table_id(), Some("table#a"));
        assert_eq!(in_b.table_id(), Some("table#b"));
        assert_eq!(shared.table_id(), None);
    }

    #[test]
    fn test_flags() {
        let table = Table::new("t");
        assert!(!table.is_if_not_exists());
        assert!(!table.is_temporary());
        assert!(!table.has_like_table());

        table
            .set_if_not_exists(true)
            .set_temporary(true)
            .set_like_table("template");

        assert!(table.is_if_not_exists());
        assert!(table.is_temporary());
        assert!(table.has_like_table());
        assert_eq!(table.like_table().as_deref(), Some("template"));
    }

    #[test]
    fn test_snapshots_are_not_live() {
        let table = users();
        let columns = table.columns();
        table.add_column(Column::new("created_at", ColumnType::DateTime));

        assert_eq!(columns.len(), 3);
        assert_eq!(table.columns().len(), 4);

        let names: Vec<_> = table.columns().map(|c| c.name().to_string()).collect();
        assert_eq!(names, vec!["id", "name", "email", "created_at"]);
    }

    #[test]
    fn test_options_keep_repeated_keys() {
        let table = Table::new("t");
        table
            .add_option(TableOption::new("ENGINE", "MyISAM", false))
            .add_option(TableOption::new("ENGINE", "InnoDB", false));

        let values: Vec<_> = table.options().map(|o| o.value().to_string()).collect();
        assert_eq!(values, vec!["MyISAM", "InnoDB"]);
    }

    #[test]
    fn test_clone_and_eq() {
        let table = users();
        let copy = table.clone();
        assert_eq!(table, copy);

        copy.add_column(Column::new("extra", ColumnType::Int));
        assert_ne!(table, copy);
        assert_eq!(table.columns().len(), 3);
    }
}
