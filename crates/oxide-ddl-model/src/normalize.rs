//! Table normalization.
//!
//! Two CREATE TABLE statements can describe the same table in different
//! words: `id INT PRIMARY KEY` and `id INT, PRIMARY KEY (id)` are
//! equivalent, as are a column that inherits the table's default
//! character set and one that spells it out. [`Table::normalize`] rewrites
//! a table into a single canonical form so that a diff engine can compare
//! tables structurally.

use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::Arc;

use crate::collation::default_collation_for;
use crate::column::Column;
use crate::index::{Index, IndexColumn, IndexKind, IndexType};
use crate::table::Table;

const DEFAULT_CHARACTER_SET: &str = "DEFAULT CHARACTER SET";
const DEFAULT_COLLATE: &str = "DEFAULT COLLATE";

impl Table {
    /// Returns the canonical form of this table.
    ///
    /// - Inline `PRIMARY KEY` and `UNIQUE` column constraints become
    ///   explicit indexes, placed before the declared indexes.
    /// - Text columns without a character set or collation inherit the
    ///   table defaults (`DEFAULT CHARACTER SET`, `DEFAULT COLLATE`), or
    ///   the default collation of their character set.
    /// - Every column and index is normalized on its own.
    ///
    /// Returns [`Cow::Borrowed`] if the table is already canonical.
    /// Otherwise returns [`Cow::Owned`] with a new table; `self` is left
    /// untouched either way.
    #[must_use]
    pub fn normalize(&self) -> Cow<'_, Self> {
        let state = self.state();
        let table_id = self.id();
        let mut changed = false;

        let mut default_character_set = None;
        let mut default_collation = None;
        for option in &state.options {
            match option.key().to_uppercase().as_str() {
                DEFAULT_CHARACTER_SET => default_character_set = Some(option.value()),
                DEFAULT_COLLATE => default_collation = Some(option.value()),
                _ => {}
            }
        }
        let default_character_set = default_character_set.filter(|v| !v.is_empty());
        let default_collation = default_collation.filter(|v| !v.is_empty());

        let mut additional_indexes = Vec::new();
        let mut columns = Vec::with_capacity(state.columns.len());
        for column in &state.columns {
            let mut column = column.normalize();
            if matches!(column, Cow::Owned(_)) {
                changed = true;
            }

            // `col ... PRIMARY KEY` and `col ... UNIQUE` mean the same as
            // the table-level constraint; only one of them is lifted.
            if column.is_primary() {
                tracing::debug!(
                    table = %self.name(),
                    column = column.name(),
                    "lifting inline PRIMARY KEY into an index"
                );
                additional_indexes.push(
                    Index::new(IndexKind::PrimaryKey, &table_id)
                        .with_type(IndexType::None)
                        .with_column(IndexColumn::new(column.name())),
                );
                column.to_mut().set_primary(false);
                changed = true;
            } else if column.is_unique() {
                tracing::debug!(
                    table = %self.name(),
                    column = column.name(),
                    "lifting inline UNIQUE into an index"
                );
                // An unnamed index is named after its first column.
                additional_indexes.push(
                    Index::new(IndexKind::Unique, &table_id)
                        .with_name(column.name())
                        .with_type(IndexType::None)
                        .with_column(IndexColumn::new(column.name())),
                );
                column.to_mut().set_unique(false);
                changed = true;
            }

            if column.column_type().is_text()
                && apply_text_defaults(&mut column, default_character_set, default_collation)
            {
                changed = true;
            }

            columns.push(column);
        }

        let mut indexes = Vec::with_capacity(state.indexes.len());
        let mut seen = HashSet::new();
        for index in &state.indexes {
            let index = index.normalize();
            if matches!(index, Cow::Owned(_)) {
                changed = true;
            }
            if let Some(name) = index.name() {
                seen.insert(name.to_string());
            }
            indexes.push(index);
        }

        for name in additional_indexes.iter().filter_map(Index::name) {
            if seen.contains(name) {
                tracing::warn!(
                    table = %self.name(),
                    index = name,
                    "lifted UNIQUE constraint shares its name with a declared index"
                );
            }
        }

        if !changed {
            return Cow::Borrowed(self);
        }

        let table = Self::new(self.name());
        table
            .set_if_not_exists(state.if_not_exists)
            .set_temporary(state.temporary);
        if let Some(like_table) = &state.like_table {
            table.set_like_table(like_table.clone());
        }
        for index in additional_indexes {
            table.add_index(index);
        }
        for column in columns {
            table.add_column(column.into_owned());
        }
        for index in indexes {
            table.add_index(index.into_owned());
        }
        for option in &state.options {
            table.add_option(Arc::clone(option));
        }

        tracing::trace!(
            table = %self.name(),
            lifted = table.indexes().len() - state.indexes.len(),
            "rebuilt normalized table"
        );
        Cow::Owned(table)
    }
}

/// Fills in a text column's missing character set and collation.
///
/// Explicit column settings are never overridden. Returns `true` if the
/// column was changed.
fn apply_text_defaults(
    column: &mut Cow<'_, Column>,
    default_character_set: Option<&str>,
    default_collation: Option<&str>,
) -> bool {
    let mut changed = false;

    if !column.has_character_set() {
        if let Some(character_set) = default_character_set {
            column.to_mut().set_character_set(character_set);
            changed = true;
        }
    }

    if !column.has_collation() {
        let collation = match column.character_set() {
            Some(character_set)
                if Some(character_set) == default_character_set
                    && default_collation.is_some() =>
            {
                default_collation
            }
            Some(character_set) => default_collation_for(character_set),
            None => default_collation,
        };
        if let Some(collation) = collation {
            column.to_mut().set_collation(collation);
            changed = true;
        }
    }

    changed
}
