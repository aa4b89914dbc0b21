#![allow(dead_code)]

use std::borrow::Cow;

use oxide_ddl_model::prelude::*;

/// Normalizes `table`, panicking if nothing changed.
pub fn normalize_changed(table: &Table) -> Table {
    match table.normalize() {
        Cow::Owned(t) => t,
        Cow::Borrowed(_) => panic!("Expected table '{}' to change", table.name()),
    }
}

/// Asserts that `table` is already in normal form.
pub fn assert_normalized(table: &Table) {
    assert!(
        matches!(table.normalize(), Cow::Borrowed(_)),
        "Expected table '{}' to be in normal form",
        table.name()
    );
}

pub fn column_names(table: &Table) -> Vec<String> {
    table.columns().map(|c| c.name().to_string()).collect()
}

/// `CREATE TABLE t (id INT PRIMARY KEY, name VARCHAR(10)) DEFAULT CHARACTER SET = latin1`
pub fn latin1_table() -> Table {
    let table = Table::new("t");
    table
        .add_column(Column::new("id", ColumnType::Int).primary_key())
        .add_column(Column::new("name", ColumnType::VarChar).length(10))
        .add_option(TableOption::new("DEFAULT CHARACTER SET", "latin1", false));
    table
}
