//! Ownership and thread-safety of `Table`.

use std::sync::Arc;
use std::thread;

use oxide_ddl_model::prelude::*;

#[test]
fn same_column_in_two_tables_is_not_aliased() {
    let column = Arc::new(Column::new("id", ColumnType::Int));
    let a = Table::new("a");
    let b = Table::new("b");

    a.add_column(Arc::clone(&column));
    b.add_column(Arc::clone(&column));

    let in_a = a.lookup_column("id").unwrap();
    let in_b = b.lookup_column("id").unwrap();
    assert!(!Arc::ptr_eq(&in_a, &in_b));
    assert_eq!(in_a.table_id(), Some("table#a"));
    assert_eq!(in_b.table_id(), Some("table#b"));

    // Changing a's copy leaves b's copy alone.
    let mut changed = Column::clone(&in_a);
    changed.set_character_set("utf8");
    a.add_column(changed);
    assert_eq!(b.lookup_column("id").unwrap().character_set(), None);
}

#[test]
fn moving_a_column_between_tables_retags_it() {
    let a = Table::new("a");
    a.add_column(Column::new("id", ColumnType::Int));

    let b = Table::new("b");
    b.add_column(Column::clone(&a.lookup_column("id").unwrap()));
    assert_eq!(b.lookup_column("id").unwrap().table_id(), Some("table#b"));
    assert_eq!(a.lookup_column("id").unwrap().table_id(), Some("table#a"));
}

#[test]
fn concurrent_add_and_lookup() {
    const WRITERS: usize = 4;
    const PER_WRITER: usize = 50;

    let table = Table::new("t");
    thread::scope(|s| {
        for w in 0..WRITERS {
            let table = &table;
            s.spawn(move || {
                for i in 0..PER_WRITER {
                    table.add_column(Column::new(format!("c{w}_{i}"), ColumnType::Int));
                }
            });
        }
        for _ in 0..2 {
            let table = &table;
            s.spawn(move || {
                for i in 0..PER_WRITER {
                    let name = format!("c0_{i}");
                    if let (Some(col), Some(pos)) =
                        (table.lookup_column(&name), table.lookup_column_order(&name))
                    {
                        assert_eq!(col.name(), name);
                        assert!(pos < WRITERS * PER_WRITER);
                    }
                    let _ = table.normalize();
                }
            });
        }
    });

    assert_eq!(table.columns().len(), WRITERS * PER_WRITER);
    for (position, column) in table.columns().enumerate() {
        assert_eq!(table.lookup_column_order(column.name()), Some(position));
    }
}

#[test]
fn concurrent_cross_comparisons_with_writers() {
    const ROUNDS: usize = 2_000;

    let a = Table::new("t");
    let b = Table::new("t");
    a.add_column(Column::new("id", ColumnType::Int));
    b.add_column(Column::new("id", ColumnType::Int));

    thread::scope(|s| {
        s.spawn(|| {
            for _ in 0..ROUNDS {
                let _ = a == b;
            }
        });
        s.spawn(|| {
            for _ in 0..ROUNDS {
                let _ = b == a;
            }
        });
        for table in [&a, &b] {
            s.spawn(move || {
                for i in 0..ROUNDS {
                    table.set_temporary(i % 2 == 0);
                }
            });
        }
    });

    a.set_temporary(false);
    b.set_temporary(false);
    assert!(a == b);
}

#[test]
fn table_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Table>();
}
