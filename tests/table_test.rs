use std::{fs, path::PathBuf};

use gudang::{
    storage::{leaf_node::LEAF_NODE_MAX_CELLS, table::Table},
    types::{PAGE_SIZE, error::DatabaseError, row::Row},
};
use tempfile::TempDir;

fn temp_db_path(dir: &TempDir) -> PathBuf {
    dir.path().join("table_test.db")
}

fn create_test_row(id: i32) -> Row {
    Row::new(id, &format!("user{id}"), &format!("person{id}@example.com")).unwrap()
}

fn fill_table(table: &mut Table, count: usize) {
    for id in 1..=count as i32 {
        table.insert(&create_test_row(id)).unwrap();
    }
}

#[test]
fn test_scan_of_empty_table_is_empty() {
    let dir = TempDir::new().unwrap();
    let mut table = Table::open(temp_db_path(&dir)).unwrap();
    assert_eq!(table.scan().unwrap(), Vec::new());
    assert_eq!(table.row_count().unwrap(), 0);
}

#[test]
fn test_insert_then_scan_preserves_order() {
    let dir = TempDir::new().unwrap();
    let mut table = Table::open(temp_db_path(&dir)).unwrap();
    fill_table(&mut table, LEAF_NODE_MAX_CELLS);

    let rows = table.scan().unwrap();
    assert_eq!(rows.len(), LEAF_NODE_MAX_CELLS);
    for (index, row) in rows.iter().enumerate() {
        let id = index as i32 + 1;
        assert_eq!(row.id(), id);
        assert_eq!(row.username(), format!("user{id}"));
        assert_eq!(row.email(), format!("person{id}@example.com"));
    }
}

#[test]
fn test_capacity_boundary() {
    let dir = TempDir::new().unwrap();
    let mut table = Table::open(temp_db_path(&dir)).unwrap();
    fill_table(&mut table, LEAF_NODE_MAX_CELLS);

    let overflow = create_test_row(LEAF_NODE_MAX_CELLS as i32 + 1);
    assert!(matches!(
        table.insert(&overflow),
        Err(DatabaseError::CapacityExceeded { .. })
    ));

    // The table is unchanged and still usable for scans
    let rows = table.scan().unwrap();
    assert_eq!(rows.len(), LEAF_NODE_MAX_CELLS);
    assert_eq!(rows[LEAF_NODE_MAX_CELLS - 1].id(), LEAF_NODE_MAX_CELLS as i32);
}

#[test]
fn test_persistence_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = temp_db_path(&dir);
    {
        let mut table = Table::open(&path).unwrap();
        fill_table(&mut table, 5);
        table.close().unwrap();
    }

    let file_length = fs::metadata(&path).unwrap().len();
    assert_eq!(file_length % PAGE_SIZE as u64, 0);

    let mut table = Table::open(&path).unwrap();
    let rows = table.scan().unwrap();
    assert_eq!(rows.len(), 5);
    for (index, row) in rows.iter().enumerate() {
        assert_eq!(*row, create_test_row(index as i32 + 1));
    }
    table.close().unwrap();
}

#[test]
fn test_close_without_mutation_leaves_one_page_file() {
    let dir = TempDir::new().unwrap();
    let path = temp_db_path(&dir);
    {
        let table = Table::open(&path).unwrap();
        table.close().unwrap();
    }
    assert_eq!(fs::metadata(&path).unwrap().len(), PAGE_SIZE as u64);

    // Reopening the untouched file still yields a valid empty leaf
    let mut table = Table::open(&path).unwrap();
    assert_eq!(table.scan().unwrap(), Vec::new());
    table.close().unwrap();
    assert_eq!(fs::metadata(&path).unwrap().len(), PAGE_SIZE as u64);
}

#[test]
fn test_reopen_and_append() {
    let dir = TempDir::new().unwrap();
    let path = temp_db_path(&dir);
    {
        let mut table = Table::open(&path).unwrap();
        fill_table(&mut table, 3);
        table.close().unwrap();
    }
    {
        let mut table = Table::open(&path).unwrap();
        table.insert(&create_test_row(4)).unwrap();
        table.insert(&create_test_row(5)).unwrap();
        table.close().unwrap();
    }

    let mut table = Table::open(&path).unwrap();
    let ids: Vec<i32> = table.scan().unwrap().iter().map(Row::id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_full_table_stays_full_across_reopen() {
    let dir = TempDir::new().unwrap();
    let path = temp_db_path(&dir);
    {
        let mut table = Table::open(&path).unwrap();
        fill_table(&mut table, LEAF_NODE_MAX_CELLS);
        table.close().unwrap();
    }

    let mut table = Table::open(&path).unwrap();
    assert_eq!(table.row_count().unwrap(), LEAF_NODE_MAX_CELLS as u32);
    assert!(matches!(
        table.insert(&create_test_row(99)),
        Err(DatabaseError::CapacityExceeded { .. })
    ));
}
