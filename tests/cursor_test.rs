use gudang::{
    storage::{cursor::Cursor, table::Table},
    types::row::Row,
};
use tempfile::TempDir;

fn open_table(dir: &TempDir) -> Table {
    Table::open(dir.path().join("cursor_test.db")).unwrap()
}

fn create_test_row(id: i32) -> Row {
    Row::new(id, &format!("user{id}"), &format!("person{id}@example.com")).unwrap()
}

#[test]
fn test_start_cursor_on_empty_table_is_at_end() {
    let dir = TempDir::new().unwrap();
    let mut table = open_table(&dir);
    let cursor = Cursor::at_table_start(&mut table).unwrap();
    assert!(cursor.end_of_table());
    assert_eq!(cursor.cell_num(), 0);
}

#[test]
fn test_end_cursor_points_one_past_the_last_cell() {
    let dir = TempDir::new().unwrap();
    let mut table = open_table(&dir);
    table.insert(&create_test_row(1)).unwrap();
    table.insert(&create_test_row(2)).unwrap();

    let cursor = Cursor::at_table_end(&mut table).unwrap();
    assert!(cursor.end_of_table());
    assert_eq!(cursor.cell_num(), 2);
}

#[test]
fn test_walk_visits_every_row_in_order() {
    let dir = TempDir::new().unwrap();
    let mut table = open_table(&dir);
    for id in 1..=3 {
        table.insert(&create_test_row(id)).unwrap();
    }

    let mut cursor = Cursor::at_table_start(&mut table).unwrap();
    let mut ids = Vec::new();
    while !cursor.end_of_table() {
        ids.push(cursor.read_row().unwrap().id());
        cursor.advance().unwrap();
    }
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn test_advance_past_the_end_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    let mut table = open_table(&dir);
    table.insert(&create_test_row(1)).unwrap();

    let mut cursor = Cursor::at_table_start(&mut table).unwrap();
    cursor.advance().unwrap();
    assert!(cursor.end_of_table());
    let cell_num = cursor.cell_num();
    cursor.advance().unwrap();
    cursor.advance().unwrap();
    assert!(cursor.end_of_table());
    assert_eq!(cursor.cell_num(), cell_num);
}

#[test]
#[should_panic(expected = "past the end of the table")]
fn test_reading_at_end_of_table_panics() {
    let dir = TempDir::new().unwrap();
    let mut table = open_table(&dir);
    let mut cursor = Cursor::at_table_start(&mut table).unwrap();
    let _ = cursor.row_bytes();
}
