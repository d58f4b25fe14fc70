//! Interprets a [`Page`] as a leaf node: a small header followed by an
//! array of key/row cells kept in ascending key order.

use crate::types::{
    PAGE_SIZE,
    error::{DatabaseError, Result},
    page::Page,
    row::{ROW_SIZE, Row},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Internal = 0,
    Leaf = 1,
}

impl NodeType {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => NodeType::Internal,
            1 => NodeType::Leaf,
            other => panic!("unknown node type byte: {other}"),
        }
    }
}

/*
 * Leaf Node Layout on Disk
 * ┌──────────────────────────────────────────────────────────────┐
 * │                     NODE HEADER (10 bytes)                   │
 * │  node_type(1) | is_root(1) | parent_pointer(4) | num_cells(4)│
 * ├──────────────────────────────────────────────────────────────┤
 * │                     CELLS (295 bytes each)                   │
 * │  [key(4)|row(291)] [key(4)|row(291)] ... up to 13 cells      │
 * └──────────────────────────────────────────────────────────────┘
 */

// Common Node Header Layout
const NODE_TYPE_SIZE: usize = 1;
const NODE_TYPE_OFFSET: usize = 0;
const IS_ROOT_SIZE: usize = 1;
const IS_ROOT_OFFSET: usize = NODE_TYPE_OFFSET + NODE_TYPE_SIZE;
const PARENT_POINTER_SIZE: usize = 4; // reserved for a future multi-level tree
const PARENT_POINTER_OFFSET: usize = IS_ROOT_OFFSET + IS_ROOT_SIZE;
const COMMON_NODE_HEADER_SIZE: usize = NODE_TYPE_SIZE + IS_ROOT_SIZE + PARENT_POINTER_SIZE;

// Leaf Node Header Layout
const LEAF_NODE_NUM_CELLS_SIZE: usize = 4;
const LEAF_NODE_NUM_CELLS_OFFSET: usize = COMMON_NODE_HEADER_SIZE;
pub const LEAF_NODE_HEADER_SIZE: usize = COMMON_NODE_HEADER_SIZE + LEAF_NODE_NUM_CELLS_SIZE;

// Leaf Node Body Layout
pub const LEAF_NODE_KEY_SIZE: usize = 4;
pub const LEAF_NODE_CELL_SIZE: usize = LEAF_NODE_KEY_SIZE + ROW_SIZE;
pub const LEAF_NODE_SPACE_FOR_CELLS: usize = PAGE_SIZE - LEAF_NODE_HEADER_SIZE;
pub const LEAF_NODE_MAX_CELLS: usize = LEAF_NODE_SPACE_FOR_CELLS / LEAF_NODE_CELL_SIZE;

/// Set up an empty leaf node in a fresh page.
pub fn initialize(page: &mut Page) {
    page.write_u8(NODE_TYPE_OFFSET, NodeType::Leaf.as_u8());
    page.write_u8(IS_ROOT_OFFSET, 0);
    page.write_u32(PARENT_POINTER_OFFSET, 0);
    set_cell_count(page, 0);
}

pub fn node_type(page: &Page) -> NodeType {
    NodeType::from_u8(page.read_u8(NODE_TYPE_OFFSET))
}

pub fn is_root(page: &Page) -> bool {
    page.read_u8(IS_ROOT_OFFSET) != 0
}

pub fn set_is_root(page: &mut Page, is_root: bool) {
    page.write_u8(IS_ROOT_OFFSET, is_root as u8);
}

pub fn cell_count(page: &Page) -> u32 {
    page.read_u32(LEAF_NODE_NUM_CELLS_OFFSET)
}

pub fn set_cell_count(page: &mut Page, count: u32) {
    page.write_u32(LEAF_NODE_NUM_CELLS_OFFSET, count);
}

fn cell_offset(cell_num: u32) -> usize {
    assert!(
        (cell_num as usize) < LEAF_NODE_MAX_CELLS,
        "cell index {cell_num} out of bounds (max {LEAF_NODE_MAX_CELLS})"
    );
    LEAF_NODE_HEADER_SIZE + cell_num as usize * LEAF_NODE_CELL_SIZE
}

/// The full key+row byte window of cell `cell_num`.
pub fn cell_bytes_at(page: &Page, cell_num: u32) -> &[u8] {
    let start = cell_offset(cell_num);
    &page.as_bytes()[start..start + LEAF_NODE_CELL_SIZE]
}

pub fn key_at(page: &Page, cell_num: u32) -> u32 {
    page.read_u32(cell_offset(cell_num))
}

fn set_key_at(page: &mut Page, cell_num: u32, key: u32) {
    page.write_u32(cell_offset(cell_num), key);
}

pub fn row_bytes_at(page: &Page, cell_num: u32) -> &[u8] {
    let start = cell_offset(cell_num) + LEAF_NODE_KEY_SIZE;
    &page.as_bytes()[start..start + ROW_SIZE]
}

pub fn row_bytes_at_mut(page: &mut Page, cell_num: u32) -> &mut [u8] {
    let start = cell_offset(cell_num) + LEAF_NODE_KEY_SIZE;
    &mut page.as_bytes_mut()[start..start + ROW_SIZE]
}

/// Insert a key/row pair into slot `cell_num`, shifting cells
/// `[cell_num, count)` one slot to the right to keep the array ordered.
///
/// Supports both append (`cell_num == count`) and mid-insert.
pub fn insert_at(page: &mut Page, cell_num: u32, key: u32, row: &Row) -> Result<()> {
    let count = cell_count(page);
    if count as usize >= LEAF_NODE_MAX_CELLS {
        return Err(DatabaseError::CapacityExceeded {
            max_cells: LEAF_NODE_MAX_CELLS,
        });
    }
    if cell_num < count {
        // Make room for the new cell
        let start = cell_offset(cell_num);
        let end = cell_offset(count);
        page.as_bytes_mut()
            .copy_within(start..end, start + LEAF_NODE_CELL_SIZE);
    }
    set_key_at(page, cell_num, key);
    row.write_to(row_bytes_at_mut(page, cell_num));
    set_cell_count(page, count + 1);
    Ok(())
}
