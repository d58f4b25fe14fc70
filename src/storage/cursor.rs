use crate::{
    storage::{leaf_node, table::Table},
    types::{PageId, error::Result, row::Row},
};

/// A transient position in the table: a page number plus a cell index.
///
/// Two logical states: positioned (`cell_num < cell_count`) and end-of-table
/// (`cell_num == cell_count`, the insertion point). A cursor is created fresh
/// per operation and owns no resources.
pub struct Cursor<'a> {
    table: &'a mut Table,
    page_num: PageId,
    cell_num: u32,
    end_of_table: bool,
}

impl<'a> Cursor<'a> {
    /// Position at the first cell; end-of-table if the table is empty.
    pub fn at_table_start(table: &'a mut Table) -> Result<Self> {
        let page_num = table.root_page_num();
        let root = table.pager_mut().get_page(page_num)?;
        let num_cells = leaf_node::cell_count(root);
        Ok(Self {
            table,
            page_num,
            cell_num: 0,
            end_of_table: num_cells == 0,
        })
    }

    /// Position one past the last cell, as an insertion point.
    pub fn at_table_end(table: &'a mut Table) -> Result<Self> {
        let page_num = table.root_page_num();
        let root = table.pager_mut().get_page(page_num)?;
        let num_cells = leaf_node::cell_count(root);
        Ok(Self {
            table,
            page_num,
            cell_num: num_cells,
            end_of_table: true,
        })
    }

    pub fn end_of_table(&self) -> bool {
        self.end_of_table
    }

    pub fn cell_num(&self) -> u32 {
        self.cell_num
    }

    /// Step to the next cell. A no-op once past the last cell.
    pub fn advance(&mut self) -> Result<()> {
        if self.end_of_table {
            return Ok(());
        }
        let page = self.table.pager_mut().get_page(self.page_num)?;
        let num_cells = leaf_node::cell_count(page);
        self.cell_num += 1;
        if self.cell_num >= num_cells {
            self.end_of_table = true;
        }
        Ok(())
    }

    /// The byte window of the row under the cursor.
    ///
    /// Callers must check [`Cursor::end_of_table`] first; reading past the
    /// end is a programming error, not a recoverable condition.
    pub fn row_bytes(&mut self) -> Result<&[u8]> {
        assert!(
            !self.end_of_table,
            "cursor read past the end of the table"
        );
        let page = self.table.pager_mut().get_page(self.page_num)?;
        Ok(leaf_node::row_bytes_at(page, self.cell_num))
    }

    pub fn read_row(&mut self) -> Result<Row> {
        Row::from_bytes(self.row_bytes()?)
    }

    /// Write a key/row pair into the cell under the cursor, shifting any
    /// later cells right.
    pub(crate) fn insert(&mut self, key: u32, row: &Row) -> Result<()> {
        let page = self.table.pager_mut().get_page(self.page_num)?;
        leaf_node::insert_at(page, self.cell_num, key, row)
    }
}
