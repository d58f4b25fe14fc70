use std::path::Path;

use tracing::{debug, info};

use crate::{
    storage::{cursor::Cursor, leaf_node, pager::Pager},
    types::{PageId, error::Result, row::Row},
};

/// A single-table database: one root leaf node plus the pager behind it.
pub struct Table {
    pager: Pager,
    root_page_num: PageId,
}

impl Table {
    /// Open the database file and materialize the root leaf.
    ///
    /// A fresh file gets page 0 initialized as an empty root leaf; an
    /// existing file gets it loaded, so close always rewrites a complete
    /// file even when no operation ran in between.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let pager = Pager::open(path)?;
        let fresh = pager.num_pages() == 0;
        let mut table = Self {
            pager,
            root_page_num: 0,
        };
        let root = table.pager.get_page(table.root_page_num)?;
        if fresh {
            leaf_node::initialize(root);
            leaf_node::set_is_root(root, true);
            info!("initialized new database with an empty root leaf");
        } else {
            debug!(rows = leaf_node::cell_count(root), "opened existing database");
        }
        Ok(table)
    }

    /// Append a row at the end of the root leaf, keyed by its id.
    ///
    /// The row is valid by construction ([`Row::new`] enforces the id sign
    /// and the field widths), so the only failure left is a full leaf.
    pub fn insert(&mut self, row: &Row) -> Result<()> {
        let key = row.id() as u32;
        let mut cursor = Cursor::at_table_end(self)?;
        cursor.insert(key, row)
    }

    /// Walk the table in cell order and decode every row.
    pub fn scan(&mut self) -> Result<Vec<Row>> {
        let mut rows = Vec::new();
        let mut cursor = Cursor::at_table_start(self)?;
        while !cursor.end_of_table() {
            rows.push(cursor.read_row()?);
            cursor.advance()?;
        }
        Ok(rows)
    }

    pub fn row_count(&mut self) -> Result<u32> {
        let root_page_num = self.root_page_num;
        let root = self.pager.get_page(root_page_num)?;
        Ok(leaf_node::cell_count(root))
    }

    /// Flush every touched page and release the file.
    pub fn close(self) -> Result<()> {
        self.pager.close()
    }

    pub(crate) fn root_page_num(&self) -> PageId {
        self.root_page_num
    }

    pub(crate) fn pager_mut(&mut self) -> &mut Pager {
        &mut self.pager
    }
}
