use std::{
    fs::{File, OpenOptions},
    io::{Read, Seek, SeekFrom, Write},
    path::Path,
};

use tracing::debug;

use crate::types::{
    PAGE_SIZE, PageId, TABLE_MAX_PAGES,
    error::{DatabaseError, Result},
    page::Page,
};

/// Owns the database file and a bounded, no-eviction cache of its pages.
///
/// Pages are loaded lazily on first reference and kept until [`Pager::close`]
/// rewrites the whole file. There is a single writer and no incremental
/// commit.
#[derive(Debug)]
pub struct Pager {
    file: File,
    file_length: u64,
    num_pages: u32,
    pages: Vec<Option<Page>>,
}

impl Pager {
    /// Open (or create) the database file behind `path`.
    ///
    /// Fails with `CorruptFile` if the file length is not an exact multiple
    /// of the page size, before any page is touched.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)?;
        let file_length = file.metadata()?.len();
        if file_length % PAGE_SIZE as u64 != 0 {
            return Err(DatabaseError::CorruptFile {
                length: file_length,
            });
        }
        let num_pages = (file_length / PAGE_SIZE as u64) as u32;
        let mut pages = Vec::with_capacity(TABLE_MAX_PAGES);
        pages.resize_with(TABLE_MAX_PAGES, || None);
        debug!(
            path = %path.display(),
            file_length,
            num_pages,
            "opened database file"
        );
        Ok(Self {
            file,
            file_length,
            num_pages,
            pages,
        })
    }

    /// Pages referenced so far, on disk or in the cache.
    pub fn num_pages(&self) -> u32 {
        self.num_pages
    }

    /// Fetch a page, reading it from disk on first reference.
    ///
    /// A page index past `TABLE_MAX_PAGES` can only come from a logic bug in
    /// the caller (e.g. a mis-tracked root page), so it panics instead of
    /// returning a recoverable error.
    pub fn get_page(&mut self, page_num: PageId) -> Result<&mut Page> {
        let index = page_num as usize;
        assert!(
            index < TABLE_MAX_PAGES,
            "page number {page_num} out of bounds (max {TABLE_MAX_PAGES})"
        );
        if self.pages[index].is_none() {
            let mut page = Page::zeroed();
            let pages_on_disk = (self.file_length / PAGE_SIZE as u64) as u32;
            if page_num < pages_on_disk {
                self.file
                    .seek(SeekFrom::Start(page_num as u64 * PAGE_SIZE as u64))?;
                self.file.read_exact(page.as_bytes_mut())?;
            }
            if page_num >= self.num_pages {
                self.num_pages = page_num + 1;
            }
            self.pages[index] = Some(page);
        }
        match &mut self.pages[index] {
            Some(page) => Ok(page),
            None => unreachable!("page {page_num} was cached above"),
        }
    }

    /// Write every cached page back to its file offset.
    pub fn flush_all(&mut self) -> Result<()> {
        for page_num in 0..self.num_pages {
            self.flush_page(page_num)?;
        }
        Ok(())
    }

    fn flush_page(&mut self, page_num: PageId) -> Result<()> {
        let Some(page) = &self.pages[page_num as usize] else {
            return Ok(());
        };
        self.file
            .seek(SeekFrom::Start(page_num as u64 * PAGE_SIZE as u64))?;
        self.file.write_all(page.as_bytes())?;
        Ok(())
    }

    /// Rewrite the whole file from the cache and release it.
    ///
    /// Truncates to zero length, writes every cached page in ascending index
    /// order, then syncs and drops the file handle along with the cache.
    pub fn close(mut self) -> Result<()> {
        self.file.set_len(0)?;
        self.file.seek(SeekFrom::Start(0))?;
        self.flush_all()?;
        self.file.sync_all()?;
        let cached = self.pages.iter().filter(|slot| slot.is_some()).count();
        for slot in &mut self.pages {
            *slot = None;
        }
        debug!(pages = cached, "closed database file");
        Ok(())
    }
}
