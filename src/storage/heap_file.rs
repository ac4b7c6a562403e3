//! # HeapFile - A Table's Physical Storage
//!
//! A heap file stores one table's tuples in no particular order, as a flat
//! sequence of fixed-size pages on disk. The file exposes page-addressed
//! reads and a page-sequential scan iterator; it never caches pages and
//! never tracks free space (both belong to external collaborators).
//!
//! ## Identity
//!
//! `id = crc32(canonical path)`. The id is the first component of every
//! page id minted for this file, and the same physical file yields the same
//! id across re-opens and process restarts.
//!
//! ## Reads Are Positioned
//!
//! `read_page` seeks to `page_no * PAGE_SIZE` and reads exactly one page.
//! There is no cursor or accumulated offset: reading page 7 then page 2
//! works, and reading the same page twice returns the same bytes.
//!
//! ## Mutation Is Out of Scope
//!
//! `write_page`, `insert_tuple`, and `delete_tuple` are declared for
//! interface completeness and return explicit unsupported errors; the
//! mutation path requires free-space tracking and the transaction/recovery
//! collaborator.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crc::{Crc, CRC_32_ISCSI};
use eyre::{bail, ensure, Result, WrapErr};
use log::debug;

use crate::records::{Tuple, TupleDesc};
use crate::storage::{
    HeapPage, PageFetcher, PageId, Permissions, TableId, TransactionId, PAGE_SIZE,
};

const PATH_CRC: Crc<u32> = Crc::<u32>::new(&CRC_32_ISCSI);

/// Unordered, page-organized physical storage for one table.
#[derive(Debug)]
pub struct HeapFile {
    path: PathBuf,
    desc: Arc<TupleDesc>,
    id: TableId,
    page_count: usize,
}

impl HeapFile {
    /// Opens the heap file at `path` with the given tuple layout.
    ///
    /// The page count is captured from the file length at open time; a file
    /// that grows afterwards must be re-opened to expose the new pages.
    pub fn open(path: impl AsRef<Path>, desc: TupleDesc) -> Result<Self> {
        let path = path
            .as_ref()
            .canonicalize()
            .wrap_err_with(|| format!("cannot open heap file {}", path.as_ref().display()))?;

        let len = path
            .metadata()
            .wrap_err_with(|| format!("cannot stat heap file {}", path.display()))?
            .len();
        let page_count = (len / PAGE_SIZE as u64) as usize;
        let id = PATH_CRC.checksum(path.as_os_str().as_encoded_bytes());

        debug!(
            "opened heap file {} ({} pages) at {}",
            id,
            page_count,
            path.display()
        );

        Ok(Self {
            path,
            desc: Arc::new(desc),
            id,
            page_count,
        })
    }

    /// Stable file id; same canonical path, same id.
    pub fn id(&self) -> TableId {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn desc(&self) -> &Arc<TupleDesc> {
        &self.desc
    }

    /// Number of pages in this file as of open time.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Reads and decodes one page by direct positioned I/O.
    ///
    /// The page id must name this file and a page number in
    /// `[0, page_count)`; out-of-range numbers are errors, never clamped.
    pub fn read_page(&self, pid: PageId) -> Result<HeapPage> {
        ensure!(
            pid.table() == self.id,
            "page {} does not belong to heap file {}",
            pid,
            self.id
        );
        ensure!(
            pid.page_no() < self.page_count,
            "page number {} out of range for heap file {} ({} pages)",
            pid.page_no(),
            self.id,
            self.page_count
        );

        let mut file = File::open(&self.path)
            .wrap_err_with(|| format!("cannot open heap file {}", self.path.display()))?;
        file.seek(SeekFrom::Start(pid.byte_offset()))
            .wrap_err_with(|| format!("cannot seek to page {}", pid))?;

        let mut buf = vec![0u8; PAGE_SIZE];
        file.read_exact(&mut buf)
            .wrap_err_with(|| format!("short read at page {}", pid))?;

        HeapPage::parse(pid, &buf, Arc::clone(&self.desc))
    }

    /// Writes a page image back at its page-number-derived offset.
    ///
    /// Declared for the storage contract; the mutation path is owned by the
    /// buffer pool and recovery collaborators and is not implemented here.
    pub fn write_page(&self, page: &HeapPage) -> Result<()> {
        bail!(
            "write_page({}) not supported: heap file mutation is out of scope",
            page.page_id()
        )
    }

    pub fn insert_tuple(&self, tid: TransactionId, _tuple: Tuple) -> Result<()> {
        bail!(
            "insert_tuple ({}) not supported: requires free-space tracking",
            tid
        )
    }

    pub fn delete_tuple(&self, tid: TransactionId, _tuple: Tuple) -> Result<()> {
        bail!(
            "delete_tuple ({}) not supported: requires the transaction collaborator",
            tid
        )
    }

    /// Page-sequential tuple iterator over this file, pulling pages through
    /// `fetcher` on behalf of `tid`.
    pub fn iter(
        self: Arc<Self>,
        tid: TransactionId,
        fetcher: Arc<dyn PageFetcher>,
    ) -> HeapFileIter {
        HeapFileIter {
            file: self,
            fetcher,
            tid,
            opened: false,
            next_page_no: 0,
            page: None,
            slot: 0,
        }
    }
}

/// Cursor over a heap file's occupied slots in (page, slot) ascending order.
///
/// The cursor is a small state machine: `CLOSED -> OPEN -> CLOSED`. While
/// open it tracks the next page to fetch plus a slot position within the
/// current page. Pages with no occupied slots are skipped. Closed cursors
/// report `has_next() == false` rather than erroring; the operator layer
/// ([`crate::exec::SeqScan`]) is where closed access becomes an
/// illegal-state error.
pub struct HeapFileIter {
    file: Arc<HeapFile>,
    fetcher: Arc<dyn PageFetcher>,
    tid: TransactionId,
    opened: bool,
    next_page_no: usize,
    page: Option<Arc<HeapPage>>,
    slot: usize,
}

impl HeapFileIter {
    pub fn open(&mut self) {
        self.opened = true;
        self.next_page_no = 0;
        self.page = None;
        self.slot = 0;
    }

    pub fn close(&mut self) {
        self.opened = false;
        self.page = None;
    }

    /// Restarts the cursor from page 0.
    pub fn rewind(&mut self) {
        self.close();
        self.open();
    }

    /// Advances past empty slots and empty pages; fetch failures (including
    /// transaction aborts) propagate unchanged.
    pub fn has_next(&mut self) -> Result<bool> {
        if !self.opened {
            return Ok(false);
        }

        loop {
            if let Some(page) = &self.page {
                while self.slot < page.slot_count() && !page.is_slot_occupied(self.slot) {
                    self.slot += 1;
                }
                if self.slot < page.slot_count() {
                    return Ok(true);
                }
                self.page = None;
            }

            if self.next_page_no >= self.file.page_count() {
                return Ok(false);
            }

            let pid = PageId::new(self.file.id(), self.next_page_no);
            let page = self
                .fetcher
                .fetch_page(self.tid, pid, Permissions::ReadWrite)?;
            self.next_page_no += 1;
            self.slot = 0;
            self.page = Some(page);
        }
    }

    /// Next tuple in storage order; errors when the cursor is exhausted or
    /// closed.
    pub fn next(&mut self) -> Result<Tuple> {
        ensure!(self.has_next()?, "heap file scan has no more tuples");

        let page = self
            .page
            .as_ref()
            .ok_or_else(|| eyre::eyre!("scan cursor lost its page"))?;
        let tuple = page
            .tuple(self.slot)
            .cloned()
            .ok_or_else(|| eyre::eyre!("scan cursor points at an empty slot"))?;
        self.slot += 1;
        Ok(tuple)
    }
}
