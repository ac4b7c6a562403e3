//! # Storage Module
//!
//! Physical storage for tables: fixed-size pages in flat heap files, the
//! page codec that turns page bytes into tuples, and the fetch seam through
//! which the external transactional buffer pool serves pages to scans.
//!
//! ## File Format
//!
//! A heap file is simply concatenated pages:
//!
//! ```text
//! Offset 0:       Page 0 (4KB)
//! Offset 4096:    Page 1 (4KB)
//! Offset 8192:    Page 2 (4KB)
//! ...
//! ```
//!
//! `page_count = file length / PAGE_SIZE`; nothing is stored redundantly.
//! Page identity is `(table id, page number)` where the table id is a
//! CRC-32 of the file's canonical path, so the same physical file maps to
//! the same id across process restarts.
//!
//! ## Page Layout
//!
//! Each page is an occupancy bitmap followed by packed fixed-width tuple
//! slots; see [`HeapPage`] for the exact arithmetic.
//!
//! ## Caching and Locking
//!
//! This layer is read-through: [`HeapFile::read_page`] performs one
//! positioned read per call and caches nothing. Caching, lock acquisition,
//! and dirty tracking belong to the buffer pool behind the [`PageFetcher`]
//! trait. A fetch may block until a lock is granted and may fail with
//! [`TransactionAborted`], which scans propagate unchanged.
//!
//! ## Module Organization
//!
//! - `heap_page`: page image codec (bitmap header + tuple slots)
//! - `heap_file`: file identity, page addressing, page-sequential iterator
//! - `fetch`: `PageFetcher` trait and the no-cache `ReadThroughFetcher`

mod fetch;
mod heap_file;
mod heap_page;

pub use fetch::{PageFetcher, ReadThroughFetcher, TransactionAborted};
pub use heap_file::{HeapFile, HeapFileIter};
pub use heap_page::HeapPage;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide page size in bytes. Every page read and write moves exactly
/// this many bytes.
pub const PAGE_SIZE: usize = 4096;

/// Stable identifier of a table's heap file (CRC-32 of the canonical path).
pub type TableId = u32;

/// Identity of one page: the owning table's file id plus the page's ordinal
/// position in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageId {
    table: TableId,
    page_no: usize,
}

impl PageId {
    pub fn new(table: TableId, page_no: usize) -> Self {
        Self { table, page_no }
    }

    pub fn table(&self) -> TableId {
        self.table
    }

    pub fn page_no(&self) -> usize {
        self.page_no
    }

    /// Byte offset of this page within its file.
    pub fn byte_offset(&self) -> u64 {
        self.page_no as u64 * PAGE_SIZE as u64
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.page_no)
    }
}

static NEXT_TRANSACTION_ID: AtomicU64 = AtomicU64::new(0);

/// Opaque transaction identity, threaded through page fetches so the buffer
/// pool can attribute lock requests. Fresh ids are drawn from a process-wide
/// counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionId(u64);

impl TransactionId {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(NEXT_TRANSACTION_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tx{}", self.0)
    }
}

/// Lock mode requested when fetching a page through the buffer pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permissions {
    ReadOnly,
    ReadWrite,
}
