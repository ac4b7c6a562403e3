//! # Page Fetch Seam
//!
//! Scans never read pages from disk directly; they go through a
//! [`PageFetcher`], the contract implemented by the external transactional
//! buffer pool. The fetcher owns caching, lock acquisition, eviction, and
//! dirty tracking. A fetch is synchronous: it may block the calling thread
//! until a lock is granted, and it may fail with [`TransactionAborted`]
//! (deadlock or timeout), which callers must propagate rather than retry.
//!
//! [`ReadThroughFetcher`] is this crate's own implementation of the seam:
//! no cache, no locks, one positioned file read per fetch. It is what tests
//! and single-threaded tools run against.

use std::fmt;
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::storage::{HeapPage, PageId, Permissions, TransactionId};

use eyre::{Result, WrapErr};

/// Raised by a fetcher when the requesting transaction is aborted while
/// waiting for a page (deadlock, lock timeout). Scans propagate this
/// unchanged; callers can recover it with `Report::downcast_ref`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionAborted {
    pub tid: TransactionId,
}

impl fmt::Display for TransactionAborted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transaction {} aborted while fetching a page", self.tid)
    }
}

impl std::error::Error for TransactionAborted {}

/// Capability to fetch a decoded page on behalf of a transaction under a
/// lock mode. Blocking; may fail with [`TransactionAborted`].
pub trait PageFetcher: Send + Sync {
    fn fetch_page(
        &self,
        tid: TransactionId,
        pid: PageId,
        perm: Permissions,
    ) -> Result<Arc<HeapPage>>;
}

/// No-cache, no-lock fetcher: resolves the heap file through the catalog
/// and performs one direct page read per call.
pub struct ReadThroughFetcher {
    catalog: Arc<Catalog>,
}

impl ReadThroughFetcher {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

impl PageFetcher for ReadThroughFetcher {
    fn fetch_page(
        &self,
        _tid: TransactionId,
        pid: PageId,
        _perm: Permissions,
    ) -> Result<Arc<HeapPage>> {
        let file = self.catalog.file(pid.table())?;
        let page = file
            .read_page(pid)
            .wrap_err_with(|| format!("failed to fetch page {}", pid))?;
        Ok(Arc::new(page))
    }
}
