//! # heapdb - Page-Organized Tuple Storage
//!
//! heapdb is the tuple-storage core of a relational engine: it fixes the
//! on-disk contract (page layout, page addressing, fixed-width tuple
//! encoding) that query operators, the transactional page cache, and
//! recovery all depend on.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │      Query Operators (SeqScan)       │
//! ├──────────────────────────────────────┤
//! │ Catalog (name ↔ id ↔ schema ↔ file)  │
//! ├──────────────────────────────────────┤
//! │   PageFetcher seam (buffer pool)     │
//! ├──────────────────────────────────────┤
//! │  HeapFile paging + HeapPage codec    │
//! ├──────────────────────────────────────┤
//! │    Record Serialization (Tuple)      │
//! └──────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use heapdb::catalog::Catalog;
//! use heapdb::exec::{SeqScan, TupleIterator};
//! use heapdb::storage::{ReadThroughFetcher, TransactionId};
//!
//! let catalog = Arc::new(Catalog::new());
//! catalog.load_schema("./data/schema.txt")?;
//!
//! let fetcher = Arc::new(ReadThroughFetcher::new(Arc::clone(&catalog)));
//! let tid = TransactionId::new();
//! let table = catalog.table_id("users")?;
//!
//! let mut scan = SeqScan::new(catalog, fetcher, tid, table, "u")?;
//! scan.open()?;
//! while scan.has_next()? {
//!     print!("{}", scan.next()?.encode_text());
//! }
//! scan.close();
//! ```
//!
//! ## On-Disk Contract
//!
//! A table's heap file is a flat sequence of fixed-size pages (4KB). Each
//! page is an occupancy bitmap followed by packed fixed-width tuple slots;
//! all integers on disk are little-endian. Page identity is
//! `(table id, page number)` where the table id is a stable hash of the
//! file's canonical path.
//!
//! ## Scope
//!
//! The transactional buffer pool, lock manager, and mutation path (insert/
//! delete, free-space tracking) are external collaborators. This crate
//! specifies them only at the seam: the [`storage::PageFetcher`] trait and
//! the declared-unsupported write stubs on [`storage::HeapFile`].
//!
//! ## Module Overview
//!
//! - [`types`]: fixed-width field types, runtime values, field codec
//! - [`records`]: tuple descriptors and schema-bound tuples
//! - [`catalog`]: table registry and schema-file loader
//! - [`storage`]: heap files, page codec, page-fetch seam
//! - [`exec`]: iterator protocol and sequential scan

pub mod catalog;
pub mod exec;
pub mod records;
pub mod storage;
pub mod types;

pub use catalog::Catalog;
pub use exec::{SeqScan, TupleIterator};
pub use records::{RecordId, Tuple, TupleDesc};
pub use storage::{
    HeapFile, HeapPage, PageFetcher, PageId, Permissions, ReadThroughFetcher, TableId,
    TransactionId, PAGE_SIZE,
};
pub use types::{Field, FieldType};
