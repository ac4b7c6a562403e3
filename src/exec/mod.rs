//! # Exec Module
//!
//! The query-facing iterator protocol and the one operator this crate
//! ships: the sequential table scan. Operators compose over
//! [`TupleIterator`], the open/next/rewind/close protocol every plan node
//! speaks.

mod seq_scan;

pub use seq_scan::SeqScan;

use std::sync::Arc;

use eyre::Result;

use crate::records::{Tuple, TupleDesc};

/// The iterator protocol exposed to the query layer.
///
/// Lifecycle: `CLOSED -> open() -> OPEN -> close() -> CLOSED`. Positioned
/// operations (`has_next`, `next`, `rewind`, `tuple_desc`) are only valid
/// while open; implementations signal illegal-state errors otherwise.
/// `next` requires a prior or implicit `has_next` and errors past the end.
pub trait TupleIterator {
    fn open(&mut self) -> Result<()>;

    fn has_next(&mut self) -> Result<bool>;

    fn next(&mut self) -> Result<Tuple>;

    /// Restarts iteration from the first tuple (close + open).
    fn rewind(&mut self) -> Result<()>;

    fn close(&mut self);

    /// Descriptor of the tuples this iterator yields.
    fn tuple_desc(&self) -> Result<Arc<TupleDesc>>;
}
