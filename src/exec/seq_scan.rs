//! # SeqScan - Sequential Table Scan
//!
//! Reads every tuple of a table in storage order (page-ascending,
//! slot-ascending). The scan resolves its table through the catalog, pulls
//! pages through the buffer-pool seam on behalf of a transaction, and never
//! mutates what it reads; concurrent mutation by other operators is
//! arbitrated by the fetcher's locking discipline.
//!
//! The scan carries a table alias (needed once scans feed joins): the
//! descriptor it exposes has every field renamed to `alias.field`.

use std::sync::Arc;

use eyre::{ensure, Result};

use crate::catalog::Catalog;
use crate::exec::TupleIterator;
use crate::records::{FieldDef, Tuple, TupleDesc};
use crate::storage::{HeapFileIter, PageFetcher, TableId, TransactionId};

/// Sequential scan over one table, as part of one transaction.
pub struct SeqScan {
    catalog: Arc<Catalog>,
    fetcher: Arc<dyn PageFetcher>,
    tid: TransactionId,
    table_id: TableId,
    alias: String,
    opened: bool,
    iter: HeapFileIter,
}

impl SeqScan {
    /// Creates a scan over `table_id` under `tid`. Fails with a not-found
    /// error when the table is not registered.
    pub fn new(
        catalog: Arc<Catalog>,
        fetcher: Arc<dyn PageFetcher>,
        tid: TransactionId,
        table_id: TableId,
        alias: impl Into<String>,
    ) -> Result<Self> {
        let file = catalog.file(table_id)?;
        let iter = file.iter(tid, Arc::clone(&fetcher));
        Ok(Self {
            catalog,
            fetcher,
            tid,
            table_id,
            alias: alias.into(),
            opened: false,
            iter,
        })
    }

    /// Actual catalog name of the scanned table.
    pub fn table_name(&self) -> Result<String> {
        self.catalog.table_name(self.table_id)
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Re-targets the scan at another table/alias. The scan returns to the
    /// closed state and must be opened again.
    pub fn reset(&mut self, table_id: TableId, alias: impl Into<String>) -> Result<()> {
        let file = self.catalog.file(table_id)?;
        self.iter = file.iter(self.tid, Arc::clone(&self.fetcher));
        self.table_id = table_id;
        self.alias = alias.into();
        self.opened = false;
        Ok(())
    }
}

impl TupleIterator for SeqScan {
    fn open(&mut self) -> Result<()> {
        self.opened = true;
        self.iter.open();
        Ok(())
    }

    fn has_next(&mut self) -> Result<bool> {
        ensure!(self.opened, "seq scan is not open");
        self.iter.has_next()
    }

    fn next(&mut self) -> Result<Tuple> {
        ensure!(self.opened, "seq scan is not open");
        self.iter.next()
    }

    fn rewind(&mut self) -> Result<()> {
        ensure!(self.opened, "seq scan is not open");
        self.iter.rewind();
        Ok(())
    }

    fn close(&mut self) {
        self.opened = false;
        self.iter.close();
    }

    /// The table's descriptor with field names prefixed `alias.name`.
    fn tuple_desc(&self) -> Result<Arc<TupleDesc>> {
        ensure!(self.opened, "seq scan is not open");

        let desc = self.catalog.tuple_desc(self.table_id)?;
        let fields = desc
            .iter()
            .map(|f| FieldDef::new(format!("{}.{}", self.alias, f.name), f.field_type))
            .collect();
        Ok(Arc::new(TupleDesc::new(fields)?))
    }
}
