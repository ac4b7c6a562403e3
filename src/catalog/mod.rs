//! # Catalog Module
//!
//! The catalog is the registry of all tables available to the engine: it
//! maps a table name to its backing [`HeapFile`], its tuple descriptor, and
//! an optional primary-key field name. Table ids are not assigned by the
//! catalog; they are the heap files' own stable path-derived ids, so id
//! lookups search the registered entries linearly.
//!
//! ## Registration Semantics
//!
//! - One entry per name: re-registering a name replaces its mapping (last
//!   full registration wins).
//! - One primary key per file: the first registration that supplies a key
//!   for a given file id wins; later keys for the same file are ignored.
//! - Entries are added at startup (usually via [`Catalog::load_schema`]),
//!   optionally cleared en masse, never individually removed.
//!
//! ## Thread Safety
//!
//! The registry is internally synchronized with a `parking_lot::RwLock`;
//! every operation takes `&self`, so concurrent scan-opens and registrations
//! from multiple threads need no external locking. There is no process-wide
//! catalog: construct one and share it via `Arc`.

mod loader;

use std::sync::Arc;

use eyre::Result;
use hashbrown::HashMap;
use parking_lot::RwLock;

use crate::records::TupleDesc;
use crate::storage::{HeapFile, TableId};

#[derive(Default)]
struct Registry {
    tables: HashMap<String, Arc<HeapFile>>,
    // registration order for table_ids(); names stay at their first slot
    // when re-registered
    order: Vec<String>,
    pkeys: HashMap<TableId, String>,
}

impl Registry {
    fn entries(&self) -> impl Iterator<Item = (&str, &Arc<HeapFile>)> {
        self.order
            .iter()
            .filter_map(|name| self.tables.get(name).map(|file| (name.as_str(), file)))
    }
}

/// Registry mapping table name ↔ table id ↔ schema ↔ heap file ↔ primary key.
#[derive(Default)]
pub struct Catalog {
    inner: RwLock<Registry>,
}

impl Catalog {
    /// Creates a new, empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `file` under `name`, replacing any previous mapping for
    /// that name. A non-empty `pkey` records the file's primary-key field
    /// the first time one is supplied; later keys for the same file are
    /// no-ops.
    pub fn register_table(&self, file: Arc<HeapFile>, name: impl Into<String>, pkey: Option<&str>) {
        let name = name.into();
        let mut inner = self.inner.write();

        if !inner.tables.contains_key(&name) {
            inner.order.push(name.clone());
        }
        if let Some(pk) = pkey.filter(|pk| !pk.is_empty()) {
            inner
                .pkeys
                .entry(file.id())
                .or_insert_with(|| pk.to_string());
        }
        inner.tables.insert(name, file);
    }

    /// Id of the table registered under `name`.
    pub fn table_id(&self, name: &str) -> Result<TableId> {
        self.inner
            .read()
            .tables
            .get(name)
            .map(|file| file.id())
            .ok_or_else(|| eyre::eyre!("no table named '{}' in catalog", name))
    }

    /// Heap file backing table `id`.
    pub fn file(&self, id: TableId) -> Result<Arc<HeapFile>> {
        self.inner
            .read()
            .entries()
            .find(|(_, file)| file.id() == id)
            .map(|(_, file)| Arc::clone(file))
            .ok_or_else(|| eyre::eyre!("no table with id {} in catalog", id))
    }

    /// Tuple descriptor of table `id`.
    pub fn tuple_desc(&self, id: TableId) -> Result<Arc<TupleDesc>> {
        Ok(Arc::clone(self.file(id)?.desc()))
    }

    /// Name table `id` is registered under.
    pub fn table_name(&self, id: TableId) -> Result<String> {
        self.inner
            .read()
            .entries()
            .find(|(_, file)| file.id() == id)
            .map(|(name, _)| name.to_string())
            .ok_or_else(|| eyre::eyre!("no table with id {} in catalog", id))
    }

    /// Primary-key field of table `id`, if one was registered.
    pub fn primary_key(&self, id: TableId) -> Option<String> {
        self.inner.read().pkeys.get(&id).cloned()
    }

    /// Snapshot of all table ids in registration order. Each call takes a
    /// fresh snapshot; iterate the returned vec to walk it.
    pub fn table_ids(&self) -> Vec<TableId> {
        self.inner
            .read()
            .entries()
            .map(|(_, file)| file.id())
            .collect()
    }

    /// Drops every entry. Idempotent.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.tables.clear();
        inner.order.clear();
        inner.pkeys.clear();
    }
}

#[cfg(test)]
mod tests;
