//! Storage Engines
//!
//! The [`Engine`] trait is the capability set every backing store provides:
//! set, get and delete, all synchronous and infallible. [`Storage`] only ever
//! talks to a `Box<dyn Engine>`, so a different engine (persistent, sharded,
//! ...) can be dropped in without touching the rest of the crate.
//!
//! ## Provided engines
//!
//! - [`HashTable`]: a bare `HashMap<String, String>`
//! - [`InMemoryEngine`]: a `HashTable` plus operation counters and tracing,
//!   the default engine built by [`in_memory_engine`]
//!
//! ## Concurrency
//!
//! Engines take `&mut self` for writes and hold no locks. The database handles
//! one query at a time; sharing an engine between threads would need a
//! `Mutex` (or a sharded design) around it.
//!
//! [`Storage`]: crate::storage::Storage

use std::cell::Cell;
use std::collections::HashMap;
use tracing::trace;

/// Key-value capability set implemented by every backing store.
pub trait Engine {
    /// Inserts the value, overwriting any previous one.
    fn set(&mut self, key: String, value: String);

    /// Returns the stored value, or `None` if the key is absent.
    ///
    /// A stored empty string comes back as `Some("")`.
    fn get(&self, key: &str) -> Option<String>;

    /// Removes the key. Deleting an absent key is a no-op.
    fn del(&mut self, key: &str);

    /// Operation counters, for engines that keep them.
    fn stats(&self) -> Option<EngineStats> {
        None
    }
}

/// Builds a fresh engine instance.
pub type EngineFactory = fn() -> Box<dyn Engine>;

/// The default engine factory.
pub fn in_memory_engine() -> Box<dyn Engine> {
    Box::new(InMemoryEngine::new())
}

/// A plain hash map engine.
///
/// # Example
///
/// ```
/// use linekv::storage::{Engine, HashTable};
///
/// let mut table = HashTable::new();
/// table.set("name".to_string(), "value".to_string());
/// assert_eq!(table.get("name"), Some("value".to_string()));
///
/// table.del("name");
/// assert_eq!(table.get("name"), None);
/// ```
#[derive(Debug, Default, Clone)]
pub struct HashTable {
    data: HashMap<String, String>,
}

impl HashTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Engine for HashTable {
    fn set(&mut self, key: String, value: String) {
        self.data.insert(key, value);
    }

    fn get(&self, key: &str) -> Option<String> {
        self.data.get(key).cloned()
    }

    fn del(&mut self, key: &str) {
        self.data.remove(key);
    }
}

/// Operation counters for an [`InMemoryEngine`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Number of keys currently stored
    pub keys: usize,
    /// Total SET operations
    pub sets: u64,
    /// Total GET operations
    pub gets: u64,
    /// GET operations that found their key
    pub hits: u64,
    /// Total DEL operations
    pub dels: u64,
}

/// The default engine: a [`HashTable`] that also counts what it does.
#[derive(Debug, Default)]
pub struct InMemoryEngine {
    table: HashTable,
    sets: u64,
    gets: Cell<u64>,
    hits: Cell<u64>,
    dels: u64,
}

impl InMemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Engine for InMemoryEngine {
    fn set(&mut self, key: String, value: String) {
        self.sets += 1;
        trace!(%key, "set");
        self.table.set(key, value);
    }

    fn get(&self, key: &str) -> Option<String> {
        self.gets.set(self.gets.get() + 1);
        let value = self.table.get(key);
        if value.is_some() {
            self.hits.set(self.hits.get() + 1);
        }
        trace!(%key, found = value.is_some(), "get");
        value
    }

    fn del(&mut self, key: &str) {
        self.dels += 1;
        trace!(%key, "del");
        self.table.del(key);
    }

    fn stats(&self) -> Option<EngineStats> {
        Some(EngineStats {
            keys: self.table.len(),
            sets: self.sets,
            gets: self.gets.get(),
            hits: self.hits.get(),
            dels: self.dels,
        })
    }
}
