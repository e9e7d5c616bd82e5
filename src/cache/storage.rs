//! Key-Value Storage Backends
//!
//! The cache only needs string get/set/remove, so the browser's
//! `localStorage` and an in-memory map are interchangeable.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::CacheError;

/// Durable string store
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;
    fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;
    fn remove(&self, key: &str) -> Result<(), CacheError>;
}

/// `window.localStorage`, looked up on every call so the handle stays `Send`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    /// `Some` when the page has a usable `localStorage` (private browsing
    /// modes may deny it)
    pub fn open() -> Option<Self> {
        Self::storage().ok().map(|_| BrowserStorage)
    }

    fn storage() -> Result<web_sys::Storage, CacheError> {
        web_sys::window()
            .ok_or(CacheError::Unavailable)?
            .local_storage()
            .map_err(|e| CacheError::Storage(format!("{:?}", e)))?
            .ok_or(CacheError::Unavailable)
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| CacheError::Storage(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| CacheError::Storage(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| CacheError::Storage(format!("{:?}", e)))
    }
}

/// In-memory store; counts reads so tests can assert the cache was untouched
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    reads: AtomicUsize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `get` calls served so far
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Raw stored value without counting a read
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}
