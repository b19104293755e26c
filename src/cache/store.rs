//! In-memory response cache keyed by endpoint
//!
//! Provides a `ResponseCache` that holds parsed JSON bodies for the lifetime
//! of the process. Entries are never evicted or expired; a populated endpoint
//! keeps returning the same shared value.

use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// A parsed response body shared between the cache and its readers
pub type CacheEntry = Arc<Value>;

/// Maps endpoint strings to previously parsed response bodies
///
/// Keys are compared as exact strings, so `films/` and `films` are two
/// separate entries. Storing twice under the same key replaces the earlier
/// value (last write wins).
#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached body for `endpoint`, if one was stored
    pub fn lookup(&self, endpoint: &str) -> Option<CacheEntry> {
        self.entries.read().get(endpoint).cloned()
    }

    /// Stores a parsed body under `endpoint`
    ///
    /// # Arguments
    /// * `endpoint` - The exact endpoint string used for the request
    /// * `entry` - The parsed body to keep for later lookups
    pub fn store(&self, endpoint: &str, entry: CacheEntry) {
        self.entries.write().insert(endpoint.to_string(), entry);
    }

    /// Number of cached endpoints
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
