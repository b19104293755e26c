//! Cache module for keeping API responses in memory
//!
//! This module provides a process-lifetime cache of parsed JSON bodies keyed by
//! the endpoint they were fetched from. There is no expiry and no persistence;
//! a restart starts from an empty cache.

mod store;

pub use store::{CacheEntry, ResponseCache};
