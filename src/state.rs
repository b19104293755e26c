//! Shared core state
//!
//! Bundles the immutable configuration with the cache and counters so that
//! the fetch client, orchestrator and server all read and update one owned
//! object instead of process globals. Tests build a fresh one per case.

use serde::Serialize;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::cache::ResponseCache;
use crate::cli::Config;
use crate::metrics::{CounterSnapshot, Metrics};

/// Everything the core mutates during its lifetime, plus its configuration
#[derive(Debug)]
pub struct SharedState {
    pub config: Config,
    pub cache: ResponseCache,
    pub metrics: Metrics,
    /// Character/vehicle id the next cycle fetches
    rotating_id: AtomicU32,
}

/// Status report returned by `SharedState::status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    #[serde(flatten)]
    pub counters: CounterSnapshot,
    /// Number of cached endpoints
    pub cache_size: usize,
    pub rotating_id: u32,
    pub config: Config,
}

impl SharedState {
    pub fn new(config: Config) -> Arc<Self> {
        let start_id = config.start_id;
        Arc::new(Self {
            config,
            cache: ResponseCache::new(),
            metrics: Metrics::new(),
            rotating_id: AtomicU32::new(start_id),
        })
    }

    pub fn rotating_id(&self) -> u32 {
        self.rotating_id.load(Ordering::Relaxed)
    }

    pub(crate) fn set_rotating_id(&self, id: u32) {
        self.rotating_id.store(id, Ordering::Relaxed);
    }

    /// Whether the vehicle step still runs for `id`
    pub fn id_in_range(&self, id: u32) -> bool {
        id <= self.config.max_id
    }

    /// Current counters, cache size and active configuration
    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            counters: self.metrics.snapshot(),
            cache_size: self.cache.len(),
            rotating_id: self.rotating_id(),
            config: self.config.clone(),
        }
    }
}
