//! Shared application state for the tally server.
//!
//! The store is created here, once, and handed to the counter explicitly.
//! Nothing else holds a reference to it.

use std::sync::Arc;

use tally_core::store::{KvStore, MemoryStore};

use crate::config::{ServerConfig, StoreErrorPolicy};
use crate::counter::CounterService;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ServerConfig,
    counter: CounterService,
}

impl AppState {
    /// Build state with a fresh in-memory store sized from config.
    pub fn new(cfg: ServerConfig) -> Self {
        let store: Arc<dyn KvStore> = match cfg.store.max_entries {
            0 => Arc::new(MemoryStore::new()),
            n => Arc::new(MemoryStore::with_capacity_limit(n)),
        };
        Self::with_store(cfg, store)
    }

    /// Build state around a caller-provided store.
    pub fn with_store(cfg: ServerConfig, store: Arc<dyn KvStore>) -> Self {
        let counter = CounterService::new(store, cfg.counter.key.clone(), cfg.counter.mode);
        tracing::info!(
            key = %cfg.counter.key,
            mode = ?cfg.counter.mode,
            on_store_error = ?cfg.counter.on_store_error,
            max_entries = cfg.store.max_entries,
            "counter configured"
        );
        Self {
            inner: Arc::new(AppStateInner { cfg, counter }),
        }
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn counter(&self) -> &CounterService {
        &self.inner.counter
    }

    pub fn store_error_policy(&self) -> StoreErrorPolicy {
        self.inner.cfg.counter.on_store_error
    }
}
