//! In-memory store implementation behind a single read-write lock.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{Result, TallyError};
use crate::value::Value;

use super::traits::{validate_key, KvStore, UpdateFn};

/// In-memory key-value store.
///
/// Readers share the lock; `put`, `delete` and `update` take it exclusively.
/// Nothing survives the process.
///
/// # Example
///
/// ```rust
/// use tally_core::store::{KvStore, MemoryStore};
/// use tally_core::Value;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let store = MemoryStore::new();
/// store.put("hits", Value::Int(5)).await.unwrap();
/// assert_eq!(store.get("hits").await.unwrap(), Some(Value::Int(5)));
/// # });
/// ```
#[derive(Debug)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
    /// Maximum number of distinct keys, `None` for unbounded.
    capacity: Option<usize>,
}

impl MemoryStore {
    /// Create an empty, unbounded store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity: None,
        }
    }

    /// Create an empty store holding at most `capacity` distinct keys.
    ///
    /// Inserting a new key into a full store fails with
    /// [`TallyError::CapacityExceeded`]; overwriting an existing key always
    /// succeeds.
    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity: Some(capacity),
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    fn admit(&self, entries: &HashMap<String, Value>, key: &str) -> Result<()> {
        match self.capacity {
            Some(capacity) if entries.len() >= capacity && !entries.contains_key(key) => {
                tracing::warn!(key = %key, capacity, "store full, rejecting new key");
                Err(TallyError::CapacityExceeded { capacity })
            }
            _ => Ok(()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        validate_key(key)?;
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Value) -> Result<()> {
        validate_key(key)?;
        let mut entries = self.entries.write().await;
        self.admit(&entries, key)?;
        tracing::debug!(key = %key, kind = value.kind(), "put");
        entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        let mut entries = self.entries.write().await;
        if entries.remove(key).is_some() {
            tracing::debug!(key = %key, "delete");
        }
        Ok(())
    }

    async fn update(&self, key: &str, f: &UpdateFn<'_>) -> Result<Value> {
        validate_key(key)?;
        let mut entries = self.entries.write().await;
        let next = f(entries.get(key))?;
        self.admit(&entries, key)?;
        tracing::debug!(key = %key, kind = next.kind(), "update");
        entries.insert(key.to_string(), next.clone());
        Ok(next)
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.entries.read().await.len())
    }
}
