//! Counter service: read-increment-write on one fixed key.
//!
//! The first call on an empty store only initializes the key to 0 and reports
//! 0; every later call adds one. In [`CounterMode::Racy`] the read and the
//! write are two separate store calls, so concurrent increments can overwrite
//! each other. [`CounterMode::Atomic`] folds both into one `update`.

use std::sync::Arc;

use tally_core::error::{Result, TallyError};
use tally_core::store::KvStore;
use tally_core::value::Value;

pub use crate::config::CounterMode;

pub struct CounterService {
    store: Arc<dyn KvStore>,
    key: String,
    mode: CounterMode,
}

impl CounterService {
    pub fn new(store: Arc<dyn KvStore>, key: impl Into<String>, mode: CounterMode) -> Self {
        Self {
            store,
            key: key.into(),
            mode,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn mode(&self) -> CounterMode {
        self.mode
    }

    /// Run one counter step and return the stored count.
    pub async fn increment(&self) -> Result<i64> {
        let stored = match self.mode {
            CounterMode::Racy => {
                let current = self.store.get(&self.key).await?;
                let next = next_count(&self.key, current.as_ref())?;
                self.store.put(&self.key, next.clone()).await?;
                next
            }
            CounterMode::Atomic => {
                let key = self.key.as_str();
                self.store
                    .update(key, &|current: Option<&Value>| next_count(key, current))
                    .await?
            }
        };

        let count = stored.expect_int(&self.key)?;
        tracing::debug!(key = %self.key, count, mode = ?self.mode, "counter stored");
        Ok(count)
    }
}

/// Value the counter stores after seeing `current`.
pub fn next_count(key: &str, current: Option<&Value>) -> Result<Value> {
    let Some(current) = current else {
        return Ok(Value::Int(0));
    };
    let n = current.expect_int(key)?;
    n.checked_add(1)
        .map(Value::Int)
        .ok_or_else(|| TallyError::Overflow(format!("counter at key {key:?} is at i64::MAX")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::MemoryStore;

    fn service(mode: CounterMode) -> (Arc<MemoryStore>, CounterService) {
        let store = Arc::new(MemoryStore::new());
        let svc = CounterService::new(store.clone(), "key", mode);
        (store, svc)
    }

    #[test]
    fn absent_initializes_to_zero() {
        assert_eq!(next_count("key", None).unwrap(), Value::Int(0));
    }

    #[test]
    fn present_adds_one() {
        assert_eq!(next_count("key", Some(&Value::Int(5))).unwrap(), Value::Int(6));
        assert_eq!(next_count("key", Some(&Value::Int(-1))).unwrap(), Value::Int(0));
    }

    #[test]
    fn max_value_overflows() {
        let err = next_count("key", Some(&Value::Int(i64::MAX))).unwrap_err();
        assert!(matches!(err, TallyError::Overflow(_)));
    }

    #[tokio::test]
    async fn first_calls_count_zero_one_two() {
        for mode in [CounterMode::Racy, CounterMode::Atomic] {
            let (store, svc) = service(mode);
            assert_eq!(svc.increment().await.unwrap(), 0);
            assert_eq!(store.get("key").await.unwrap(), Some(Value::Int(0)));
            assert_eq!(svc.increment().await.unwrap(), 1);
            assert_eq!(svc.increment().await.unwrap(), 2);
            assert_eq!(store.get("key").await.unwrap(), Some(Value::Int(2)));
        }
    }

    #[tokio::test]
    async fn seeded_value_is_incremented() {
        for mode in [CounterMode::Racy, CounterMode::Atomic] {
            let (store, svc) = service(mode);
            store.put("key", Value::Int(5)).await.unwrap();
            assert_eq!(svc.increment().await.unwrap(), 6);
            assert_eq!(store.get("key").await.unwrap(), Some(Value::Int(6)));
        }
    }

    #[tokio::test]
    async fn wrong_kind_is_reported_and_left_alone() {
        for mode in [CounterMode::Racy, CounterMode::Atomic] {
            let (store, svc) = service(mode);
            store.put("key", Value::from("five")).await.unwrap();
            let err = svc.increment().await.unwrap_err();
            assert!(matches!(err, TallyError::TypeMismatch { .. }));
            assert_eq!(store.get("key").await.unwrap(), Some(Value::from("five")));
        }
    }

    #[tokio::test]
    async fn uses_configured_key() {
        let store = Arc::new(MemoryStore::new());
        let svc = CounterService::new(store.clone(), "hits", CounterMode::Racy);
        svc.increment().await.unwrap();
        assert_eq!(store.get("hits").await.unwrap(), Some(Value::Int(0)));
        assert_eq!(store.get("key").await.unwrap(), None);
    }
}
