//! KvStore trait definition.

use async_trait::async_trait;

use crate::error::{Result, TallyError};
use crate::value::Value;

/// Read-modify-write step for [`KvStore::update`].
///
/// Receives the current value (`None` when the key is absent) and returns the
/// value to store. Returning an error leaves the entry untouched.
pub type UpdateFn<'a> = dyn Fn(Option<&Value>) -> Result<Value> + Send + Sync + 'a;

/// Trait for key-value storage backends.
///
/// Every single operation is atomic with respect to every other operation on
/// the same store, but a `get` followed by a `put` is not: callers composing
/// the two can lose updates under concurrency. Use [`KvStore::update`] when the
/// read and the write must happen under one lock.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Current value for `key`, or `None` if it was never set or was deleted.
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Insert or replace the value for `key`.
    ///
    /// A later `get` on any task observes `value` (or something newer) once
    /// this returns.
    async fn put(&self, key: &str, value: Value) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Atomically replace the value for `key` with `f(current)` and return the
    /// stored result.
    async fn update(&self, key: &str, f: &UpdateFn<'_>) -> Result<Value>;

    /// Number of entries.
    async fn len(&self) -> Result<usize>;

    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }
}

/// Reject keys the store cannot hold.
pub(crate) fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(TallyError::InvalidKey("key must not be empty".into()));
    }
    Ok(())
}
