use crate::error::StoreResult;
use async_trait::async_trait;
use std::time::Duration;

/// A TTL-capable key-value store with scalar and list primitives.
///
/// Every operation is atomic on its own at the backend; no operation spans
/// multiple calls. Values are opaque strings: encoding is the caller's
/// concern. A key that never existed and a key whose TTL elapsed are
/// indistinguishable.
///
/// Failures are reported, never swallowed: `Ok(None)` means the key is
/// absent, `Err(_)` means the store could not answer.
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    /// Checks that the backend is reachable.
    async fn ping(&self) -> StoreResult<()>;

    /// Stores `value` under `key`, replacing any existing value, expiring
    /// `ttl` from now.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> StoreResult<()>;

    /// Like [`set`](Self::set) but only when `key` does not exist.
    ///
    /// Returns `true` if the value was written.
    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> StoreResult<bool>;

    /// Returns the value stored under `key`.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Removes `key`, returning the number of keys removed.
    async fn delete(&self, key: &str) -> StoreResult<u64>;

    /// Removes every key in `keys`, returning the number removed.
    async fn delete_many(&self, keys: &[String]) -> StoreResult<u64>;

    /// Returns the names of keys matching a glob-style `pattern`.
    ///
    /// The result is not a consistent snapshot: keys written or removed
    /// while the scan runs may or may not appear.
    async fn scan_keys(&self, pattern: &str) -> StoreResult<Vec<String>>;

    /// Pushes `value` to the head of the list at `key`, creating it if
    /// needed. Returns the new length. Applies no TTL.
    async fn list_prepend(&self, key: &str, value: &str) -> StoreResult<u64>;

    /// Returns the elements between `start` and `stop`, both inclusive.
    /// Negative indices count from the end, `-1` being the last element.
    async fn list_range(&self, key: &str, start: i64, stop: i64) -> StoreResult<Vec<String>>;

    /// Keeps only the elements between `start` and `stop`, both inclusive.
    async fn list_trim(&self, key: &str, start: i64, stop: i64) -> StoreResult<()>;

    /// Sets a TTL on an existing key. Returns `false` if the key is absent.
    async fn expire(&self, key: &str, ttl: Duration) -> StoreResult<bool>;

    /// Removes every key. Administrative and test use only.
    async fn flush_all(&self) -> StoreResult<()>;

    /// Removes every key matching `pattern`, returning the number removed.
    async fn clear_by_pattern(&self, pattern: &str) -> StoreResult<u64> {
        let keys = self.scan_keys(pattern).await?;
        if keys.is_empty() {
            return Ok(0);
        }
        self.delete_many(&keys).await
    }
}
