//! Cache Provider Port
//!
//! Port for key-value caches with per-entry expiration. Values are opaque
//! byte strings; keys are UTF-8 strings.
//!
//! ## Contract
//!
//! All methods must be safe for concurrent access from any number of tasks.
//! None of the operations are allowed to fail for in-memory providers:
//! `get` on a missing key answers `None`, `delete` on a missing key is a
//! no-op, and `set` always succeeds.

use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Cache Provider Port
///
/// Defines the contract for cache backends: a concurrent string-keyed map
/// of byte values with optional per-entry TTL.
///
/// # Example
///
/// ```ignore
/// use ephemera::ports::CacheProvider;
/// use std::time::Duration;
///
/// cache.set("session:42", b"token".to_vec(), Duration::from_secs(300)).await?;
/// if let Some(value) = cache.get("session:42").await? {
///     // hit
/// }
/// cache.delete("session:42").await?;
/// ```
#[async_trait]
pub trait CacheProvider: Send + Sync + std::fmt::Debug {
    /// Set the value of `key` to `value`
    ///
    /// A zero `ttl` means the key never expires; any expiration armed by a
    /// previous `set` of the same key is cancelled. A positive `ttl` causes
    /// the key to be deleted once the TTL elapses, replacing any previously
    /// armed expiration.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()>;

    /// Get the cached value of `key`
    ///
    /// # Returns
    /// The value if the key is present and has not expired, `None`
    /// otherwise. Never an error: callers distinguish by value.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Remove `key` from the cache
    ///
    /// Cancels any outstanding expiration for the key. Deleting an absent
    /// key is a silent no-op.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Get the name/identifier of this provider implementation
    ///
    /// # Returns
    /// A string identifier for the provider (e.g., "local", "null")
    fn provider_name(&self) -> &str;
}
