//! Local in-memory cache provider
//!
//! A concurrent key-value cache with per-entry expiration, backed by plain
//! maps and per-key timer tasks. State lives only as long as the process;
//! no guarantees are made about performance or efficiency.
//!
//! ## Expiration
//!
//! Each `set` with a positive TTL spawns a task that sleeps for the TTL and
//! then deletes the key. Overwrites and deletes cancel the outstanding task
//! under the timer lock; the task re-checks its own registration under the
//! same lock before touching the value map, so an already-fired timer whose
//! registration was removed exits silently instead of resurrecting or
//! clobbering a newer entry.

use crate::error::Result;
use crate::ports::cache::CacheProvider;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::debug;

/// An armed expiration for a single key
///
/// `generation` ties the registration to the spawned task: the task only
/// acts if the generation it was spawned with is still the registered one.
struct ExpiryTimer {
    generation: u64,
    handle: JoinHandle<()>,
}

/// Shared state behind every clone of the provider and its timer tasks
///
/// Lock order: `timers` before `values`, at every site including the
/// expiry tasks.
#[derive(Default)]
struct CacheInner {
    values: RwLock<HashMap<String, Vec<u8>>>,
    timers: Mutex<HashMap<String, ExpiryTimer>>,
    generation: AtomicU64,
}

/// Local in-memory cache provider
///
/// Implements [`CacheProvider`] with process-local state. Cloning is cheap
/// and all clones share the same underlying cache. Multiple independent
/// instances coexist without interference.
///
/// # Example
///
/// ```ignore
/// use ephemera::providers::LocalCacheProvider;
/// use std::time::Duration;
///
/// let cache = LocalCacheProvider::new();
/// cache.set("foo", b"bar".to_vec(), Duration::from_millis(100)).await?;
/// ```
#[derive(Clone, Default)]
pub struct LocalCacheProvider {
    inner: Arc<CacheInner>,
}

impl LocalCacheProvider {
    /// Create a new empty local cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Create as Arc for sharing
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

#[async_trait]
impl CacheProvider for LocalCacheProvider {
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        let inner = &self.inner;

        // The timer lock is held across the store and the re-arm so the old
        // timer can only win before the new value lands, never after.
        let mut timers = inner.timers.lock().await;
        if let Some(timer) = timers.remove(key) {
            timer.handle.abort();
        }

        inner.values.write().await.insert(key.to_string(), value);

        if !ttl.is_zero() {
            let generation = inner.generation.fetch_add(1, Ordering::Relaxed);
            let task_inner = Arc::clone(inner);
            let task_key = key.to_string();
            let handle = tokio::spawn(async move {
                expire_after(task_inner, task_key, ttl, generation).await;
            });
            timers.insert(key.to_string(), ExpiryTimer { generation, handle });
            debug!(key, ttl_ms = ttl.as_millis() as u64, "armed cache expiry");
        }

        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.inner.values.read().await.get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let inner = &self.inner;

        let mut timers = inner.timers.lock().await;
        if let Some(timer) = timers.remove(key) {
            timer.handle.abort();
        }
        inner.values.write().await.remove(key);
        debug!(key, "deleted cache entry");

        Ok(())
    }

    fn provider_name(&self) -> &str {
        "local"
    }
}

/// Expiry task body: sleep out the TTL, then delete the key if this timer
/// is still the registered one.
async fn expire_after(inner: Arc<CacheInner>, key: String, ttl: Duration, generation: u64) {
    tokio::time::sleep(ttl).await;

    let mut timers = inner.timers.lock().await;
    let still_registered =
        matches!(timers.get(&key), Some(timer) if timer.generation == generation);
    if !still_registered {
        // Registration replaced or cancelled while we slept.
        return;
    }
    timers.remove(&key);

    inner.values.write().await.remove(&key);
    debug!(key = %key, "cache entry expired");
}

impl std::fmt::Debug for LocalCacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalCacheProvider").finish()
    }
}
