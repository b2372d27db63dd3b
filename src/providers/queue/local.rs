//! Local in-memory queue provider
//!
//! A FIFO message queue with per-message visibility timeouts, backed by an
//! id sequence plus an id-keyed payload map. State lives only as long as
//! the process; no guarantees are made about performance or efficiency.
//!
//! ## Message lifecycle
//!
//! `send_message` allocates a UUID, stores the payload under it and appends
//! the id to the visible sequence. `receive_message` pops the head id: a
//! zero visibility timeout consumes the payload outright, a positive one
//! leaves the payload in place (the message is now in flight) and arms a
//! redelivery task that, unless cancelled by `delete_message`, prepends the
//! id back at the *head* of the sequence when the timeout elapses. A
//! message keeps its id across redeliveries.
//!
//! ## Dangling ids
//!
//! `delete_message` can remove a payload while its redelivery task is still
//! pending; the task may then prepend an id with no payload behind it.
//! Receive sweeps such ids from the head instead of delivering them, which
//! is what keeps deleted messages from ever resurfacing.
//!
//! Lock order everywhere, timer tasks included: visible sequence, then
//! payloads, then timers; each released as soon as its part is done.

use crate::error::{Error, Result};
use crate::ports::queue::{QueueProvider, ReceivedMessage};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, trace};
use uuid::Uuid;

/// An armed redelivery for a single in-flight message
///
/// `generation` ties the registration to the spawned task: the task only
/// re-enqueues if the generation it was spawned with is still registered.
struct RedeliveryTimer {
    generation: u64,
    handle: JoinHandle<()>,
}

/// Shared state behind every clone of the provider and its timer tasks
#[derive(Default)]
struct QueueInner {
    /// Ids currently visible to receivers, head first
    visible: Mutex<VecDeque<String>>,
    /// Payloads of all live messages, visible and in flight
    payloads: Mutex<HashMap<String, Vec<u8>>>,
    /// Redelivery registrations, keyed by in-flight message id
    timers: Mutex<HashMap<String, RedeliveryTimer>>,
    generation: AtomicU64,
}

/// Local in-memory queue provider
///
/// Implements [`QueueProvider`] with process-local state. Cloning is cheap
/// and all clones share the same underlying queue. Multiple independent
/// instances coexist without interference.
///
/// # Example
///
/// ```ignore
/// use ephemera::providers::LocalQueueProvider;
/// use std::time::Duration;
///
/// let queue = LocalQueueProvider::new();
/// queue.send_message(b"job".to_vec()).await?;
/// let msg = queue.receive_message(Duration::from_secs(30)).await?;
/// ```
#[derive(Clone, Default)]
pub struct LocalQueueProvider {
    inner: Arc<QueueInner>,
}

impl LocalQueueProvider {
    /// Create a new empty local queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Create as Arc for sharing
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

#[async_trait]
impl QueueProvider for LocalQueueProvider {
    async fn send_message(&self, payload: Vec<u8>) -> Result<()> {
        let inner = &self.inner;

        let mut visible = inner.visible.lock().await;
        let mut payloads = inner.payloads.lock().await;

        // Uniqueness against the live id set does not rest on UUID
        // probability alone.
        let id = loop {
            let candidate = Uuid::new_v4().to_string();
            if !payloads.contains_key(&candidate) {
                break candidate;
            }
        };

        payloads.insert(id.clone(), payload);
        debug!(id = %id, "enqueued message");
        visible.push_back(id);

        Ok(())
    }

    async fn receive_message(&self, visibility_timeout: Duration) -> Result<ReceivedMessage> {
        let inner = &self.inner;

        let mut visible = inner.visible.lock().await;
        let mut payloads = inner.payloads.lock().await;

        let (id, payload) = loop {
            let Some(id) = visible.pop_front() else {
                return Err(Error::NoMessages);
            };

            if visibility_timeout.is_zero() {
                if let Some(payload) = payloads.remove(&id) {
                    debug!(id = %id, "consumed message");
                    return Ok(ReceivedMessage { id: None, payload });
                }
            } else if let Some(payload) = payloads.get(&id) {
                break (id, payload.clone());
            }

            // Head id with no payload: deleted while a redelivery was
            // pending, then re-enqueued by its timer. Sweep and move on.
            trace!(id = %id, "swept dangling id");
        };
        drop(visible);

        // The message is now in flight. The payload lock stays held until
        // the redelivery timer is registered so a concurrent delete cannot
        // observe a timer for an absent payload.
        let mut timers = inner.timers.lock().await;
        // A fresh lease supersedes any stale registration for this id.
        if let Some(stale) = timers.remove(&id) {
            stale.handle.abort();
        }
        let generation = inner.generation.fetch_add(1, Ordering::Relaxed);
        let task_inner = Arc::clone(inner);
        let task_id = id.clone();
        let handle = tokio::spawn(async move {
            redeliver_after(task_inner, task_id, visibility_timeout, generation).await;
        });
        timers.insert(id.clone(), RedeliveryTimer { generation, handle });
        drop(timers);
        drop(payloads);

        debug!(
            id = %id,
            timeout_ms = visibility_timeout.as_millis() as u64,
            "leased message"
        );
        Ok(ReceivedMessage {
            id: Some(id),
            payload,
        })
    }

    async fn delete_message(&self, id: &str) -> Result<()> {
        let inner = &self.inner;

        let mut payloads = inner.payloads.lock().await;
        let mut timers = inner.timers.lock().await;

        if let Some(timer) = timers.remove(id) {
            timer.handle.abort();
        }
        if payloads.remove(id).is_some() {
            debug!(id, "deleted message");
        }

        Ok(())
    }

    fn provider_name(&self) -> &str {
        "local"
    }
}

/// Redelivery task body: sleep out the visibility timeout, then return the
/// id to the head of the visible sequence if this lease is still the
/// registered one.
async fn redeliver_after(inner: Arc<QueueInner>, id: String, timeout: Duration, generation: u64) {
    tokio::time::sleep(timeout).await;

    let mut visible = inner.visible.lock().await;
    let mut timers = inner.timers.lock().await;
    let still_registered = matches!(timers.get(&id), Some(timer) if timer.generation == generation);
    if !still_registered {
        // Cancelled by a delete, or superseded, while we slept.
        return;
    }
    timers.remove(&id);
    drop(timers);

    debug!(id = %id, "visibility timeout elapsed, message redelivered");
    visible.push_front(id);
}

impl std::fmt::Debug for LocalQueueProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalQueueProvider").finish()
    }
}
