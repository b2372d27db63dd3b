//! # ephemera
//!
//! Ephemeral state primitives for distributed-worker prototypes: a TTL
//! key-value cache and a visibility-timeout message queue, both in-memory
//! and safe for concurrent use.
//!
//! The two components are independent and composable. Each is exposed as a
//! small port trait ([`ports::CacheProvider`], [`ports::QueueProvider`]) so
//! the local implementations can later be swapped for networked backends
//! behind the same contracts.
//!
//! Nothing here is durable: state lives exactly as long as the owning
//! process, and that is the point.
//!
//! ## Example
//!
//! ```ignore
//! use ephemera::providers::{LocalCacheProvider, LocalQueueProvider};
//! use ephemera::ports::{CacheProvider, QueueProvider};
//! use std::time::Duration;
//!
//! let cache = LocalCacheProvider::new();
//! cache.set("lease:worker-1", b"held".to_vec(), Duration::from_secs(30)).await?;
//!
//! let queue = LocalQueueProvider::new();
//! queue.send_message(b"job".to_vec()).await?;
//! let msg = queue.receive_message(Duration::from_secs(30)).await?;
//! if let Some(id) = &msg.id {
//!     queue.delete_message(id).await?;
//! }
//! ```

pub mod error;
pub mod ports;
pub mod providers;

pub use error::{Error, Result};
pub use ports::{CacheProvider, QueueProvider, ReceivedMessage};
pub use providers::{LocalCacheProvider, LocalQueueProvider, NullCacheProvider, NullQueueProvider};
