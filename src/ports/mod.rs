//! Port definitions for the ephemeral state layer
//!
//! Ports are the abstract contracts the rest of a system programs against.
//! The in-memory providers in [`crate::providers`] implement them today;
//! networked backends (a remote key-value store, a hosted message service)
//! can implement the same traits later without touching callers.

pub mod cache;
pub mod queue;

pub use cache::CacheProvider;
pub use queue::{QueueProvider, ReceivedMessage};
