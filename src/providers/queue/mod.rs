//! Queue Provider Implementations
//!
//! In-memory queuing backends for the [`crate::ports::QueueProvider`] port.

pub mod local;
pub mod null;

// Re-export for convenience
pub use local::LocalQueueProvider;
pub use null::NullQueueProvider;
