//! Provider Implementations
//!
//! In-memory providers for the ephemeral state ports.
//!
//! ## Available Providers
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | [`LocalCacheProvider`] | Local | In-memory TTL cache |
//! | [`NullCacheProvider`] | Testing | No-op stub for testing |
//! | [`LocalQueueProvider`] | Local | In-memory visibility-timeout queue |
//! | [`NullQueueProvider`] | Testing | Always-empty stub for testing |
//!
//! ## Provider Selection Guide
//!
//! - **Prototyping / single process**: `LocalCacheProvider` and
//!   `LocalQueueProvider` keep all state in memory with no durability
//! - **Testing**: use the null providers to disable caching or queuing

pub mod cache;
pub mod queue;

pub use cache::{LocalCacheProvider, NullCacheProvider};
pub use queue::{LocalQueueProvider, NullQueueProvider};
