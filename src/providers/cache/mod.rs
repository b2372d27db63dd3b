//! Cache Provider Implementations
//!
//! In-memory caching backends for the [`crate::ports::CacheProvider`] port.

pub mod local;
pub mod null;

// Re-export for convenience
pub use local::LocalCacheProvider;
pub use null::NullCacheProvider;
