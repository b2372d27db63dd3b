//! Null queue provider for testing
//!
//! A queue provider implementation that discards everything.
//! Useful for testing and disabling queuing.

use crate::error::{Error, Result};
use crate::ports::queue::{QueueProvider, ReceivedMessage};
use async_trait::async_trait;
use std::time::Duration;

/// Null queue provider that discards everything
///
/// Sends succeed but are dropped, receives always report
/// [`Error::NoMessages`], and deletes are no-ops.
#[derive(Debug, Clone, Default)]
pub struct NullQueueProvider;

impl NullQueueProvider {
    /// Create a new null queue provider
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl QueueProvider for NullQueueProvider {
    async fn send_message(&self, _payload: Vec<u8>) -> Result<()> {
        Ok(())
    }

    async fn receive_message(&self, _visibility_timeout: Duration) -> Result<ReceivedMessage> {
        // The queue is always empty
        Err(Error::NoMessages)
    }

    async fn delete_message(&self, _id: &str) -> Result<()> {
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}
