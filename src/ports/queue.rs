//! Queue Provider Port
//!
//! Port for FIFO message queues implementing the receive-with-leased-
//! visibility pattern: a received message is hidden from other receivers
//! for a bounded period and automatically redelivered at the head of the
//! queue unless acknowledged in time.

use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// A message handed out by [`QueueProvider::receive_message`]
///
/// `id` is the acknowledgement handle: `Some` when the message was received
/// with a positive visibility timeout (pass it to `delete_message` once the
/// message is processed), `None` when the message was consumed outright by
/// a zero-timeout receive and nothing remains to acknowledge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedMessage {
    /// Acknowledgement handle, present only for leased receipts
    pub id: Option<String>,
    /// The message payload
    pub payload: Vec<u8>,
}

/// Queue Provider Port
///
/// Defines the contract for asynchronous message queues. Payloads are
/// opaque byte strings; message ids are opaque strings allocated by the
/// provider and unique across the queue's live messages.
///
/// # Example
///
/// ```ignore
/// use ephemera::ports::QueueProvider;
/// use std::time::Duration;
///
/// queue.send_message(b"job".to_vec()).await?;
/// let msg = queue.receive_message(Duration::from_secs(30)).await?;
/// // ... process msg.payload ...
/// if let Some(id) = &msg.id {
///     queue.delete_message(id).await?;
/// }
/// ```
#[async_trait]
pub trait QueueProvider: Send + Sync + std::fmt::Debug {
    /// Add a message to the tail of the queue
    async fn send_message(&self, payload: Vec<u8>) -> Result<()>;

    /// Receive the message at the head of the queue
    ///
    /// A zero `visibility_timeout` consumes the message outright: it is
    /// removed from the queue and the returned id is `None`.
    ///
    /// A positive `visibility_timeout` leases the message: it disappears
    /// from the queue and reappears at the *head* once the timeout elapses,
    /// unless `delete_message` is called with the returned id first.
    ///
    /// # Errors
    /// [`crate::Error::NoMessages`] when no messages are visible.
    async fn receive_message(&self, visibility_timeout: Duration) -> Result<ReceivedMessage>;

    /// Acknowledge a leased message, removing it from the queue
    ///
    /// Cancels the message's pending redelivery. An unknown id, or one
    /// whose message has already been deleted, is a silent no-op.
    async fn delete_message(&self, id: &str) -> Result<()>;

    /// Get the name/identifier of this provider implementation
    ///
    /// # Returns
    /// A string identifier for the provider (e.g., "local", "null")
    fn provider_name(&self) -> &str;
}
