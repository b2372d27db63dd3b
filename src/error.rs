//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the ephemeral state providers
///
/// The in-memory providers are deliberately hard to fail: unknown ids and
/// absent keys are silent no-ops so idempotent callers need not precheck.
/// The only reachable variant is [`Error::NoMessages`]. The enum is
/// non-exhaustive so networked providers can add variants without a
/// breaking change.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Receive was called on a queue with no visible messages
    #[error("no messages in queue")]
    NoMessages,

    /// Provider-specific failure (reserved for remote backends)
    #[error("provider error: {message}")]
    Provider {
        /// Description of the provider failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// True when the error is the distinguished empty-queue value
    pub fn is_no_messages(&self) -> bool {
        matches!(self, Error::NoMessages)
    }
}
