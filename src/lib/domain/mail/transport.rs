//! Mail transport seam

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

use super::{errors::TransportError, message::OutgoingMessage};

/// Delivers assembled messages over a mail protocol.
///
/// Connection handling, timeouts, and retry policy all belong to the
/// implementation; the composition layer invokes it at most once per send.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Delivers a message.
    ///
    /// # Arguments
    /// * `message` - The assembled [`OutgoingMessage`] to hand off.
    ///
    /// # Returns
    /// The number of recipients the transport accepted the message for.
    async fn deliver(&self, message: &OutgoingMessage) -> Result<usize, TransportError>;
}

#[cfg(test)]
mock! {
    pub Transport {}

    #[async_trait]
    impl Transport for Transport {
        async fn deliver(&self, message: &OutgoingMessage) -> Result<usize, TransportError>;
    }
}
