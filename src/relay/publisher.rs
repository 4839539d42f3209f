use super::identity::ParticipantIdentity;
use super::messages::Utterance;
use crate::error::Result;
use crate::transport::RelayTransport;
use std::sync::Arc;
use tracing::{debug, info};

/// Wraps finalized recognition segments into outbound utterances tagged
/// with this process's identity and language.
pub struct UtterancePublisher {
    transport: Arc<dyn RelayTransport>,
    identity: ParticipantIdentity,
    language: String,
}

impl UtterancePublisher {
    pub fn new(
        transport: Arc<dyn RelayTransport>,
        identity: ParticipantIdentity,
        language: String,
    ) -> Self {
        Self {
            transport,
            identity,
            language,
        }
    }

    /// Publish one finalized segment.
    ///
    /// Whitespace-only text is a normal outcome of low-confidence
    /// recognition and is silently dropped, not an error. Transport
    /// rejection is returned to the caller; the recognition loop logs it
    /// and keeps listening.
    pub async fn publish(&self, text: &str) -> Result<()> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            debug!("Dropping empty recognized segment");
            return Ok(());
        }

        let utterance = Utterance::new(trimmed.to_string(), &self.language, &self.identity);

        info!("Sending: {}", utterance.text);
        self.transport.publish(&utterance).await?;
        debug!("sent");

        Ok(())
    }
}
