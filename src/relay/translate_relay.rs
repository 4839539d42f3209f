use super::guard::FeedbackGuard;
use super::messages::InboundMessage;
use crate::error::{RelayError, Result};
use crate::translate::Translator;
use std::sync::Arc;
use tracing::{debug, info};

/// Translates non-self inbound utterances into the local language and hands
/// them to the feedback guard for playback.
pub struct TranslationRelay {
    translator: Arc<dyn Translator>,
    guard: Arc<FeedbackGuard>,
    local_language: String,
    bypass_same_language: bool,
}

impl TranslationRelay {
    pub fn new(
        translator: Arc<dyn Translator>,
        guard: Arc<FeedbackGuard>,
        local_language: String,
        bypass_same_language: bool,
    ) -> Self {
        Self {
            translator,
            guard,
            local_language,
            bypass_same_language,
        }
    }

    /// Translate and speak one inbound message. Failures are returned to
    /// the subscription loop, which logs them and checkpoints the message
    /// anyway: translation is at-most-once effort, never retried.
    pub async fn relay(&self, msg: &InboundMessage) -> Result<()> {
        info!("received {} in {}", msg.text, msg.language);

        // Optional fast path; by default same-language messages still go
        // through the translator so the relay path stays uniform.
        if self.bypass_same_language && msg.language == self.local_language {
            debug!("Message already in {}, skipping translation", self.local_language);
            return self.guard.speak(&msg.text).await;
        }

        let translated = self
            .translator
            .translate(
                std::slice::from_ref(&msg.text),
                &msg.language,
                &self.local_language,
            )
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| RelayError::Translation("translator returned no result".to_string()))?;

        self.guard.speak(&translated).await
    }
}
