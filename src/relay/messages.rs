use super::identity::ParticipantIdentity;
use crate::error::{RelayError, Result};
use std::collections::HashMap;

/// Mandatory message property carrying the publisher's identity token.
pub const HEADER_SENDER: &str = "sender";
/// Mandatory message property carrying the utterance's source language.
pub const HEADER_LANGUAGE: &str = "language";
/// Optional publish-time stamp (RFC3339), carried for diagnostics only.
pub const HEADER_TIMESTAMP: &str = "timestamp";

/// One finalized, translatable unit of recognized speech.
///
/// Created when the recognition engine finalizes a segment, published
/// exactly once, never mutated.
#[derive(Debug, Clone)]
pub struct Utterance {
    pub text: String,
    pub language: String,
    pub sender: ParticipantIdentity,
    pub timestamp: String,
}

impl Utterance {
    pub fn new(text: String, language: &str, sender: &ParticipantIdentity) -> Self {
        Self {
            text,
            language: language.to_string(),
            sender: sender.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Wire properties. Body is the UTF-8 text; everything else rides in
    /// headers so the channel never needs to parse the payload.
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            (HEADER_SENDER, self.sender.as_str().to_string()),
            (HEADER_LANGUAGE, self.language.clone()),
            (HEADER_TIMESTAMP, self.timestamp.clone()),
        ]
    }

    pub fn payload(&self) -> &[u8] {
        self.text.as_bytes()
    }
}

/// The wire form of an utterance as delivered by the shared channel.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub text: String,
    pub language: String,
    pub sender: ParticipantIdentity,
}

impl InboundMessage {
    /// Decode a delivery. A message without the mandatory `sender` and
    /// `language` properties is a protocol violation and unrelayable.
    pub fn decode(payload: &[u8], headers: &HashMap<String, String>) -> Result<Self> {
        let sender = headers
            .get(HEADER_SENDER)
            .ok_or(RelayError::ProtocolViolation(HEADER_SENDER))?;
        let language = headers
            .get(HEADER_LANGUAGE)
            .ok_or(RelayError::ProtocolViolation(HEADER_LANGUAGE))?;

        Ok(Self {
            text: String::from_utf8_lossy(payload).into_owned(),
            language: language.clone(),
            sender: ParticipantIdentity::from_wire(sender),
        })
    }
}
