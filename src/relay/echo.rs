use super::identity::ParticipantIdentity;
use super::messages::InboundMessage;

/// Drops self-originated messages before they reach the translator.
///
/// Every participant consumes the full broadcast stream, including its own
/// publishes; re-speaking one's own translated voice would feed back into
/// the microphone and degenerate into a relay-wide loop, so the comparison
/// happens before any remote call.
pub struct EchoFilter {
    local: ParticipantIdentity,
}

impl EchoFilter {
    pub fn new(local: ParticipantIdentity) -> Self {
        Self { local }
    }

    /// False iff the message was published by this process.
    pub fn should_process(&self, msg: &InboundMessage) -> bool {
        msg.sender != self.local
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(sender: &ParticipantIdentity) -> InboundMessage {
        InboundMessage {
            text: "hello".to_string(),
            language: "en".to_string(),
            sender: sender.clone(),
        }
    }

    #[test]
    fn own_messages_are_dropped() {
        let local = ParticipantIdentity::generate();
        let filter = EchoFilter::new(local.clone());
        assert!(!filter.should_process(&message(&local)));
    }

    #[test]
    fn other_messages_pass() {
        let filter = EchoFilter::new(ParticipantIdentity::generate());
        let other = ParticipantIdentity::generate();
        assert!(filter.should_process(&message(&other)));
    }
}
