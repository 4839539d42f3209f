use babelcast::relay::messages::{HEADER_LANGUAGE, HEADER_SENDER, HEADER_TIMESTAMP};
use babelcast::{InboundMessage, ParticipantIdentity, RelayError, Utterance};
use std::collections::HashMap;

fn headers_of(utterance: &Utterance) -> HashMap<String, String> {
    utterance
        .headers()
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

#[test]
fn utterance_carries_sender_and_language_properties() {
    let sender = ParticipantIdentity::generate();
    let utterance = Utterance::new("hello".to_string(), "en", &sender);

    let headers = headers_of(&utterance);
    assert_eq!(headers.get(HEADER_SENDER), Some(&sender.as_str().to_string()));
    assert_eq!(headers.get(HEADER_LANGUAGE), Some(&"en".to_string()));
    assert_eq!(utterance.payload(), b"hello");
}

#[test]
fn utterance_timestamp_is_rfc3339() {
    let sender = ParticipantIdentity::generate();
    let utterance = Utterance::new("hello".to_string(), "en", &sender);

    let headers = headers_of(&utterance);
    let stamp = headers.get(HEADER_TIMESTAMP).expect("timestamp header");
    assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok());
}

#[test]
fn decode_roundtrip() {
    let sender = ParticipantIdentity::generate();
    let utterance = Utterance::new("bonjour à tous".to_string(), "fr", &sender);

    let msg = InboundMessage::decode(utterance.payload(), &headers_of(&utterance)).unwrap();
    assert_eq!(msg.text, "bonjour à tous");
    assert_eq!(msg.language, "fr");
    assert_eq!(msg.sender, sender);
}

#[test]
fn missing_sender_is_a_protocol_violation() {
    let headers: HashMap<String, String> =
        [(HEADER_LANGUAGE.to_string(), "en".to_string())].into();

    let err = InboundMessage::decode(b"hello", &headers).unwrap_err();
    assert!(matches!(err, RelayError::ProtocolViolation("sender")));
}

#[test]
fn missing_language_is_a_protocol_violation() {
    let headers: HashMap<String, String> =
        [(HEADER_SENDER.to_string(), "someone".to_string())].into();

    let err = InboundMessage::decode(b"hello", &headers).unwrap_err();
    assert!(matches!(err, RelayError::ProtocolViolation("language")));
}

#[test]
fn decode_without_timestamp_is_fine() {
    let headers: HashMap<String, String> = [
        (HEADER_SENDER.to_string(), "someone".to_string()),
        (HEADER_LANGUAGE.to_string(), "de".to_string()),
    ]
    .into();

    let msg = InboundMessage::decode(b"guten tag", &headers).unwrap();
    assert_eq!(msg.text, "guten tag");
}

#[test]
fn identities_are_unique_per_process_start() {
    let a = ParticipantIdentity::generate();
    let b = ParticipantIdentity::generate();
    assert_ne!(a, b);
    assert_eq!(ParticipantIdentity::from_wire(a.as_str()), a);
}
