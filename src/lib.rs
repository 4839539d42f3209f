pub mod config;
pub mod error;
pub mod relay;
pub mod speech;
pub mod translate;
pub mod transport;

pub use config::Config;
pub use error::{RelayError, Result};
pub use relay::{
    EchoFilter, FeedbackGuard, InboundMessage, ListenCommand, ListeningState,
    ParticipantIdentity, RecognitionLoop, SubscriptionLoop, Supervisor, TranslationRelay,
    Utterance, UtterancePublisher,
};
pub use speech::{
    ConsoleRecognizer, ConsoleSynthesizer, RecognizedSegment, SpeechRecognizer, SpeechSynthesizer,
};
pub use translate::{AzureTranslator, Translator};
pub use transport::{Checkpoint, Delivery, NatsTransport, RelayTransport};
