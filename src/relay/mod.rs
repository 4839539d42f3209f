//! The event-driven relay core.
//!
//! Data flow: microphone → recognition loop → utterance publisher → shared
//! channel → every participant's subscription loop → echo filter →
//! translation relay → feedback-guarded synthesis → speaker.

mod echo;
mod guard;
mod identity;
pub mod messages;
mod publisher;
mod recognition;
mod subscription;
mod supervisor;
mod translate_relay;

pub use echo::EchoFilter;
pub use guard::{FeedbackGuard, ListenCommand, ListeningState};
pub use identity::ParticipantIdentity;
pub use messages::{InboundMessage, Utterance};
pub use publisher::UtterancePublisher;
pub use recognition::RecognitionLoop;
pub use subscription::SubscriptionLoop;
pub use supervisor::Supervisor;
pub use translate_relay::TranslationRelay;
