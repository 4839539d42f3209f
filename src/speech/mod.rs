//! Speech engine seams.
//!
//! The recognition engine delivers finalized-segment notifications on its
//! own schedule; consumers register for them by calling `start` and reading
//! the returned channel, and must not assume any ordering between starting
//! and the first event. Suspend/resume map onto the engine's binary
//! listening state and are idempotent.

pub mod console;

pub use console::{ConsoleRecognizer, ConsoleSynthesizer};

use crate::error::Result;
use tokio::sync::mpsc;

/// One finalized segment from the recognition engine.
#[derive(Debug, Clone)]
pub struct RecognizedSegment {
    pub text: String,
}

/// Continuous speech-to-text collaborator, configured for a single language
/// at construction.
#[async_trait::async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Begin continuous recognition. Finalized segments arrive on the
    /// returned receiver; the receiver closing means the engine stopped.
    async fn start(&mut self) -> Result<mpsc::Receiver<RecognizedSegment>>;

    /// Stop capturing new audio. Best-effort and idempotent; audio already
    /// in flight may still produce a segment.
    async fn suspend(&self) -> Result<()>;

    /// Resume capturing. Idempotent.
    async fn resume(&self) -> Result<()>;

    /// Shut the engine down for good.
    async fn stop(&mut self) -> Result<()>;

    /// Engine name for logging
    fn name(&self) -> &str;
}

/// Speech synthesis collaborator, same language as recognition.
#[async_trait::async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Speak `text`, returning once the audio has finished playing.
    async fn speak(&self, text: &str) -> Result<()>;

    /// Engine name for logging
    fn name(&self) -> &str;
}
