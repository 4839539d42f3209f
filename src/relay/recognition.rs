use super::guard::ListenCommand;
use super::publisher::UtterancePublisher;
use crate::error::Result;
use crate::speech::SpeechRecognizer;
use tokio::sync::{mpsc, watch};
use tracing::{error, info, warn};

/// Continuous speech-to-text loop.
///
/// Finalized segments go to the utterance publisher; suspend/resume
/// requests from the feedback guard are forwarded to the engine's
/// idempotent stop/start operations. Publish failures are logged and
/// recognition keeps going.
pub struct RecognitionLoop {
    recognizer: Box<dyn SpeechRecognizer>,
    publisher: UtterancePublisher,
    commands: mpsc::Receiver<ListenCommand>,
    shutdown: watch::Receiver<bool>,
}

impl RecognitionLoop {
    pub fn new(
        recognizer: Box<dyn SpeechRecognizer>,
        publisher: UtterancePublisher,
        commands: mpsc::Receiver<ListenCommand>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            recognizer,
            publisher,
            commands,
            shutdown,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        let mut segments = self.recognizer.start().await?;
        info!("Recognition loop started ({})", self.recognizer.name());

        loop {
            tokio::select! {
                _ = self.shutdown.changed() => break,

                Some(cmd) = self.commands.recv() => {
                    let applied = match cmd {
                        ListenCommand::Suspend => self.recognizer.suspend().await,
                        ListenCommand::Resume => self.recognizer.resume().await,
                    };
                    if let Err(e) = applied {
                        warn!("Recognition engine rejected {:?}: {}", cmd, e);
                    }
                }

                segment = segments.recv() => match segment {
                    Some(segment) => {
                        if let Err(e) = self.publisher.publish(&segment.text).await {
                            error!("Failed to publish utterance: {}", e);
                        }
                    }
                    None => {
                        warn!("Recognition engine closed its segment stream");
                        break;
                    }
                },
            }
        }

        self.recognizer.stop().await?;
        info!("Recognition loop stopped");
        Ok(())
    }
}
