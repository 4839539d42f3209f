use crate::error::Result;
use crate::speech::SpeechSynthesizer;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::warn;

/// Recognition control requests handed to the recognition loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenCommand {
    Suspend,
    Resume,
}

/// Whether the local recognition engine is currently allowed to hear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListeningState {
    Active,
    Suspended,
}

/// Mutual exclusion between "currently listening" and "currently speaking".
///
/// Without a headset, the microphone would capture the synthesized
/// translation and re-publish it as a new utterance. The guard suspends
/// recognition for the exact duration of synthesis: the state mutex is held
/// across the synthesis await, so a concurrent relay cannot resume
/// recognition while a prior message is still audible.
pub struct FeedbackGuard {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    listen_ctrl: mpsc::Sender<ListenCommand>,
    state: Mutex<ListeningState>,
    headset_mode: bool,
}

impl FeedbackGuard {
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizer>,
        listen_ctrl: mpsc::Sender<ListenCommand>,
        headset_mode: bool,
    ) -> Self {
        Self {
            synthesizer,
            listen_ctrl,
            state: Mutex::new(ListeningState::Active),
            headset_mode,
        }
    }

    /// Speak `text`, suspending local recognition for the duration unless
    /// the operator declared a physically isolated audio path.
    pub async fn speak(&self, text: &str) -> Result<()> {
        if self.headset_mode {
            return self.synthesizer.speak(text).await;
        }

        let mut state = self.state.lock().await;
        *state = ListeningState::Suspended;

        // Asynchronous-to-completion: the stop request is issued before
        // synthesis begins, but the engine is not required to have fully
        // quiesced.
        self.send(ListenCommand::Suspend).await;

        let spoken = self.synthesizer.speak(text).await;

        // Resume even when synthesis failed, or recognition would stay off
        // for the rest of the process.
        self.send(ListenCommand::Resume).await;
        *state = ListeningState::Active;

        spoken
    }

    pub async fn listening_state(&self) -> ListeningState {
        *self.state.lock().await
    }

    async fn send(&self, cmd: ListenCommand) {
        if self.listen_ctrl.send(cmd).await.is_err() {
            warn!("Recognition loop is gone, {:?} request dropped", cmd);
        }
    }
}
