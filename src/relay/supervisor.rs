use super::recognition::RecognitionLoop;
use super::subscription::SubscriptionLoop;
use crate::error::{RelayError, Result};
use tokio::sync::watch;
use tracing::{error, info};

/// Owns the lifetime of the recognition and subscription loops.
pub struct Supervisor {
    recognition: RecognitionLoop,
    subscription: SubscriptionLoop,
    shutdown: watch::Sender<bool>,
}

impl Supervisor {
    pub fn new(
        recognition: RecognitionLoop,
        subscription: SubscriptionLoop,
        shutdown: watch::Sender<bool>,
    ) -> Self {
        Self {
            recognition,
            subscription,
            shutdown,
        }
    }

    /// Run both loops until an external termination signal, then stop them
    /// and wait for teardown. In-flight synthesis completes; no new work is
    /// started after the stop request.
    pub async fn run(self) -> Result<()> {
        let recognition = tokio::spawn(self.recognition.run());
        let subscription = tokio::spawn(self.subscription.run());

        info!("Say something!");

        tokio::signal::ctrl_c().await.map_err(RelayError::Io)?;
        info!("Termination requested, stopping loops");

        // Loops observe the change at their next suspension point, so a
        // message mid-relay finishes (including its synthesis) first.
        let _ = self.shutdown.send(true);

        for (name, handle) in [("recognition", recognition), ("subscription", subscription)] {
            match handle.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => error!("{} loop exited with error: {}", name, e),
                Err(e) => error!("{} task panicked: {}", name, e),
            }
        }

        info!("Shutdown complete");
        Ok(())
    }
}
