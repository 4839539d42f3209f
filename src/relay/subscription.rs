use super::echo::EchoFilter;
use super::messages::InboundMessage;
use super::translate_relay::TranslationRelay;
use crate::error::Result;
use crate::transport::{Delivery, RelayTransport};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// Pulls inbound messages from the shared channel and runs each through
/// echo filter and translation relay.
///
/// Every delivery is checkpointed exactly once, after handling, whatever
/// the outcome: relayed, self-echo, relay failure, or protocol violation.
/// One bad message never halts the loop.
pub struct SubscriptionLoop {
    transport: Arc<dyn RelayTransport>,
    echo: EchoFilter,
    relay: TranslationRelay,
    shutdown: watch::Receiver<bool>,
}

impl SubscriptionLoop {
    pub fn new(
        transport: Arc<dyn RelayTransport>,
        echo: EchoFilter,
        relay: TranslationRelay,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            transport,
            echo,
            relay,
            shutdown,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        let mut deliveries = self.transport.subscribe().await?;
        info!("Subscription loop started ({})", self.transport.name());

        loop {
            tokio::select! {
                _ = self.shutdown.changed() => break,

                delivery = deliveries.recv() => match delivery {
                    Some(delivery) => self.handle(delivery).await,
                    None => {
                        warn!("Transport closed the delivery stream");
                        break;
                    }
                },
            }
        }

        info!("Subscription loop stopped");
        Ok(())
    }

    async fn handle(&self, delivery: Delivery) {
        match InboundMessage::decode(&delivery.payload, &delivery.headers) {
            Ok(msg) => {
                if self.echo.should_process(&msg) {
                    if let Err(e) = self.relay.relay(&msg).await {
                        // At-most-once effort: no retry, the message is
                        // checkpointed below regardless.
                        error!("Relay failed for message from {}: {}", msg.sender, e);
                    }
                } else {
                    debug!("Ignoring event");
                }
            }
            Err(e) => warn!("Unrelayable inbound message: {}", e),
        }

        if let Err(e) = delivery.checkpoint.commit().await {
            error!("Checkpoint failed: {}", e);
        }
    }
}
