use super::{Checkpoint, Delivery, RelayTransport};
use crate::config::NatsConfig;
use crate::error::{RelayError, Result};
use crate::relay::Utterance;
use async_nats::jetstream::{self, consumer};
use async_nats::HeaderMap;
use futures::StreamExt;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// JetStream-backed utterance channel.
///
/// Each process creates its own explicit-ack consumer on the shared stream
/// (`deliver_policy: New`), which is what gives broadcast semantics across
/// participants: every consumer has an independent cursor, and its ack floor
/// is the checkpoint the relay commits after every message.
pub struct NatsTransport {
    jetstream: jetstream::Context,
    stream: jetstream::stream::Stream,
    subject: String,
    consumer_name: String,
}

impl NatsTransport {
    pub async fn connect(cfg: &NatsConfig) -> Result<Self> {
        info!("Connecting to NATS at {}", cfg.url);

        let client = async_nats::connect(&cfg.url)
            .await
            .map_err(|e| RelayError::Transport(format!("failed to connect to NATS: {e}")))?;

        let jetstream = jetstream::new(client);

        let stream = jetstream
            .get_or_create_stream(jetstream::stream::Config {
                name: cfg.stream.clone(),
                subjects: vec![cfg.subject.clone()],
                ..Default::default()
            })
            .await
            .map_err(|e| {
                RelayError::Transport(format!("failed to open stream {}: {e}", cfg.stream))
            })?;

        info!("Connected to NATS, stream {} ready", cfg.stream);

        Ok(Self {
            jetstream,
            stream,
            subject: cfg.subject.clone(),
            consumer_name: cfg.consumer.clone(),
        })
    }
}

/// Explicit-ack consumer for one participant. A named consumer is durable:
/// its ack floor (the checkpoint cursor) survives restarts, bounding
/// re-delivery to the in-flight message. An unnamed consumer is ephemeral
/// and the cursor is process-scoped.
fn pull_config(name: &str) -> consumer::pull::Config {
    consumer::pull::Config {
        durable_name: (!name.is_empty()).then(|| name.to_string()),
        ack_policy: consumer::AckPolicy::Explicit,
        deliver_policy: consumer::DeliverPolicy::New,
        ..Default::default()
    }
}

#[async_trait::async_trait]
impl RelayTransport for NatsTransport {
    async fn publish(&self, utterance: &Utterance) -> Result<()> {
        let mut headers = HeaderMap::new();
        for (name, value) in utterance.headers() {
            headers.insert(name, value.as_str());
        }

        let ack = self
            .jetstream
            .publish_with_headers(
                self.subject.clone(),
                headers,
                utterance.payload().to_vec().into(),
            )
            .await
            .map_err(|e| RelayError::Transport(format!("publish failed: {e}")))?;

        // Wait for the stream to accept the message before reporting success.
        ack.await
            .map_err(|e| RelayError::Transport(format!("publish not acknowledged: {e}")))?;

        Ok(())
    }

    async fn subscribe(&self) -> Result<mpsc::Receiver<Delivery>> {
        let config = pull_config(&self.consumer_name);
        let consumer = if self.consumer_name.is_empty() {
            self.stream.create_consumer(config).await
        } else {
            // Re-attach to the existing durable consumer on restart so the
            // committed ack floor is picked up, not reset.
            self.stream
                .get_or_create_consumer(&self.consumer_name, config)
                .await
        }
        .map_err(|e| RelayError::Transport(format!("failed to create consumer: {e}")))?;

        let mut messages = consumer
            .messages()
            .await
            .map_err(|e| RelayError::Transport(format!("failed to start consuming: {e}")))?;

        let (tx, rx) = mpsc::channel(16);

        tokio::spawn(async move {
            while let Some(next) = messages.next().await {
                let message = match next {
                    Ok(message) => message,
                    Err(e) => {
                        warn!("Transport delivery error: {}", e);
                        continue;
                    }
                };

                let headers = message
                    .headers
                    .as_ref()
                    .map(plain_headers)
                    .unwrap_or_default();

                let delivery = Delivery {
                    payload: message.payload.to_vec(),
                    headers,
                    checkpoint: Box::new(NatsCheckpoint(message)),
                };

                if tx.send(delivery).await.is_err() {
                    break;
                }
            }

            info!("NATS delivery pump stopped");
        });

        Ok(rx)
    }

    fn name(&self) -> &str {
        "nats-jetstream"
    }
}

struct NatsCheckpoint(jetstream::Message);

#[async_trait::async_trait]
impl Checkpoint for NatsCheckpoint {
    async fn commit(self: Box<Self>) -> Result<()> {
        self.0
            .ack()
            .await
            .map_err(|e| RelayError::Transport(format!("checkpoint ack failed: {e}")))
    }
}

fn plain_headers(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .map(|(name, values)| {
            let value = values.first().map(ToString::to_string).unwrap_or_default();
            (name.to_string(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_consumer_is_durable_with_explicit_ack() {
        let config = pull_config("alice-desk");
        assert_eq!(config.durable_name.as_deref(), Some("alice-desk"));
        assert!(matches!(config.ack_policy, consumer::AckPolicy::Explicit));
        assert!(matches!(
            config.deliver_policy,
            consumer::DeliverPolicy::New
        ));
    }

    #[test]
    fn unnamed_consumer_is_ephemeral() {
        let config = pull_config("");
        assert_eq!(config.durable_name, None);
        assert!(matches!(config.ack_policy, consumer::AckPolicy::Explicit));
    }
}
