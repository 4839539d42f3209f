//! The shared utterance channel: a durable, at-least-once pub/sub transport
//! with per-message checkpointing. Every participant publishes to the same
//! subject and consumes with its own cursor, so all participants see all
//! messages (broadcast, not work-queue, semantics).

pub mod nats;

pub use nats::NatsTransport;

use crate::error::Result;
use crate::relay::Utterance;
use std::collections::HashMap;
use tokio::sync::mpsc;

/// Durable acknowledgment handle for one delivered message.
#[async_trait::async_trait]
pub trait Checkpoint: Send {
    /// Mark the message as processed so it is not redelivered after restart.
    async fn commit(self: Box<Self>) -> Result<()>;
}

/// One message as handed over by the shared channel, plus its checkpoint
/// handle. Checkpointing is unconditional: echoes, relay failures, and
/// protocol violations are all committed once handled.
pub struct Delivery {
    pub payload: Vec<u8>,
    pub headers: HashMap<String, String>,
    pub checkpoint: Box<dyn Checkpoint>,
}

/// Transport seam in front of the message bus.
///
/// Delivery is at-least-once; duplicate deliveries are tolerated upstream
/// (a duplicate translation spoken twice is acceptable, not corrupting).
#[async_trait::async_trait]
pub trait RelayTransport: Send + Sync {
    /// Publish one utterance as a single message.
    async fn publish(&self, utterance: &Utterance) -> Result<()>;

    /// Start consuming. Deliveries arrive on the returned receiver in
    /// channel order; the receiver closing means the transport is gone.
    async fn subscribe(&self) -> Result<mpsc::Receiver<Delivery>>;

    /// Transport name for logging
    fn name(&self) -> &str;
}
