//! Machine translation seam. The service is stateless; the relay never
//! retries it (a stale utterance spoken out of order is worse than a
//! dropped one).

pub mod rest;

pub use rest::AzureTranslator;

use crate::error::Result;

#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate each text in `texts` from `from` to `to`, returning one
    /// translation per input in order.
    async fn translate(&self, texts: &[String], from: &str, to: &str) -> Result<Vec<String>>;
}
