use crate::error::{RelayError, Result};
use serde::Deserialize;

/// Process configuration, immutable after startup.
///
/// Loaded from a config file layered with `BABELCAST_`-prefixed environment
/// variables (e.g. `BABELCAST_TRANSLATOR__KEY`), then overridden by CLI
/// flags before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub participant: ParticipantConfig,
    #[serde(default)]
    pub nats: NatsConfig,
    #[serde(default)]
    pub translator: TranslatorConfig,
    #[serde(default)]
    pub relay: RelayConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParticipantConfig {
    /// BCP-47-like tag for the language this participant speaks and hears.
    #[serde(default)]
    pub language: String,

    /// Operator guarantee that the microphone cannot capture the speaker
    /// output, so recognition can stay on while translations play.
    #[serde(default)]
    pub headset: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NatsConfig {
    /// NATS server URL
    #[serde(default = "default_nats_url")]
    pub url: String,

    /// JetStream stream holding the shared utterance channel
    #[serde(default = "default_stream")]
    pub stream: String,

    /// Subject all participants publish utterances to
    #[serde(default = "default_subject")]
    pub subject: String,

    /// Durable consumer name for this participant. Must be distinct per
    /// participant (a shared name would turn the broadcast into a work
    /// queue). When set, the checkpoint cursor survives restarts; when
    /// empty, the consumer is ephemeral and the cursor dies with the
    /// process.
    #[serde(default)]
    pub consumer: String,
}

impl Default for NatsConfig {
    fn default() -> Self {
        Self {
            url: default_nats_url(),
            stream: default_stream(),
            subject: default_subject(),
            consumer: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranslatorConfig {
    /// Translator REST endpoint, e.g. "https://api.cognitive.microsofttranslator.com"
    #[serde(default)]
    pub endpoint: String,

    /// Subscription key
    #[serde(default)]
    pub key: String,

    /// Service region the key belongs to
    #[serde(default)]
    pub region: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelayConfig {
    /// Skip the translator call when an inbound message is already in the
    /// local language. Off by default: the translator round-trip keeps the
    /// relay path uniform at the cost of latency.
    #[serde(default)]
    pub bypass_same_language: bool,
}

fn default_nats_url() -> String {
    "nats://localhost:4222".to_string()
}

fn default_stream() -> String {
    "BABELCAST".to_string()
}

fn default_subject() -> String {
    "babelcast.utterance".to_string()
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("BABELCAST").separator("__"))
            .build()
            .map_err(|e| RelayError::Configuration(e.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|e| RelayError::Configuration(e.to_string()))
    }

    /// The process must not start partially configured.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("participant.language", &self.participant.language),
            ("nats.url", &self.nats.url),
            ("nats.stream", &self.nats.stream),
            ("nats.subject", &self.nats.subject),
            ("translator.endpoint", &self.translator.endpoint),
            ("translator.key", &self.translator.key),
            ("translator.region", &self.translator.region),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(RelayError::Configuration(format!(
                    "missing required setting `{name}`"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> Config {
        Config {
            participant: ParticipantConfig {
                language: "en".to_string(),
                headset: false,
            },
            nats: NatsConfig::default(),
            translator: TranslatorConfig {
                endpoint: "https://api.cognitive.microsofttranslator.com".to_string(),
                key: "secret".to_string(),
                region: "westeurope".to_string(),
            },
            relay: RelayConfig::default(),
        }
    }

    #[test]
    fn complete_config_validates() {
        assert!(configured().validate().is_ok());
    }

    #[test]
    fn missing_language_is_fatal() {
        let mut cfg = configured();
        cfg.participant.language = "  ".to_string();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("participant.language"));
    }

    #[test]
    fn missing_translator_key_is_fatal() {
        let mut cfg = configured();
        cfg.translator.key = String::new();
        assert!(cfg.validate().is_err());
    }
}
