use thiserror::Error;

/// All errors produced by the relay core.
///
/// Per-message errors (`Transport`, `Translation`, `Synthesis`,
/// `ProtocolViolation`) are contained at the message boundary: they are
/// logged and the loops continue. Only `Configuration` is fatal.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("translation failed: {0}")]
    Translation(String),

    #[error("speech synthesis failed: {0}")]
    Synthesis(String),

    #[error("speech recognition error: {0}")]
    Recognition(String),

    #[error("inbound message missing required property `{0}`")]
    ProtocolViolation(&'static str),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, RelayError>;
