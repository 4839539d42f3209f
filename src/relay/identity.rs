use std::fmt;
use uuid::Uuid;

/// Opaque token distinguishing this process's own messages from everyone
/// else's. Generated once at startup, immutable for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParticipantIdentity(String);

impl ParticipantIdentity {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Rebuild an identity from its wire representation (the `sender`
    /// message property). The token is opaque; no format is assumed.
    pub fn from_wire(token: &str) -> Self {
        Self(token.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
