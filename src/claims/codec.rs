use crate::claims::Claims;
use crate::error::{Error, Result};
use std::fmt;

/// Serialization strategy for the token payload
///
/// Implementations must be stateless and safe to share across threads.
pub trait ClaimsCodec: fmt::Debug + Send + Sync {
    /// Short name of the codec, for diagnostics
    fn name(&self) -> &'static str;

    /// Serialize claims into payload bytes
    fn serialize(&self, claims: &Claims) -> Result<Vec<u8>>;

    /// Deserialize payload bytes into claims
    fn deserialize(&self, bytes: &[u8]) -> Result<Claims>;
}

/// JSON payloads via `serde_json`
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonCodec;

impl ClaimsCodec for JsonCodec {
    fn name(&self) -> &'static str {
        "json"
    }

    fn serialize(&self, claims: &Claims) -> Result<Vec<u8>> {
        serde_json::to_vec(claims).map_err(|e| Error::Serialization(e.to_string()))
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Claims> {
        // Claims is a transparent JSON object, so arrays and scalars are rejected here
        serde_json::from_slice(bytes)
            .map_err(|e| Error::Serialization(format!("Failed to parse claims: {e}")))
    }
}
