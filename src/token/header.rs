use crate::algorithm::AlgorithmId;
use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// JOSE header of a compact token
///
/// Holds the decoded header object as-is; `alg` and `typ` are always written
/// by the signer, other fields come from
/// [`Token::with_header_field`](crate::Token::with_header_field).
#[derive(Debug, Clone, PartialEq)]
pub struct TokenHeader {
    fields: Map<String, Value>,
}

impl TokenHeader {
    /// Build the header for signing: `alg`, `typ`, then the extra fields
    pub(crate) fn for_signing(algorithm: AlgorithmId, extra: &Map<String, Value>) -> Self {
        let mut fields = Map::new();
        fields.insert("alg".to_string(), Value::from(algorithm.as_str()));
        fields.insert("typ".to_string(), Value::from("JWT"));
        for (name, value) in extra {
            if name != "alg" && name != "typ" {
                fields.insert(name.clone(), value.clone());
            }
        }
        Self { fields }
    }

    /// Parse a decoded header; anything but a JSON object with a string `alg` is malformed
    pub(crate) fn from_json(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| Error::MalformedToken(format!("Failed to parse header: {e}")))?;
        let Value::Object(fields) = value else {
            return Err(Error::MalformedToken(
                "header is not a JSON object".to_string(),
            ));
        };
        if !fields.get("alg").is_some_and(Value::is_string) {
            return Err(Error::MalformedToken(
                "header is missing the 'alg' field".to_string(),
            ));
        }
        Ok(Self { fields })
    }

    pub(crate) fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(&self.fields).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Algorithm name as written in the header
    pub fn algorithm_str(&self) -> &str {
        self.fields.get("alg").and_then(Value::as_str).unwrap_or("")
    }

    /// Parse the algorithm from the header
    pub fn algorithm(&self) -> Result<AlgorithmId> {
        self.algorithm_str().parse()
    }

    /// Token type (typically "JWT")
    pub fn token_type(&self) -> Option<&str> {
        self.get("typ").and_then(Value::as_str)
    }

    /// Key ID, if present
    pub fn key_id(&self) -> Option<&str> {
        self.get("kid").and_then(Value::as_str)
    }

    /// Any header field by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// All header fields
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}
