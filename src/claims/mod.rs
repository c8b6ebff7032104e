//! Claim keys and the ordered claim map
//!
//! Builder input goes through [`ClaimKey`], which only admits symbolic
//! identifiers, so `"exp "` or `"e xp"` fail at the call site instead of
//! silently producing a second claim. Claims decoded from a received token
//! keep whatever object keys the token carried.

mod codec;
mod validator;

pub use codec::{ClaimsCodec, JsonCodec};
pub use validator::{ClaimPredicate, Rule, Validations, Validator};

use crate::error::{Error, Result};
use crate::limits::MAX_CLAIM_KEY_LENGTH;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;

/// A claim name: ASCII letter or `_`, then letters, digits, `_`, `-`, `.` or `:`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClaimKey(Cow<'static, str>);

impl ClaimKey {
    /// Expiration Time
    pub const EXP: ClaimKey = ClaimKey(Cow::Borrowed("exp"));
    /// Issued At
    pub const IAT: ClaimKey = ClaimKey(Cow::Borrowed("iat"));
    /// Not Before
    pub const NBF: ClaimKey = ClaimKey(Cow::Borrowed("nbf"));
    /// Issuer
    pub const ISS: ClaimKey = ClaimKey(Cow::Borrowed("iss"));
    /// Subject
    pub const SUB: ClaimKey = ClaimKey(Cow::Borrowed("sub"));
    /// Audience
    pub const AUD: ClaimKey = ClaimKey(Cow::Borrowed("aud"));
    /// JWT ID
    pub const JTI: ClaimKey = ClaimKey(Cow::Borrowed("jti"));

    /// The registered claims of RFC 7519 Section 4.1
    pub const REGISTERED: [ClaimKey; 7] = [
        Self::EXP,
        Self::IAT,
        Self::NBF,
        Self::ISS,
        Self::SUB,
        Self::AUD,
        Self::JTI,
    ];

    /// Validate and wrap a claim name
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if !is_identifier(&key) {
            return Err(Error::InvalidClaimKey(key));
        }
        Ok(ClaimKey(Cow::Owned(key)))
    }

    /// The claim name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_identifier(key: &str) -> bool {
    if key.is_empty() || key.len() > MAX_CLAIM_KEY_LENGTH {
        return false;
    }
    let mut chars = key.chars();
    let first_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    first_ok && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'))
}

impl fmt::Display for ClaimKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ClaimKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for ClaimKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ClaimKey::new(s)
    }
}

impl TryFrom<&str> for ClaimKey {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        ClaimKey::new(s)
    }
}

impl TryFrom<String> for ClaimKey {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        ClaimKey::new(s)
    }
}

/// Ordered claim map
///
/// Insertion order is kept so the serialized payload is deterministic.
/// Re-inserting a key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    /// Create an empty claim map
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a claim, returning the value it replaced
    pub fn insert(&mut self, key: ClaimKey, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.as_str().to_string(), value.into())
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, key: ClaimKey, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub(crate) fn insert_raw(&mut self, key: String, value: Value) {
        self.0.insert(key, value);
    }

    /// Get a claim by name
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether a claim is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of claims
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no claims
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Claim names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Claims in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Borrow the underlying JSON object
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Convert into the underlying JSON object
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Issuer (iss)
    pub fn issuer(&self) -> Option<&str> {
        self.get_str("iss")
    }

    /// Subject (sub)
    pub fn subject(&self) -> Option<&str> {
        self.get_str("sub")
    }

    /// Audience (aud), when it is a single string
    pub fn audience(&self) -> Option<&str> {
        self.get_str("aud")
    }

    /// JWT ID (jti)
    pub fn jwt_id(&self) -> Option<&str> {
        self.get_str("jti")
    }

    /// Expiration Time (exp) in seconds since the Unix epoch
    pub fn expiration(&self) -> Option<i64> {
        self.get_i64("exp")
    }

    /// Not Before (nbf) in seconds since the Unix epoch
    pub fn not_before(&self) -> Option<i64> {
        self.get_i64("nbf")
    }

    /// Issued At (iat) in seconds since the Unix epoch
    pub fn issued_at(&self) -> Option<i64> {
        self.get_i64("iat")
    }

    fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    fn get_i64(&self, key: &str) -> Option<i64> {
        self.0.get(key).and_then(Value::as_i64)
    }
}

impl TryFrom<Map<String, Value>> for Claims {
    type Error = Error;

    /// Adopt a caller-supplied object, checking every key
    fn try_from(map: Map<String, Value>) -> Result<Self> {
        if let Some(bad) = map.keys().find(|k| !is_identifier(k)) {
            return Err(Error::InvalidClaimKey(bad.clone()));
        }
        Ok(Claims(map))
    }
}

impl TryFrom<Value> for Claims {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Claims::try_from(map),
            other => Err(Error::Serialization(format!(
                "claims must be a JSON object, found {other}"
            ))),
        }
    }
}

impl FromIterator<(ClaimKey, Value)> for Claims {
    fn from_iter<I: IntoIterator<Item = (ClaimKey, Value)>>(iter: I) -> Self {
        let mut claims = Claims::new();
        for (key, value) in iter {
            claims.insert(key, value);
        }
        claims
    }
}

impl<'a> IntoIterator for &'a Claims {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
