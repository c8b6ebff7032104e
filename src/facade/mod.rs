//! Config-driven encode/decode
//!
//! A second entry point next to the [`Token`] builder: secret, algorithm,
//! claim generation and claim validation all come from a [`ClaimSource`]
//! passed into every call.
//!
//! ```
//! use jwtkit::{decode, encode, Claims, ConfiguredClaimSource, DecodeOptions, SignerConfig};
//!
//! let source = ConfiguredClaimSource::new(SignerConfig {
//!     secret: "s3cr3t".to_string(),
//!     ..SignerConfig::default()
//! })
//! .unwrap();
//!
//! let compact = encode(&source, Claims::new()).unwrap();
//! let claims = decode(&source, &compact, &DecodeOptions::default()).unwrap();
//! assert_eq!(claims.issuer(), Some("jwtkit"));
//! ```

mod source;

pub use source::ConfiguredClaimSource;

use crate::algorithm::AlgorithmId;
use crate::claims::{ClaimKey, Claims};
use crate::error::{Error, Result};
use crate::signer::Signer;
use crate::token::Token;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Supplies everything the façade needs to sign and check tokens
pub trait ClaimSource {
    /// HMAC secret
    fn secret_key(&self) -> Result<Vec<u8>>;

    /// Signing algorithm
    fn algorithm(&self) -> Result<AlgorithmId>;

    /// Claims this source knows how to generate, in emission order
    fn claim_keys(&self) -> Vec<ClaimKey> {
        ClaimKey::REGISTERED.to_vec()
    }

    /// Generated value for `key`; `None` omits the claim
    ///
    /// `payload` is the caller's payload before merging.
    fn claim(&self, key: &ClaimKey, payload: &Claims) -> Option<Value>;

    /// Check one decoded claim; the error is the failure reason
    fn validate_claim(
        &self,
        key: &str,
        claims: &Claims,
        options: &DecodeOptions,
    ) -> std::result::Result<(), String>;
}

/// Options for [`decode`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodeOptions {
    skip: HashSet<String>,
    extra: Map<String, Value>,
}

impl DecodeOptions {
    /// No skipped claims and no extra options
    pub fn new() -> Self {
        Self::default()
    }

    /// Do not validate `key`
    pub fn skip(mut self, key: impl Into<String>) -> Self {
        self.skip.insert(key.into());
        self
    }

    /// Forward a caller-defined option to [`ClaimSource::validate_claim`]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Whether `key` is excluded from validation
    pub fn is_skipped(&self, key: &str) -> bool {
        self.skip.contains(key)
    }

    /// Caller-defined options, keyed by claim name
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

fn signer_for(source: &impl ClaimSource) -> Result<Signer> {
    Ok(Signer::new(source.algorithm()?, source.secret_key()?))
}

/// Generate claims, merge `payload` over them, and sign
///
/// Keys present in `payload` win over generated values.
pub fn encode(source: &impl ClaimSource, payload: Claims) -> Result<String> {
    let signer = signer_for(source)?;
    let algorithm = signer.algorithm();

    let mut claims = Claims::new();
    for key in source.claim_keys() {
        if let Some(value) = source.claim(&key, &payload) {
            claims.insert(key, value);
        }
    }
    for (key, value) in payload.into_map() {
        claims.insert_raw(key, value);
    }

    let signed = Token::from_claims(claims).with_signer(signer).sign();
    if let Some(err) = signed.error() {
        return Err(err.clone());
    }
    let compact = signed.compact().ok_or(Error::MissingToken)?;
    tracing::debug!(%algorithm, "encoded token");
    Ok(compact.to_string())
}

/// Verify `compact` and validate each decoded claim through `source`
///
/// Claims are checked in payload order. Keys in the skip set are left alone.
pub fn decode(source: &impl ClaimSource, compact: &str, options: &DecodeOptions) -> Result<Claims> {
    let signer = signer_for(source)?;
    let verified = Token::from_compact(compact).with_signer(signer).verify();
    let claims = verified.result()?;

    for key in claims.keys() {
        if options.is_skipped(key) {
            tracing::trace!(claim = key, "skipping claim validation");
            continue;
        }
        if let Err(reason) = source.validate_claim(key, claims, options) {
            tracing::warn!(claim = key, "claim validation failed");
            return Err(Error::claim_failed(key, reason));
        }
    }

    tracing::debug!(claims = claims.len(), "decoded token");
    Ok(claims.clone())
}
