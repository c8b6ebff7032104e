//! Immutable token configuration and its fluent builder
//!
//! Every builder method consumes the token and returns a new one; clone a
//! token first to branch a configuration. Only [`Token::sign`] produces a
//! compact form, and only sign/verify write the error.

use crate::claims::{ClaimKey, Claims, ClaimsCodec, JsonCodec, Validations, Validator};
use crate::config::{DEFAULT_ISSUER, DEFAULT_NOT_BEFORE_SKEW_MS, DEFAULT_TTL_SECONDS};
use crate::error::{Error, Result};
use crate::signer::Signer;
use crate::utils::time::{now_millis, now_seconds};
use serde_json::{Map, Value};
use std::sync::Arc;

/// A token configuration: claims, validators, signer, codec and the outcome
/// of the last sign/verify
///
/// # Examples
///
/// ```
/// use jwtkit::{ClaimKey, Signer, Token, Validator};
///
/// let signed = Token::new()
///     .with_standard_defaults()
///     .with_sub("user-42")
///     .with_signer(Signer::hs256("secret"))
///     .sign();
/// let compact = signed.compact().expect("signed");
///
/// let verified = Token::from_compact(compact)
///     .with_validation(ClaimKey::SUB, Validator::equals("user-42"))
///     .with_signer(Signer::hs256("secret"))
///     .verify();
/// assert_eq!(verified.claims().subject(), Some("user-42"));
/// ```
#[derive(Debug, Clone)]
pub struct Token {
    pub(crate) claims: Claims,
    pub(crate) validations: Validations,
    pub(crate) header_fields: Map<String, Value>,
    pub(crate) signer: Option<Signer>,
    pub(crate) codec: Arc<dyn ClaimsCodec>,
    pub(crate) compact: Option<String>,
    pub(crate) error: Option<Error>,
}

impl Default for Token {
    fn default() -> Self {
        Self {
            claims: Claims::new(),
            validations: Validations::new(),
            header_fields: Map::new(),
            signer: None,
            codec: Arc::new(JsonCodec),
            compact: None,
            error: None,
        }
    }
}

impl Token {
    /// Empty configuration: no claims, no validators, no signer
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration pre-populated with `claims`, without any defaults
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            claims,
            ..Self::default()
        }
    }

    /// Configuration holding only a compact token, for verification
    pub fn from_compact(compact: impl Into<String>) -> Self {
        Self {
            compact: Some(compact.into()),
            ..Self::default()
        }
    }

    /// Seed `exp`, `iat`, `nbf` and `iss` and register their default validators
    ///
    /// `exp` is two hours from now, `iat` is now, `nbf` is 100ms ago and `iss`
    /// is [`DEFAULT_ISSUER`]. The validators require `exp` after, `iat` and
    /// `nbf` before the verification time, and `iss` equal to the default
    /// issuer. Later calls may override any of them.
    pub fn with_standard_defaults(self) -> Self {
        self.with_exp()
            .with_iat()
            .with_nbf()
            .with_iss()
            .with_validation(ClaimKey::EXP, Validator::expires_after_now())
            .with_validation(ClaimKey::IAT, Validator::issued_before_now())
            .with_validation(ClaimKey::NBF, Validator::not_before_now())
            .with_validation(ClaimKey::ISS, Validator::equals(DEFAULT_ISSUER))
    }

    /// Set a claim, replacing any previous value for the key
    pub fn with_claim(mut self, key: ClaimKey, value: impl Into<Value>) -> Self {
        self.claims.insert(key, value);
        self
    }

    /// Set a claim by name; fails with `InvalidClaimKey` for non-identifiers
    pub fn try_with_claim(self, key: &str, value: impl Into<Value>) -> Result<Self> {
        Ok(self.with_claim(ClaimKey::new(key)?, value))
    }

    /// `exp` two hours from now
    pub fn with_exp(self) -> Self {
        self.with_exp_at(now_seconds() + DEFAULT_TTL_SECONDS)
    }

    /// `exp` at the given NumericDate
    pub fn with_exp_at(self, timestamp: i64) -> Self {
        self.with_claim(ClaimKey::EXP, timestamp)
    }

    /// `iat` now, truncated to whole seconds
    ///
    /// Checked with [`Validator::issued_before_now`], which rejects it only
    /// when verification lands on the first millisecond of the same second.
    pub fn with_iat(self) -> Self {
        self.with_iat_at(now_seconds())
    }

    /// `iat` at the given NumericDate
    pub fn with_iat_at(self, timestamp: i64) -> Self {
        self.with_claim(ClaimKey::IAT, timestamp)
    }

    /// `nbf` 100ms ago
    pub fn with_nbf(self) -> Self {
        let not_before_ms = now_millis() - DEFAULT_NOT_BEFORE_SKEW_MS;
        self.with_nbf_at(not_before_ms.div_euclid(1000))
    }

    /// `nbf` at the given NumericDate
    pub fn with_nbf_at(self, timestamp: i64) -> Self {
        self.with_claim(ClaimKey::NBF, timestamp)
    }

    /// `iss` set to [`DEFAULT_ISSUER`]
    pub fn with_iss(self) -> Self {
        self.with_iss_value(DEFAULT_ISSUER)
    }

    /// `iss` set to `issuer`
    pub fn with_iss_value(self, issuer: impl Into<String>) -> Self {
        self.with_claim(ClaimKey::ISS, issuer.into())
    }

    /// `sub` set to `subject`
    pub fn with_sub(self, subject: impl Into<String>) -> Self {
        self.with_claim(ClaimKey::SUB, subject.into())
    }

    /// `aud` set to [`DEFAULT_ISSUER`]
    pub fn with_aud(self) -> Self {
        self.with_aud_value(DEFAULT_ISSUER)
    }

    /// `aud` set to `audience` (a string or an array of strings)
    pub fn with_aud_value(self, audience: impl Into<Value>) -> Self {
        self.with_claim(ClaimKey::AUD, audience)
    }

    /// `jti` set to a random UUID v4
    pub fn with_jti(self) -> Self {
        self.with_jti_value(uuid::Uuid::new_v4().to_string())
    }

    /// `jti` set to `id`
    pub fn with_jti_value(self, id: impl Into<String>) -> Self {
        self.with_claim(ClaimKey::JTI, id.into())
    }

    /// Register the validator for a claim, replacing any previous one
    pub fn with_validation(mut self, key: ClaimKey, validator: Validator) -> Self {
        self.validations.insert(key, validator);
        self
    }

    /// Attach or replace the signer; does not sign
    pub fn with_signer(mut self, signer: Signer) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Set the compact token a later [`verify`](Token::verify) checks
    ///
    /// Clears the outcome of any previous sign/verify.
    pub fn with_compact(mut self, compact: impl Into<String>) -> Self {
        self.compact = Some(compact.into());
        self.error = None;
        self
    }

    /// Use a different payload codec
    pub fn with_codec(mut self, codec: impl ClaimsCodec + 'static) -> Self {
        self.codec = Arc::new(codec);
        self
    }

    /// Add a JOSE header field such as `kid`
    ///
    /// `alg` and `typ` are always written by the signer and are ignored here.
    pub fn with_header_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.header_fields.insert(name.into(), value.into());
        self
    }

    /// The claims: as configured before signing, as decoded after verifying
    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    /// The compact token, after a successful sign or as given for verify
    pub fn compact(&self) -> Option<&str> {
        self.compact.as_deref()
    }

    /// The failure of the last sign/verify, if it failed
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Outcome of the last sign/verify as a `Result`
    pub fn result(&self) -> Result<&Claims> {
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(&self.claims),
        }
    }

    /// The registered validators
    pub fn validations(&self) -> &Validations {
        &self.validations
    }

    /// The attached signer
    pub fn signer(&self) -> Option<&Signer> {
        self.signer.as_ref()
    }

    /// Extra header fields
    pub fn header_fields(&self) -> &Map<String, Value> {
        &self.header_fields
    }

    /// The payload codec
    pub fn codec(&self) -> &dyn ClaimsCodec {
        self.codec.as_ref()
    }

    /// Terminal success: keep the compact form, clear the error
    pub(crate) fn succeeded(mut self, compact: String, claims: Option<Claims>) -> Self {
        if let Some(claims) = claims {
            self.claims = claims;
        }
        self.compact = Some(compact);
        self.error = None;
        self
    }

    /// Terminal failure: record the error, drop the compact form
    pub(crate) fn failed(mut self, error: Error) -> Self {
        self.compact = None;
        self.error = Some(error);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_with_compact_clears_previous_error() {
        let failed = Token::new().failed(Error::MissingToken);
        let token = failed.with_compact("a.b.c");
        assert_eq!(token.compact(), Some("a.b.c"));
        assert!(token.error().is_none());
    }

    #[test]
    fn test_new_is_empty() {
        let token = Token::new();
        assert!(token.claims().is_empty());
        assert!(token.validations().is_empty());
        assert!(token.signer().is_none());
        assert!(token.compact().is_none());
        assert!(token.error().is_none());
        assert_eq!(token.codec().name(), "json");
    }

    #[test]
    fn test_standard_defaults() {
        let before = now_seconds();
        let token = Token::new().with_standard_defaults();
        let after = now_seconds();
        let claims = token.claims();

        let exp = claims.expiration().unwrap();
        assert!(exp >= before + DEFAULT_TTL_SECONDS && exp <= after + DEFAULT_TTL_SECONDS);
        let iat = claims.issued_at().unwrap();
        assert!(iat >= before && iat <= after);
        assert!(claims.not_before().unwrap() <= iat);
        assert_eq!(claims.issuer(), Some(DEFAULT_ISSUER));

        let keys: Vec<&str> = token.validations().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["exp", "iat", "nbf", "iss"]);
    }

    #[test]
    fn test_with_claim_overwrites() {
        let token = Token::new()
            .with_claim(ClaimKey::ISS, "A")
            .with_claim(ClaimKey::ISS, "B");
        assert_eq!(token.claims().len(), 1);
        assert_eq!(token.claims().issuer(), Some("B"));
    }

    #[test]
    fn test_try_with_claim_fails_fast() {
        let err = Token::new().try_with_claim("bad key", 1).unwrap_err();
        assert_eq!(err, Error::InvalidClaimKey("bad key".to_string()));

        let token = Token::new().try_with_claim("role", "admin").unwrap();
        assert_eq!(token.claims().get("role"), Some(&json!("admin")));
    }

    #[test]
    fn test_with_validation_replaces() {
        let token = Token::new()
            .with_validation(ClaimKey::SUB, Validator::equals("a"))
            .with_validation(ClaimKey::SUB, Validator::equals("b"));
        assert_eq!(token.validations().len(), 1);
        assert_eq!(
            token.validations().get("sub").map(Validator::description),
            Some(r#"must equal "b""#)
        );
    }

    #[test]
    fn test_explicit_claim_setters() {
        let token = Token::new()
            .with_exp_at(300)
            .with_iat_at(100)
            .with_nbf_at(99)
            .with_iss_value("issuer")
            .with_sub("subject")
            .with_aud_value(json!(["a", "b"]))
            .with_jti_value("id-1");
        let claims = token.claims();

        assert_eq!(claims.expiration(), Some(300));
        assert_eq!(claims.issued_at(), Some(100));
        assert_eq!(claims.not_before(), Some(99));
        assert_eq!(claims.issuer(), Some("issuer"));
        assert_eq!(claims.subject(), Some("subject"));
        assert_eq!(claims.get("aud"), Some(&json!(["a", "b"])));
        assert_eq!(claims.jwt_id(), Some("id-1"));
    }

    #[test]
    fn test_default_jti_is_unique() {
        let a = Token::new().with_jti();
        let b = Token::new().with_jti();
        assert_ne!(a.claims().jwt_id(), b.claims().jwt_id());
        assert_eq!(Token::new().with_aud().claims().audience(), Some(DEFAULT_ISSUER));
    }

    #[test]
    fn test_builder_calls_do_not_alias() {
        let base = Token::new().with_sub("user");
        let branched = base.clone().with_sub("other");
        assert_eq!(base.claims().subject(), Some("user"));
        assert_eq!(branched.claims().subject(), Some("other"));
    }

    #[test]
    fn test_with_signer_does_not_sign() {
        let token = Token::new().with_signer(Signer::hs256("secret"));
        assert!(token.signer().is_some());
        assert!(token.compact().is_none());
        assert!(token.error().is_none());
    }
}
