//! Declarative signer configuration and builder defaults

use crate::algorithm::AlgorithmId;
use crate::error::{Error, Result};
use crate::signer::Signer;
use serde::Deserialize;

/// Issuer written by [`Token::with_iss`](crate::Token::with_iss) and checked
/// by the standard `iss` validator
pub const DEFAULT_ISSUER: &str = "jwtkit";

/// Lifetime of a token built with standard defaults (2 hours)
pub const DEFAULT_TTL_SECONDS: i64 = 2 * 60 * 60;

/// How far in the past the default `nbf` is placed (100ms)
pub const DEFAULT_NOT_BEFORE_SKEW_MS: i64 = 100;

/// Longest accepted `ttl_seconds` (100 years)
pub const MAX_TTL_SECONDS: i64 = 100 * 365 * 24 * 60 * 60;

/// Largest accepted `not_before_skew_ms` (one day)
pub const MAX_NOT_BEFORE_SKEW_MS: i64 = 24 * 60 * 60 * 1000;

/// Configuration for the [`facade`](crate::facade) entry point
///
/// ```
/// use jwtkit::SignerConfig;
///
/// let config = SignerConfig::from_json(r#"{"algorithm":"HS512","secret":"s3cr3t"}"#).unwrap();
/// assert_eq!(config.issuer, "jwtkit");
/// assert_eq!(config.ttl_seconds, 7200);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SignerConfig {
    /// Signing algorithm
    pub algorithm: AlgorithmId,

    /// HMAC secret (UTF-8)
    pub secret: String,

    /// Issuer to generate and require
    pub issuer: String,

    /// Audience to generate and require, if any
    pub audience: Option<String>,

    /// Token lifetime in seconds
    pub ttl_seconds: i64,

    /// Offset of `nbf` before the issue time, in milliseconds
    pub not_before_skew_ms: i64,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            algorithm: AlgorithmId::HS256,
            secret: String::new(),
            issuer: DEFAULT_ISSUER.to_string(),
            audience: None,
            ttl_seconds: DEFAULT_TTL_SECONDS,
            not_before_skew_ms: DEFAULT_NOT_BEFORE_SKEW_MS,
        }
    }
}

impl SignerConfig {
    /// Configuration with the given algorithm and secret, defaults elsewhere
    pub fn new(algorithm: AlgorithmId, secret: impl Into<String>) -> Self {
        Self {
            algorithm,
            secret: secret.into(),
            ..Self::default()
        }
    }

    /// Parse and validate a JSON configuration document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("Failed to parse signer config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values a signer cannot work without
    pub fn validate(&self) -> Result<()> {
        if self.secret.is_empty() {
            return Err(Error::Config("secret must not be empty".to_string()));
        }
        if !(1..=MAX_TTL_SECONDS).contains(&self.ttl_seconds) {
            return Err(Error::Config(format!(
                "ttl_seconds must be between 1 and {MAX_TTL_SECONDS}, got {}",
                self.ttl_seconds
            )));
        }
        if !(0..=MAX_NOT_BEFORE_SKEW_MS).contains(&self.not_before_skew_ms) {
            return Err(Error::Config(format!(
                "not_before_skew_ms must be between 0 and {MAX_NOT_BEFORE_SKEW_MS}, got {}",
                self.not_before_skew_ms
            )));
        }
        Ok(())
    }

    /// Build the signer described by this configuration
    pub fn signer(&self) -> Result<Signer> {
        self.validate()?;
        Ok(Signer::new(self.algorithm, self.secret.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SignerConfig::default();
        assert_eq!(config.algorithm, AlgorithmId::HS256);
        assert_eq!(config.issuer, DEFAULT_ISSUER);
        assert_eq!(config.ttl_seconds, DEFAULT_TTL_SECONDS);
        assert_eq!(config.not_before_skew_ms, DEFAULT_NOT_BEFORE_SKEW_MS);
        assert!(config.audience.is_none());
    }

    #[test]
    fn test_from_json() {
        let config = SignerConfig::from_json(
            r#"{"algorithm":"HS384","secret":"s","issuer":"auth","audience":"api","ttl_seconds":60}"#,
        )
        .unwrap();
        assert_eq!(config.algorithm, AlgorithmId::HS384);
        assert_eq!(config.audience.as_deref(), Some("api"));
        assert_eq!(config.signer().unwrap(), Signer::hs384("s"));
    }

    #[test]
    fn test_from_json_errors() {
        for bad in [
            r#"{"algorithm":"RS256","secret":"s"}"#,
            r#"{"secret":""}"#,
            r#"{"secret":"s","ttl_seconds":0}"#,
            r#"{"secret":"s","surprise":true}"#,
            "not json",
        ] {
            assert!(
                matches!(SignerConfig::from_json(bad), Err(Error::Config(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_out_of_range_durations_rejected() {
        for bad in [
            r#"{"secret":"s","ttl_seconds":9223372036854775807}"#,
            r#"{"secret":"s","ttl_seconds":-1}"#,
            r#"{"secret":"s","not_before_skew_ms":9223372036854775807}"#,
            r#"{"secret":"s","not_before_skew_ms":-5}"#,
        ] {
            assert!(
                matches!(SignerConfig::from_json(bad), Err(Error::Config(_))),
                "{bad}"
            );
        }

        let longest = SignerConfig {
            ttl_seconds: MAX_TTL_SECONDS,
            ..SignerConfig::new(AlgorithmId::HS256, "s")
        };
        assert!(longest.validate().is_ok());
    }

    #[test]
    fn test_signer_requires_secret() {
        assert!(matches!(
            SignerConfig::default().signer(),
            Err(Error::Config(_))
        ));
    }
}
