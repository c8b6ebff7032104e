//! Error types for token building, signing and verification
//!
//! Builder-level problems (a malformed claim key, an unknown algorithm name)
//! are returned immediately from the call that caused them. Sign and verify
//! failures are recorded on the resulting [`Token`](crate::Token) instead, so
//! the caller can inspect them next to the configuration that produced them.

use thiserror::Error;

/// jwtkit errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Builder Errors
    // ============================================================================
    #[error("Invalid claim key '{0}': expected a symbolic identifier")]
    InvalidClaimKey(String),

    #[error("Algorithm '{0}' is not supported (expected HS256, HS384 or HS512)")]
    UnsupportedAlgorithm(String),

    // ============================================================================
    // Sign / Verify Errors
    // ============================================================================
    #[error("No signer attached to the token and none supplied")]
    MissingSigner,

    #[error("No compact token to verify")]
    MissingToken,

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Signature verification failed")]
    InvalidSignature,

    #[error("Claims serialization failed: {0}")]
    Serialization(String),

    #[error("Claim '{claim}' failed validation: {reason}")]
    ClaimValidationFailed { claim: String, reason: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Failure class of an [`Error`], without its context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidClaimKey,
    UnsupportedAlgorithm,
    MissingSigner,
    MissingToken,
    MalformedToken,
    InvalidSignature,
    Serialization,
    ClaimValidationFailed,
    Config,
}

impl Error {
    /// The failure class of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidClaimKey(_) => ErrorKind::InvalidClaimKey,
            Error::UnsupportedAlgorithm(_) => ErrorKind::UnsupportedAlgorithm,
            Error::MissingSigner => ErrorKind::MissingSigner,
            Error::MissingToken => ErrorKind::MissingToken,
            Error::MalformedToken(_) => ErrorKind::MalformedToken,
            Error::InvalidSignature => ErrorKind::InvalidSignature,
            Error::Serialization(_) => ErrorKind::Serialization,
            Error::ClaimValidationFailed { .. } => ErrorKind::ClaimValidationFailed,
            Error::Config(_) => ErrorKind::Config,
        }
    }

    /// The offending claim key, for claim validation failures
    pub fn claim(&self) -> Option<&str> {
        match self {
            Error::ClaimValidationFailed { claim, .. } => Some(claim),
            _ => None,
        }
    }

    pub(crate) fn claim_failed(claim: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::ClaimValidationFailed {
            claim: claim.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for jwtkit operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_failure_names_the_claim() {
        let err = Error::claim_failed("exp", "token expired");
        assert_eq!(err.kind(), ErrorKind::ClaimValidationFailed);
        assert_eq!(err.claim(), Some("exp"));
        assert_eq!(
            err.to_string(),
            "Claim 'exp' failed validation: token expired"
        );
    }

    #[test]
    fn test_other_errors_have_no_claim() {
        assert_eq!(Error::InvalidSignature.claim(), None);
        assert_eq!(Error::MissingToken.kind(), ErrorKind::MissingToken);
    }
}
