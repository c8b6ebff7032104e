//! Signer: an HMAC algorithm paired with its secret
//!
//! A `Signer` is built once, attached to a [`Token`](crate::Token) (or passed
//! to a single sign/verify call) and only ever read afterwards.

use crate::algorithm::{get_algorithm, AlgorithmId};
use crate::error::Result;
use crate::keys::SymmetricKey;

/// Algorithm + secret pair used to produce and check signatures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signer {
    algorithm: AlgorithmId,
    key: SymmetricKey,
}

impl Signer {
    /// Create a signer for an explicit algorithm
    pub fn new(algorithm: AlgorithmId, secret: impl Into<SymmetricKey>) -> Self {
        Self {
            algorithm,
            key: secret.into(),
        }
    }

    /// Create a signer from an algorithm name such as `"HS256"`
    ///
    /// Fails with [`Error::UnsupportedAlgorithm`](crate::Error::UnsupportedAlgorithm)
    /// for anything outside the HMAC-SHA family.
    pub fn create(algorithm: &str, secret: impl Into<SymmetricKey>) -> Result<Self> {
        Ok(Self::new(algorithm.parse()?, secret))
    }

    /// HMAC with SHA-256
    pub fn hs256(secret: impl Into<SymmetricKey>) -> Self {
        Self::new(AlgorithmId::HS256, secret)
    }

    /// HMAC with SHA-384
    pub fn hs384(secret: impl Into<SymmetricKey>) -> Self {
        Self::new(AlgorithmId::HS384, secret)
    }

    /// HMAC with SHA-512
    pub fn hs512(secret: impl Into<SymmetricKey>) -> Self {
        Self::new(AlgorithmId::HS512, secret)
    }

    /// The signing algorithm
    pub fn algorithm(&self) -> AlgorithmId {
        self.algorithm
    }

    pub(crate) fn sign_bytes(&self, signing_input: &[u8]) -> Result<Vec<u8>> {
        get_algorithm(self.algorithm).sign(signing_input, &self.key)
    }

    pub(crate) fn verify_bytes(&self, signing_input: &[u8], signature: &[u8]) -> bool {
        get_algorithm(self.algorithm).verify(signing_input, signature, &self.key)
    }
}
