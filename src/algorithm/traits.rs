use crate::error::Result;
use crate::keys::SymmetricKey;

/// Core algorithm trait that all JWT signature algorithms implement
///
/// An algorithm turns a signing input (`header.payload`) into signature bytes
/// and checks supplied signature bytes against the same input.
pub trait Algorithm {
    /// The algorithm identifier written to the `alg` header (e.g. "HS256")
    fn name(&self) -> &'static str;

    /// Compute the signature over `signing_input`
    fn sign(&self, signing_input: &[u8], key: &SymmetricKey) -> Result<Vec<u8>>;

    /// Check `signature` against `signing_input` in constant time
    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &SymmetricKey) -> bool;
}

/// Type alias for algorithm trait objects
pub type SignatureAlgorithm = &'static (dyn Algorithm + Send + Sync);

/// Get the signature algorithm for the given algorithm ID
pub fn get_algorithm(algorithm: super::AlgorithmId) -> SignatureAlgorithm {
    match algorithm {
        super::AlgorithmId::HS256 => &super::hmac::HS256,
        super::AlgorithmId::HS384 => &super::hmac::HS384,
        super::AlgorithmId::HS512 => &super::hmac::HS512,
    }
}
