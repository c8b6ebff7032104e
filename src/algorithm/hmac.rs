use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use crate::keys::SymmetricKey;

use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

/// HS256 algorithm (HMAC with SHA-256)
pub struct HS256;

/// HS384 algorithm (HMAC with SHA-384)
pub struct HS384;

/// HS512 algorithm (HMAC with SHA-512)
pub struct HS512;

impl Algorithm for HS256 {
    fn name(&self) -> &'static str {
        "HS256"
    }

    fn sign(&self, signing_input: &[u8], key: &SymmetricKey) -> Result<Vec<u8>> {
        compute_mac::<Hmac<Sha256>>(signing_input, key.as_bytes())
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &SymmetricKey) -> bool {
        verify_mac::<Hmac<Sha256>>(signing_input, signature, key.as_bytes())
    }
}

impl Algorithm for HS384 {
    fn name(&self) -> &'static str {
        "HS384"
    }

    fn sign(&self, signing_input: &[u8], key: &SymmetricKey) -> Result<Vec<u8>> {
        compute_mac::<Hmac<Sha384>>(signing_input, key.as_bytes())
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &SymmetricKey) -> bool {
        verify_mac::<Hmac<Sha384>>(signing_input, signature, key.as_bytes())
    }
}

impl Algorithm for HS512 {
    fn name(&self) -> &'static str {
        "HS512"
    }

    fn sign(&self, signing_input: &[u8], key: &SymmetricKey) -> Result<Vec<u8>> {
        compute_mac::<Hmac<Sha512>>(signing_input, key.as_bytes())
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &SymmetricKey) -> bool {
        verify_mac::<Hmac<Sha512>>(signing_input, signature, key.as_bytes())
    }
}

fn compute_mac<M>(signing_input: &[u8], secret: &[u8]) -> Result<Vec<u8>>
where
    M: Mac + hmac::digest::KeyInit,
{
    let mut mac = <M as Mac>::new_from_slice(secret)
        .map_err(|e| Error::Config(format!("HMAC key rejected: {e}")))?;
    mac.update(signing_input);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Recompute the MAC and compare with constant-time equality
fn verify_mac<M>(signing_input: &[u8], signature: &[u8], secret: &[u8]) -> bool
where
    M: Mac + hmac::digest::KeyInit,
{
    match compute_mac::<M>(signing_input, secret) {
        Ok(expected) => constant_time_eq(&expected, signature),
        Err(_) => false,
    }
}
