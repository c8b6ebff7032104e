//! Base64URL encoding/decoding per RFC 4648
//!
//! Thin wrapper around the `base64` crate: URL-safe alphabet, no padding,
//! with a size limit on decoded output.

use crate::error::{Error, Result};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

/// Encode bytes to a Base64URL string
pub fn encode_bytes(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Encode a string to Base64URL
pub fn encode(input: &str) -> String {
    encode_bytes(input.as_bytes())
}

/// Decode a Base64URL string to bytes, rejecting output larger than `max_size`
pub fn decode_bytes(input: &str, max_size: usize) -> Result<Vec<u8>> {
    // Base64 expands by 4/3; bail out before allocating for oversized input
    if input.len() / 4 * 3 > max_size {
        return Err(Error::MalformedToken(format!(
            "segment too large: {} encoded bytes (max decoded: {max_size})",
            input.len()
        )));
    }

    let result = URL_SAFE_NO_PAD
        .decode(input)
        .map_err(|e| Error::MalformedToken(format!("Base64URL decode failed: {e}")))?;

    if result.len() > max_size {
        return Err(Error::MalformedToken(format!(
            "decoded size exceeds limit: {} bytes (max: {max_size})",
            result.len()
        )));
    }

    Ok(result)
}
