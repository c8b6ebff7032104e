use crate::claims::{Claims, ClaimsCodec, JsonCodec};
use crate::error::{Error, Result};
use crate::limits::{MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_TOKEN_LENGTH};
use crate::token::TokenHeader;
use crate::utils::base64url;

/// A compact token split into its three segments, header and payload decoded
///
/// Nothing here is trusted until the signature over
/// [`signing_input`](Self::signing_input) has been checked.
pub(crate) struct ParsedToken<'a> {
    header_b64: &'a str,
    payload_b64: &'a str,
    signature_b64: &'a str,
    header: TokenHeader,
    payload: Vec<u8>,
}

impl<'a> ParsedToken<'a> {
    /// Split and decode a compact token
    pub(crate) fn parse(compact: &'a str) -> Result<Self> {
        if compact.len() > MAX_TOKEN_LENGTH {
            return Err(Error::MalformedToken(format!(
                "token too large: {} bytes (maximum: {MAX_TOKEN_LENGTH} bytes)",
                compact.len()
            )));
        }

        let parts: Vec<&str> = compact.split('.').collect();
        let &[header_b64, payload_b64, signature_b64] = parts.as_slice() else {
            return Err(Error::MalformedToken(format!(
                "expected three segments separated by '.', found {}",
                parts.len()
            )));
        };

        let header_json = base64url::decode_bytes(header_b64, MAX_DECODED_HEADER_SIZE)?;
        let header = TokenHeader::from_json(&header_json)?;
        let payload = base64url::decode_bytes(payload_b64, MAX_DECODED_PAYLOAD_SIZE)?;

        Ok(Self {
            header_b64,
            payload_b64,
            signature_b64,
            header,
            payload,
        })
    }

    pub(crate) fn header(&self) -> &TokenHeader {
        &self.header
    }

    pub(crate) fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// `header.payload` exactly as received
    pub(crate) fn signing_input(&self) -> String {
        format!("{}.{}", self.header_b64, self.payload_b64)
    }

    pub(crate) fn signature_b64(&self) -> &str {
        self.signature_b64
    }
}

/// Decode the header of a compact token without verifying it
pub fn peek_header(compact: &str) -> Result<TokenHeader> {
    ParsedToken::parse(compact).map(|parsed| parsed.header)
}

/// Decode the claims of a compact token without verifying it
///
/// The result is untrusted: use it for routing or diagnostics only.
pub fn peek_claims(compact: &str) -> Result<Claims> {
    let parsed = ParsedToken::parse(compact)?;
    JsonCodec.deserialize(parsed.payload())
}
