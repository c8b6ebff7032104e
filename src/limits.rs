//! Size limit constants for input validation

/// Maximum length for a compact token string (64KB)
pub(crate) const MAX_TOKEN_LENGTH: usize = 64 * 1024;

/// Maximum size for the decoded JOSE header JSON (8KB)
pub(crate) const MAX_DECODED_HEADER_SIZE: usize = 8 * 1024;

/// Maximum size for the decoded payload JSON (64KB)
pub(crate) const MAX_DECODED_PAYLOAD_SIZE: usize = 64 * 1024;

/// Maximum size for a decoded signature (HS512 produces 64 bytes)
pub(crate) const MAX_DECODED_SIGNATURE_SIZE: usize = 512;

/// Maximum length of a claim key (256 bytes)
pub(crate) const MAX_CLAIM_KEY_LENGTH: usize = 256;
