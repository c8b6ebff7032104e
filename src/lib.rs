//! # jwtkit - Build, Sign and Verify HMAC JSON Web Tokens
//!
//! > Compact HMAC JWTs with an immutable builder and a per-claim validator registry.
//!
//! **jwtkit** produces and checks JWS compact tokens (`header.payload.signature`) signed with
//! HS256, HS384 or HS512. A [`Token`] is an immutable configuration record: every builder call
//! returns a new value, and signing or verifying returns a new record carrying either the
//! compact string or an [`Error`], never both.
//!
//! ## Overview
//!
//! Claims are set on the builder together with the validators that a verifier should apply to
//! them. Signing serializes the claims, writes a protected header naming the signer's algorithm,
//! and computes the HMAC over `header.payload`. Verifying checks the structure, the algorithm,
//! the signature (in constant time), decodes the claims, and finally runs each registered
//! validator in registration order. The first failing validator names the offending claim.
//!
//! Callers preferring declarative configuration use the [`facade`] entry points instead: a
//! [`ClaimSource`] supplies the secret, the algorithm, generated claims, and per-claim checks.
//!
//! ## Quick Start
//!
//! ```
//! use jwtkit::{ClaimKey, Signer, Token};
//!
//! let signer = Signer::hs256("s3cr3t");
//!
//! let signed = Token::new()
//!     .with_standard_defaults()
//!     .with_sub("user-42")
//!     .with_signer(signer.clone())
//!     .sign();
//! let compact = signed.compact().unwrap();
//!
//! let verified = Token::new()
//!     .with_standard_defaults()
//!     .with_signer(signer)
//!     .with_compact(compact)
//!     .verify();
//! assert_eq!(verified.result().unwrap().subject(), Some("user-42"));
//! ```
//!
//! ## Flow
//!
//! ```text
//! Token::new() ── with_claim / with_validation / with_signer ──▶ Token (configured)
//!     │ .sign()                              │ .verify()
//!     ▼                                      ▼
//! Token { compact: Some(..) }           Token { claims: decoded }
//!    or Token { error: Some(..) }          or Token { error: Some(..), compact: None }
//! ```
//!
//! ## Algorithm Support
//!
//! - **HS256**: HMAC with SHA-256
//! - **HS384**: HMAC with SHA-384
//! - **HS512**: HMAC with SHA-512
//!
//! ## Security
//!
//! ### Algorithm Binding
//!
//! The header's `alg` must equal the verifying signer's algorithm. Tokens declaring any other
//! algorithm, `"none"` included, fail with [`Error::InvalidSignature`].
//!
//! ### Timing Attack Protection
//!
//! HMAC signature verification uses constant-time comparison via the
//! [`constant_time_eq`](https://crates.io/crates/constant_time_eq) crate.
//!
//! ### Size Limits
//!
//! Compact tokens and their decoded segments are bounded before any allocation proportional to
//! attacker input.
//!
//! ## References
//!
//! - [RFC 7515](https://datatracker.ietf.org/doc/html/rfc7515) JSON Web Signature (JWS)
//! - [RFC 7519](https://datatracker.ietf.org/doc/html/rfc7519) JSON Web Token (JWT)
//! - [RFC 8725](https://datatracker.ietf.org/doc/html/rfc8725) JSON Web Signature Best Practices

// Core modules
pub mod error;
pub(crate) mod limits;
pub mod utils;

// Algorithm system
pub mod algorithm;
pub mod keys;
pub mod signer;

// Claims and validation
pub mod claims;

// Token builder, sign and verify
pub mod token;

// Declarative configuration
pub mod config;
pub mod facade;

// ============================================================================
// PUBLIC API
// ============================================================================

// Builder flow
pub use signer::Signer;
pub use token::{peek_claims, peek_header, Token, TokenHeader};

// Claims and validators
pub use claims::{ClaimKey, Claims, ClaimsCodec, JsonCodec, Rule, Validations, Validator};

// Façade
pub use config::{SignerConfig, DEFAULT_ISSUER};
pub use facade::{decode, encode, ClaimSource, ConfiguredClaimSource, DecodeOptions};

// Supporting types
pub use algorithm::AlgorithmId;
pub use error::{Error, ErrorKind, Result};
pub use keys::SymmetricKey;
