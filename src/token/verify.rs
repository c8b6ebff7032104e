//! Compact token → verified, validated claims
//!
//! Steps run in order and the first failure is terminal:
//! token present, signer present, three decodable segments, header `alg`
//! bound to the signer, signature, payload decoding, claim validators.

use crate::algorithm::AlgorithmId;
use crate::claims::Claims;
use crate::error::{Error, Result};
use crate::limits::MAX_DECODED_SIGNATURE_SIZE;
use crate::signer::Signer;
use crate::token::{ParsedToken, Token};
use crate::utils::base64url;
use crate::utils::time::now_millis;

impl Token {
    /// Verify the compact token with the attached signer and run the validators
    ///
    /// On success the decoded claims replace the configured ones. On failure
    /// the error is recorded and the compact form is dropped.
    pub fn verify(&self) -> Token {
        self.verify_inner(None)
    }

    /// Verify with `signer` for this call only; the attached signer is untouched
    pub fn verify_with(&self, signer: &Signer) -> Token {
        self.verify_inner(Some(signer))
    }

    fn verify_inner(&self, override_signer: Option<&Signer>) -> Token {
        match self.verified_claims(override_signer) {
            Ok((algorithm, compact, claims)) => {
                tracing::debug!(%algorithm, claims = claims.len(), "verified token");
                self.clone().succeeded(compact, Some(claims))
            }
            Err(err) => {
                tracing::warn!(kind = ?err.kind(), claim = ?err.claim(), "token verification failed");
                self.clone().failed(err)
            }
        }
    }

    fn verified_claims(
        &self,
        override_signer: Option<&Signer>,
    ) -> Result<(AlgorithmId, String, Claims)> {
        let compact = self
            .compact
            .as_deref()
            .filter(|c| !c.is_empty())
            .ok_or(Error::MissingToken)?;
        let signer = override_signer
            .or(self.signer.as_ref())
            .ok_or(Error::MissingSigner)?;

        let parsed = ParsedToken::parse(compact)?;
        check_signature(&parsed, signer)?;

        let claims = self.codec.deserialize(parsed.payload())?;
        self.validations.validate(&claims, now_millis())?;

        Ok((signer.algorithm(), compact.to_string(), claims))
    }
}

/// The header must name the signer's algorithm and the MAC must match
fn check_signature(parsed: &ParsedToken<'_>, signer: &Signer) -> Result<()> {
    let algorithm = signer.algorithm();
    if parsed.header().algorithm_str() != algorithm.as_str() {
        tracing::debug!(
            header_alg = parsed.header().algorithm_str(),
            signer_alg = %algorithm,
            "algorithm mismatch"
        );
        return Err(Error::InvalidSignature);
    }

    let signature = base64url::decode_bytes(parsed.signature_b64(), MAX_DECODED_SIGNATURE_SIZE)
        .map_err(|_| Error::InvalidSignature)?;
    if signature.len() != algorithm.signature_len() {
        return Err(Error::InvalidSignature);
    }

    if signer.verify_bytes(parsed.signing_input().as_bytes(), &signature) {
        Ok(())
    } else {
        Err(Error::InvalidSignature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::{ClaimKey, Validator};
    use serde_json::json;

    fn signed(token: Token, signer: Signer) -> String {
        token
            .with_signer(signer)
            .sign()
            .compact()
            .expect("signing failed")
            .to_string()
    }

    #[test]
    fn test_round_trip() {
        let compact = signed(
            Token::new().with_sub("user").with_claim(ClaimKey::new("n").unwrap(), 7),
            Signer::hs256("secret"),
        );

        let verified = Token::from_compact(compact.clone())
            .with_signer(Signer::hs256("secret"))
            .verify();

        assert!(verified.error().is_none());
        assert_eq!(verified.compact(), Some(compact.as_str()));
        assert_eq!(verified.claims().subject(), Some("user"));
        assert_eq!(verified.claims().get("n"), Some(&json!(7)));
    }

    #[test]
    fn test_missing_token() {
        let result = Token::new().with_signer(Signer::hs256("s")).verify();
        assert_eq!(result.error(), Some(&Error::MissingToken));

        let result = Token::from_compact("").with_signer(Signer::hs256("s")).verify();
        assert_eq!(result.error(), Some(&Error::MissingToken));
    }

    #[test]
    fn test_missing_signer() {
        let compact = signed(Token::new(), Signer::hs256("s"));
        let result = Token::from_compact(compact).verify();
        assert_eq!(result.error(), Some(&Error::MissingSigner));
        assert!(result.compact().is_none());
    }

    #[test]
    fn test_wrong_secret() {
        let compact = signed(Token::new().with_sub("user"), Signer::hs256("secret"));
        let result = Token::from_compact(compact)
            .with_signer(Signer::hs256("other"))
            .verify();
        assert_eq!(result.error(), Some(&Error::InvalidSignature));
    }

    #[test]
    fn test_algorithm_mismatch_is_invalid_signature() {
        let compact = signed(Token::new().with_sub("user"), Signer::hs256("secret"));
        let result = Token::from_compact(compact)
            .with_signer(Signer::hs512("secret"))
            .verify();
        assert_eq!(result.error(), Some(&Error::InvalidSignature));
    }

    #[test]
    fn test_none_algorithm_rejected() {
        let compact = format!(
            "{}.{}.",
            base64url::encode(r#"{"alg":"none"}"#),
            base64url::encode(r#"{"sub":"admin"}"#)
        );
        let result = Token::from_compact(compact)
            .with_signer(Signer::hs256("secret"))
            .verify();
        assert_eq!(result.error(), Some(&Error::InvalidSignature));
    }

    #[test]
    fn test_validator_failure_names_claim() {
        let compact = signed(
            Token::new().with_exp_at(now_millis() / 1000 - 1),
            Signer::hs256("secret"),
        );
        let result = Token::from_compact(compact)
            .with_validation(ClaimKey::EXP, Validator::expires_after_now())
            .with_signer(Signer::hs256("secret"))
            .verify();

        let err = result.error().expect("expired token must fail");
        assert_eq!(err.claim(), Some("exp"));
        assert!(result.compact().is_none());
    }

    #[test]
    fn test_unguarded_claims_pass_through() {
        let compact = signed(
            Token::new().with_sub("user").with_iss_value("anyone"),
            Signer::hs384("secret"),
        );
        let result = Token::from_compact(compact)
            .with_validation(ClaimKey::SUB, Validator::equals("user"))
            .with_signer(Signer::hs384("secret"))
            .verify();

        assert!(result.error().is_none());
        assert_eq!(result.claims().issuer(), Some("anyone"));
    }

    #[test]
    fn test_override_signer_for_verify() {
        let compact = signed(Token::new().with_sub("user"), Signer::hs512("right"));
        let token = Token::from_compact(compact).with_signer(Signer::hs512("wrong"));

        assert_eq!(token.verify().error(), Some(&Error::InvalidSignature));
        assert!(token.verify_with(&Signer::hs512("right")).error().is_none());
    }

    #[test]
    fn test_non_object_payload_is_serialization_error() {
        let header_b64 = base64url::encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let payload_b64 = base64url::encode("[1,2,3]");
        let signing_input = format!("{header_b64}.{payload_b64}");
        let signer = Signer::hs256("secret");
        let signature = signer.sign_bytes(signing_input.as_bytes()).unwrap();
        let compact = format!("{signing_input}.{}", base64url::encode_bytes(&signature));

        let result = Token::from_compact(compact).with_signer(signer).verify();
        assert!(matches!(result.error(), Some(Error::Serialization(_))));
    }
}
