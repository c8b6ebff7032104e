//! Claims → compact token

use crate::error::{Error, Result};
use crate::signer::Signer;
use crate::token::{Token, TokenHeader};
use crate::utils::base64url;

impl Token {
    /// Sign the claims with the attached signer
    ///
    /// Returns a new token with either the compact form or the error set.
    /// Validators are not consulted when signing.
    pub fn sign(&self) -> Token {
        self.sign_inner(None)
    }

    /// Sign with `signer` for this call only; the attached signer is untouched
    pub fn sign_with(&self, signer: &Signer) -> Token {
        self.sign_inner(Some(signer))
    }

    fn sign_inner(&self, override_signer: Option<&Signer>) -> Token {
        let result = override_signer
            .or(self.signer.as_ref())
            .ok_or(Error::MissingSigner)
            .and_then(|signer| Ok((signer.algorithm(), self.compact_with(signer)?)));

        match result {
            Ok((algorithm, compact)) => {
                tracing::debug!(%algorithm, claims = self.claims.len(), "signed token");
                self.clone().succeeded(compact, None)
            }
            Err(err) => {
                tracing::warn!(kind = ?err.kind(), "token signing failed");
                self.clone().failed(err)
            }
        }
    }

    fn compact_with(&self, signer: &Signer) -> Result<String> {
        let payload = self.codec.serialize(&self.claims)?;
        let header = TokenHeader::for_signing(signer.algorithm(), &self.header_fields).to_json()?;

        let signing_input = format!(
            "{}.{}",
            base64url::encode_bytes(&header),
            base64url::encode_bytes(&payload)
        );
        let signature = signer.sign_bytes(signing_input.as_bytes())?;

        Ok(format!(
            "{signing_input}.{}",
            base64url::encode_bytes(&signature)
        ))
    }
}
