use super::{ClaimSource, DecodeOptions};
use crate::algorithm::AlgorithmId;
use crate::claims::{ClaimKey, Claims, Validator};
use crate::config::SignerConfig;
use crate::error::Result;
use crate::utils::time::now_millis;
use serde_json::Value;
use uuid::Uuid;

/// [`ClaimSource`] backed by a [`SignerConfig`]
///
/// Generates `exp`, `iat`, `nbf`, `iss`, `jti` and, when configured, `aud`.
/// On decode the temporal claims are checked against the clock, `iss` and
/// `aud` against the configuration, and any claim named in
/// [`DecodeOptions::extra`] must equal the value given there.
#[derive(Debug, Clone)]
pub struct ConfiguredClaimSource {
    config: SignerConfig,
}

impl ConfiguredClaimSource {
    /// Fails with [`Error::Config`](crate::Error::Config) for an unusable configuration
    pub fn new(config: SignerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SignerConfig {
        &self.config
    }

    fn expected_issuer(&self) -> Value {
        Value::from(self.config.issuer.as_str())
    }
}

impl ClaimSource for ConfiguredClaimSource {
    fn secret_key(&self) -> Result<Vec<u8>> {
        Ok(self.config.secret.as_bytes().to_vec())
    }

    fn algorithm(&self) -> Result<AlgorithmId> {
        Ok(self.config.algorithm)
    }

    fn claim(&self, key: &ClaimKey, _payload: &Claims) -> Option<Value> {
        let now_ms = now_millis();
        let now = now_ms.div_euclid(1000);
        match key.as_str() {
            "exp" => now.checked_add(self.config.ttl_seconds).map(Value::from),
            "iat" => Some(Value::from(now)),
            "nbf" => now_ms
                .checked_sub(self.config.not_before_skew_ms)
                .map(|ms| Value::from(ms.div_euclid(1000))),
            "iss" => Some(self.expected_issuer()),
            "aud" => self.config.audience.as_deref().map(Value::from),
            "jti" => Some(Value::from(Uuid::new_v4().to_string())),
            _ => None,
        }
    }

    fn validate_claim(
        &self,
        key: &str,
        claims: &Claims,
        options: &DecodeOptions,
    ) -> std::result::Result<(), String> {
        let Some(value) = claims.get(key) else {
            return Ok(());
        };

        let validator = match key {
            "exp" => Some(Validator::expires_after_now()),
            "iat" => Some(Validator::issued_before_now()),
            "nbf" => Some(Validator::not_before_now()),
            "iss" => Some(Validator::equals(self.expected_issuer())),
            "aud" => self.config.audience.as_deref().map(Validator::equals),
            _ => None,
        };
        let now_ms = now_millis();
        if let Some(validator) = validator {
            validator.check(value, now_ms)?;
        }
        if let Some(expected) = options.extra().get(key) {
            Validator::equals(expected.clone()).check(value, now_ms)?;
        }
        Ok(())
    }
}
