use crate::claims::{ClaimKey, Claims};
use crate::error::{Error, Result};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Predicate over a decoded claim value
pub type ClaimPredicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// What a [`Validator`] checks
///
/// Temporal rules read the claim as NumericDate seconds and compare it with
/// the verification clock in milliseconds.
#[derive(Clone)]
pub enum Rule {
    /// Claim must be strictly later than now
    ExpiresAfterNow,
    /// Claim must be strictly earlier than now
    IssuedBeforeNow,
    /// Claim must be strictly earlier than now
    NotBeforeNow,
    /// Claim must equal the given value
    Equals(Value),
    /// Claim must equal one of the given values
    OneOf(Vec<Value>),
    /// Claim must satisfy an arbitrary predicate
    Predicate(ClaimPredicate),
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::ExpiresAfterNow => f.write_str("ExpiresAfterNow"),
            Rule::IssuedBeforeNow => f.write_str("IssuedBeforeNow"),
            Rule::NotBeforeNow => f.write_str("NotBeforeNow"),
            Rule::Equals(v) => f.debug_tuple("Equals").field(v).finish(),
            Rule::OneOf(vs) => f.debug_tuple("OneOf").field(vs).finish(),
            Rule::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// A rule plus a human-readable description of what it expects
#[derive(Debug, Clone)]
pub struct Validator {
    rule: Rule,
    description: String,
}

impl Validator {
    /// Claim value must be a time strictly after verification time
    pub fn expires_after_now() -> Self {
        Self::with_rule(Rule::ExpiresAfterNow, "must be later than the current time")
    }

    /// Claim value must be a time strictly before verification time
    ///
    /// The claim is whole seconds and the clock is milliseconds, so a token
    /// issued this second passes unless it is checked in the very millisecond
    /// that starts the second (`iat * 1000 == now_ms`).
    pub fn issued_before_now() -> Self {
        Self::with_rule(Rule::IssuedBeforeNow, "must be earlier than the current time")
    }

    /// Claim value must be a time strictly before verification time
    ///
    /// Same second boundary as [`issued_before_now`](Self::issued_before_now).
    pub fn not_before_now() -> Self {
        Self::with_rule(Rule::NotBeforeNow, "must be earlier than the current time")
    }

    /// Claim value must equal `expected`
    pub fn equals(expected: impl Into<Value>) -> Self {
        let expected = expected.into();
        let description = format!("must equal {expected}");
        Self::with_rule(Rule::Equals(expected), description)
    }

    /// Claim value must equal one of `allowed`
    pub fn one_of<I, V>(allowed: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let allowed: Vec<Value> = allowed.into_iter().map(Into::into).collect();
        let description = format!("must be one of {}", Value::Array(allowed.clone()));
        Self::with_rule(Rule::OneOf(allowed), description)
    }

    /// Claim value must satisfy `predicate`; `description` is reported on failure
    pub fn predicate<F>(description: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::with_rule(Rule::Predicate(Arc::new(predicate)), description)
    }

    fn with_rule(rule: Rule, description: impl Into<String>) -> Self {
        Self {
            rule,
            description: description.into(),
        }
    }

    /// The rule this validator applies
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// What the validator expects, in words
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Check a decoded claim value against this validator
    ///
    /// `now_ms` is the verification clock in milliseconds since the Unix
    /// epoch. The error carries a reason suitable for
    /// [`Error::ClaimValidationFailed`].
    pub fn check(&self, value: &Value, now_ms: i64) -> std::result::Result<(), String> {
        let satisfied = match &self.rule {
            Rule::ExpiresAfterNow => numeric_date_ms(value)? > now_ms as f64,
            Rule::IssuedBeforeNow | Rule::NotBeforeNow => {
                numeric_date_ms(value)? < now_ms as f64
            }
            Rule::Equals(expected) => value == expected,
            Rule::OneOf(allowed) => allowed.contains(value),
            Rule::Predicate(predicate) => predicate(value),
        };

        if satisfied {
            Ok(())
        } else {
            Err(format!("{} (found {value})", self.description))
        }
    }
}

fn numeric_date_ms(value: &Value) -> std::result::Result<f64, String> {
    value
        .as_f64()
        .map(|seconds| seconds * 1000.0)
        .ok_or_else(|| format!("expected a NumericDate (seconds), found {value}"))
}

/// Claim key → validator registry
///
/// At most one validator per key; registering a key again replaces the
/// validator and keeps its original position. Validators run in registration
/// order and the first failure wins.
#[derive(Debug, Clone, Default)]
pub struct Validations {
    entries: Vec<(ClaimKey, Validator)>,
}

impl Validations {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a validator, returning the one it replaced
    pub fn insert(&mut self, key: ClaimKey, validator: Validator) -> Option<Validator> {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, validator)),
            None => {
                self.entries.push((key, validator));
                None
            }
        }
    }

    /// The validator registered for `key`
    pub fn get(&self, key: &str) -> Option<&Validator> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v)
    }

    /// Registered validators in order
    pub fn iter(&self) -> impl Iterator<Item = (&ClaimKey, &Validator)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Number of registered validators
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no validators are registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run every validator whose claim is present in `claims`
    ///
    /// Claims without a validator are accepted as-is; validators whose claim is
    /// absent are skipped.
    pub fn validate(&self, claims: &Claims, now_ms: i64) -> Result<()> {
        for (key, validator) in &self.entries {
            let Some(value) = claims.get(key.as_str()) else {
                continue;
            };
            validator
                .check(value, now_ms)
                .map_err(|reason| Error::claim_failed(key.as_str(), reason))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NOW_MS: i64 = 1_700_000_000_500;
    const NOW_S: i64 = 1_700_000_000;

    #[test]
    fn test_expires_after_now() {
        let v = Validator::expires_after_now();
        assert!(v.check(&json!(NOW_S + 1), NOW_MS).is_ok());
        assert!(v.check(&json!(NOW_S), NOW_MS).is_err());
        assert!(v.check(&json!(NOW_S - 1), NOW_MS).is_err());
    }

    #[test]
    fn test_issued_in_same_second_is_before_now() {
        // iat is truncated to seconds, so a token issued this second still passes
        let v = Validator::issued_before_now();
        assert!(v.check(&json!(NOW_S), NOW_MS).is_ok());
        assert!(v.check(&json!(NOW_S + 1), NOW_MS).is_err());
        assert!(Validator::not_before_now().check(&json!(NOW_S + 60), NOW_MS).is_err());
    }

    #[test]
    fn test_second_boundary_is_not_before_now() {
        let at_boundary = NOW_S * 1000;
        assert!(Validator::issued_before_now()
            .check(&json!(NOW_S), at_boundary)
            .is_err());
        assert!(Validator::not_before_now()
            .check(&json!(NOW_S), at_boundary)
            .is_err());
        assert!(Validator::issued_before_now()
            .check(&json!(NOW_S), at_boundary + 1)
            .is_ok());
    }

    #[test]
    fn test_temporal_rules_reject_non_numbers() {
        let err = Validator::expires_after_now()
            .check(&json!("tomorrow"), NOW_MS)
            .unwrap_err();
        assert!(err.contains("NumericDate"), "{err}");
    }

    #[test]
    fn test_equals_and_one_of() {
        let eq = Validator::equals("jwtkit");
        assert!(eq.check(&json!("jwtkit"), NOW_MS).is_ok());
        let err = eq.check(&json!("other"), NOW_MS).unwrap_err();
        assert_eq!(err, r#"must equal "jwtkit" (found "other")"#);

        let one_of = Validator::one_of(["admin", "editor"]);
        assert!(one_of.check(&json!("editor"), NOW_MS).is_ok());
        assert!(one_of.check(&json!("viewer"), NOW_MS).is_err());
    }

    #[test]
    fn test_predicate() {
        let v = Validator::predicate("must be a positive integer", |v| {
            v.as_i64().is_some_and(|n| n > 0)
        });
        assert!(v.check(&json!(3), NOW_MS).is_ok());
        assert_eq!(
            v.check(&json!(-3), NOW_MS),
            Err("must be a positive integer (found -3)".to_string())
        );
        assert_eq!(format!("{:?}", v.rule()), "Predicate(..)");
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut validations = Validations::new();
        validations.insert(ClaimKey::ISS, Validator::equals("a"));
        validations.insert(ClaimKey::SUB, Validator::equals("user"));
        let replaced = validations.insert(ClaimKey::ISS, Validator::equals("b"));

        assert!(matches!(replaced.map(|v| v.rule().clone()), Some(Rule::Equals(_))));
        assert_eq!(validations.len(), 2);
        let keys: Vec<&str> = validations.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["iss", "sub"]);
        assert_eq!(
            validations.get("iss").map(Validator::description),
            Some(r#"must equal "b""#)
        );
    }

    #[test]
    fn test_validate_first_failure_in_registration_order() {
        let mut validations = Validations::new();
        validations.insert(ClaimKey::SUB, Validator::equals("someone-else"));
        validations.insert(ClaimKey::EXP, Validator::expires_after_now());

        let claims = Claims::new()
            .with(ClaimKey::EXP, NOW_S - 10)
            .with(ClaimKey::SUB, "user");

        let err = validations.validate(&claims, NOW_MS).unwrap_err();
        assert_eq!(err.claim(), Some("sub"));
    }

    #[test]
    fn test_validate_skips_absent_claims() {
        let mut validations = Validations::new();
        validations.insert(ClaimKey::AUD, Validator::equals("api"));
        let claims = Claims::new().with(ClaimKey::SUB, "user");
        assert!(validations.validate(&claims, NOW_MS).is_ok());
    }
}
