//! The ordered rule table.
//!
//! Order is load-bearing: the first rule whose predicate holds decides the
//! output, and later rules assume the shapes handled above them are gone.

use super::patterns::{
    ACCESS_KEY_PREFIX, ARN_PREFIX, DOTTED_QUAD, EMAIL, INTERNAL_DOMAIN, KMS_ARN_PREFIX, PORT,
    PRIVATE_RANGE, RESOURCE_ID, SECRET_KEY, TOKEN_ALPHABET, has_connection_keyword,
    is_account_id, looks_sensitive,
};
use crate::{
    policy::{RedactionPolicy, TextRedactionPolicy},
    redaction::ClassificationError,
};

pub(crate) const EMAIL_MASK: &str = "***@***.***";

type Predicate = fn(&str, &RedactionPolicy) -> bool;
type Transform = fn(&str) -> Result<String, ClassificationError>;

/// One entry of the classifier table: a pure predicate and the transform it selects.
#[derive(Clone, Copy)]
pub struct ClassifierRule {
    name: &'static str,
    predicate: Predicate,
    transform: Transform,
}

impl ClassifierRule {
    const fn new(name: &'static str, predicate: Predicate, transform: Transform) -> Self {
        Self {
            name,
            predicate,
            transform,
        }
    }

    /// Stable identifier of the rule, used in logs and errors.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Reports whether this rule claims `value` under `policy`.
    pub fn applies(&self, value: &str, policy: &RedactionPolicy) -> bool {
        (self.predicate)(value, policy)
    }

    /// Runs the transform without checking the predicate.
    pub fn apply(&self, value: &str) -> Result<String, ClassificationError> {
        (self.transform)(value)
    }
}

impl std::fmt::Debug for ClassifierRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ClassifierRule").field(&self.name).finish()
    }
}

/// The classifier table in evaluation order.
pub static RULES: [ClassifierRule; 15] = [
    ClassifierRule::new("passthrough", is_business_identifier, unchanged),
    ClassifierRule::new("account_id", account_id, mask_account_id),
    ClassifierRule::new("access_key_id", access_key_id, mask_access_key_id),
    ClassifierRule::new("secret_key", secret_key, mask_token),
    ClassifierRule::new("long_token", long_token, mask_token),
    ClassifierRule::new("private_ipv4", private_ipv4, mask_private_ipv4),
    ClassifierRule::new("public_ipv4", public_ipv4, mask_public_ipv4),
    ClassifierRule::new("port", port, mask_port),
    ClassifierRule::new("kms_key_arn", kms_key_arn, unchanged),
    ClassifierRule::new("internal_domain", internal_domain, mask_internal_domain),
    ClassifierRule::new("email", email, mask_email),
    ClassifierRule::new("arn", arn, mask_arn_account),
    ClassifierRule::new("resource_id", resource_id, mask_resource_id),
    ClassifierRule::new("connection_string", connection_string, mask_fully),
    ClassifierRule::new("fallback", always, unchanged),
];

// -----------------------------------------------------------------------------
// Predicates
// -----------------------------------------------------------------------------

fn is_business_identifier(value: &str, policy: &RedactionPolicy) -> bool {
    value.chars().count() < policy.passthrough_max_len && !looks_sensitive(value)
}

fn account_id(value: &str, _: &RedactionPolicy) -> bool {
    is_account_id(value)
}

fn access_key_id(value: &str, _: &RedactionPolicy) -> bool {
    value.starts_with(ACCESS_KEY_PREFIX) && value.chars().count() == 20
}

fn secret_key(value: &str, _: &RedactionPolicy) -> bool {
    SECRET_KEY.is_match(value)
}

// Credential fragments such as `pwd=...` share the token alphabet; they are
// left to the connection-string rule so the mask stays stable on re-redaction.
fn long_token(value: &str, _: &RedactionPolicy) -> bool {
    value.chars().count() > 20 && TOKEN_ALPHABET.is_match(value) && !has_connection_keyword(value)
}

fn private_ipv4(value: &str, _: &RedactionPolicy) -> bool {
    DOTTED_QUAD.is_match(value) && PRIVATE_RANGE.is_match(value)
}

fn public_ipv4(value: &str, _: &RedactionPolicy) -> bool {
    DOTTED_QUAD.is_match(value)
}

// Out-of-range ASCII numbers fall through; anything unparseable is left to the
// transform so the failure is reported.
fn port(value: &str, _: &RedactionPolicy) -> bool {
    PORT.is_match(value)
        && value
            .parse::<u32>()
            .map_or(true, |number| (1024..=65535).contains(&number))
}

fn kms_key_arn(value: &str, _: &RedactionPolicy) -> bool {
    value.starts_with(KMS_ARN_PREFIX) && value.contains("key/")
}

fn internal_domain(value: &str, _: &RedactionPolicy) -> bool {
    INTERNAL_DOMAIN.is_match(value)
}

fn email(value: &str, _: &RedactionPolicy) -> bool {
    EMAIL.is_match(value)
}

fn arn(value: &str, _: &RedactionPolicy) -> bool {
    value.starts_with(ARN_PREFIX)
}

fn resource_id(value: &str, _: &RedactionPolicy) -> bool {
    RESOURCE_ID.is_match(value)
}

fn connection_string(value: &str, _: &RedactionPolicy) -> bool {
    has_connection_keyword(value)
}

fn always(_: &str, _: &RedactionPolicy) -> bool {
    true
}

// -----------------------------------------------------------------------------
// Transforms
// -----------------------------------------------------------------------------

#[allow(clippy::unnecessary_wraps)]
fn unchanged(value: &str) -> Result<String, ClassificationError> {
    Ok(value.to_string())
}

#[allow(clippy::unnecessary_wraps)]
fn mask_fully(value: &str) -> Result<String, ClassificationError> {
    Ok(TextRedactionPolicy::default_full().apply_to(value))
}

/// Masks a 12-digit account ID down to its first three digits.
pub(crate) fn mask_account(value: &str) -> String {
    TextRedactionPolicy::keep_first(3).apply_to(value)
}

#[allow(clippy::unnecessary_wraps)]
fn mask_account_id(value: &str) -> Result<String, ClassificationError> {
    Ok(mask_account(value))
}

#[allow(clippy::unnecessary_wraps)]
fn mask_access_key_id(value: &str) -> Result<String, ClassificationError> {
    Ok(TextRedactionPolicy::keep_first(8).apply_to(value))
}

#[allow(clippy::unnecessary_wraps)]
fn mask_token(value: &str) -> Result<String, ClassificationError> {
    Ok(TextRedactionPolicy::keep_first(4).apply_to(value))
}

fn octets<'a>(
    value: &'a str,
    rule: &'static str,
) -> Result<(&'a str, &'a str), ClassificationError> {
    let mut parts = value.split('.');
    match (parts.next(), parts.next()) {
        (Some(first), Some(second)) => Ok((first, second)),
        _ => Err(ClassificationError::Malformed { rule }),
    }
}

fn mask_private_ipv4(value: &str) -> Result<String, ClassificationError> {
    let (first, second) = octets(value, "private_ipv4")?;
    Ok(format!("{first}.{second}.*.**"))
}

fn mask_public_ipv4(value: &str) -> Result<String, ClassificationError> {
    let (first, _) = octets(value, "public_ipv4")?;
    Ok(format!("{first}.*.*.**"))
}

fn mask_port(value: &str) -> Result<String, ClassificationError> {
    value
        .parse::<u16>()
        .map_err(|_| ClassificationError::Unparseable {
            rule: "port",
            expected: "a port number",
        })?;
    mask_fully(value)
}

fn mask_internal_domain(value: &str) -> Result<String, ClassificationError> {
    let last = value
        .rsplit('.')
        .next()
        .ok_or(ClassificationError::Malformed {
            rule: "internal_domain",
        })?;
    Ok(format!("***.{last}"))
}

#[allow(clippy::unnecessary_wraps)]
fn mask_email(value: &str) -> Result<String, ClassificationError> {
    Ok(TextRedactionPolicy::full_with(EMAIL_MASK).apply_to(value))
}

/// Masks the account field of an ARN, leaving every other field untouched.
pub(crate) fn mask_arn(value: &str) -> String {
    let mut parts: Vec<String> = value.split(':').map(str::to_string).collect();
    if !parts.get(4).is_some_and(|account| is_account_id(account)) {
        return value.to_string();
    }
    parts[4] = mask_account(&parts[4]);
    parts.join(":")
}

#[allow(clippy::unnecessary_wraps)]
fn mask_arn_account(value: &str) -> Result<String, ClassificationError> {
    Ok(mask_arn(value))
}

fn mask_resource_id(value: &str) -> Result<String, ClassificationError> {
    let captures = RESOURCE_ID
        .captures(value)
        .ok_or(ClassificationError::Malformed {
            rule: "resource_id",
        })?;
    let (kind, suffix) = match (captures.get(1), captures.get(2)) {
        (Some(kind), Some(suffix)) => (kind.as_str(), suffix.as_str()),
        _ => {
            return Err(ClassificationError::Malformed {
                rule: "resource_id",
            });
        }
    };

    if suffix.chars().count() > 3 {
        let kept: String = suffix.chars().take(3).collect();
        Ok(format!("{kind}-{kept}***"))
    } else {
        Ok(format!("{kind}-***"))
    }
}
