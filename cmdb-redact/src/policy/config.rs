//! Runtime configuration for the redaction engine.
//!
//! [`RedactionPolicy`] controls the parts of redaction that are a deployment
//! decision rather than a property of the data: whether account-ID keys are
//! masked, how long a string may be and still pass as a business identifier,
//! and what happens when a rule cannot evaluate a value.

use serde::{Deserialize, Serialize};

/// Default upper bound (exclusive, in Unicode scalar values) for passthrough strings.
pub const DEFAULT_PASSTHROUGH_MAX_LEN: usize = 100;

/// What the engine does with a scalar whose classification failed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorMode {
    /// Keep the original value. Display never breaks, but the value is not masked.
    #[default]
    FailOpen,
    /// Replace the value with the full placeholder.
    FailClosed,
}

/// Configuration consumed by [`crate::Redactor`] and [`crate::Classifier`].
///
/// Every field has a default, so a partial JSON document is a valid policy:
///
/// ```rust
/// use cmdb_redact::{ErrorMode, RedactionPolicy};
///
/// let policy = RedactionPolicy::from_json(r#"{"on_error": "fail_closed"}"#).unwrap();
/// assert_eq!(policy.on_error, ErrorMode::FailClosed);
/// assert!(policy.redact_account_keys);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RedactionPolicy {
    /// Mask mapping keys that are 12-digit account IDs.
    pub redact_account_keys: bool,
    /// Strings shorter than this that do not look sensitive are passed through.
    pub passthrough_max_len: usize,
    /// Handling of scalars whose classification failed.
    pub on_error: ErrorMode,
}

impl Default for RedactionPolicy {
    fn default() -> Self {
        Self {
            redact_account_keys: true,
            passthrough_max_len: DEFAULT_PASSTHROUGH_MAX_LEN,
            on_error: ErrorMode::FailOpen,
        }
    }
}

impl RedactionPolicy {
    /// Parses a policy from a JSON document. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    #[must_use]
    pub fn with_account_keys(mut self, redact_account_keys: bool) -> Self {
        self.redact_account_keys = redact_account_keys;
        self
    }

    #[must_use]
    pub fn with_passthrough_max_len(mut self, passthrough_max_len: usize) -> Self {
        self.passthrough_max_len = passthrough_max_len;
        self
    }

    #[must_use]
    pub fn with_error_mode(mut self, on_error: ErrorMode) -> Self {
        self.on_error = on_error;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let policy = RedactionPolicy::from_json("{}").unwrap();
        assert_eq!(policy, RedactionPolicy::default());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(RedactionPolicy::from_json(r#"{"mask_everything": true}"#).is_err());
    }

    #[test]
    fn builders_override_fields() {
        let policy = RedactionPolicy::default()
            .with_account_keys(false)
            .with_passthrough_max_len(64)
            .with_error_mode(ErrorMode::FailClosed);
        assert!(!policy.redact_account_keys);
        assert_eq!(policy.passthrough_max_len, 64);
        assert_eq!(policy.on_error, ErrorMode::FailClosed);
    }
}
