//! Classification of single string values.
//!
//! A [`Classifier`] walks the ordered [`RULES`] table and applies the transform
//! of the first rule whose predicate holds. Rules return `Result`; the
//! classifier converts failures according to the policy's [`ErrorMode`], so
//! [`Classifier::classify`] is total.
//!
//! ```rust
//! use cmdb_redact::classify;
//!
//! assert_eq!(classify("123456789012"), "123*********");
//! assert_eq!(classify("10.0.5.23"), "10.0.*.**");
//! assert_eq!(classify("MyBusinessPolicyName"), "MyBusinessPolicyName");
//! ```

mod patterns;
mod rules;

pub(crate) use patterns::is_account_id;
pub(crate) use rules::{EMAIL_MASK, mask_account, mask_arn};
pub use rules::{ClassifierRule, RULES};

use crate::{
    policy::{ErrorMode, REDACTED_PLACEHOLDER, RedactionPolicy},
    redaction::ClassificationError,
};

/// Result of a successful classification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classified {
    /// Name of the rule that decided the output.
    pub rule: &'static str,
    /// The (possibly masked) value.
    pub value: String,
}

/// How a scalar left the classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ScalarStatus {
    Unchanged,
    Masked,
    /// A rule failed and the policy's error mode decided the output.
    Contained,
}

/// Applies the rule table under a [`RedactionPolicy`].
#[derive(Clone, Debug, Default)]
pub struct Classifier {
    policy: RedactionPolicy,
}

impl Classifier {
    pub fn new(policy: RedactionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RedactionPolicy {
        &self.policy
    }

    /// Classifies `value`, surfacing rule failures instead of applying the error mode.
    pub fn try_classify(&self, value: &str) -> Result<Classified, ClassificationError> {
        match RULES.iter().find(|rule| rule.applies(value, &self.policy)) {
            Some(rule) => rule.apply(value).map(|masked| Classified {
                rule: rule.name(),
                value: masked,
            }),
            None => Ok(Classified {
                rule: "fallback",
                value: value.to_string(),
            }),
        }
    }

    /// Classifies `value`. Never fails: rule errors are resolved by the policy's error mode.
    pub fn classify(&self, value: &str) -> String {
        self.classify_with_status(value).0
    }

    pub(crate) fn classify_with_status(&self, value: &str) -> (String, ScalarStatus) {
        match self.try_classify(value) {
            Ok(classified) if classified.value == value => {
                (classified.value, ScalarStatus::Unchanged)
            }
            Ok(classified) => (classified.value, ScalarStatus::Masked),
            Err(err) => {
                tracing::warn!(
                    rule = err.rule(),
                    mode = ?self.policy.on_error,
                    "classification failed, applying error mode"
                );
                let output = match self.policy.on_error {
                    ErrorMode::FailOpen => value.to_string(),
                    ErrorMode::FailClosed => REDACTED_PLACEHOLDER.to_string(),
                };
                (output, ScalarStatus::Contained)
            }
        }
    }
}

/// Classifies `value` with the default policy.
pub fn classify(value: &str) -> String {
    Classifier::default().classify(value)
}
