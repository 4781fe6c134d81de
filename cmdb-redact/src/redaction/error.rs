//! Errors raised inside the redaction core.
//!
//! None of these reach callers of [`crate::Redactor::redact`]: they are
//! resolved per scalar by the policy's error mode. They are public so that
//! [`crate::Classifier::try_classify`] can report them.

/// A rule matched a value but could not compute its masked form.
///
/// The offending value is never stored in the error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ClassificationError {
    #[error("rule `{rule}` expected {expected}")]
    Unparseable {
        rule: &'static str,
        expected: &'static str,
    },
    #[error("rule `{rule}` matched a value without the expected structure")]
    Malformed { rule: &'static str },
}

impl ClassificationError {
    /// Name of the rule that failed.
    pub fn rule(&self) -> &'static str {
        match self {
            ClassificationError::Unparseable { rule, .. }
            | ClassificationError::Malformed { rule } => rule,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ClassificationError;

    #[test]
    fn messages_name_the_rule() {
        let err = ClassificationError::Unparseable {
            rule: "port",
            expected: "a port number",
        };
        assert_eq!(err.to_string(), "rule `port` expected a port number");
        assert_eq!(err.rule(), "port");
    }
}
