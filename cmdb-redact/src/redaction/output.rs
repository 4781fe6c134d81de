//! Output types for logging boundaries.
//!
//! This module provides types for producing logging-safe output:
//!
//! - [`RedactedJson`]: A JSON document that has been through the redactor
//! - [`RedactedOutput`]: The output enum (Text or Json)
//! - [`ToRedactedOutput`]: Trait for values that can produce redacted output

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::{engine::redact, free_text::redact_text};

// =============================================================================
// RedactedJson - a document known to be redacted
// =============================================================================

/// A JSON document produced by the redactor.
///
/// There is no public constructor from a raw [`Value`]: the only way to obtain
/// one is through [`crate::Redactor::redact_json`] or the logging extension
/// traits, so holding a `RedactedJson` means the content was redacted.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RedactedJson(Value);

impl RedactedJson {
    pub(crate) fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl fmt::Display for RedactedJson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// =============================================================================
// RedactedOutput - Output produced at logging boundaries
// =============================================================================

/// Output produced at a logging boundary.
#[derive(Clone, Debug, PartialEq)]
pub enum RedactedOutput {
    Text(String),
    Json(Value),
}

impl fmt::Display for RedactedOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedactedOutput::Text(text) => f.write_str(text),
            RedactedOutput::Json(json) => fmt::Display::fmt(json, f),
        }
    }
}

// =============================================================================
// ToRedactedOutput - Trait for producing logging-safe output
// =============================================================================

/// Produces a logging-safe output representation using the default policy.
pub trait ToRedactedOutput {
    #[must_use]
    fn to_redacted_output(&self) -> RedactedOutput;
}

impl ToRedactedOutput for RedactedOutput {
    fn to_redacted_output(&self) -> RedactedOutput {
        self.clone()
    }
}

impl ToRedactedOutput for RedactedJson {
    fn to_redacted_output(&self) -> RedactedOutput {
        RedactedOutput::Json(self.0.clone())
    }
}

impl ToRedactedOutput for Value {
    fn to_redacted_output(&self) -> RedactedOutput {
        RedactedOutput::Json(redact(self))
    }
}

impl ToRedactedOutput for str {
    fn to_redacted_output(&self) -> RedactedOutput {
        RedactedOutput::Text(redact_text(self))
    }
}

impl ToRedactedOutput for String {
    fn to_redacted_output(&self) -> RedactedOutput {
        self.as_str().to_redacted_output()
    }
}

/// Extension trait to redact a document into a [`RedactedJson`].
pub trait RedactedJsonExt {
    fn redacted_json(&self) -> RedactedJson;
}

impl RedactedJsonExt for Value {
    fn redacted_json(&self) -> RedactedJson {
        RedactedJson::new(redact(self))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn documents_become_redacted_json() {
        let output = json!({"owner": "ops@example.com"}).to_redacted_output();
        assert_eq!(output, RedactedOutput::Json(json!({"owner": "***@***.***"})));
    }

    #[test]
    fn text_goes_through_free_text_masking() {
        let output = "caller 123456789012".to_redacted_output();
        assert_eq!(output.to_string(), "caller 123*********");
    }

    #[test]
    fn redacted_json_displays_compactly() {
        let redacted = json!({"ip": "10.0.5.23"}).redacted_json();
        assert_eq!(redacted.to_string(), r#"{"ip":"10.0.*.**"}"#);
    }
}
