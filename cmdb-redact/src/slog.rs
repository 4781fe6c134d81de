//! Adapters for emitting redacted values through `slog`.
//!
//! This module connects the redactor with `slog` by providing `slog::Value`
//! implementations that serialize redacted documents as structured JSON via
//! `slog`'s nested-value support.
//!
//! It is responsible for:
//! - Ensuring the logged representation is derived from the redactor, not from
//!   the original document.
//! - Avoiding fallible logging APIs: nothing here returns a redaction error.
//!
//! It does not configure `slog` or choose a redaction policy other than the default.

use serde_json::Value as JsonValue;
use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

pub use crate::redaction::RedactedJson;
use crate::redaction::{RedactedJsonExt, RedactedOutput};

/// Marker trait for types whose `slog` integration always emits redacted output.
///
/// ```compile_fail
/// use cmdb_redact::slog::SlogRedacted;
///
/// fn assert_slog_redacted<T: SlogRedacted>() {}
///
/// assert_slog_redacted::<String>();
/// ```
pub trait SlogRedacted: SlogValue {}

impl<T: SlogRedacted + ?Sized> SlogRedacted for &T {}

impl SlogValue for RedactedJson {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.value().clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

impl SlogRedacted for RedactedJson {}

impl SlogValue for RedactedOutput {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        match self {
            RedactedOutput::Text(text) => serializer.emit_str(key, text),
            RedactedOutput::Json(json) => {
                let nested = slog::Serde(json.clone());
                SlogValue::serialize(&nested, record, key, serializer)
            }
        }
    }
}

impl SlogRedacted for RedactedOutput {}

/// Extension trait for ergonomic slog logging of redacted documents.
///
/// ## Example
/// ```ignore
/// use cmdb_redact::slog::SlogRedactedExt;
///
/// info!(logger, "loaded"; "document" => document.slog_redacted_json());
/// ```
pub trait SlogRedactedExt {
    /// Redacts `self` and returns a `slog::Value` that serializes as structured JSON.
    fn slog_redacted_json(&self) -> RedactedJson;
}

impl SlogRedactedExt for JsonValue {
    fn slog_redacted_json(&self) -> RedactedJson {
        self.redacted_json()
    }
}
