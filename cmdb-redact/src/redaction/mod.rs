//! Redaction traversal and entrypoints.
//!
//! - **`engine`**: [`Redactor`], the tree walk over `serde_json::Value`
//! - **`correlation`**: mapping redacted keys back to original keys
//! - **`free_text`**: substitution-based masking of unstructured text
//! - **`output`**: Output types for logging boundaries (`RedactedJson`, `RedactedOutput`)
//! - **`error`**: [`ClassificationError`]
//!
//! Rule evaluation lives in `crate::classifier`; masking primitives and
//! configuration live in `crate::policy`.

mod correlation;
mod engine;
mod error;
mod free_text;
mod output;

pub use correlation::{
    CorrelationKey, KeyMap, Resolution, correlate, mask_arn_accounts, resolve_original,
    table_rows,
};
pub(crate) use correlation::rows_for;
pub use engine::{RedactionReport, Redactor, redact};
pub use error::ClassificationError;
pub use free_text::{TextRedaction, TextReport, redact_text, redact_text_report};
pub use output::{RedactedJson, RedactedJsonExt, RedactedOutput, ToRedactedOutput};
