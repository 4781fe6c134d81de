//! Rule-ordered redaction of cloud inventory (CMDB) documents.
//!
//! This crate separates:
//! - **Classification**: an ordered table of rules deciding whether a single
//!   string is sensitive and how to mask it.
//! - **Redaction**: a walk over a `serde_json::Value` that classifies every
//!   string, masks account-ID keys and returns a copy with the same shape.
//!
//! Business identifiers such as role and policy names pass through unchanged,
//! so a redacted document can still be analysed.
//!
//! ```rust
//! use cmdb_redact::{redact, resolve_original};
//! use serde_json::json;
//!
//! let original = json!({
//!     "123456789012": {
//!         "iam_roles": [{
//!             "RoleName": "MyBusinessPolicyName",
//!             "Arn": "arn:aws:iam::123456789012:role/MyRole",
//!             "Owner": "user@example.com"
//!         }]
//!     }
//! });
//!
//! let redacted = redact(&original);
//! assert_eq!(redacted, json!({
//!     "123*********": {
//!         "iam_roles": [{
//!             "RoleName": "MyBusinessPolicyName",
//!             "Arn": "arn:aws:iam::123*********:role/MyRole",
//!             "Owner": "***@***.***"
//!         }]
//!     }
//! }));
//!
//! let account = resolve_original("123*********", original.as_object().unwrap());
//! assert_eq!(account.as_deref(), Some("123456789012"));
//! ```
//!
//! What this crate does:
//! - classifies and masks strings (`classifier`)
//! - redacts documents and free text, correlates redacted keys (`redaction`)
//! - loads documents through an injected [`DocumentSource`] (`document`)
//! - provides logging adapters that only emit redacted output (`tracing`, `slog`)
//!
//! What it does not do:
//! - talk to object storage or a language model itself
//! - render anything

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(
    test,
    allow(clippy::non_ascii_literal, clippy::unwrap_used, clippy::mem_forget)
)]

pub mod classifier;
pub mod context;
pub mod document;
pub mod policy;
mod redaction;
#[cfg(feature = "slog")]
pub mod slog;
pub mod summary;
pub mod tracing;

pub use classifier::{Classified, Classifier, ClassifierRule, RULES, classify};
pub use document::{
    Category, DirectorySource, DocumentLoader, DocumentSource, DualView, MemorySource,
    SourceError, View, document_key, error_message,
};
pub use policy::{ErrorMode, REDACTED_PLACEHOLDER, RedactionPolicy, TextRedactionPolicy};
pub use redaction::{
    ClassificationError, CorrelationKey, KeyMap, RedactedJson, RedactedJsonExt, RedactedOutput,
    RedactionReport, Redactor, Resolution, TextRedaction, TextReport, ToRedactedOutput,
    correlate, mask_arn_accounts, redact, redact_text, redact_text_report, resolve_original,
    table_rows,
};
