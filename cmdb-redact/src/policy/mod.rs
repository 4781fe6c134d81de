//! Redaction policy: masking primitives and engine configuration.
//!
//! This module provides:
//!
//! - **Text policies** (`text`): The [`TextRedactionPolicy`] enum and [`KeepConfig`]
//!   used by classifier rules to mask a string.
//!
//! - **Configuration** (`config`): [`RedactionPolicy`] and [`ErrorMode`], the
//!   deployment knobs of the engine.
//!
//! # Example
//!
//! ```rust
//! use cmdb_redact::{RedactionPolicy, TextRedactionPolicy};
//!
//! let policy = TextRedactionPolicy::keep_first(4);
//! assert_eq!(policy.apply_to("wJalrXUtnFEMIK7MDENG"), "wJal****************");
//!
//! let config = RedactionPolicy::default().with_account_keys(false);
//! assert!(!config.redact_account_keys);
//! ```

pub mod config;
pub mod text;

pub use config::{DEFAULT_PASSTHROUGH_MAX_LEN, ErrorMode, RedactionPolicy};
pub use text::{KeepConfig, REDACTED_PLACEHOLDER, TextRedactionPolicy};
