//! Re-associating redacted keys with their originals.
//!
//! The exploration view renders a redacted JSON tree next to a table of the
//! untouched data. Two ways of getting from a redacted top-level key back to
//! the original one are provided:
//!
//! - [`resolve_original`]: a heuristic that compares the first three characters
//!   of the redacted key with each original key. First match wins.
//! - [`KeyMap`]: an explicit map recorded while redacting (see
//!   [`crate::Redactor::redact_with_keys`]), which reports ambiguity instead of
//!   guessing.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::classifier::mask_arn;

const PREFIX_LEN: usize = 3;

/// A redacted key prefix paired with the original key it was matched to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorrelationKey {
    pub redacted_prefix: String,
    pub original: String,
}

fn prefix(key: &str) -> &str {
    match key.char_indices().nth(PREFIX_LEN) {
        Some((end, _)) => &key[..end],
        None => key,
    }
}

/// Finds the original key whose first three characters match those of `redacted_key`.
///
/// Scans `original` once in iteration order and returns the first match.
pub fn correlate(redacted_key: &str, original: &Map<String, Value>) -> Option<CorrelationKey> {
    let wanted = prefix(redacted_key);
    original
        .keys()
        .find(|candidate| prefix(candidate) == wanted)
        .map(|candidate| CorrelationKey {
            redacted_prefix: wanted.to_string(),
            original: candidate.clone(),
        })
}

/// Returns the original key for `redacted_key`, or `None` when nothing matches.
///
/// ```rust
/// use cmdb_redact::resolve_original;
/// use serde_json::json;
///
/// let original = json!({"123456789012": {"iam": []}});
/// let key = resolve_original("123*********", original.as_object().unwrap());
/// assert_eq!(key.as_deref(), Some("123456789012"));
/// ```
pub fn resolve_original(redacted_key: &str, original: &Map<String, Value>) -> Option<String> {
    correlate(redacted_key, original).map(|key| key.original)
}

/// Outcome of looking up a redacted key in a [`KeyMap`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution<'a> {
    Unique(&'a str),
    /// Several original keys redact to the same string.
    Ambiguous(&'a [String]),
    Missing,
}

/// Redacted top-level key to original key(s), recorded during redaction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyMap {
    entries: BTreeMap<String, Vec<String>>,
}

impl KeyMap {
    pub(crate) fn record(&mut self, redacted: String, original: String) {
        self.entries.entry(redacted).or_default().push(original);
    }

    pub fn original_of(&self, redacted: &str) -> Resolution<'_> {
        match self.entries.get(redacted).map(Vec::as_slice) {
            Some([single]) => Resolution::Unique(single),
            Some([]) | None => Resolution::Missing,
            Some(several) => Resolution::Ambiguous(several),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(redacted, originals)` pairs in redacted-key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(redacted, originals)| (redacted.as_str(), originals.as_slice()))
    }
}

/// Masks only the account field of ARN-valued entries of a table row.
///
/// Rows that are not mappings are returned unchanged.
pub fn mask_arn_accounts(row: &Value) -> Value {
    let Value::Object(fields) = row else {
        return row.clone();
    };
    let masked = fields
        .iter()
        .map(|(name, value)| {
            let value = match value {
                Value::String(text) if text.starts_with("arn:aws:") => {
                    Value::String(mask_arn(text))
                }
                other => other.clone(),
            };
            (name.clone(), value)
        })
        .collect();
    Value::Object(masked)
}

/// Builds table rows for `service` under the account matching `redacted_key`.
///
/// Rows come from the unredacted document with only ARN account fields
/// masked. Returns `None` when the account cannot be resolved or the service
/// is not a sequence, so callers can fall back to the redacted rows.
pub fn table_rows(redacted_key: &str, service: &str, original: &Value) -> Option<Vec<Value>> {
    let accounts = original.as_object()?;
    let account = resolve_original(redacted_key, accounts)?;
    rows_for(accounts.get(&account)?, service)
}

pub(crate) fn rows_for(account: &Value, service: &str) -> Option<Vec<Value>> {
    let rows = account.as_object()?.get(service)?.as_array()?;
    Some(rows.iter().map(mask_arn_accounts).collect())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn first_match_wins_on_shared_prefix() {
        let original = json!({"123000000001": 1, "123000000002": 2});
        let key = correlate("123*********", original.as_object().unwrap()).unwrap();
        assert_eq!(key.redacted_prefix, "123");
        assert_eq!(key.original, "123000000001");
    }

    #[test]
    fn miss_returns_none() {
        let original = json!({"999000000001": 1});
        assert_eq!(
            resolve_original("123*********", original.as_object().unwrap()),
            None
        );
    }

    #[test]
    fn prefix_counts_characters() {
        assert_eq!(prefix("ñandú"), "ñan");
        assert_eq!(prefix("ab"), "ab");
    }

    #[test]
    fn key_map_reports_ambiguity() {
        let mut keys = KeyMap::default();
        keys.record("123*********".into(), "123000000001".into());
        keys.record("123*********".into(), "123000000002".into());
        keys.record("iam".into(), "iam".into());

        assert_eq!(keys.original_of("iam"), Resolution::Unique("iam"));
        assert!(matches!(
            keys.original_of("123*********"),
            Resolution::Ambiguous(originals) if originals.len() == 2
        ));
        assert_eq!(keys.original_of("456*********"), Resolution::Missing);
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn only_arn_accounts_are_masked_in_rows() {
        let row = json!({
            "RoleName": "Admin",
            "Arn": "arn:aws:iam::123456789012:role/Admin",
            "Owner": "ops@example.com"
        });
        assert_eq!(
            mask_arn_accounts(&row),
            json!({
                "RoleName": "Admin",
                "Arn": "arn:aws:iam::123*********:role/Admin",
                "Owner": "ops@example.com"
            })
        );
    }

    #[test]
    fn table_rows_fall_back_to_none_for_non_sequences() {
        let original = json!({"123456789012": {"iam": {"not": "a list"}}});
        assert_eq!(table_rows("123*********", "iam", &original), None);
        assert_eq!(table_rows("123*********", "s3", &original), None);
    }
}
