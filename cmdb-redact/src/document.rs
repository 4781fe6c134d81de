//! Loading CMDB documents through an injected storage collaborator.
//!
//! Documents live under date partitions, one JSON file per category:
//! `<prefix>/<YYYYMMDD>/<category>.json`. Storage access is abstracted behind
//! [`DocumentSource`] so the redaction core never touches a client directly;
//! [`DirectorySource`] and [`MemorySource`] are the two bundled sources.
//!
//! Loading never fails from the caller's point of view: any storage or decode
//! error is turned into the error marker document `{"error": "<message>"}`,
//! which dashboards check before rendering.

use std::{
    collections::BTreeMap,
    fmt, fs, io,
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::redaction::{KeyMap, Redactor, Resolution, resolve_original, rows_for};

/// Default key prefix for policy documents.
pub const DEFAULT_PREFIX: &str = "aws-policies";

/// Key of the error marker document.
pub const ERROR_KEY: &str = "error";

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("object `{0}` not found")]
    NotFound(String),
    #[error("failed to read `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("`{key}` is not a valid JSON document: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Read access to the object store holding CMDB documents.
pub trait DocumentSource {
    /// Returns the raw bytes stored under `key`.
    fn fetch(&self, key: &str) -> Result<Vec<u8>, SourceError>;

    /// Lists the partition names directly below `prefix`.
    fn list_partitions(&self, prefix: &str) -> Result<Vec<String>, SourceError>;
}

impl<S: DocumentSource + ?Sized> DocumentSource for &S {
    fn fetch(&self, key: &str) -> Result<Vec<u8>, SourceError> {
        (**self).fetch(key)
    }

    fn list_partitions(&self, prefix: &str) -> Result<Vec<String>, SourceError> {
        (**self).list_partitions(prefix)
    }
}

/// Documents stored as files below a root directory; keys are relative paths.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DocumentSource for DirectorySource {
    fn fetch(&self, key: &str) -> Result<Vec<u8>, SourceError> {
        fs::read(self.root.join(key)).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => SourceError::NotFound(key.to_string()),
            _ => SourceError::Io {
                key: key.to_string(),
                source,
            },
        })
    }

    fn list_partitions(&self, prefix: &str) -> Result<Vec<String>, SourceError> {
        let io_error = |source| SourceError::Io {
            key: prefix.to_string(),
            source,
        };
        let mut partitions = Vec::new();
        for entry in fs::read_dir(self.root.join(prefix)).map_err(io_error)? {
            let entry = entry.map_err(io_error)?;
            if entry.file_type().map_err(io_error)?.is_dir() {
                partitions.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        partitions.sort();
        Ok(partitions)
    }
}

/// Documents held in memory, keyed like the object store.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    objects: BTreeMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.objects.insert(key.into(), bytes.into());
    }

    pub fn insert_json(&mut self, key: impl Into<String>, document: &Value) {
        self.insert(key, document.to_string());
    }
}

impl DocumentSource for MemorySource {
    fn fetch(&self, key: &str) -> Result<Vec<u8>, SourceError> {
        self.objects
            .get(key)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(key.to_string()))
    }

    fn list_partitions(&self, prefix: &str) -> Result<Vec<String>, SourceError> {
        let base = format!("{}/", prefix.trim_end_matches('/'));
        let mut partitions: Vec<String> = self
            .objects
            .keys()
            .filter_map(|key| key.strip_prefix(&base)?.split_once('/'))
            .map(|(partition, _)| partition.to_string())
            .collect();
        partitions.dedup();
        Ok(partitions)
    }
}

/// The document categories published by the CMDB collector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Identity,
    Storage,
    Compute,
    Database,
    Network,
    Security,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Identity,
        Category::Storage,
        Category::Compute,
        Category::Database,
        Category::Network,
        Category::Security,
    ];

    /// File stem of the category's document.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Identity => "identity_policies",
            Category::Storage => "storage_policies",
            Category::Compute => "compute_policies",
            Category::Database => "database_policies",
            Category::Network => "network_policies",
            Category::Security => "security_policies",
        }
    }

    /// Human-readable label for dashboards.
    pub fn label(self) -> &'static str {
        match self {
            Category::Identity => "IAM & Authentication",
            Category::Storage => "Storage",
            Category::Compute => "Compute",
            Category::Database => "Database",
            Category::Network => "Networking",
            Category::Security => "Security",
        }
    }
}

impl Serialize for Category {
    fn serialize<Ser: serde::Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the object key of a category document.
///
/// ```rust
/// use cmdb_redact::document_key;
///
/// assert_eq!(
///     document_key("aws-policies", "20240115", "identity_policies"),
///     "aws-policies/20240115/identity_policies.json"
/// );
/// ```
pub fn document_key(prefix: &str, date: &str, category: &str) -> String {
    format!("{}/{date}/{category}.json", prefix.trim_end_matches('/'))
}

/// Returns the most recent partition under `prefix`, or `today` if none can be listed.
pub fn latest_partition<S>(source: &S, prefix: &str, today: &str) -> String
where
    S: DocumentSource + ?Sized,
{
    match source.list_partitions(prefix) {
        Ok(partitions) => partitions
            .into_iter()
            .max()
            .unwrap_or_else(|| today.to_string()),
        Err(err) => {
            tracing::warn!(%err, prefix, "listing partitions failed, using today");
            today.to_string()
        }
    }
}

/// Builds the error marker document for `err`.
pub fn error_marker(err: &SourceError) -> Value {
    let mut marker = Map::new();
    marker.insert(ERROR_KEY.to_string(), Value::String(err.to_string()));
    Value::Object(marker)
}

/// Returns the message of an error marker document, if `document` is one.
pub fn error_message(document: &Value) -> Option<&str> {
    document.as_object()?.get(ERROR_KEY)?.as_str()
}

/// Which form of a document to load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Redacted,
    Original,
}

/// A redacted document next to its original, for the exploration view.
#[derive(Clone, Debug, PartialEq)]
pub struct DualView {
    pub redacted: Value,
    pub original: Value,
    pub keys: KeyMap,
}

impl DualView {
    /// The error message if loading failed.
    pub fn error(&self) -> Option<&str> {
        error_message(&self.redacted)
    }

    /// Redacted top-level entries, skipping the error marker key.
    pub fn accounts(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.redacted
            .as_object()
            .into_iter()
            .flatten()
            .filter(|(key, _)| key.as_str() != ERROR_KEY)
            .map(|(key, value)| (key.as_str(), value))
    }

    /// The original key behind a redacted top-level key.
    ///
    /// Uses the recorded key map when it is unambiguous and falls back to the
    /// prefix heuristic otherwise.
    pub fn original_key(&self, redacted_key: &str) -> Option<String> {
        match self.keys.original_of(redacted_key) {
            Resolution::Unique(original) => Some(original.to_string()),
            Resolution::Ambiguous(_) | Resolution::Missing => {
                resolve_original(redacted_key, self.original.as_object()?)
            }
        }
    }

    /// Table rows for `service` of the account behind `redacted_key`.
    ///
    /// Rows are the original records with ARN account fields masked. `None`
    /// means the caller should render the redacted rows instead.
    pub fn table_rows(&self, redacted_key: &str, service: &str) -> Option<Vec<Value>> {
        let account = self.original_key(redacted_key)?;
        rows_for(self.original.as_object()?.get(&account)?, service)
    }
}

/// Fetches, decodes and optionally redacts category documents.
#[derive(Clone, Debug)]
pub struct DocumentLoader<S> {
    source: S,
    prefix: String,
    redactor: Redactor,
}

impl<S: DocumentSource> DocumentLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            prefix: DEFAULT_PREFIX.to_string(),
            redactor: Redactor::default(),
        }
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_redactor(mut self, redactor: Redactor) -> Self {
        self.redactor = redactor;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn redactor(&self) -> &Redactor {
        &self.redactor
    }

    /// The most recent date partition, or `today` when none is listed.
    pub fn latest_date(&self, today: &str) -> String {
        latest_partition(&self.source, &self.prefix, today)
    }

    /// Fetches and decodes a document without redacting it.
    pub fn fetch(&self, category: &str, date: &str) -> Result<Value, SourceError> {
        let key = document_key(&self.prefix, date, category);
        tracing::debug!(%key, "fetching document");
        let bytes = self.source.fetch(&key)?;
        serde_json::from_slice(&bytes).map_err(|source| SourceError::Decode { key, source })
    }

    /// Loads a document in the requested view, or the error marker on failure.
    pub fn load(&self, category: &str, date: &str, view: View) -> Value {
        match self.fetch(category, date) {
            Ok(document) => match view {
                View::Redacted => self.redactor.redact(&document),
                View::Original => document,
            },
            Err(err) => {
                tracing::warn!(%err, category, date, "document load failed");
                error_marker(&err)
            }
        }
    }

    /// Loads a document once and returns both views plus the key map.
    pub fn load_dual(&self, category: &str, date: &str) -> DualView {
        match self.fetch(category, date) {
            Ok(original) => {
                let (redacted, keys) = self.redactor.redact_with_keys(&original);
                DualView {
                    redacted,
                    original,
                    keys,
                }
            }
            Err(err) => {
                tracing::warn!(%err, category, date, "document load failed");
                let marker = error_marker(&err);
                DualView {
                    redacted: marker.clone(),
                    original: marker,
                    keys: KeyMap::default(),
                }
            }
        }
    }
}
