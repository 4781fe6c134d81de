//! Per-category overviews and text search, for the summary dashboard and the
//! model-facing tools.
//!
//! Everything here works on the redacted view of each document.

use serde::{Serialize, Serializer, ser::SerializeMap};
use serde_json::Value;

use crate::document::{Category, DocumentLoader, DocumentSource, View, error_message};

/// Overview of one category document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub category: Category,
    pub label: &'static str,
    /// Top-level keys, i.e. accounts.
    pub accounts: usize,
    pub resources: usize,
    /// Length in bytes of the compact JSON form.
    pub data_size: usize,
}

/// A category document whose JSON text contains the search query.
///
/// Serializes as `{"<category>": <document>}`.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchHit {
    pub category: Category,
    pub document: Value,
}

impl Serialize for SearchHit {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.category.as_str(), &self.document)?;
        map.end()
    }
}

/// Counts resources in a document shaped `{account: {service: [resource, ..]}}`.
///
/// Services whose value is not a sequence, accounts that are not mappings and
/// error marker documents contribute nothing.
pub fn count_resources(document: &Value) -> usize {
    if error_message(document).is_some() {
        return 0;
    }
    document
        .as_object()
        .into_iter()
        .flat_map(|accounts| accounts.values())
        .filter_map(Value::as_object)
        .flat_map(|services| services.values())
        .filter_map(Value::as_array)
        .map(Vec::len)
        .sum()
}

/// Number of top-level keys; zero for error markers and non-mappings.
pub fn count_accounts(document: &Value) -> usize {
    if error_message(document).is_some() {
        return 0;
    }
    document.as_object().map_or(0, serde_json::Map::len)
}

fn load_redacted<S: DocumentSource>(
    loader: &DocumentLoader<S>,
    category: Category,
    date: &str,
) -> Option<Value> {
    let document = loader.load(category.as_str(), date, View::Redacted);
    if let Some(error) = error_message(&document) {
        tracing::debug!(%category, error, "skipping category");
        return None;
    }
    Some(document)
}

/// Loads every known category for `date` and summarizes it.
///
/// Categories that fail to load are left out.
pub fn summarize<S: DocumentSource>(loader: &DocumentLoader<S>, date: &str) -> Vec<CategorySummary> {
    Category::ALL
        .into_iter()
        .filter_map(|category| {
            let document = load_redacted(loader, category, date)?;
            Some(CategorySummary {
                category,
                label: category.label(),
                accounts: count_accounts(&document),
                resources: count_resources(&document),
                data_size: document.to_string().len(),
            })
        })
        .collect()
}

/// Returns the redacted documents whose JSON text contains `query`, ignoring case.
///
/// Searches every category, or only `category` when given. Categories that
/// fail to load never match.
pub fn search<S: DocumentSource>(
    loader: &DocumentLoader<S>,
    query: &str,
    category: Option<Category>,
    date: &str,
) -> Vec<SearchHit> {
    let needle = query.to_lowercase();
    let categories = match category {
        Some(category) => vec![category],
        None => Category::ALL.to_vec(),
    };
    let hits: Vec<SearchHit> = categories
        .into_iter()
        .filter_map(|category| {
            let document = load_redacted(loader, category, date)?;
            document
                .to_string()
                .to_lowercase()
                .contains(&needle)
                .then_some(SearchHit { category, document })
        })
        .collect();
    tracing::debug!(hits = hits.len(), "searched categories");
    hits
}
