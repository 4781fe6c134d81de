//! Shaping redacted documents into language-model context.
//!
//! The prompt assembler narrows a redacted document to the resources that
//! mention services named in the question, then serializes it with a size cap.
//! Only redacted documents should be passed here.

use serde_json::{Map, Value};

/// Default cap, in characters, of the serialized context.
pub const DEFAULT_CONTEXT_CHARS: usize = 30_000;

/// Service names recognized in questions.
pub const SERVICE_KEYWORDS: [&str; 13] = [
    "cloudwatch",
    "s3",
    "ec2",
    "rds",
    "lambda",
    "dynamodb",
    "vpc",
    "iam",
    "kms",
    "sns",
    "sqs",
    "ecs",
    "eks",
];

/// Returns the service keywords mentioned in `prompt`, case-insensitively.
pub fn service_keywords(prompt: &str) -> Vec<&'static str> {
    let lowered = prompt.to_lowercase();
    SERVICE_KEYWORDS
        .into_iter()
        .filter(|keyword| lowered.contains(keyword))
        .collect()
}

fn mentions_any(resource: &Value, keywords: &[&str]) -> bool {
    let text = resource.to_string().to_lowercase();
    keywords.iter().any(|keyword| text.contains(keyword))
}

/// Keeps only resources whose JSON text mentions one of `keywords`.
///
/// Works on `{account: {service: [resource, ..]}}` documents. Services left
/// without resources and accounts left without services are dropped; service
/// values that are not sequences and accounts that are not mappings are kept.
pub fn filter_by_keywords(document: &Value, keywords: &[&str]) -> Value {
    let Value::Object(accounts) = document else {
        return document.clone();
    };

    let mut kept_accounts = Map::new();
    for (account, services) in accounts {
        let Value::Object(services) = services else {
            kept_accounts.insert(account.clone(), services.clone());
            continue;
        };
        let mut kept_services = Map::new();
        for (service, resources) in services {
            match resources {
                Value::Array(items) => {
                    let matching: Vec<Value> = items
                        .iter()
                        .filter(|item| mentions_any(item, keywords))
                        .cloned()
                        .collect();
                    if !matching.is_empty() {
                        kept_services.insert(service.clone(), Value::Array(matching));
                    }
                }
                other => {
                    kept_services.insert(service.clone(), other.clone());
                }
            }
        }
        if !kept_services.is_empty() {
            kept_accounts.insert(account.clone(), Value::Object(kept_services));
        }
    }
    Value::Object(kept_accounts)
}

/// Narrows `document` to the services mentioned in `prompt`.
///
/// Returns the document unchanged when the prompt names no service or when
/// nothing matches.
pub fn narrow_for_prompt(document: &Value, prompt: &str) -> Value {
    let keywords = service_keywords(prompt);
    if keywords.is_empty() {
        return document.clone();
    }
    match filter_by_keywords(document, &keywords) {
        Value::Object(filtered) if filtered.is_empty() => document.clone(),
        filtered => filtered,
    }
}

/// Serializes `document` as pretty JSON, truncated to `max_chars` characters.
pub fn render_context(document: &Value, max_chars: usize) -> String {
    let rendered = serde_json::to_string_pretty(document).unwrap_or_else(|err| {
        tracing::warn!(%err, "pretty serialization failed, using compact form");
        document.to_string()
    });
    match rendered.char_indices().nth(max_chars) {
        Some((end, _)) => rendered[..end].to_string(),
        None => rendered,
    }
}
