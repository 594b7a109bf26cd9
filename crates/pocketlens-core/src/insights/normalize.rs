//! Normalization of AI insights payloads
//!
//! The AI endpoint is loosely contracted, so its body is read as untyped JSON
//! and mapped field by field onto [`InsightsResponse`]. Field priority:
//!
//! - currency: `base_currency`, then `currency`, then [`DEFAULT_CURRENCY`]
//! - item list: `items`, then `insights`, then empty
//! - item title: `title`, then `"Insight"`
//! - item detail: `detail`, then `text`, then the item rendered as text
//! - item level: `level` when it names a known level, else unset
//!
//! A field holding JSON `null` counts as absent. Shapes that cannot be read
//! as a list of items are errors, which the caller treats as "AI unavailable".

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::models::Month;

use super::types::{InsightItem, InsightsMode, InsightsResponse, DEFAULT_CURRENCY};

/// Title used when an AI item has none
pub const DEFAULT_TITLE: &str = "Insight";

/// Map a raw AI payload onto the canonical response
pub fn normalize_ai_payload(month: Month, payload: &Value) -> Result<InsightsResponse> {
    let obj = payload
        .as_object()
        .ok_or_else(|| Error::InvalidData(format!("AI payload is not an object: {}", kind(payload))))?;

    let base_currency = first_present(obj, &["base_currency", "currency"])
        .map(as_text)
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

    let items = match first_present(obj, &["items", "insights"]) {
        None => Vec::new(),
        Some(Value::Array(raw)) => raw.iter().map(normalize_item).collect::<Result<_>>()?,
        Some(other) => {
            return Err(Error::InvalidData(format!(
                "AI insight list is not an array: {}",
                kind(other)
            )))
        }
    };

    Ok(InsightsResponse {
        month,
        base_currency,
        mode: InsightsMode::Ai,
        items,
    })
}

fn normalize_item(raw: &Value) -> Result<InsightItem> {
    match raw {
        Value::Null => Err(Error::InvalidData("AI insight item is null".into())),
        Value::Object(obj) => {
            let title = first_present(obj, &["title"])
                .map(as_text)
                .unwrap_or_else(|| DEFAULT_TITLE.to_string());
            let detail = first_present(obj, &["detail", "text"])
                .map(as_text)
                .unwrap_or_else(|| as_text(raw));
            let level = obj.get("level").and_then(Value::as_str).and_then(|s| {
                s.parse().ok().or_else(|| {
                    tracing::debug!(level = s, "Ignoring unknown AI insight level");
                    None
                })
            });
            Ok(InsightItem {
                title,
                detail,
                level,
            })
        }
        // Bare strings/numbers become the detail of an untitled item
        other => Ok(InsightItem {
            title: DEFAULT_TITLE.to_string(),
            detail: as_text(other),
            level: None,
        }),
    }
}

fn first_present<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null())
}

/// Strings as-is, everything else as compact JSON
fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
