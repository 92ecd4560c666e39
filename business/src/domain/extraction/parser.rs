use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};

use super::model::{ExtractionResult, Item, PriceMention, Risk};
use super::services::RawGeneration;

/// Raw text kept in the diagnostic note when decoding fails.
const RAW_TEXT_NOTE_CHARS: usize = 2000;

/// Turns a provider payload into an [`ExtractionResult`]. Never fails.
pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(raw: &RawGeneration) -> ExtractionResult {
        let text = Self::candidate_text(&raw.0);
        Self::parse_text(&text)
    }

    /// Decodes the model text, or builds the diagnostic result when it is not
    /// a JSON object.
    pub fn parse_text(text: &str) -> ExtractionResult {
        let json_text = strip_code_fence(text);

        match serde_json::from_str::<Value>(json_text) {
            Ok(Value::Object(object)) => coerce_result(&object),
            _ => ExtractionResult {
                generated_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)),
                items: vec![],
                top_opportunities: vec![],
                notes: vec![
                    ExtractionResult::PARSE_FAILURE_NOTE.to_string(),
                    text.chars().take(RAW_TEXT_NOTE_CHARS).collect(),
                ],
            },
        }
    }

    /// Text of the first candidate, or empty when any level is missing.
    ///
    /// Path: `candidates[0].content.parts[*].text`, parts concatenated.
    pub fn candidate_text(payload: &Value) -> String {
        let parts = payload
            .get("candidates")
            .and_then(|c| c.as_array())
            .and_then(|candidates| candidates.first())
            .and_then(|candidate| candidate.get("content"))
            .and_then(|content| content.get("parts"))
            .and_then(|p| p.as_array());

        match parts {
            Some(parts) => parts
                .iter()
                .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
                .collect(),
            None => String::new(),
        }
    }
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn coerce_result(object: &Map<String, Value>) -> ExtractionResult {
    let items = object
        .get("items")
        .and_then(|i| i.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|item| item.as_object().map(coerce_item))
                .collect()
        })
        .unwrap_or_default();

    ExtractionResult {
        generated_at: object
            .get("generated_at")
            .and_then(|g| g.as_str())
            .map(|g| g.to_string()),
        items,
        top_opportunities: string_list(object.get("top_opportunities")),
        notes: string_list(object.get("notes")),
    }
}

fn coerce_item(item: &Map<String, Value>) -> Item {
    let price_mentions = item
        .get("price_mentions")
        .and_then(|p| p.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|mention| mention.as_object().map(coerce_price_mention))
                .collect()
        })
        .unwrap_or_default();

    let risk = item
        .get("risk")
        .and_then(|r| r.as_str())
        .and_then(|r| r.trim().to_lowercase().parse::<Risk>().ok())
        .unwrap_or(Risk::Medium);

    Item {
        product: string_field(item.get("product")),
        category: string_field(item.get("category")),
        why_trending: string_field(item.get("why_trending")),
        signals: string_list(item.get("signals")),
        price_mentions,
        keywords: string_list(item.get("keywords")),
        risk,
        differentiation: string_list(item.get("differentiation")),
        mvp_steps: string_list(item.get("mvp_steps")),
    }
}

fn coerce_price_mention(mention: &Map<String, Value>) -> PriceMention {
    PriceMention {
        price: string_field(mention.get("price")),
        currency: string_field(mention.get("currency")),
        context: string_field(mention.get("context")),
        source_url: mention
            .get("source_url")
            .and_then(|u| u.as_str())
            .filter(|u| !u.trim().is_empty())
            .map(|u| u.to_string()),
    }
}

/// Strings pass through; numbers are kept as their JSON text (prices often
/// come back as `39.9`); anything else becomes empty.
fn string_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|s| s.as_str().map(|s| s.to_string()))
                .collect()
        })
        .unwrap_or_default()
}
