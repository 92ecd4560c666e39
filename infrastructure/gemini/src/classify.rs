use std::sync::LazyLock;
use std::time::Duration;

use chrono::{DateTime, Utc};
use regex::Regex;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use serde_json::Value;

use business::domain::extraction::errors::GenerationError;

use crate::redact::Redactor;

/// Longest provider message kept in an error detail.
const MAX_DETAIL_CHARS: usize = 500;

/// Maps a non-success HTTP answer to the attempt-level error taxonomy.
///
/// | Status | Error |
/// |--------|-------|
/// | 401, 403, 400 with `API_KEY_INVALID` | `Auth` |
/// | 429, 503 | `RateLimited` |
/// | 408, other 5xx | `TransientNetwork` |
/// | other 4xx | `Client` |
pub fn classify_status(
    status: u16,
    header_hint: Option<Duration>,
    body: &str,
    redactor: &Redactor,
) -> GenerationError {
    let error_body: Value = serde_json::from_str(body).unwrap_or(Value::Null);
    let detail = redactor.redact(&provider_message(status, &error_body));

    match status {
        401 | 403 => GenerationError::auth(detail),
        400 if has_reason(&error_body, "API_KEY_INVALID") => GenerationError::auth(detail),
        429 | 503 => {
            GenerationError::rate_limited(header_hint.or_else(|| body_retry_delay(&error_body)), detail)
        }
        408 | 500..=599 => GenerationError::transient_network(detail),
        _ => GenerationError::client(status, detail),
    }
}

/// Maps a transport failure (no HTTP answer) to the taxonomy.
pub fn classify_transport(error: reqwest::Error, redactor: &Redactor) -> GenerationError {
    let kind = if error.is_timeout() {
        "timeout"
    } else if error.is_connect() {
        "connection failed"
    } else {
        "request failed"
    };
    let is_builder = error.is_builder();
    let detail = redactor.redact(&format!("{}: {}", kind, error.without_url()));

    if is_builder {
        GenerationError::client(0, detail)
    } else {
        GenerationError::transient_network(detail)
    }
}

/// Reads `Retry-After` as delta-seconds or as an HTTP-date.
pub fn retry_after_header(headers: &HeaderMap) -> Option<Duration> {
    let value = headers.get(RETRY_AFTER)?.to_str().ok()?.trim();
    if let Ok(seconds) = value.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }
    let at = DateTime::parse_from_rfc2822(value).ok()?.with_timezone(&Utc);
    Some((at - Utc::now()).to_std().unwrap_or(Duration::ZERO))
}

static RETRY_DELAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)?)s$").expect("retry delay pattern"));

/// `retryDelay` of a `google.rpc.RetryInfo` detail, e.g. `"5s"` or `"1.5s"`.
/// A delay too large for a `Duration` is ignored.
fn body_retry_delay(error_body: &Value) -> Option<Duration> {
    error_details(error_body)
        .iter()
        .filter_map(|detail| detail.get("retryDelay").and_then(|d| d.as_str()))
        .find_map(|delay| {
            let seconds = RETRY_DELAY
                .captures(delay.trim())?
                .get(1)?
                .as_str()
                .parse::<f64>()
                .ok()?;
            Duration::try_from_secs_f64(seconds).ok()
        })
}

fn has_reason(error_body: &Value, reason: &str) -> bool {
    error_details(error_body)
        .iter()
        .any(|detail| detail.get("reason").and_then(|r| r.as_str()) == Some(reason))
}

fn error_details(error_body: &Value) -> Vec<Value> {
    error_body
        .get("error")
        .and_then(|e| e.get("details"))
        .and_then(|d| d.as_array())
        .cloned()
        .unwrap_or_default()
}

fn provider_message(status: u16, error_body: &Value) -> String {
    let message = error_body
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .map(|m| m.chars().take(MAX_DETAIL_CHARS).collect::<String>());

    match message {
        Some(message) => format!("HTTP {}: {}", status, message),
        None => format!("HTTP {}", status),
    }
}
