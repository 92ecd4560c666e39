use serde::Serialize;

use super::errors::ExtractionError;

/// Risk level the model assigns to a trending product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Risk {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Risk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Risk::Low => write!(f, "low"),
            Risk::Medium => write!(f, "medium"),
            Risk::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for Risk {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Risk::Low),
            "medium" => Ok(Risk::Medium),
            "high" => Ok(Risk::High),
            _ => Err(format!("Invalid risk level: {}", s)),
        }
    }
}

/// A price quoted in the source text for a product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceMention {
    pub price: String,
    pub currency: String,
    pub context: String,
    pub source_url: Option<String>,
}

/// A trending product extracted from the research text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub product: String,
    pub category: String,
    pub why_trending: String,
    pub signals: Vec<String>,
    pub price_mentions: Vec<PriceMention>,
    pub keywords: Vec<String>,
    pub risk: Risk,
    pub differentiation: Vec<String>,
    pub mvp_steps: Vec<String>,
}

/// Structured output of one extraction.
///
/// Collections are never absent: a model answer that omits a key, or that
/// cannot be decoded at all, leaves the corresponding field empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractionResult {
    pub generated_at: Option<String>,
    pub items: Vec<Item>,
    pub top_opportunities: Vec<String>,
    pub notes: Vec<String>,
}

impl ExtractionResult {
    /// Note placed first when the model answer could not be decoded.
    pub const PARSE_FAILURE_NOTE: &'static str =
        "Could not parse the model answer as JSON; the raw text follows.";

    /// True when this is the synthetic result built from an undecodable answer.
    pub fn is_parse_failure(&self) -> bool {
        self.items.is_empty()
            && self.top_opportunities.is_empty()
            && self
                .notes
                .first()
                .is_some_and(|note| note == Self::PARSE_FAILURE_NOTE)
    }
}

/// Validated input of one extraction run.
///
/// The source text is trimmed and cut to `max_chars` characters on
/// construction, so every later stage (fingerprint, prompt) sees the same text.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionRequest {
    source_text: String,
    country: String,
    style_hint: String,
    temperature: f32,
    max_chars: usize,
    model: String,
}

impl ExtractionRequest {
    pub fn new(
        source_text: &str,
        country: impl Into<String>,
        style_hint: impl Into<String>,
        temperature: f32,
        max_chars: usize,
        model: impl Into<String>,
    ) -> Result<Self, ExtractionError> {
        let trimmed = source_text.trim();
        if trimmed.is_empty() {
            return Err(ExtractionError::EmptySourceText);
        }
        if !temperature.is_finite() || !(0.0..=1.0).contains(&temperature) {
            return Err(ExtractionError::InvalidTemperature);
        }
        if max_chars == 0 {
            return Err(ExtractionError::InvalidMaxChars);
        }

        Ok(Self {
            source_text: truncate_chars(trimmed, max_chars),
            country: country.into(),
            style_hint: style_hint.into(),
            temperature,
            max_chars,
            model: model.into(),
        })
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn style_hint(&self) -> &str {
        &self.style_hint
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Keeps the first `max_chars` characters of `text`.
///
/// Counts chars, not bytes, so a multi-byte character is never split.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}
