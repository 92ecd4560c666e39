use poem_openapi::{Enum, Object};

use business::domain::extraction::model::{Item, PriceMention, Risk};
use business::domain::extraction::use_cases::run::ExtractionOutcome;

#[derive(Debug, Clone, Object)]
pub struct RunExtractionRequest {
    /// Research text to analyze; trimmed and cut to `max_chars` characters
    pub source_text: String,
    /// Target market (default: configured country)
    pub country: Option<String>,
    /// Analyst focus (default: configured style)
    pub style_hint: Option<String>,
    /// Creativity between 0 and 1 (default: configured temperature)
    pub temperature: Option<f32>,
    /// Character budget for the source text, clamped to [20000, 200000]
    /// (default: configured budget)
    pub max_chars: Option<usize>,
    /// Gemini model identifier (default: configured model)
    pub model: Option<String>,
    /// Reuse the last result when the same input was already analyzed (default: true)
    pub use_cache: Option<bool>,
}

#[derive(Debug, Clone, Enum)]
pub enum RiskDto {
    #[oai(rename = "low")]
    Low,
    #[oai(rename = "medium")]
    Medium,
    #[oai(rename = "high")]
    High,
}

impl From<Risk> for RiskDto {
    fn from(r: Risk) -> Self {
        match r {
            Risk::Low => RiskDto::Low,
            Risk::Medium => RiskDto::Medium,
            Risk::High => RiskDto::High,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct PriceMentionResponse {
    pub price: String,
    pub currency: String,
    pub context: String,
    /// Page the price was quoted from, when the text carried one
    #[oai(skip_serializing_if_is_none)]
    pub source_url: Option<String>,
}

impl From<PriceMention> for PriceMentionResponse {
    fn from(p: PriceMention) -> Self {
        Self {
            price: p.price,
            currency: p.currency,
            context: p.context,
            source_url: p.source_url,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct ItemResponse {
    pub product: String,
    pub category: String,
    pub why_trending: String,
    pub signals: Vec<String>,
    pub price_mentions: Vec<PriceMentionResponse>,
    pub keywords: Vec<String>,
    pub risk: RiskDto,
    pub differentiation: Vec<String>,
    pub mvp_steps: Vec<String>,
}

impl From<Item> for ItemResponse {
    fn from(i: Item) -> Self {
        Self {
            product: i.product,
            category: i.category,
            why_trending: i.why_trending,
            signals: i.signals,
            price_mentions: i.price_mentions.into_iter().map(|p| p.into()).collect(),
            keywords: i.keywords,
            risk: i.risk.into(),
            differentiation: i.differentiation,
            mvp_steps: i.mvp_steps,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct ExtractionResponse {
    /// Generation timestamp reported by the model, ISO-8601
    #[oai(skip_serializing_if_is_none)]
    pub generated_at: Option<String>,
    pub items: Vec<ItemResponse>,
    pub top_opportunities: Vec<String>,
    pub notes: Vec<String>,
    /// Whether the result came from the cache instead of a new call
    pub from_cache: bool,
    /// Remote attempts made (0 on a cache hit)
    pub attempts: u32,
    /// False when the model answered but its output could not be decoded;
    /// `notes` then holds the raw answer
    pub interpreted: bool,
}

impl From<ExtractionOutcome> for ExtractionResponse {
    fn from(o: ExtractionOutcome) -> Self {
        let interpreted = !o.result.is_parse_failure();
        Self {
            generated_at: o.result.generated_at,
            items: o.result.items.into_iter().map(|i| i.into()).collect(),
            top_opportunities: o.result.top_opportunities,
            notes: o.result.notes,
            from_cache: o.from_cache,
            attempts: o.attempts,
            interpreted,
        }
    }
}
