use std::time::Duration;

use business::domain::extraction::retry::{MAX_DELAY, MIN_DELAY, RetryPolicy};

use super::{parse_or, process_env, string_or};

pub const DEFAULT_COUNTRY: &str = "Brazil";
pub const DEFAULT_STYLE: &str = "empreendedorismo impressão 3D, foco em margem e diferenciação";
pub const DEFAULT_LANGUAGE: &str = "pt-BR";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_MAX_CHARS: usize = 120_000;
pub const MIN_MAX_CHARS: usize = 20_000;
pub const MAX_MAX_CHARS: usize = 200_000;

/// Defaults applied to extraction requests and the retry budget.
///
/// Environment variables:
/// - TREND_COUNTRY_DEFAULT, TREND_PROMPT_STYLE, TREND_OUTPUT_LANGUAGE
/// - TREND_TEMPERATURE: clamped to [0, 1] (default: 0.3)
/// - TREND_MAX_CHARS: clamped to [20000, 200000] (default: 120000)
/// - RETRY_MAX_ATTEMPTS (default: 4), RETRY_BASE_DELAY_SECS (default: 2),
///   RETRY_CAP_DELAY_SECS: clamped to [1, 60] (default: 60)
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    pub default_country: String,
    pub default_style: String,
    pub output_language: String,
    pub temperature: f32,
    pub max_chars: usize,
    pub retry: RetryPolicy,
}

impl ExtractionConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(process_env)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = RetryPolicy::default();
        let temperature = parse_or(&lookup, "TREND_TEMPERATURE", DEFAULT_TEMPERATURE);

        Self {
            default_country: string_or(&lookup, "TREND_COUNTRY_DEFAULT", DEFAULT_COUNTRY),
            default_style: string_or(&lookup, "TREND_PROMPT_STYLE", DEFAULT_STYLE),
            output_language: string_or(&lookup, "TREND_OUTPUT_LANGUAGE", DEFAULT_LANGUAGE),
            temperature: if temperature.is_finite() {
                temperature.clamp(0.0, 1.0)
            } else {
                DEFAULT_TEMPERATURE
            },
            max_chars: parse_or(&lookup, "TREND_MAX_CHARS", DEFAULT_MAX_CHARS)
                .clamp(MIN_MAX_CHARS, MAX_MAX_CHARS),
            retry: RetryPolicy {
                max_attempts: parse_or(&lookup, "RETRY_MAX_ATTEMPTS", defaults.max_attempts).max(1),
                base_delay: Duration::from_secs(parse_or(
                    &lookup,
                    "RETRY_BASE_DELAY_SECS",
                    defaults.base_delay.as_secs(),
                )),
                cap_delay: Duration::from_secs(
                    parse_or(&lookup, "RETRY_CAP_DELAY_SECS", defaults.cap_delay.as_secs())
                        .clamp(MIN_DELAY.as_secs(), MAX_DELAY.as_secs()),
                ),
            },
        }
    }
}
