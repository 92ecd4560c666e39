pub mod app_config;
pub mod cors_config;
pub mod extraction_config;
pub mod gemini_config;
pub mod server_config;

use std::str::FromStr;

/// Reads `name` through `lookup` and parses it, falling back to `default`
/// when the variable is unset, blank or unparsable.
pub fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> T {
    lookup(name)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

/// Like [`parse_or`] for plain strings; blank values count as unset.
pub fn string_or(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: &str) -> String {
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
