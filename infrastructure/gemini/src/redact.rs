use std::sync::LazyLock;

use regex::Regex;

const MASK: &str = "***";

static QUERY_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([?&]key=)[^&\s]+").expect("query key pattern"));

/// Scrubs the API credential out of any text headed for an error or a log.
#[derive(Clone)]
pub struct Redactor {
    secret: String,
}

impl Redactor {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: secret.trim().to_string(),
        }
    }

    pub fn redact(&self, text: &str) -> String {
        let redacted = if self.secret.is_empty() {
            text.to_string()
        } else {
            text.replace(&self.secret, MASK)
        };
        QUERY_KEY
            .replace_all(&redacted, format!("${{1}}{}", MASK))
            .into_owned()
    }
}

impl std::fmt::Debug for Redactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Redactor").field("secret", &MASK).finish()
    }
}
