use serde_json::json;

const ROLE_STATEMENT: &str =
    "You are a senior market analyst for a Brazilian 3D printing business.";

/// Composes the single instruction block sent to the generation provider.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    output_language: String,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new("pt-BR")
    }
}

impl PromptBuilder {
    pub fn new(output_language: impl Into<String>) -> Self {
        Self {
            output_language: output_language.into(),
        }
    }

    /// Shape the model must answer with, one placeholder per field.
    pub fn schema_hint() -> serde_json::Value {
        json!({
            "generated_at": "string ISO",
            "items": [
                {
                    "product": "string",
                    "category": "string",
                    "why_trending": "string",
                    "signals": ["string"],
                    "price_mentions": [
                        {"price": "string", "currency": "string", "context": "string", "source_url": "string"}
                    ],
                    "keywords": ["string"],
                    "risk": "low|medium|high",
                    "differentiation": ["string"],
                    "mvp_steps": ["string"]
                }
            ],
            "top_opportunities": ["string"],
            "notes": ["string"]
        })
    }

    /// Builds the prompt. `source_text` is appended verbatim at the end and
    /// must already be cut to the character budget.
    pub fn build(&self, source_text: &str, country: &str, style_hint: &str) -> String {
        format!(
            r#"{role}
Focus: {style}.

From the TEXT below (copied from a research assistant), produce STRICT JSON following this schema:
{schema}

Rules:
- Write in {language}.
- If the text carries no prices or URLs, leave price_mentions empty.
- Do not invent links.
- Output ONLY JSON: no prose, no markdown fences, no comments.
- Target market: {country}

TEXT:
{text}"#,
            role = ROLE_STATEMENT,
            style = style_hint,
            schema = Self::schema_hint(),
            language = self.output_language,
            country = country,
            text = source_text,
        )
    }
}
