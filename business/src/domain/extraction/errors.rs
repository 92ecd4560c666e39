use std::time::Duration;

/// Attempt-level failure of one call to the generation provider.
/// Use code-style identifiers for all error variants for i18n compatibility.
///
/// `detail` strings are already redacted by the adapter that builds them.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    #[error("generation.auth")]
    Auth { detail: String },
    #[error("generation.rate_limited")]
    RateLimited {
        retry_after: Option<Duration>,
        detail: String,
    },
    #[error("generation.transient_network")]
    TransientNetwork { detail: String },
    #[error("generation.client_error")]
    Client { status: u16, detail: String },
}

impl GenerationError {
    pub fn auth(detail: impl Into<String>) -> Self {
        GenerationError::Auth {
            detail: detail.into(),
        }
    }
    pub fn rate_limited(retry_after: Option<Duration>, detail: impl Into<String>) -> Self {
        GenerationError::RateLimited {
            retry_after,
            detail: detail.into(),
        }
    }
    pub fn transient_network(detail: impl Into<String>) -> Self {
        GenerationError::TransientNetwork {
            detail: detail.into(),
        }
    }
    pub fn client(status: u16, detail: impl Into<String>) -> Self {
        GenerationError::Client {
            status,
            detail: detail.into(),
        }
    }

    /// Short name of the failure kind, for logs and user messages.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::Auth { .. } => "auth",
            GenerationError::RateLimited { .. } => "rate_limited",
            GenerationError::TransientNetwork { .. } => "transient_network",
            GenerationError::Client { .. } => "client_error",
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            GenerationError::Auth { detail }
            | GenerationError::RateLimited { detail, .. }
            | GenerationError::TransientNetwork { detail }
            | GenerationError::Client { detail, .. } => detail,
        }
    }
}

/// Failure of a whole extraction run, as reported to the presentation layer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExtractionError {
    #[error("extraction.empty_source_text")]
    EmptySourceText,
    #[error("extraction.invalid_temperature")]
    InvalidTemperature,
    #[error("extraction.invalid_max_chars")]
    InvalidMaxChars,
    /// The provider rejected the request; retrying would not help.
    #[error("extraction.refused")]
    Refused(GenerationError),
    /// The provider kept failing with retryable errors until the attempt budget ran out.
    #[error("extraction.overloaded")]
    Overloaded { attempts: u32, last: GenerationError },
}

impl ExtractionError {
    /// Human readable message naming the failure kind and the redacted detail.
    pub fn user_message(&self) -> String {
        match self {
            ExtractionError::EmptySourceText => {
                "Paste the research text before running the analysis.".to_string()
            }
            ExtractionError::InvalidTemperature => {
                "Temperature must be between 0 and 1.".to_string()
            }
            ExtractionError::InvalidMaxChars => {
                "The character budget must be greater than zero.".to_string()
            }
            ExtractionError::Refused(error) => format!(
                "The generation service refused the request ({}): {}",
                error.kind(),
                error.detail()
            ),
            ExtractionError::Overloaded { attempts, last } => format!(
                "The generation service is overloaded, retried {} times ({}): {}",
                attempts,
                last.kind(),
                last.detail()
            ),
        }
    }
}
