use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::extraction::errors::ExtractionError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for ExtractionError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name) = match &self {
            ExtractionError::EmptySourceText
            | ExtractionError::InvalidTemperature
            | ExtractionError::InvalidMaxChars => {
                (StatusCode::UNPROCESSABLE_ENTITY, "ValidationError")
            }
            ExtractionError::Refused(_) => (StatusCode::BAD_GATEWAY, "ProviderRefused"),
            ExtractionError::Overloaded { .. } => {
                (StatusCode::SERVICE_UNAVAILABLE, "ProviderOverloaded")
            }
        };

        (
            status,
            Json(ErrorResponse {
                name: name.to_string(),
                message: self.to_string(),
                detail: Some(self.user_message()),
            }),
        )
    }
}
