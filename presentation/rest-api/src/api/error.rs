use poem::http::StatusCode;
use poem_openapi::{Object, payload::Json};

#[derive(Object, Debug)]
pub struct ErrorResponse {
    /// Error family, e.g. "ProviderRefused"
    pub name: String,
    /// Code-style identifier, e.g. "extraction.refused"
    pub message: String,
    /// Human readable explanation; never contains credentials
    #[oai(skip_serializing_if_is_none)]
    pub detail: Option<String>,
}

pub trait IntoErrorResponse {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>);
}
