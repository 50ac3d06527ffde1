use actix_web::{HttpRequest, HttpResponse, error};
use serde::Serialize;

/// `{ success, message?, data?, error? }` wrapper shared by the JSON endpoints.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            error: None,
        }
    }

    pub fn ok_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(data)
        }
    }

    pub fn failure(message: impl Into<String>, error: Option<&str>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            error: error.map(str::to_owned),
        }
    }
}

/// Turns malformed JSON bodies into the standard 400 envelope.
pub fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let body = ApiResponse::<()>::failure("Invalid request body", Some(&err.to_string()));
    error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

/// Turns malformed query strings into the standard 400 envelope.
pub fn query_error_handler(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let body = ApiResponse::<()>::failure("Invalid query parameters", Some(&err.to_string()));
    error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}
