use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;

use crate::envelope::ApiResponse;

/// Failures surfaced by the attendance and navigation endpoints.
#[derive(Debug, Display)]
pub enum AppError {
    #[display(fmt = "{}", _0)]
    MissingParameter(String),

    #[display(fmt = "{}", _0)]
    Validation(String),

    #[display(fmt = "{}", _0)]
    AccessDenied(String),

    #[display(fmt = "{}", _0)]
    NotFound(String),

    /// Storage fault; the underlying message is passed through to the client.
    #[display(fmt = "Server error: {}", _0)]
    Storage(String),
}

impl AppError {
    pub fn missing(message: impl Into<String>) -> Self {
        AppError::MissingParameter(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn denied(message: impl Into<String>) -> Self {
        AppError::AccessDenied(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingParameter(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::AccessDenied(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Storage(cause) => ApiResponse::<()>::failure("Server error", Some(cause.as_str())),
            AppError::MissingParameter(msg)
            | AppError::Validation(msg)
            | AppError::AccessDenied(msg)
            | AppError::NotFound(msg) => ApiResponse::<()>::failure(msg, None),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn storage_fault_passes_cause_through() {
        let err = AppError::from(anyhow::anyhow!("connection reset"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": false,
                "message": "Server error",
                "error": "connection reset"
            })
        );
    }

    #[test]
    fn status_codes() {
        assert_eq!(AppError::missing("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::validation("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::denied("x").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::not_found("x").status_code(), StatusCode::NOT_FOUND);
    }
}
