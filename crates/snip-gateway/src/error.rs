use crate::model::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use snip_core::ShortenerError;
use tracing::{debug, error};

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    /// The request itself is malformed.
    BadRequest(String),
    Service(ShortenerError),
}

impl From<ShortenerError> for AppError {
    fn from(err: ShortenerError) -> Self {
        match err {
            ShortenerError::InvalidShortCode(msg) => AppError::BadRequest(msg),
            other => AppError::Service(other),
        }
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Service(ShortenerError::InvalidShortCode(_)) => StatusCode::BAD_REQUEST,
            AppError::Service(ShortenerError::Store(_)) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Service(
                ShortenerError::Generator(_) | ShortenerError::CodeSpaceExhausted { .. },
            ) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::BadRequest(msg) => msg,
            AppError::Service(err) => {
                error!(error = %err, retryable = err.is_retryable(), "request failed");
                err.to_string()
            }
        };
        debug!(status = %status, error = %message, "returning error response");

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
