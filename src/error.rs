use axum::{
    extract::multipart::MultipartError,
    response::{IntoResponse, Response},
    http::StatusCode,
};
use serde_json::json;
use axum::Json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Unsupported file: {0}")]
    UnsupportedFile(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("DataFrame error: {0}")]
    DataFrame(String),
    #[error("Upload error: {0}")]
    Upload(#[from] MultipartError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<polars::error::PolarsError> for AppError {
    fn from(err: polars::error::PolarsError) -> Self {
        AppError::DataFrame(err.to_string())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::UnsupportedFile(_) => StatusCode::BAD_REQUEST,
            AppError::Parse(_) => StatusCode::BAD_REQUEST,
            AppError::DataFrame(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Upload(err) => err.status(),
            AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // The client sees the bare message, without the variant prefix.
    fn message(self) -> String {
        match self {
            AppError::InvalidInput(msg)
            | AppError::UnsupportedFile(msg)
            | AppError::Parse(msg)
            | AppError::DataFrame(msg)
            | AppError::Internal(msg) => msg,
            AppError::Upload(err) => err.body_text(),
            AppError::Io(err) => err.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        let body = Json(json!({
            "error": self.message()
        }));

        (status, body).into_response()
    }
}
