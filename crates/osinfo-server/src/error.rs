//! HTTP mapping for `OsInfoError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use osinfo_core::error::{ErrorCode, OsInfoError};

/// Handler error: wraps the shared error so it can become a response.
#[derive(Debug)]
pub struct ApiError(pub OsInfoError);

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl From<OsInfoError> for ApiError {
    fn from(e: OsInfoError) -> Self {
        Self(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0.code() {
            ErrorCode::BadRequest | ErrorCode::UnsupportedVersion => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ProbeFailed | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(code = self.0.code().as_str(), error = %self.0, "request failed");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
