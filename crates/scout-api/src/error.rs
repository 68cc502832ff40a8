//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`; anything that converts into `AppError`
//! renders as `{"errors": "<message>"}` with the status from [`ErrorMetadata`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use scout_core::{AppError, ErrorMetadata, LogLevel, SearchError};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errors: String,
}

/// Wrapper type for AppError to implement IntoResponse.
/// Required by the orphan rules: both `IntoResponse` and `AppError` are foreign here.
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<SearchError> for HttpAppError {
    fn from(err: SearchError) -> Self {
        HttpAppError(AppError::Search(err))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    let code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type, code, "Request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type, code, "Request failed");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;
        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = Json(ErrorResponse {
            errors: app_error.to_string(),
        });
        (status, body).into_response()
    }
}
