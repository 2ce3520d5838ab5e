use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Backend error variants.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("{0}")]
    Validation(String),
    #[error("user already exists")]
    EmailTaken,
    #[error("invalid password")]
    InvalidPassword,
    #[error("reset token invalid or expired")]
    InvalidResetToken,
    #[error("invalid or expired token")]
    Unauthorized,
    #[error("user not found")]
    UserNotFound,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::EmailTaken
            | Self::InvalidPassword
            | Self::InvalidResetToken => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // Internal errors need the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, "internal error");
        }
        let label = if status.is_client_error() { "fail" } else { "error" };
        let body = serde_json::json!({
            "status": label,
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
