use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::database::StoreError;

/// Why a request failed to authenticate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    MissingToken,
    InvalidToken,
    UnknownUser,
    BadCredentials,
}

impl std::fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            AuthFailure::MissingToken => "Missing authorization token",
            AuthFailure::InvalidToken => "Invalid or expired token",
            AuthFailure::UnknownUser => "User no longer exists",
            AuthFailure::BadCredentials => "Credentials incorrect",
        };
        f.write_str(msg)
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Authentication(AuthFailure),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    /// Rendered to clients as a generic message; the detail is only logged.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(msg) => AppError::Conflict(msg),
            StoreError::Backend(msg) => AppError::Internal(msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Authentication(AuthFailure::BadCredentials) => StatusCode::FORBIDDEN,
            AppError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Internal(detail) => {
                log::error!("❌ {}", detail);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "success": false,
            "error": message
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn bad_credentials_are_forbidden_other_auth_failures_unauthorized() {
        assert_eq!(
            AppError::Authentication(AuthFailure::BadCredentials).status_code(),
            StatusCode::FORBIDDEN
        );
        for failure in [AuthFailure::MissingToken, AuthFailure::InvalidToken, AuthFailure::UnknownUser] {
            assert_eq!(AppError::Authentication(failure).status_code(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn duplicate_store_error_becomes_conflict() {
        let err: AppError = StoreError::Duplicate("Email already taken".into()).into();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        let err: AppError = StoreError::Backend("socket closed".into()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn internal_errors_do_not_leak_detail() {
        let res = AppError::internal("connection refused at 10.0.0.3:27017").error_response();
        let body = to_bytes(res.into_body()).await.unwrap();
        let body = std::str::from_utf8(&body).unwrap();

        assert!(body.contains("Internal server error"));
        assert!(!body.contains("10.0.0.3"));
    }
}
