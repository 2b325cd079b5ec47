use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::schema::ErrorResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("invalid auth token")]
    InvalidToken,

    #[error("auth token expired")]
    TokenExpired,

    #[error("empty auth header")]
    MissingAuthHeader,

    #[error("invalid auth header")]
    MalformedAuthHeader,

    /// The handler ran without the auth middleware in front of it.
    #[error("user id not found")]
    MissingAuth,

    /// Covers both "does not exist" and "owned by someone else".
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    InvalidInput(String),

    #[error("username is already taken")]
    UsernameTaken,

    #[error("database error: {0}")]
    Persistence(#[from] sqlx::Error),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials
            | AppError::InvalidToken
            | AppError::TokenExpired
            | AppError::MissingAuthHeader
            | AppError::MalformedAuthHeader => StatusCode::UNAUTHORIZED,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::UsernameTaken => StatusCode::CONFLICT,
            // Ownership misses stay on the 500 path, same as the not-found ones.
            AppError::NotFound(_)
            | AppError::MissingAuth
            | AppError::Persistence(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            AppError::InvalidToken | AppError::TokenExpired => "invalid auth token".to_string(),
            AppError::Persistence(_) | AppError::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "request rejected");
        }

        let body = ErrorResponse {
            message: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_are_unauthorized() {
        for err in [
            AppError::InvalidCredentials,
            AppError::InvalidToken,
            AppError::TokenExpired,
            AppError::MissingAuthHeader,
            AppError::MalformedAuthHeader,
        ] {
            assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED, "{err}");
        }
    }

    #[test]
    fn expired_and_invalid_tokens_look_the_same_to_callers() {
        assert_eq!(
            AppError::TokenExpired.public_message(),
            AppError::InvalidToken.public_message()
        );
        assert_ne!(AppError::TokenExpired.to_string(), AppError::InvalidToken.to_string());
    }

    #[test]
    fn not_found_and_missing_auth_are_server_faults() {
        assert_eq!(
            AppError::NotFound("todo list").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(AppError::MissingAuth.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn database_details_are_not_exposed() {
        let err = AppError::Persistence(sqlx::Error::RowNotFound);
        assert_eq!(err.public_message(), "internal server error");
        assert_eq!(
            AppError::InvalidInput("invalid input body".into()).public_message(),
            "invalid input body"
        );
    }
}
