//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code and error message.
///
/// # Error Categories
///
/// - **Validation Errors**: malformed or missing input
/// - **Authentication Errors**: bad credentials, missing or invalid token
/// - **Resource Errors**: unknown account or recipient
/// - **Conflict Errors**: self-transfer, duplicate registration
/// - **Business Logic Errors**: insufficient balance
/// - **Storage Errors**: any sqlx::Error, or an unexpected internal failure
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (connection error, query error, failed commit).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Request body or parameters are invalid.
    ///
    /// The String contains details about what was invalid.
    #[error("{0}")]
    Validation(String),

    /// Email/password pair did not match an account.
    ///
    /// Same message for unknown email and wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Bearer token is missing, malformed, expired or forged.
    #[error("{0}")]
    Unauthorized(&'static str),

    /// Requested account does not exist.
    #[error("account not found")]
    AccountNotFound,

    /// Transfer destination code does not match any account.
    #[error("recipient not found")]
    RecipientNotFound,

    /// Source and destination of a transfer are the same account.
    #[error("cannot transfer points to yourself")]
    SelfTransfer,

    /// Registration with an email that is already in use.
    #[error("user already exists")]
    EmailTaken,

    /// Source account balance is lower than the requested amount.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// Unexpected failure outside the database (hashing, token signing).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    /// Status code and machine-readable code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid_credentials"),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::AccountNotFound => (StatusCode::NOT_FOUND, "account_not_found"),
            AppError::RecipientNotFound => (StatusCode::NOT_FOUND, "recipient_not_found"),
            AppError::SelfTransfer => (StatusCode::BAD_REQUEST, "self_transfer"),
            AppError::EmailTaken => (StatusCode::BAD_REQUEST, "email_taken"),
            AppError::InsufficientBalance => (StatusCode::BAD_REQUEST, "insufficient_balance"),
            AppError::Database(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "rejected request body");
        AppError::validation("Invalid request body")
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(error = %rejection, "rejected query string");
        AppError::validation("Invalid query parameters")
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// Storage and internal failures are logged here and reported to the
/// client with a generic message.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match self {
            AppError::Database(ref err) => {
                tracing::error!(error = %err, "database failure");
                "An internal error occurred".to_string()
            }
            AppError::Internal(ref detail) => {
                tracing::error!(error = %detail, "internal failure");
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn database_errors_do_not_leak_detail() {
        let response = AppError::Database(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "internal_error");
        assert_eq!(body["error"]["message"], "An internal error occurred");
    }

    #[tokio::test]
    async fn business_errors_carry_their_message() {
        let response = AppError::InsufficientBalance.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "insufficient_balance");
        assert_eq!(body["error"]["message"], "insufficient balance");
    }

    #[test]
    fn taxonomy_maps_to_expected_statuses() {
        let cases = [
            (AppError::validation("bad"), StatusCode::BAD_REQUEST),
            (AppError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AppError::Unauthorized("Invalid token"), StatusCode::UNAUTHORIZED),
            (AppError::AccountNotFound, StatusCode::NOT_FOUND),
            (AppError::RecipientNotFound, StatusCode::NOT_FOUND),
            (AppError::SelfTransfer, StatusCode::BAD_REQUEST),
            (AppError::EmailTaken, StatusCode::BAD_REQUEST),
            (AppError::InsufficientBalance, StatusCode::BAD_REQUEST),
            (AppError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status_and_code().0, expected, "{error:?}");
        }
    }
}
