/// Error Handling Module
///
/// Unified error handling for the authentication backend:
/// 1. Domain-specific error types (validation, credentials, tokens, store)
/// 2. A central `AppError` used for control flow in the service layer
/// 3. HTTP response mapping with structured JSON bodies
/// 4. Structured error logging via tracing

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use std::error::Error as StdError;
use std::fmt;

/// Input validation failures. These never touch the store.
#[derive(Debug, Clone)]
pub enum ValidationError {
    MissingField(&'static str),
    InvalidEmail,
    /// Every violated password rule, not just the first one.
    PasswordPolicy(Vec<String>),
    PasswordMismatch,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingField(field) => write!(f, "{} is required", field),
            ValidationError::InvalidEmail => write!(f, "Invalid email format"),
            ValidationError::PasswordPolicy(violations) => {
                write!(f, "{}", violations.join(". "))
            }
            ValidationError::PasswordMismatch => write!(f, "Passwords do not match"),
        }
    }
}

impl StdError for ValidationError {}

/// Credential and refresh-token failures.
///
/// "Invalid email or password" is deliberately identical for an unknown
/// email and a wrong password so callers cannot enumerate accounts.
#[derive(Debug, Clone)]
pub enum AuthError {
    InvalidCredentials,
    InvalidRefreshToken,
    RefreshTokenExpired,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials => write!(f, "Invalid email or password"),
            AuthError::InvalidRefreshToken => write!(f, "Invalid refresh token"),
            AuthError::RefreshTokenExpired => write!(f, "Refresh token expired"),
        }
    }
}

impl StdError for AuthError {}

/// Access-token verification outcomes.
///
/// The distinction matters to the request boundary: each variant maps to its
/// own response code so clients can tell a stale token from a forged one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    Missing,
    Malformed,
    Expired,
    InvalidSignature,
}

impl TokenError {
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::Missing => "TOKEN_MISSING",
            TokenError::Malformed => "TOKEN_MALFORMED",
            TokenError::Expired => "TOKEN_EXPIRED",
            TokenError::InvalidSignature => "TOKEN_INVALID",
        }
    }
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenError::Missing => write!(f, "Access token required"),
            TokenError::Malformed => write!(f, "Malformed access token"),
            TokenError::Expired => write!(f, "Access token has expired"),
            TokenError::InvalidSignature => write!(f, "Invalid access token"),
        }
    }
}

impl StdError for TokenError {}

/// Store operation errors.
#[derive(Debug)]
pub enum DatabaseError {
    UniqueConstraintViolation(String),
    NotFound(String),
    ConnectionPool(String),
    UnexpectedError(String),
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseError::UniqueConstraintViolation(msg) => {
                write!(f, "Duplicate entry: {}", msg)
            }
            DatabaseError::NotFound(msg) => write!(f, "Not found: {}", msg),
            DatabaseError::ConnectionPool(msg) => write!(f, "Database connection error: {}", msg),
            DatabaseError::UnexpectedError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl StdError for DatabaseError {}

/// Central error type that all service operations return.
#[derive(Debug)]
pub enum AppError {
    Validation(ValidationError),
    /// Uniqueness violation (email already registered).
    Conflict(String),
    Auth(AuthError),
    Token(TokenError),
    Database(DatabaseError),
    /// A valid token references a row that no longer exists. Should not
    /// happen given the cascade delete, but must not crash the process.
    Integrity(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(e) => write!(f, "{}", e),
            AppError::Conflict(msg) => write!(f, "{}", msg),
            AppError::Auth(e) => write!(f, "{}", e),
            AppError::Token(e) => write!(f, "{}", e),
            AppError::Database(e) => write!(f, "{}", e),
            AppError::Integrity(msg) => write!(f, "Data integrity fault: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl StdError for AppError {}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Auth(err)
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        AppError::Token(err)
    }
}

impl From<DatabaseError> for AppError {
    fn from(err: DatabaseError) -> Self {
        AppError::Database(err)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let error_msg = err.to_string();

        // The unique constraint on users.email is the authoritative conflict
        // signal; the service-level existence check is only a fast path.
        if error_msg.contains("duplicate key") || error_msg.contains("unique constraint") {
            AppError::Conflict("Email already registered".to_string())
        } else if error_msg.contains("pool") || error_msg.contains("connect") {
            AppError::Database(DatabaseError::ConnectionPool(error_msg))
        } else {
            AppError::Database(DatabaseError::UnexpectedError(error_msg))
        }
    }
}

/// Error body returned to HTTP clients.
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    /// Unique id for correlating the response with server logs.
    pub error_id: String,
    pub message: String,
    pub code: String,
    pub status: u16,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_id: String, message: String, code: String, status: u16) -> Self {
        Self {
            error_id,
            message,
            code,
            status,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl AppError {
    fn response_parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Validation(e) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "DUPLICATE_ENTRY", msg.clone()),
            AppError::Auth(e) => (StatusCode::UNAUTHORIZED, "AUTH_ERROR", e.to_string()),
            AppError::Token(e) => (StatusCode::UNAUTHORIZED, e.code(), e.to_string()),
            AppError::Database(DatabaseError::ConnectionPool(_)) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                "Database service temporarily unavailable".to_string(),
            ),
            AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                "Database error occurred".to_string(),
            ),
            // Never leak internals to the client.
            AppError::Integrity(_) | AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error".to_string(),
            ),
        }
    }

    fn log(&self, error_id: &str) {
        match self {
            AppError::Validation(e) => {
                tracing::warn!(error_id = error_id, error = %e, "Validation error");
            }
            AppError::Conflict(msg) => {
                tracing::warn!(error_id = error_id, error = %msg, "Duplicate entry attempt");
            }
            AppError::Auth(e) => {
                tracing::warn!(error_id = error_id, error = %e, "Authentication failure");
            }
            AppError::Token(e) => {
                tracing::warn!(error_id = error_id, error = %e, "Token verification failure");
            }
            AppError::Database(e) => {
                tracing::error!(error_id = error_id, error = %e, "Database error");
            }
            AppError::Integrity(msg) => {
                tracing::error!(error_id = error_id, error = %msg, "Data integrity fault");
            }
            AppError::Internal(msg) => {
                tracing::error!(error_id = error_id, error = %msg, "Internal error");
            }
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let error_id = uuid::Uuid::new_v4().to_string();
        self.log(&error_id);

        let (status, code, message) = self.response_parts();
        let body = ErrorResponse::new(error_id, message, code.to_string(), status.as_u16());

        HttpResponse::build(status).json(body)
    }

    fn status_code(&self) -> StatusCode {
        self.response_parts().0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_use_identical_message_for_unknown_email_and_wrong_password() {
        // Both failure paths surface InvalidCredentials; the single variant
        // guarantees the message cannot diverge.
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid email or password"
        );
    }

    #[test]
    fn password_policy_lists_every_violation() {
        let err = ValidationError::PasswordPolicy(vec![
            "Password must be at least 8 characters long".to_string(),
            "Password must contain at least one uppercase letter".to_string(),
        ]);
        let rendered = err.to_string();
        assert!(rendered.contains("at least 8 characters"));
        assert!(rendered.contains("one uppercase letter"));
    }

    #[test]
    fn unique_violation_maps_to_conflict() {
        let err = sqlx::Error::Protocol(
            "duplicate key value violates unique constraint \"users_email_key\"".into(),
        );
        match AppError::from(err) {
            AppError::Conflict(_) => (),
            other => panic!("Expected Conflict, got {:?}", other),
        }
    }

    #[test]
    fn status_codes_match_error_kinds() {
        assert_eq!(
            AppError::Validation(ValidationError::InvalidEmail).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Conflict("Email already registered".to_string()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Auth(AuthError::InvalidRefreshToken).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Token(TokenError::Expired).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Integrity("missing user".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn token_error_codes_are_distinct() {
        let codes = [
            TokenError::Missing.code(),
            TokenError::Malformed.code(),
            TokenError::Expired.code(),
            TokenError::InvalidSignature.code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
