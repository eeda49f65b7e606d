/**
 * Backend Error Types
 *
 * This module defines the errors returned by HTTP handlers.
 *
 * # Error Types
 *
 * - `AuthError` - Outcomes of signup, signin and session validation
 * - `BackendError` - Item routes (validation, missing records, database)
 *
 * # Auth error mapping
 *
 * | Variant                               | Status | Message                    |
 * |---------------------------------------|--------|----------------------------|
 * | `InvalidInput`                        | 400    | field-specific             |
 * | `DuplicateIdentifier`                 | 400    | "Username already taken"   |
 * | `UserNotFound` / `InvalidCredentials` | 400    | "Invalid credentials"      |
 * | `NoCredential`                        | 401    | "No token provided"        |
 * | `Token(..)`                           | 400    | "Invalid or expired token" |
 * | `Store(..)`                           | 500    | "Internal server error"    |
 */

use thiserror::Error;
use axum::http::StatusCode;

use crate::backend::auth::accounts::StoreError;
use crate::backend::auth::sessions::TokenError;

/// Message shown for both unknown users and wrong passwords
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";

/// Message shown for every token rejection
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired token";

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing or malformed username/password
    #[error("invalid {field}: {message}")]
    InvalidInput {
        field: &'static str,
        message: String,
    },

    /// Signup with a username that is already taken
    #[error("username already taken")]
    DuplicateIdentifier,

    /// Signin for an account that does not exist
    #[error("user not found")]
    UserNotFound,

    /// Signin with the wrong password
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Validation without a session cookie
    #[error("no session token provided")]
    NoCredential,

    /// Session token rejected or could not be issued
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Credential store fault
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidInput { field, message } => Self::InvalidInput { field, message },
            StoreError::DuplicateIdentifier => Self::DuplicateIdentifier,
            other => Self::Store(other),
        }
    }
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput { .. }
            | Self::DuplicateIdentifier
            | Self::UserNotFound
            | Self::InvalidCredentials => StatusCode::BAD_REQUEST,
            Self::NoCredential => StatusCode::UNAUTHORIZED,
            Self::Token(TokenError::Encoding(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Token(_) => StatusCode::BAD_REQUEST,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the message shown to the client
    ///
    /// Unknown users and wrong passwords share one message.
    pub fn message(&self) -> String {
        match self {
            Self::InvalidInput { message, .. } => message.clone(),
            Self::DuplicateIdentifier => "Username already taken".to_string(),
            Self::UserNotFound | Self::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE.to_string(),
            Self::NoCredential => "No token provided".to_string(),
            Self::Token(TokenError::Encoding(_)) => "Failed to create session".to_string(),
            Self::Token(_) => INVALID_TOKEN_MESSAGE.to_string(),
            Self::Store(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }

    /// Whether this error rejects a presented session token
    pub fn is_token_rejection(&self) -> bool {
        matches!(self, Self::Token(err) if !matches!(err, TokenError::Encoding(_)))
    }
}

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use stockroom::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
/// let err = BackendError::not_found("item", "42");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g., invalid request)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Requested record does not exist
    #[error("{resource} not found: {id}")]
    NotFound {
        resource: &'static str,
        id: String,
    },

    /// Request body failed validation
    #[error("Validation error in field '{field}': {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::NotFound { resource, .. } => {
                let mut resource = resource.to_string();
                if let Some(first) = resource.get_mut(0..1) {
                    first.make_ascii_uppercase();
                }
                format!("{} not found", resource)
            }
            Self::Validation { message, .. } => message.clone(),
            Self::Database(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}
