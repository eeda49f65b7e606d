/**
 * Authentication Handler Types
 *
 * Request and response bodies used by the auth handlers.
 */

use std::fmt;

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::backend::auth::sessions::Claims;
use crate::backend::error::AuthError;

/// Username/password pair submitted to signup and signin
///
/// Missing fields deserialize as empty strings so that they are reported by
/// the credential policy instead of the JSON extractor.
#[derive(Deserialize, Serialize, Default, Clone)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Sign up request
pub type SignupRequest = Credentials;

/// Sign in request
pub type SigninRequest = Credentials;

/// Unwrap a JSON body, turning extractor rejections into `InvalidInput`
pub fn credentials_from(payload: Result<Json<Credentials>, JsonRejection>) -> Result<Credentials, AuthError> {
    match payload {
        Ok(Json(credentials)) => Ok(credentials),
        Err(rejection) => {
            tracing::warn!("Rejected credentials body: {}", rejection.body_text());
            Err(AuthError::InvalidInput {
                field: "body",
                message: "Request body must be JSON with username and password".to_string(),
            })
        }
    }
}

/// Plain message response
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Session owner as reported by `/validate`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    /// Account username
    pub subject: String,
    /// Unix timestamp
    pub issued_at: i64,
    /// Unix timestamp
    pub expires_at: i64,
}

impl From<Claims> for SessionUser {
    fn from(claims: Claims) -> Self {
        Self {
            subject: claims.sub,
            issued_at: claims.iat,
            expires_at: claims.exp,
        }
    }
}

/// Successful validation response
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ValidateResponse {
    pub valid: bool,
    pub user: SessionUser,
}
