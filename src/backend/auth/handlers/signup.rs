/**
 * Signup Handler
 *
 * This module implements the account registration handler for
 * POST /api/auth/signup.
 *
 * # Registration Process
 *
 * 1. Validate username and password against the credential policy
 * 2. Hash the password using bcrypt
 * 3. Insert the account; the UNIQUE index rejects duplicates
 *
 * Signup does not sign the caller in. No cookie is set.
 */

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::auth::handlers::types::{credentials_from, MessageResponse, SignupRequest};
use crate::backend::auth::service::AuthService;
use crate::backend::error::AuthError;

/// Sign up handler
///
/// # Errors
///
/// * `400 Bad Request` - If the username or password is missing or invalid,
///   or the username is already taken
/// * `500 Internal Server Error` - If hashing or the database fails
///
/// # Example Request
///
/// ```http
/// POST /api/auth/signup HTTP/1.1
/// Content-Type: application/json
///
/// { "username": "bob", "password": "p1" }
/// ```
///
/// # Example Response
///
/// ```json
/// { "message": "User created successfully" }
/// ```
pub async fn signup(
    State(auth): State<Arc<AuthService>>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AuthError> {
    let request = credentials_from(payload)?;
    tracing::info!("Signup request for username: {}", request.username);

    auth.signup(&request.username, &request.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created successfully")),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::handlers::types::Credentials;
    use crate::backend::server::state::test_state;

    fn request(username: &str, password: &str) -> Result<Json<SignupRequest>, JsonRejection> {
        Ok(Json(Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }))
    }

    #[tokio::test]
    async fn test_signup_success() {
        let state = test_state().await;

        let (status, Json(body)) = signup(State(state.auth.clone()), request("newuser", "password123"))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.message, "User created successfully");
    }

    #[tokio::test]
    async fn test_signup_missing_password() {
        let state = test_state().await;

        let err = signup(State(state.auth.clone()), request("newuser", ""))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(matches!(err, AuthError::InvalidInput { field: "password", .. }));
    }

    #[tokio::test]
    async fn test_signup_duplicate_username() {
        let state = test_state().await;

        let _ = signup(State(state.auth.clone()), request("duplicate", "password123")).await;
        let err = signup(State(state.auth.clone()), request("duplicate", "password123"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Username already taken");
    }
}
