/**
 * Signin Handler
 *
 * This module implements POST /api/auth/signin.
 *
 * # Authentication Process
 *
 * 1. Look up the account by username
 * 2. Verify the password using bcrypt
 * 3. Issue a signed session token
 * 4. Set it as the `token` cookie
 *
 * # Security
 *
 * - Unknown usernames and wrong passwords get the same 400 response
 * - The token only ever travels in an HttpOnly cookie, never in the body
 */

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use axum_extra::extract::cookie::CookieJar;

use crate::backend::auth::handlers::types::{credentials_from, MessageResponse, SigninRequest};
use crate::backend::auth::service::AuthService;
use crate::backend::error::AuthError;

/// Sign in handler
///
/// # Errors
///
/// * `400 Bad Request` - "Invalid credentials" for an unknown user or a
///   wrong password; field message for a malformed body
/// * `500 Internal Server Error` - If the database or token issuing fails
pub async fn signin(
    State(auth): State<Arc<AuthService>>,
    jar: CookieJar,
    payload: Result<Json<SigninRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<MessageResponse>), AuthError> {
    let request = credentials_from(payload)?;
    tracing::info!("Signin request for: {}", request.username);

    let jar = auth.signin(jar, &request.username, &request.password).await?;

    Ok((jar, Json(MessageResponse::new("Logged in successfully"))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::handlers::types::Credentials;
    use crate::backend::auth::transport::SESSION_COOKIE;
    use crate::backend::server::state::test_state;
    use axum::http::StatusCode;

    fn request(username: &str, password: &str) -> Result<Json<SigninRequest>, JsonRejection> {
        Ok(Json(Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }))
    }

    #[tokio::test]
    async fn test_signin_success() {
        let state = test_state().await;
        state.auth.signup("alice", "password123").await.unwrap();

        let (jar, Json(body)) = signin(State(state.auth.clone()), CookieJar::new(), request("alice", "password123"))
            .await
            .unwrap();
        assert_eq!(body.message, "Logged in successfully");
        assert!(jar.get(SESSION_COOKIE).is_some());
    }

    #[tokio::test]
    async fn test_signin_invalid_password() {
        let state = test_state().await;
        state.auth.signup("alice", "password123").await.unwrap();

        let err = signin(State(state.auth.clone()), CookieJar::new(), request("alice", "wrongpassword"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Invalid credentials");
    }

    #[tokio::test]
    async fn test_signin_user_not_found() {
        let state = test_state().await;

        let err = signin(State(state.auth.clone()), CookieJar::new(), request("nobody", "password123"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Invalid credentials");
    }
}
