/**
 * Authentication Middleware
 *
 * This module protects routes that require a signed-in user. It reads the
 * session cookie, validates it through `AuthService`, and attaches the
 * session owner to the request extensions.
 */

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::{DateTime, Utc};

use crate::backend::auth::service::AuthService;
use crate::backend::error::AuthError;

/// Session owner extracted from a valid session cookie
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub subject: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Authentication middleware
///
/// This middleware:
/// 1. Reads the `token` cookie
/// 2. Verifies the token
/// 3. Attaches `AuthenticatedUser` to the request extensions
///
/// Rejects with the same responses as `/api/auth/validate`: 401 without a
/// cookie, 400 `{"valid": false}` for a bad or expired token.
pub async fn require_session(
    State(auth): State<Arc<AuthService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let jar = CookieJar::from_headers(request.headers());
    let claims = auth.validate(&jar)?;

    request.extensions_mut().insert(AuthenticatedUser {
        expires_at: claims.expires_at(),
        subject: claims.sub,
    });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Only valid on routes behind `require_session`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                AuthError::NoCredential
            })?;

        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::transport::SESSION_COOKIE;
    use crate::backend::server::state::test_state;
    use axum::{body::Body, http::StatusCode, middleware, routing::get, Router};
    use tower::ServiceExt;

    async fn whoami(AuthUser(user): AuthUser) -> String {
        user.subject
    }

    async fn app() -> (Router, Arc<AuthService>) {
        let state = test_state().await;
        let auth = state.auth.clone();
        let router = Router::new()
            .route("/whoami", get(whoami))
            .route_layer(middleware::from_fn_with_state(state.clone(), require_session))
            .with_state(state);
        (router, auth)
    }

    #[tokio::test]
    async fn test_extractor_without_middleware() {
        let app: Router = Router::new().route("/whoami", get(whoami));

        let response = app
            .oneshot(Request::builder().uri("/whoami").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_cookie_passes() {
        let (app, auth) = app().await;
        let token = auth.codec().issue("alice").unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/whoami")
                    .header("cookie", format!("{}={}", SESSION_COOKIE, token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"alice");
    }

    #[tokio::test]
    async fn test_missing_cookie_rejected() {
        let (app, _) = app().await;

        let response = app
            .oneshot(Request::builder().uri("/whoami").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_bad_cookie_rejected() {
        let (app, _) = app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/whoami")
                    .header("cookie", format!("{}=invalid.token.here", SESSION_COOKIE))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
