/**
 * Session Validation Handler
 *
 * This module implements GET /api/auth/validate, which reports who the
 * session cookie belongs to.
 *
 * # Response
 *
 * ```json
 * { "valid": true, "user": { "subject": "bob", "issued_at": 1700000000, "expires_at": 1700003600 } }
 * ```
 *
 * The token is not refreshed; `expires_at` stays what it was at signin.
 */

use std::sync::Arc;

use axum::{extract::State, response::Json};
use axum_extra::extract::cookie::CookieJar;

use crate::backend::auth::handlers::types::ValidateResponse;
use crate::backend::auth::service::AuthService;
use crate::backend::error::AuthError;

/// Validate session handler
///
/// # Errors
///
/// * `401 Unauthorized` - No session cookie
/// * `400 Bad Request` - `{"valid": false}` for a malformed, forged or
///   expired token
pub async fn validate(
    State(auth): State<Arc<AuthService>>,
    jar: CookieJar,
) -> Result<Json<ValidateResponse>, AuthError> {
    let claims = auth.validate(&jar)?;

    Ok(Json(ValidateResponse {
        valid: true,
        user: claims.into(),
    }))
}
