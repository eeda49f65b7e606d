/**
 * Logout Handler
 *
 * POST /api/auth/logout. Always answers 200 and sends a removal cookie,
 * whether or not the request carried a session.
 */

use std::sync::Arc;

use axum::{extract::State, response::Json};
use axum_extra::extract::cookie::CookieJar;

use crate::backend::auth::handlers::types::MessageResponse;
use crate::backend::auth::service::AuthService;

pub async fn logout(
    State(auth): State<Arc<AuthService>>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    (
        auth.logout(jar),
        Json(MessageResponse::new("Logged out successfully")),
    )
}
