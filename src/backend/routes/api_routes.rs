/**
 * API Route Handlers
 *
 * # Routes
 *
 * ## Authentication (public)
 * - `POST /api/auth/signup` - Create an account
 * - `POST /api/auth/signin` - Sign in, sets the `token` cookie
 * - `POST /api/auth/logout` - Clear the `token` cookie
 * - `GET /api/auth/validate` - Report the session owner
 *
 * ## Items (require a session)
 * - `GET /api/items` / `POST /api/items`
 * - `GET /api/items/{id}` / `PUT /api/items/{id}` / `DELETE /api/items/{id}`
 */

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::backend::auth::{logout, signin, signup, validate};
use crate::backend::items::handlers::{create_item, delete_item, get_item, list_items, update_item};
use crate::backend::middleware::require_session;
use crate::backend::server::state::AppState;

/// Configure authentication routes
pub fn configure_auth_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/signin", post(signin))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/validate", get(validate))
}

/// Configure item routes behind the session middleware
///
/// The middleware is applied with `route_layer`, so unknown paths still
/// fall through to the 404 fallback instead of answering 401.
pub fn configure_item_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let items = Router::new()
        .route("/api/items", get(list_items).post(create_item))
        .route(
            "/api/items/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            require_session,
        ));

    router.merge(items)
}
