//! Middleware Module
//!
//! HTTP middleware for the backend server.
//!
//! - **`auth`** - Session-cookie access control for the item routes
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::middleware;
//! use stockroom::backend::middleware::require_session;
//!
//! let protected = Router::new()
//!     .route("/api/items", get(list_items))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_session));
//! ```

pub mod auth;

pub use auth::{require_session, AuthUser, AuthenticatedUser};
