//! Stockroom - Main Library
//!
//! Stockroom is a small inventory backend: clients sign up, sign in with a
//! username and password, and then manage a list of items. Sessions are
//! stateless. A signed token, valid for one hour by default, travels in an
//! HttpOnly cookie and is verified on every request.
//!
//! # Module Structure
//!
//! - **`shared`** - Configuration
//!   - `AppConfig` and its builder, `DeploymentMode`, `ConfigError`
//!
//! - **`backend`** - Axum server
//!   - Credential store, token codec, cookie transport, auth service
//!   - Session middleware and item CRUD
//!   - Router assembly and startup
//!
//! # Usage
//!
//! ```rust,no_run
//! use stockroom::backend::server::create_app;
//! use stockroom::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(AppConfig::from_env()?).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `AuthError` for session operations, rendered as `{"message": ...}`
//! - `BackendError` for everything else
//! - `StoreError`, `TokenError` and `ConfigError` for the layers underneath

/// Shared types and configuration
pub mod shared;

/// Backend server-side code
pub mod backend;
