/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` holds:
 * - The `AuthService` (credential store, token codec, cookie transport)
 * - The SQLite connection pool, used directly by the item routes
 * - The immutable application configuration
 *
 * There is no per-session state. Everything is behind `Arc` or is a cheap
 * clone (the pool), so cloning `AppState` per request is free.
 *
 * # State Extraction
 *
 * The `FromRef` implementations let handlers extract only what they need:
 *
 * ```rust,ignore
 * async fn handler(State(auth): State<Arc<AuthService>>) { ... }
 * async fn other(State(pool): State<SqlitePool>) { ... }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::accounts::SqliteCredentialStore;
use crate::backend::auth::service::AuthService;
use crate::shared::AppConfig;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Session operations
    pub auth: Arc<AuthService>,
    /// Database connection pool
    pub db_pool: SqlitePool,
    /// Configuration loaded at startup
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Wire the services for `config` on top of `pool`
    pub fn new(config: AppConfig, pool: SqlitePool) -> Self {
        let store = Arc::new(SqliteCredentialStore::new(pool.clone(), config.bcrypt_cost));
        let auth = Arc::new(AuthService::from_config(store, &config));

        Self {
            auth,
            db_pool: pool,
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth.clone()
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

/// State over a fresh in-memory database with a fast bcrypt cost
#[cfg(test)]
pub(crate) async fn test_state() -> AppState {
    use crate::backend::server::config::in_memory_database;

    let config = AppConfig::builder()
        .jwt_secret("test-secret")
        .bcrypt_cost(4)
        .build()
        .expect("test config");
    let pool = in_memory_database().await.expect("in-memory database");
    AppState::new(config, pool)
}
