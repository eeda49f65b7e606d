/**
 * Server Initialization
 *
 * This module builds the Axum application from the loaded configuration.
 *
 * # Initialization Process
 *
 * 1. Open the SQLite pool and run migrations
 * 2. Build `AppState` (credential store, token codec, cookie transport)
 * 3. Create the router with all routes and layers
 */

use axum::Router;
use sqlx::SqlitePool;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails if the database cannot be opened or migrated.
pub async fn create_app(config: AppConfig) -> Result<Router<()>, sqlx::Error> {
    tracing::info!("Initializing Stockroom backend ({} mode)", config.deployment);

    let db_pool = load_database(&config.database_url).await?;

    Ok(build_app(config, db_pool))
}

/// Build the application on an already-open pool
///
/// Used by `create_app` and by tests that supply an in-memory database.
pub fn build_app(config: AppConfig, db_pool: SqlitePool) -> Router<()> {
    let app_state = AppState::new(config, db_pool);
    let app = create_router(app_state);

    tracing::info!("Router configured");
    app
}
