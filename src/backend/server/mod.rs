//! Server Module
//!
//! Initialization and configuration of the Axum HTTP server.
//!
//! # Architecture
//!
//! - **`state`** - `AppState` and its `FromRef` implementations
//! - **`config`** - SQLite pool creation and migrations
//! - **`init`** - Application assembly
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `AppConfig::from_env()` (in `main`)
//! 2. **Database**: open the pool and run migrations
//! 3. **State Creation**: wire the auth service over the credential store
//! 4. **Router Creation**: configure routes, CORS and request tracing
//!
//! # Example
//!
//! ```rust,no_run
//! use stockroom::backend::server::create_app;
//! use stockroom::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(AppConfig::from_env()?).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Database configuration
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use init::{build_app, create_app};
pub use state::AppState;
