//! Backend Module
//!
//! All server-side code: an Axum HTTP server with cookie sessions in front
//! of a SQLite-backed item store.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, database
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Accounts, session tokens, session cookie, auth service
//! - **`middleware`** - Session access control
//! - **`items`** - Item CRUD
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Binary entry point
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── middleware/     - Request middleware
//! ├── items/          - Item store
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds the `AuthService`, the SQLite pool and the configuration.
//! There is no in-memory session table: every request's session is
//! rebuilt from its cookie, so no cross-request locking is needed.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and account management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Item CRUD
pub mod items;

/// Re-export commonly used types
pub use auth::AuthService;
pub use error::{AuthError, BackendError};
pub use server::{create_app, AppState};
