//! Authentication Module
//!
//! Account registration and stateless cookie sessions.
//!
//! # Architecture
//!
//! - **`accounts`** - Account model, bcrypt hashing, SQLite credential store
//! - **`sessions`** - Signed session token (JWT) codec
//! - **`transport`** - The `token` cookie: attach, clear, read
//! - **`service`** - `AuthService`, which composes the three above
//! - **`handlers`** - HTTP handlers for `/api/auth/*`
//!
//! # Authentication Flow
//!
//! 1. **Signup**: username + password → account created (no session)
//! 2. **Signin**: credentials verified → token issued → `token` cookie set
//! 3. **Validate**: cookie read → token verified → subject returned
//! 4. **Logout**: cookie cleared
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens are HS256 JWTs that expire after the configured validity window
//!   (one hour by default)
//! - The cookie is HttpOnly and SameSite=Strict, and Secure in production
//! - Unknown users and wrong passwords get the same response

/// Account model and credential store
pub mod accounts;

/// Session token codec
pub mod sessions;

/// Session cookie transport
pub mod transport;

/// Session lifecycle orchestration
pub mod service;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use accounts::{Account, CredentialPolicy, CredentialStore, SqliteCredentialStore, StoreError};
pub use handlers::{logout, signin, signup, validate};
pub use service::AuthService;
pub use sessions::{Claims, TokenCodec, TokenError};
pub use transport::{SessionTransport, SESSION_COOKIE};
