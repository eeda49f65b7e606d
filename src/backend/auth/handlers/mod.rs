//! Authentication Handlers Module
//!
//! HTTP handlers for the session endpoints. Each handler is a thin wrapper
//! around one `AuthService` operation.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs       - Handler exports
//! ├── types.rs     - Request and response types
//! ├── signup.rs    - POST /api/auth/signup
//! ├── signin.rs    - POST /api/auth/signin
//! ├── logout.rs    - POST /api/auth/logout
//! └── validate.rs  - GET  /api/auth/validate
//! ```

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Signin handler
pub mod signin;

/// Logout handler
pub mod logout;

/// Session validation handler
pub mod validate;

// Re-export commonly used types
pub use types::{Credentials, MessageResponse, SessionUser, SigninRequest, SignupRequest, ValidateResponse};

// Re-export handlers
pub use logout::logout;
pub use signin::signin;
pub use signup::signup;
pub use validate::validate;
