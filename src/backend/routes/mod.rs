//! Route Configuration Module
//!
//! # Architecture
//!
//! - **`router`** - Main router creation and cross-cutting layers
//! - **`api_routes`** - Auth and item route groups
//!
//! # Route Types
//!
//! ## Auth Routes
//!
//! - `POST /api/auth/signup`
//! - `POST /api/auth/signin`
//! - `POST /api/auth/logout`
//! - `GET /api/auth/validate`
//!
//! ## Item Routes (session required)
//!
//! - `GET|POST /api/items`
//! - `GET|PUT|DELETE /api/items/{id}`

/// Main router creation
pub mod router;

/// API route groups
pub mod api_routes;

// Re-export commonly used functions
pub use router::create_router;
