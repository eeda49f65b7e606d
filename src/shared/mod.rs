//! Shared Module
//!
//! Types that do not depend on the HTTP layer: application configuration
//! and the deployment mode switch. Everything here can be constructed in
//! tests without a running server or database.

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError, DeploymentMode};
