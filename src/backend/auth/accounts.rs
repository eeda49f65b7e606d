/**
 * Account Model and Credential Store
 *
 * This module owns account persistence and password hashing.
 *
 * # Storage
 *
 * Accounts live in the `accounts` table. The `username` column carries a
 * UNIQUE index; concurrent signups for the same name are decided by that
 * index, and the loser gets `StoreError::DuplicateIdentifier`.
 *
 * # Hashing
 *
 * Passwords are hashed with bcrypt (salted, tunable cost). Hashing and
 * verification run on the blocking thread pool so they do not stall the
 * async workers.
 */

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use thiserror::Error;
use uuid::Uuid;

/// bcrypt ignores everything past this many bytes
pub const BCRYPT_MAX_PASSWORD_BYTES: usize = 72;

/// Account record as stored in the database
#[derive(Clone, sqlx::FromRow)]
pub struct Account {
    /// Surrogate key
    pub id: Uuid,
    /// Unique account identifier chosen at signup
    pub username: String,
    /// bcrypt hash of the password
    pub password_hash: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Credential store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Username or password rejected by the credential policy
    #[error("invalid {field}: {message}")]
    InvalidInput {
        field: &'static str,
        message: String,
    },

    /// An account with this username already exists
    #[error("username already taken")]
    DuplicateIdentifier,

    /// bcrypt failed to hash or verify
    #[error("password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    /// The blocking hash task panicked or was cancelled
    #[error("hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Any other database failure
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => Self::DuplicateIdentifier,
            _ => Self::Database(err),
        }
    }
}

/// Validation rules applied before an account is created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialPolicy {
    pub max_username_chars: usize,
    pub min_password_bytes: usize,
    pub max_password_bytes: usize,
}

impl Default for CredentialPolicy {
    fn default() -> Self {
        Self {
            max_username_chars: 64,
            min_password_bytes: 1,
            max_password_bytes: BCRYPT_MAX_PASSWORD_BYTES,
        }
    }
}

impl CredentialPolicy {
    /// Check a username/password pair against the policy
    pub fn check(&self, username: &str, password: &str) -> Result<(), StoreError> {
        if username.trim().is_empty() {
            return Err(invalid("username", "Username is required"));
        }
        if username.trim() != username {
            return Err(invalid(
                "username",
                "Username cannot start or end with whitespace",
            ));
        }
        if username.chars().count() > self.max_username_chars {
            return Err(invalid(
                "username",
                format!("Username must be at most {} characters", self.max_username_chars),
            ));
        }
        if password.len() < self.min_password_bytes.max(1) {
            return Err(invalid("password", "Password is required"));
        }
        let max_password_bytes = self.max_password_bytes.min(BCRYPT_MAX_PASSWORD_BYTES);
        if password.len() > max_password_bytes {
            return Err(invalid(
                "password",
                format!("Password must be at most {} bytes", max_password_bytes),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, message: impl Into<String>) -> StoreError {
    StoreError::InvalidInput {
        field,
        message: message.into(),
    }
}

/// Persistence of accounts and verification of their passwords
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Validate, hash and persist a new account
    async fn create_account(&self, username: &str, password: &str) -> Result<Account, StoreError>;

    /// Look up an account by username
    async fn find_account(&self, username: &str) -> Result<Option<Account>, StoreError>;

    /// Compare a raw password with the account's stored hash
    async fn verify_password(&self, account: &Account, password: &str) -> Result<bool, StoreError> {
        let password = password.to_owned();
        let hash = account.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
        Ok(valid)
    }
}

/// SQLite-backed credential store
#[derive(Clone)]
pub struct SqliteCredentialStore {
    pool: SqlitePool,
    cost: u32,
    policy: CredentialPolicy,
}

impl SqliteCredentialStore {
    pub fn new(pool: SqlitePool, cost: u32) -> Self {
        Self {
            pool,
            cost,
            policy: CredentialPolicy::default(),
        }
    }

    /// Replace the default credential policy
    pub fn with_policy(mut self, policy: CredentialPolicy) -> Self {
        self.policy = policy;
        self
    }
}

#[async_trait]
impl CredentialStore for SqliteCredentialStore {
    async fn create_account(&self, username: &str, password: &str) -> Result<Account, StoreError> {
        self.policy.check(username, password)?;

        let cost = self.cost;
        let raw = password.to_owned();
        let password_hash = tokio::task::spawn_blocking(move || bcrypt::hash(raw, cost)).await??;

        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (id, username, password_hash, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(&password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(account)
    }

    async fn find_account(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM accounts
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::server::config::in_memory_database;

    async fn store() -> SqliteCredentialStore {
        let pool = in_memory_database().await.unwrap();
        SqliteCredentialStore::new(pool, 4)
    }

    #[tokio::test]
    async fn test_create_and_find_account() {
        let store = store().await;

        let created = store.create_account("alice", "correct horse").await.unwrap();
        let found = store.find_account("alice").await.unwrap().unwrap();

        assert_eq!(found.id, created.id);
        assert_eq!(found.username, "alice");
        assert_ne!(found.password_hash, "correct horse");
        assert!(store.verify_password(&found, "correct horse").await.unwrap());
        assert!(!store.verify_password(&found, "wrong horse").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_username_keeps_original() {
        let store = store().await;

        let original = store.create_account("bob", "p1").await.unwrap();
        let err = store.create_account("bob", "p2").await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateIdentifier));

        let found = store.find_account("bob").await.unwrap().unwrap();
        assert_eq!(found.password_hash, original.password_hash);
        assert!(store.verify_password(&found, "p1").await.unwrap());
    }

    #[tokio::test]
    async fn test_find_missing_account() {
        let store = store().await;
        assert!(store.find_account("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rejects_empty_fields() {
        let store = store().await;

        let err = store.create_account("", "secret").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput { field: "username", .. }));

        let err = store.create_account("carol", "").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput { field: "password", .. }));

        assert!(store.find_account("carol").await.unwrap().is_none());
    }

    #[test]
    fn test_policy_limits() {
        let policy = CredentialPolicy::default();
        assert!(policy.check("alice", "x").is_ok());
        assert!(policy.check("   ", "x").is_err());
        assert!(policy.check(" alice", "x").is_err());
        assert!(policy.check(&"a".repeat(65), "x").is_err());
        assert!(policy.check("alice", &"p".repeat(73)).is_err());

        let strict = CredentialPolicy {
            min_password_bytes: 8,
            ..CredentialPolicy::default()
        };
        assert!(strict.check("alice", "short").is_err());
        assert!(strict.check("alice", "long enough").is_ok());
    }

    #[test]
    fn test_password_limit_capped_by_bcrypt() {
        let loose = CredentialPolicy {
            max_password_bytes: 200,
            ..CredentialPolicy::default()
        };

        match loose.check("alice", &"p".repeat(73)) {
            Err(StoreError::InvalidInput { field, message }) => {
                assert_eq!(field, "password");
                assert_eq!(message, "Password must be at most 72 bytes");
            }
            other => panic!("expected InvalidInput, got {:?}", other),
        }
        assert!(loose.check("alice", &"p".repeat(72)).is_ok());
    }

    #[test]
    fn test_debug_redacts_hash() {
        let account = Account {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            password_hash: "$2b$04$secret".to_string(),
            created_at: Utc::now(),
        };
        assert!(!format!("{:?}", account).contains("$2b$04$secret"));
    }
}
