/**
 * Authentication Service
 *
 * Composes the credential store, token codec and cookie transport into the
 * four session operations.
 *
 * # States
 *
 * A client is either anonymous or authenticated as some username. The
 * server keeps no session table: the state is rebuilt on every request from
 * the `token` cookie.
 *
 * | Operation  | From          | To            |
 * |------------|---------------|---------------|
 * | `signup`   | anonymous     | anonymous     |
 * | `signin`   | anonymous     | authenticated |
 * | `logout`   | any           | anonymous     |
 * | `validate` | any           | unchanged     |
 *
 * `validate` never refreshes the token; expiry is fixed at issue time.
 */

use std::sync::Arc;

use axum_extra::extract::cookie::CookieJar;

use crate::backend::auth::accounts::{Account, CredentialStore};
use crate::backend::auth::sessions::{Claims, TokenCodec, TokenError};
use crate::backend::auth::transport::SessionTransport;
use crate::backend::error::AuthError;
use crate::shared::AppConfig;

/// Session lifecycle operations
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    codec: TokenCodec,
    transport: SessionTransport,
}

impl AuthService {
    pub fn new(store: Arc<dyn CredentialStore>, codec: TokenCodec, transport: SessionTransport) -> Self {
        Self {
            store,
            codec,
            transport,
        }
    }

    /// Build the service from application configuration
    ///
    /// The cookie lifetime is taken from the same TTL as the token.
    pub fn from_config(store: Arc<dyn CredentialStore>, config: &AppConfig) -> Self {
        let codec = TokenCodec::new(config.jwt_secret.as_bytes(), config.token_ttl);
        let transport = SessionTransport::new(config.deployment, config.token_ttl);
        Self::new(store, codec, transport)
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Create an account. Does not sign the caller in.
    pub async fn signup(&self, username: &str, password: &str) -> Result<Account, AuthError> {
        let account = self.store.create_account(username, password).await.map_err(|e| {
            let err = AuthError::from(e);
            match &err {
                AuthError::DuplicateIdentifier => {
                    tracing::warn!("Signup rejected, username taken: {}", username)
                }
                AuthError::InvalidInput { field, .. } => {
                    tracing::warn!("Signup rejected, invalid {}", field)
                }
                _ => tracing::error!("Signup failed: {}", err),
            }
            err
        })?;

        tracing::info!("Account created: {}", account.username);
        Ok(account)
    }

    /// Check credentials and attach a fresh session cookie to `jar`
    ///
    /// # Errors
    ///
    /// * `UserNotFound` / `InvalidCredentials` - shown to the client as the
    ///   same message
    /// * `Store` - database or hashing fault
    pub async fn signin(
        &self,
        jar: CookieJar,
        username: &str,
        password: &str,
    ) -> Result<CookieJar, AuthError> {
        let account = self.store.find_account(username).await?.ok_or_else(|| {
            tracing::warn!("Signin for unknown user: {}", username);
            AuthError::UserNotFound
        })?;

        if !self.store.verify_password(&account, password).await? {
            tracing::warn!("Invalid password for user: {}", username);
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.codec.issue(&account.username)?;

        tracing::info!("User signed in: {}", account.username);
        Ok(self.transport.attach(jar, token))
    }

    /// Clear the session cookie. Succeeds whether or not a session existed.
    pub fn logout(&self, jar: CookieJar) -> CookieJar {
        self.transport.clear(jar)
    }

    /// Decode the session carried by `jar`
    pub fn validate(&self, jar: &CookieJar) -> Result<Claims, AuthError> {
        let token = self.transport.read(jar).ok_or(AuthError::NoCredential)?;

        self.codec.verify(&token).map_err(|err| {
            match err {
                TokenError::Expired => tracing::warn!("Session token expired"),
                TokenError::SignatureInvalid => tracing::warn!("Session token signature mismatch"),
                TokenError::Malformed => tracing::warn!("Malformed session token"),
                TokenError::Encoding(_) => {}
            }
            AuthError::Token(err)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::accounts::{SqliteCredentialStore, StoreError};
    use crate::backend::auth::transport::SESSION_COOKIE;
    use crate::backend::server::config::in_memory_database;
    use crate::shared::DeploymentMode;
    use async_trait::async_trait;
    use axum_extra::extract::cookie::Cookie;
    use std::time::Duration;

    async fn service() -> AuthService {
        let pool = in_memory_database().await.unwrap();
        let store = Arc::new(SqliteCredentialStore::new(pool, 4));
        AuthService::new(
            store,
            TokenCodec::new(b"test-secret", Duration::from_secs(3600)),
            SessionTransport::new(DeploymentMode::Development, Duration::from_secs(3600)),
        )
    }

    fn session_of(jar: &CookieJar) -> Option<String> {
        jar.get(SESSION_COOKIE).map(|c| c.value().to_string())
    }

    #[tokio::test]
    async fn test_signin_then_validate() {
        let auth = service().await;
        auth.signup("alice", "correct").await.unwrap();

        let jar = auth.signin(CookieJar::new(), "alice", "correct").await.unwrap();
        assert!(session_of(&jar).is_some());

        let claims = auth.validate(&jar).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[tokio::test]
    async fn test_signin_wrong_password() {
        let auth = service().await;
        auth.signup("alice", "correct").await.unwrap();

        let err = auth.signin(CookieJar::new(), "alice", "wrong").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(err.message(), "Invalid credentials");
    }

    #[tokio::test]
    async fn test_signin_unknown_user() {
        let auth = service().await;

        let err = auth.signin(CookieJar::new(), "ghost", "whatever").await.unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
        assert_eq!(err.message(), "Invalid credentials");
    }

    #[tokio::test]
    async fn test_signup_duplicate() {
        let auth = service().await;
        auth.signup("bob", "p1").await.unwrap();

        let err = auth.signup("bob", "p2").await.unwrap_err();
        assert!(matches!(err, AuthError::DuplicateIdentifier));

        // original password still works
        assert!(auth.signin(CookieJar::new(), "bob", "p1").await.is_ok());
    }

    #[tokio::test]
    async fn test_logout_then_validate() {
        let auth = service().await;
        auth.signup("alice", "correct").await.unwrap();

        let jar = auth.signin(CookieJar::new(), "alice", "correct").await.unwrap();
        let jar = auth.logout(jar);
        assert!(matches!(auth.validate(&jar), Err(AuthError::NoCredential)));

        // logout without a session is fine too
        let jar = auth.logout(CookieJar::new());
        assert!(matches!(auth.validate(&jar), Err(AuthError::NoCredential)));
    }

    #[tokio::test]
    async fn test_validate_foreign_token() {
        let auth = service().await;
        let foreign = TokenCodec::new(b"other-secret", Duration::from_secs(3600))
            .issue("alice")
            .unwrap();

        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, foreign));
        assert!(matches!(
            auth.validate(&jar),
            Err(AuthError::Token(TokenError::SignatureInvalid))
        ));
    }

    struct BrokenStore;

    #[async_trait]
    impl CredentialStore for BrokenStore {
        async fn create_account(&self, _: &str, _: &str) -> Result<Account, StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn find_account(&self, _: &str) -> Result<Option<Account>, StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }
    }

    #[tokio::test]
    async fn test_store_fault_is_distinct() {
        let auth = AuthService::new(
            Arc::new(BrokenStore),
            TokenCodec::new(b"test-secret", Duration::from_secs(3600)),
            SessionTransport::new(DeploymentMode::Development, Duration::from_secs(3600)),
        );

        let err = auth.signin(CookieJar::new(), "alice", "pw").await.unwrap_err();
        assert!(matches!(err, AuthError::Store(_)));
        assert_eq!(err.status_code(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);

        let err = auth.signup("alice", "pw").await.unwrap_err();
        assert!(matches!(err, AuthError::Store(_)));
    }
}
