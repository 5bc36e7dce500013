use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password, PasswordError};
use crate::auth::{JwtError, TokenKind, TokenService};
use crate::database::manager::DatabaseError;
use crate::database::models::{NewUser, User};
use crate::database::repository::UserStore;
use crate::validation::Credentials;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("User already exists")]
    DuplicateUser,

    #[error("User not found")]
    NotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Refresh token is required")]
    MissingToken,

    #[error("Invalid refresh token")]
    InvalidToken,

    #[error(transparent)]
    Database(DatabaseError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] JwtError),
}

impl From<DatabaseError> for AuthError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::UniqueViolation(_) => AuthError::DuplicateUser,
            other => AuthError::Database(other),
        }
    }
}

/// Result of a successful login
#[derive(Debug)]
pub struct Session {
    pub user: User,
    pub auth_token: String,
    pub refresh_token: String,
}

/// Register/login/refresh/logout over the credential store
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Uniqueness is left to the store's index; no pre-check
    pub async fn register(&self, credentials: Credentials) -> Result<User, AuthError> {
        let password_hash = hash_blocking(credentials.password).await?;

        let user = self
            .users
            .insert(NewUser {
                user_name: credentials.user_name,
                password_hash,
            })
            .await?;

        tracing::info!("Registered user {}", user.id);
        Ok(user)
    }

    pub async fn login(&self, credentials: Credentials) -> Result<Session, AuthError> {
        let user = self
            .users
            .find_by_user_name(&credentials.user_name)
            .await?
            .ok_or(AuthError::NotFound)?;

        if !verify_blocking(credentials.password, user.password_hash.clone()).await? {
            tracing::info!("Rejected login for user {}", user.id);
            return Err(AuthError::InvalidCredentials);
        }

        let auth_token = self.tokens.issue_access_token(user.id)?;
        let refresh_token = self.tokens.issue_refresh_token(user.id)?;

        // Overwrites whatever session the user had before
        self.users.set_refresh_token(user.id, Some(&refresh_token)).await?;

        tracing::info!("User {} logged in", user.id);
        Ok(Session {
            user,
            auth_token,
            refresh_token,
        })
    }

    /// Mints a new access token. The refresh token itself is not rotated.
    pub async fn refresh(&self, refresh_token: Option<&str>) -> Result<String, AuthError> {
        let refresh_token = refresh_token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let user = self
            .users
            .find_by_refresh_token(refresh_token)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        let claims = self
            .tokens
            .verify(refresh_token, TokenKind::Refresh)
            .map_err(|_| AuthError::InvalidToken)?;
        if claims.sno != user.id {
            return Err(AuthError::InvalidToken);
        }

        Ok(self.tokens.issue_access_token(user.id)?)
    }

    /// Clears the stored refresh token. Logging out twice is fine.
    pub async fn logout(&self, user_id: Uuid) -> Result<(), AuthError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::NotFound)?;

        self.users.set_refresh_token(user.id, None).await?;
        tracing::info!("User {} logged out", user.id);
        Ok(())
    }
}

async fn hash_blocking(password: String) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| PasswordError(e.to_string()))?
}

async fn verify_blocking(password: String, hash: String) -> Result<bool, PasswordError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| PasswordError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::database::memory::MemoryUserStore;

    fn setup() -> (AuthService, Arc<MemoryUserStore>) {
        let users = Arc::new(MemoryUserStore::new());
        let tokens = Arc::new(TokenService::new(&AppConfig::development().security));
        (AuthService::new(users.clone(), tokens), users)
    }

    fn creds(user_name: &str, password: &str) -> Credentials {
        Credentials {
            user_name: user_name.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn duplicate_registration_keeps_one_user() {
        let (service, users) = setup();
        service.register(creds("admin", "Secret#123")).await.unwrap();

        let err = service.register(creds("admin", "Other#4567")).await.unwrap_err();
        assert!(matches!(err, AuthError::DuplicateUser));
        assert_eq!(users.len().await, 1);
    }

    #[tokio::test]
    async fn password_is_never_stored_in_plaintext() {
        let (service, _) = setup();
        let user = service.register(creds("admin", "Secret#123")).await.unwrap();
        assert_ne!(user.password_hash, "Secret#123");
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn login_distinguishes_unknown_user_and_bad_password() {
        let (service, _) = setup();
        service.register(creds("admin", "Secret#123")).await.unwrap();

        let err = service.login(creds("nobody", "Secret#123")).await.unwrap_err();
        assert!(matches!(err, AuthError::NotFound));

        let err = service.login(creds("admin", "Wrong#1234")).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_persists_latest_refresh_token() {
        let (service, users) = setup();
        service.register(creds("admin", "Secret#123")).await.unwrap();

        let first = service.login(creds("admin", "Secret#123")).await.unwrap();
        let second = service.login(creds("admin", "Secret#123")).await.unwrap();
        assert_ne!(first.refresh_token, second.refresh_token);

        let stored = users.find_by_id(second.user.id).await.unwrap().unwrap();
        assert_eq!(stored.refresh_token.as_deref(), Some(second.refresh_token.as_str()));

        // The overwritten token no longer refreshes
        let err = service.refresh(Some(&first.refresh_token)).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn refresh_issues_access_token() {
        let (service, _) = setup();
        service.register(creds("admin", "Secret#123")).await.unwrap();
        let session = service.login(creds("admin", "Secret#123")).await.unwrap();

        let token = service.refresh(Some(&session.refresh_token)).await.unwrap();
        let claims = service.tokens.verify(&token, TokenKind::Access).unwrap();
        assert_eq!(claims.sno, session.user.id);
    }

    #[tokio::test]
    async fn refresh_requires_a_token() {
        let (service, _) = setup();
        assert!(matches!(service.refresh(None).await, Err(AuthError::MissingToken)));
        assert!(matches!(service.refresh(Some("")).await, Err(AuthError::MissingToken)));
        assert!(matches!(
            service.refresh(Some("not-a-token")).await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn refresh_after_logout_fails() {
        let (service, _) = setup();
        service.register(creds("admin", "Secret#123")).await.unwrap();
        let session = service.login(creds("admin", "Secret#123")).await.unwrap();

        service.logout(session.user.id).await.unwrap();
        service.logout(session.user.id).await.unwrap();

        let err = service.refresh(Some(&session.refresh_token)).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn logout_unknown_user() {
        let (service, _) = setup();
        let err = service.logout(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AuthError::NotFound));
    }
}
