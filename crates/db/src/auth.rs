//! Authentication gate: registration, login, logout and session lookup.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{DatabaseConnection, DbErr};
use tracing::info;

use tally_core::auth::{AuthError, hash_password, validate_registration, verify_password_or_dummy};
use tally_shared::types::AccountId;

use crate::entities::accounts;
use crate::repositories::{AccountError, AccountRepository, SessionRepository};

/// A freshly opened login session.
#[derive(Debug, Clone)]
pub struct LoginSession {
    /// The authenticated account.
    pub account: accounts::Model,
    /// Raw session token for the cookie.
    pub token: String,
    /// When the session stops being accepted.
    pub expires_at: DateTime<Utc>,
}

/// Authentication gate over the account and session repositories.
#[derive(Debug, Clone)]
pub struct AuthGate {
    accounts: AccountRepository,
    sessions: SessionRepository,
    session_ttl: Duration,
}

impl AuthGate {
    /// Creates a gate whose sessions last `session_ttl`.
    #[must_use]
    pub fn new(db: DatabaseConnection, session_ttl: Duration) -> Self {
        Self {
            accounts: AccountRepository::new(db.clone()),
            sessions: SessionRepository::new(db),
            session_ttl,
        }
    }

    /// Registers a new account with a zero balance.
    ///
    /// # Errors
    ///
    /// - `AuthError::Validation` if the name or password is blank
    /// - `AuthError::DuplicateName` if the name is taken
    pub async fn register(&self, name: &str, password: &str) -> Result<accounts::Model, AuthError> {
        validate_registration(name, password)?;
        let name = name.trim();

        if self.accounts.name_exists(name).await.map_err(db_error)? {
            return Err(AuthError::DuplicateName(name.to_string()));
        }

        let password_hash = hash_password(password)?;
        let account = self
            .accounts
            .create(name, &password_hash)
            .await
            .map_err(|e| match e {
                AccountError::DuplicateName(name) => AuthError::DuplicateName(name),
                other => AuthError::Database(other.to_string()),
            })?;

        info!(account_id = %account.id, name = %account.name, "New account registered");
        Ok(account)
    }

    /// Checks credentials and opens a session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the name is unknown or the
    /// password does not match.
    pub async fn login(&self, name: &str, password: &str) -> Result<LoginSession, AuthError> {
        let account = self
            .accounts
            .find_by_name(name.trim())
            .await
            .map_err(db_error)?;

        let verified =
            verify_password_or_dummy(password, account.as_ref().map(|a| a.password_hash.as_str()))?;

        let Some(account) = account.filter(|_| verified) else {
            info!(name = %name.trim(), "Failed login attempt");
            return Err(AuthError::InvalidCredentials);
        };

        let (token, session) = self
            .sessions
            .create(account.id, self.session_ttl)
            .await
            .map_err(db_error)?;

        info!(
            account_id = %account.id,
            session_id = %session.session_id(),
            "Account logged in"
        );
        Ok(LoginSession {
            account,
            token,
            expires_at: session.expires_at,
        })
    }

    /// Ends the session behind a token. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Database` on storage failure.
    pub async fn logout(&self, token: Option<&str>) -> Result<(), AuthError> {
        if let Some(token) = token
            && self.sessions.revoke_by_token(token).await.map_err(db_error)?
        {
            info!("Session revoked");
        }
        Ok(())
    }

    /// Resolves a session token to the account it belongs to.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` if there is no live session.
    pub async fn resolve(&self, token: &str) -> Result<AccountId, AuthError> {
        self.sessions
            .find_active(token)
            .await
            .map_err(db_error)?
            .map(|session| AccountId::from_uuid(session.account_id))
            .ok_or(AuthError::NotAuthenticated)
    }

    /// Returns the account repository behind this gate.
    #[must_use]
    pub const fn accounts(&self) -> &AccountRepository {
        &self.accounts
    }
}

fn db_error(err: DbErr) -> AuthError {
    AuthError::Database(err.to_string())
}
