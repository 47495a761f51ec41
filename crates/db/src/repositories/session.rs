//! Session repository for login cookies.
//!
//! The browser holds a random token; the database only ever sees its
//! SHA-256 digest.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    sea_query::Expr,
};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use tally_shared::types::SessionId;

use crate::entities::sessions;

impl sessions::Model {
    /// Returns the typed session ID.
    #[must_use]
    pub const fn session_id(&self) -> SessionId {
        SessionId::from_uuid(self.id)
    }
}

/// Session repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    db: DatabaseConnection,
}

impl SessionRepository {
    /// Creates a new session repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Hashes a session token for storage.
    #[must_use]
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Generates a random URL-safe session token.
    #[must_use]
    pub fn generate_token() -> String {
        let bytes: [u8; 32] = rand::random();
        base64_url::encode(&bytes)
    }

    /// Opens a session for an account.
    ///
    /// Returns the raw token (for the cookie) and the stored row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        account_id: Uuid,
        ttl: Duration,
    ) -> Result<(String, sessions::Model), DbErr> {
        let raw_token = Self::generate_token();
        let now = Utc::now();

        let session = sessions::ActiveModel {
            id: Set(SessionId::new().into_inner()),
            account_id: Set(account_id),
            token_hash: Set(Self::hash_token(&raw_token)),
            expires_at: Set(now + ttl),
            revoked_at: Set(None),
            created_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        Ok((raw_token, session))
    }

    /// Finds the live session for a token: not revoked and not expired.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_active(&self, raw_token: &str) -> Result<Option<sessions::Model>, DbErr> {
        let session = sessions::Entity::find()
            .filter(sessions::Column::TokenHash.eq(Self::hash_token(raw_token)))
            .filter(sessions::Column::RevokedAt.is_null())
            .one(&self.db)
            .await?;

        Ok(session.filter(|s| is_live(s, Utc::now())))
    }

    /// Revokes the session for a token.
    ///
    /// Returns `false` if there was no unrevoked session for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn revoke_by_token(&self, raw_token: &str) -> Result<bool, DbErr> {
        let result = sessions::Entity::update_many()
            .col_expr(sessions::Column::RevokedAt, Expr::value(Utc::now()))
            .filter(sessions::Column::TokenHash.eq(Self::hash_token(raw_token)))
            .filter(sessions::Column::RevokedAt.is_null())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Deletes sessions that are revoked or past their expiry.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn purge_expired(&self) -> Result<u64, DbErr> {
        let now = Utc::now();
        let stale: Vec<Uuid> = sessions::Entity::find()
            .all(&self.db)
            .await?
            .into_iter()
            .filter(|s| !is_live(s, now))
            .map(|s| s.id)
            .collect();

        if stale.is_empty() {
            return Ok(0);
        }

        let result = sessions::Entity::delete_many()
            .filter(sessions::Column::Id.is_in(stale))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

/// Expiry is checked here, not in SQL.
fn is_live(session: &sessions::Model, now: DateTime<Utc>) -> bool {
    session.revoked_at.is_none() && session.expires_at > now
}
