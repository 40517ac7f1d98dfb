//! Sign-in session repository.

use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::user::User;
use crate::{BoardsError, Result};

/// A persisted sign-in session.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Session {
    /// Session ID.
    pub id: i64,
    /// Opaque token stored in the session cookie.
    pub token: String,
    /// Signed-in user.
    pub user_id: i64,
    /// Creation timestamp.
    pub created_at: String,
    /// Expiration timestamp.
    pub expires_at: String,
}

/// Repository for session operations.
pub struct SessionRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SessionRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Start a session for the user that expires after `ttl_days`.
    pub async fn create(&self, user_id: i64, ttl_days: i64) -> Result<Session> {
        let expires_at = Duration::try_days(ttl_days)
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            .ok_or_else(|| {
                BoardsError::Validation(format!("session lifetime out of range: {ttl_days} days"))
            })?
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        let token = Uuid::new_v4().simple().to_string();

        let session = sqlx::query_as::<_, Session>(
            "INSERT INTO sessions (token, user_id, expires_at) VALUES (?, ?, ?)
             RETURNING id, token, user_id, created_at, expires_at",
        )
        .bind(&token)
        .bind(user_id)
        .bind(&expires_at)
        .fetch_one(self.pool)
        .await?;
        Ok(session)
    }

    /// Resolve a token to its active user.
    ///
    /// Expired sessions and inactive accounts resolve to `None`.
    pub async fn get_valid_user(&self, token: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT u.id, u.username, u.email, u.password, u.is_active, u.date_joined, u.last_login
             FROM sessions s
             JOIN users u ON u.id = s.user_id
             WHERE s.token = ?
               AND s.expires_at > datetime('now')
               AND u.is_active = 1",
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await?;
        Ok(user)
    }

    /// End a session. Returns whether a session was removed.
    pub async fn delete(&self, token: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove expired sessions. Returns the number removed.
    pub async fn purge_expired(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= datetime('now')")
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, NewUser, UserRepository};

    async fn setup() -> (Database, i64) {
        let db = Database::open_in_memory().await.unwrap();
        let user = UserRepository::new(db.pool())
            .create(&NewUser::new("alice", "hash"))
            .await
            .unwrap();
        (db, user.id)
    }

    #[tokio::test]
    async fn test_create_and_resolve() {
        let (db, user_id) = setup().await;
        let repo = SessionRepository::new(db.pool());

        let session = repo.create(user_id, 14).await.unwrap();
        assert_eq!(session.user_id, user_id);
        assert_eq!(session.token.len(), 32);

        let user = repo.get_valid_user(&session.token).await.unwrap().unwrap();
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_unknown_token() {
        let (db, _) = setup().await;
        let repo = SessionRepository::new(db.pool());
        assert!(repo.get_valid_user("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_session_ignored_and_purged() {
        let (db, user_id) = setup().await;
        let repo = SessionRepository::new(db.pool());

        let session = repo.create(user_id, -1).await.unwrap();
        assert!(repo.get_valid_user(&session.token).await.unwrap().is_none());

        let live = repo.create(user_id, 14).await.unwrap();
        assert_eq!(repo.purge_expired().await.unwrap(), 1);
        assert_eq!(repo.purge_expired().await.unwrap(), 0);
        assert!(repo.get_valid_user(&live.token).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_create_rejects_out_of_range_lifetime() {
        let (db, user_id) = setup().await;
        let repo = SessionRepository::new(db.pool());

        let result = repo.create(user_id, i64::MAX).await;
        assert!(matches!(result, Err(BoardsError::Validation(_))));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_inactive_user_ignored() {
        let (db, user_id) = setup().await;
        let repo = SessionRepository::new(db.pool());
        let session = repo.create(user_id, 14).await.unwrap();

        sqlx::query("UPDATE users SET is_active = 0 WHERE id = ?")
            .bind(user_id)
            .execute(db.pool())
            .await
            .unwrap();

        assert!(repo.get_valid_user(&session.token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let (db, user_id) = setup().await;
        let repo = SessionRepository::new(db.pool());
        let session = repo.create(user_id, 14).await.unwrap();

        assert!(repo.delete(&session.token).await.unwrap());
        assert!(!repo.delete(&session.token).await.unwrap());
        assert!(repo.get_valid_user(&session.token).await.unwrap().is_none());
    }
}
