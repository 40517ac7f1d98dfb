//! Topic repository.

use sqlx::SqlitePool;

use super::topic::{Topic, TopicSummary};
use crate::Result;

/// Read access to topics.
pub struct TopicRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TopicRepository<'a> {
    /// Create a new TopicRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a topic by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Topic>> {
        let topic = sqlx::query_as::<_, Topic>(
            "SELECT id, subject, board_id, starter_id, created_at, last_updated
             FROM topics WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(topic)
    }

    /// Get a topic only if it belongs to the given board.
    pub async fn get_in_board(&self, board_id: i64, id: i64) -> Result<Option<Topic>> {
        let topic = sqlx::query_as::<_, Topic>(
            "SELECT id, subject, board_id, starter_id, created_at, last_updated
             FROM topics WHERE id = ? AND board_id = ?",
        )
        .bind(id)
        .bind(board_id)
        .fetch_optional(self.pool)
        .await?;
        Ok(topic)
    }

    /// List a board's topics, most recently updated first.
    pub async fn list_by_board(&self, board_id: i64) -> Result<Vec<TopicSummary>> {
        let topics = sqlx::query_as::<_, TopicSummary>(
            "SELECT t.id, t.subject, u.username AS starter_username,
                    MAX((SELECT COUNT(*) FROM posts p WHERE p.topic_id = t.id) - 1, 0) AS replies,
                    t.last_updated
             FROM topics t
             JOIN users u ON u.id = t.starter_id
             WHERE t.board_id = ?
             ORDER BY t.last_updated DESC, t.id DESC",
        )
        .bind(board_id)
        .fetch_all(self.pool)
        .await?;
        Ok(topics)
    }

    /// Count topics on a board.
    pub async fn count_by_board(&self, board_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM topics WHERE board_id = ?")
            .bind(board_id)
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
