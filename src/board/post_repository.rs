//! Post repository.

use sqlx::SqlitePool;

use super::post::{Post, PostWithAuthor};
use crate::Result;

/// Read access to posts.
pub struct PostRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PostRepository<'a> {
    /// Create a new PostRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a post by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            "SELECT id, message, topic_id, created_by, created_at, updated_at, updated_by
             FROM posts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(post)
    }

    /// List a topic's posts in creation order with author names.
    pub async fn list_by_topic(&self, topic_id: i64) -> Result<Vec<PostWithAuthor>> {
        let posts = sqlx::query_as::<_, PostWithAuthor>(
            "SELECT p.id, p.message, u.username AS author, p.created_at, p.updated_at
             FROM posts p
             JOIN users u ON u.id = p.created_by
             WHERE p.topic_id = ?
             ORDER BY p.created_at, p.id",
        )
        .bind(topic_id)
        .fetch_all(self.pool)
        .await?;
        Ok(posts)
    }

    /// Count posts in a topic.
    pub async fn count_by_topic(&self, topic_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE topic_id = ?")
            .bind(topic_id)
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Count posts across all topics of a board.
    pub async fn count_by_board(&self, board_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM posts p JOIN topics t ON t.id = p.topic_id WHERE t.board_id = ?",
        )
        .bind(board_id)
        .fetch_one(self.pool)
        .await?;
        Ok(count)
    }
}
