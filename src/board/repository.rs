//! Board repository for Boards.
//!
//! This module provides CRUD operations for boards in the database.

use sqlx::SqlitePool;

use super::types::{
    Board, BoardSummary, NewBoard, MAX_BOARD_DESCRIPTION_LENGTH, MAX_BOARD_NAME_LENGTH,
};
use crate::{BoardsError, Result};

/// Repository for board CRUD operations.
pub struct BoardRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> BoardRepository<'a> {
    /// Create a new BoardRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new board in the database.
    ///
    /// Returns the created board with the assigned ID.
    pub async fn create(&self, new_board: &NewBoard) -> Result<Board> {
        validate_new_board(new_board)?;

        let id: i64 =
            sqlx::query_scalar("INSERT INTO boards (name, description) VALUES (?, ?) RETURNING id")
                .bind(&new_board.name)
                .bind(&new_board.description)
                .fetch_one(self.pool)
                .await
                .map_err(|e| BoardsError::Database(e.to_string()))?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| BoardsError::NotFound("board".to_string()))
    }

    /// Get a board by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Board>> {
        let board = sqlx::query_as::<_, Board>(
            "SELECT id, name, description, created_at FROM boards WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(board)
    }

    /// Get a board by its exact name.
    pub async fn get_by_name(&self, name: &str) -> Result<Option<Board>> {
        let board = sqlx::query_as::<_, Board>(
            "SELECT id, name, description, created_at FROM boards WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?;
        Ok(board)
    }

    /// List all boards ordered by name, with topic and post counters.
    pub async fn list_with_stats(&self) -> Result<Vec<BoardSummary>> {
        let boards = sqlx::query_as::<_, BoardSummary>(
            "SELECT b.id, b.name, b.description,
                    (SELECT COUNT(*) FROM topics t WHERE t.board_id = b.id) AS topics_count,
                    (SELECT COUNT(*) FROM posts p JOIN topics t ON t.id = p.topic_id
                      WHERE t.board_id = b.id) AS posts_count,
                    (SELECT MAX(p.created_at) FROM posts p JOIN topics t ON t.id = p.topic_id
                      WHERE t.board_id = b.id) AS last_post_at
             FROM boards b
             ORDER BY b.name, b.id",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(boards)
    }

    /// Create the board unless one with the same name exists.
    ///
    /// Returns the board and whether it was newly created.
    pub async fn ensure(&self, new_board: &NewBoard) -> Result<(Board, bool)> {
        if let Some(existing) = self.get_by_name(&new_board.name).await? {
            return Ok((existing, false));
        }
        let board = self.create(new_board).await?;
        Ok((board, true))
    }
}

fn validate_new_board(new_board: &NewBoard) -> Result<()> {
    let name_len = new_board.name.chars().count();
    if new_board.name.trim().is_empty() || name_len > MAX_BOARD_NAME_LENGTH {
        return Err(BoardsError::Validation(format!(
            "board name must be 1 to {MAX_BOARD_NAME_LENGTH} characters"
        )));
    }
    if new_board.description.chars().count() > MAX_BOARD_DESCRIPTION_LENGTH {
        return Err(BoardsError::Validation(format!(
            "board description must be at most {MAX_BOARD_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    #[tokio::test]
    async fn test_create_board() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = BoardRepository::new(db.pool());

        let board = repo
            .create(&NewBoard::new("Django").with_description("Django board."))
            .await
            .unwrap();

        assert!(board.id > 0);
        assert_eq!(board.name, "Django");
        assert_eq!(board.description, "Django board.");
        assert_eq!(repo.get_by_id(board.id).await.unwrap(), Some(board));
    }

    #[tokio::test]
    async fn test_get_missing_board() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = BoardRepository::new(db.pool());
        assert!(repo.get_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_board_name_unique() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = BoardRepository::new(db.pool());
        repo.create(&NewBoard::new("Django")).await.unwrap();

        let result = repo.create(&NewBoard::new("Django")).await;
        assert!(matches!(result, Err(BoardsError::Database(_))));
    }

    #[tokio::test]
    async fn test_board_length_limits() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = BoardRepository::new(db.pool());

        let long_name = "x".repeat(MAX_BOARD_NAME_LENGTH + 1);
        let result = repo.create(&NewBoard::new(long_name)).await;
        assert!(matches!(result, Err(BoardsError::Validation(_))));

        let long_desc = "x".repeat(MAX_BOARD_DESCRIPTION_LENGTH + 1);
        let result = repo
            .create(&NewBoard::new("Python").with_description(long_desc))
            .await;
        assert!(matches!(result, Err(BoardsError::Validation(_))));

        let result = repo.create(&NewBoard::new("   ")).await;
        assert!(matches!(result, Err(BoardsError::Validation(_))));
        assert!(repo.list_with_stats().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_ordered_by_name() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = BoardRepository::new(db.pool());
        repo.create(&NewBoard::new("Python")).await.unwrap();
        repo.create(&NewBoard::new("Django")).await.unwrap();

        let names: Vec<String> = repo
            .list_with_stats()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, vec!["Django", "Python"]);
    }

    #[tokio::test]
    async fn test_list_with_stats_empty_board() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = BoardRepository::new(db.pool());
        repo.create(&NewBoard::new("Django")).await.unwrap();

        let stats = repo.list_with_stats().await.unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].topics_count, 0);
        assert_eq!(stats[0].posts_count, 0);
        assert!(stats[0].last_post_at.is_none());
    }

    #[tokio::test]
    async fn test_ensure_is_idempotent() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = BoardRepository::new(db.pool());
        let seed = NewBoard::new("Django").with_description("first");

        let (first, created) = repo.ensure(&seed).await.unwrap();
        assert!(created);

        let (second, created) = repo
            .ensure(&NewBoard::new("Django").with_description("second"))
            .await
            .unwrap();
        assert!(!created);
        assert_eq!(first, second);
        assert_eq!(second.description, "first");
        assert_eq!(repo.list_with_stats().await.unwrap().len(), 1);
    }
}
