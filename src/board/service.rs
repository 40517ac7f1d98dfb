//! Board service for Boards.
//!
//! High-level board, topic and post operations used by the web handlers.
//! Multi-row writes run inside a single transaction.

use tracing::info;

use crate::config::BoardSeed;
use crate::db::Database;
use crate::{BoardsError, Result};

use super::post::{NewReply, Post, PostWithAuthor, MAX_MESSAGE_LENGTH};
use super::post_repository::PostRepository;
use super::repository::BoardRepository;
use super::topic::{NewTopic, Topic, TopicSummary, MAX_SUBJECT_LENGTH};
use super::topic_repository::TopicRepository;
use super::types::{Board, BoardSummary, NewBoard};

/// Validate a subject string.
fn validate_subject(subject: &str) -> Result<()> {
    if subject.trim().is_empty() {
        return Err(BoardsError::Validation("subject is required".to_string()));
    }
    if subject.trim().chars().count() > MAX_SUBJECT_LENGTH {
        return Err(BoardsError::Validation(format!(
            "subject must be at most {MAX_SUBJECT_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a message string.
fn validate_message(message: &str) -> Result<()> {
    if message.trim().is_empty() {
        return Err(BoardsError::Validation("message is required".to_string()));
    }
    if message.trim().chars().count() > MAX_MESSAGE_LENGTH {
        return Err(BoardsError::Validation(format!(
            "message must be at most {MAX_MESSAGE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Service for board operations.
pub struct BoardService<'a> {
    db: &'a Database,
}

impl<'a> BoardService<'a> {
    /// Create a new BoardService with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// List every board with its counters, ordered by name.
    pub async fn list_boards(&self) -> Result<Vec<BoardSummary>> {
        BoardRepository::new(self.db.pool()).list_with_stats().await
    }

    /// Get a board, or `NotFound`.
    pub async fn get_board(&self, board_id: i64) -> Result<Board> {
        BoardRepository::new(self.db.pool())
            .get_by_id(board_id)
            .await?
            .ok_or_else(|| BoardsError::NotFound("board".to_string()))
    }

    /// Get a board and one of its topics.
    ///
    /// A topic that exists on another board is reported as `NotFound`.
    pub async fn get_topic(&self, board_id: i64, topic_id: i64) -> Result<(Board, Topic)> {
        let board = self.get_board(board_id).await?;
        let topic = TopicRepository::new(self.db.pool())
            .get_in_board(board_id, topic_id)
            .await?
            .ok_or_else(|| BoardsError::NotFound("topic".to_string()))?;
        Ok((board, topic))
    }

    /// List a board's topics, most recently updated first.
    pub async fn list_topics(&self, board_id: i64) -> Result<Vec<TopicSummary>> {
        TopicRepository::new(self.db.pool())
            .list_by_board(board_id)
            .await
    }

    /// List a topic's posts in creation order.
    pub async fn list_posts(&self, topic_id: i64) -> Result<Vec<PostWithAuthor>> {
        PostRepository::new(self.db.pool())
            .list_by_topic(topic_id)
            .await
    }

    /// Start a topic together with its opening post.
    ///
    /// Both rows are written in one transaction. Subject and message are
    /// stored trimmed.
    pub async fn start_topic(&self, new_topic: &NewTopic) -> Result<(Topic, Post)> {
        validate_subject(&new_topic.subject)?;
        validate_message(&new_topic.message)?;
        self.get_board(new_topic.board_id).await?;

        let mut tx = self.db.pool().begin().await?;

        let topic = sqlx::query_as::<_, Topic>(
            "INSERT INTO topics (subject, board_id, starter_id) VALUES (?, ?, ?)
             RETURNING id, subject, board_id, starter_id, created_at, last_updated",
        )
        .bind(new_topic.subject.trim())
        .bind(new_topic.board_id)
        .bind(new_topic.starter_id)
        .fetch_one(&mut *tx)
        .await?;

        let post = sqlx::query_as::<_, Post>(
            "INSERT INTO posts (message, topic_id, created_by) VALUES (?, ?, ?)
             RETURNING id, message, topic_id, created_by, created_at, updated_at, updated_by",
        )
        .bind(new_topic.message.trim())
        .bind(topic.id)
        .bind(new_topic.starter_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            board_id = topic.board_id,
            topic_id = topic.id,
            starter_id = topic.starter_id,
            "topic started"
        );
        Ok((topic, post))
    }

    /// Add a reply to a topic and bump the topic's `last_updated`.
    pub async fn reply(&self, reply: &NewReply) -> Result<Post> {
        validate_message(&reply.message)?;

        let mut tx = self.db.pool().begin().await?;

        let post = sqlx::query_as::<_, Post>(
            "INSERT INTO posts (message, topic_id, created_by) VALUES (?, ?, ?)
             RETURNING id, message, topic_id, created_by, created_at, updated_at, updated_by",
        )
        .bind(reply.message.trim())
        .bind(reply.topic_id)
        .bind(reply.created_by)
        .fetch_one(&mut *tx)
        .await?;

        let bumped = sqlx::query("UPDATE topics SET last_updated = ? WHERE id = ?")
            .bind(&post.created_at)
            .bind(reply.topic_id)
            .execute(&mut *tx)
            .await?;
        if bumped.rows_affected() == 0 {
            return Err(BoardsError::NotFound("topic".to_string()));
        }

        tx.commit().await?;

        info!(
            topic_id = post.topic_id,
            post_id = post.id,
            created_by = post.created_by,
            "reply posted"
        );
        Ok(post)
    }

    /// Create the configured boards that do not exist yet.
    ///
    /// Returns the number of boards created.
    pub async fn seed_boards(&self, seeds: &[BoardSeed]) -> Result<usize> {
        let repo = BoardRepository::new(self.db.pool());
        let mut created = 0;
        for seed in seeds {
            let new_board = NewBoard::new(&seed.name).with_description(&seed.description);
            let (board, is_new) = repo.ensure(&new_board).await?;
            if is_new {
                info!(board_id = board.id, name = %board.name, "board created");
                created += 1;
            }
        }
        Ok(created)
    }
}
