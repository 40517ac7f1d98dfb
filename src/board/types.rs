//! Board types for Boards.

/// Maximum length of a board name (in characters).
pub const MAX_BOARD_NAME_LENGTH: usize = 30;

/// Maximum length of a board description (in characters).
pub const MAX_BOARD_DESCRIPTION_LENGTH: usize = 100;

/// A discussion category.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Board {
    /// Board ID.
    pub id: i64,
    /// Unique board name.
    pub name: String,
    /// Short description shown on the home page.
    pub description: String,
    /// Creation timestamp.
    pub created_at: String,
}

/// A board together with its activity counters, for the home page.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BoardSummary {
    /// Board ID.
    pub id: i64,
    /// Board name.
    pub name: String,
    /// Board description.
    pub description: String,
    /// Number of topics on the board.
    pub topics_count: i64,
    /// Number of posts across all topics on the board.
    pub posts_count: i64,
    /// Creation time of the newest post, if any.
    pub last_post_at: Option<String>,
}

/// Data for creating a new board.
#[derive(Debug, Clone)]
pub struct NewBoard {
    /// Board name.
    pub name: String,
    /// Board description.
    pub description: String,
}

impl NewBoard {
    /// Create a new board with an empty description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
