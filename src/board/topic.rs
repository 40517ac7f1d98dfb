//! Topic model.

/// Maximum length of a topic subject (in characters).
pub const MAX_SUBJECT_LENGTH: usize = 255;

/// A discussion thread within a board.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Topic {
    /// Topic ID.
    pub id: i64,
    /// Subject line.
    pub subject: String,
    /// Owning board.
    pub board_id: i64,
    /// User who started the topic.
    pub starter_id: i64,
    /// Creation timestamp.
    pub created_at: String,
    /// Time of the latest post.
    pub last_updated: String,
}

/// A topic row on the board page.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TopicSummary {
    /// Topic ID.
    pub id: i64,
    /// Subject line.
    pub subject: String,
    /// Username of the starter.
    pub starter_username: String,
    /// Number of posts after the opening one.
    pub replies: i64,
    /// Time of the latest post.
    pub last_updated: String,
}

/// Data for starting a topic.
#[derive(Debug, Clone)]
pub struct NewTopic {
    /// Board to post in.
    pub board_id: i64,
    /// Starting user.
    pub starter_id: i64,
    /// Subject line.
    pub subject: String,
    /// Opening message.
    pub message: String,
}

impl NewTopic {
    /// Create a new topic request.
    pub fn new(
        board_id: i64,
        starter_id: i64,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            board_id,
            starter_id,
            subject: subject.into(),
            message: message.into(),
        }
    }
}
