//! Post model.

/// Maximum length of a post message (in characters).
pub const MAX_MESSAGE_LENGTH: usize = 4000;

/// A single message within a topic.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Post {
    /// Post ID.
    pub id: i64,
    /// Message body.
    pub message: String,
    /// Owning topic.
    pub topic_id: i64,
    /// Author.
    pub created_by: i64,
    /// Creation timestamp.
    pub created_at: String,
    /// Last edit timestamp.
    pub updated_at: Option<String>,
    /// Last editor.
    pub updated_by: Option<i64>,
}

/// A post with its author's username, for the topic page.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostWithAuthor {
    /// Post ID.
    pub id: i64,
    /// Message body.
    pub message: String,
    /// Author username.
    pub author: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last edit timestamp.
    pub updated_at: Option<String>,
}

/// Data for replying to a topic.
#[derive(Debug, Clone)]
pub struct NewReply {
    /// Topic being replied to.
    pub topic_id: i64,
    /// Author.
    pub created_by: i64,
    /// Message body.
    pub message: String,
}

impl NewReply {
    /// Create a new reply request.
    pub fn new(topic_id: i64, created_by: i64, message: impl Into<String>) -> Self {
        Self {
            topic_id,
            created_by,
            message: message.into(),
        }
    }
}
