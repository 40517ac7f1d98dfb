//! Askama templates for the web interface.

use askama::Template;

use crate::board::{Board, BoardSummary, PostWithAuthor, Topic, TopicSummary};

use super::forms::{FormErrors, NewTopicForm, ReplyForm, SignUpForm};
use super::handlers::AppState;

/// Values every page layout needs.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub site_name: String,
    /// Signed-in username.
    pub username: Option<String>,
    /// Anti-forgery token for forms on the page.
    pub csrf_token: String,
}

impl PageContext {
    pub fn new(state: &AppState, username: Option<String>, csrf_token: &str) -> Self {
        Self {
            site_name: state.site_name.clone(),
            username,
            csrf_token: csrf_token.to_string(),
        }
    }
}

/// Board row on the home page.
#[derive(Debug, Clone)]
pub struct BoardRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub topics_count: i64,
    pub posts_count: i64,
    pub last_post: Option<String>,
}

impl BoardRow {
    pub fn from_summary(state: &AppState, summary: BoardSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            description: summary.description,
            topics_count: summary.topics_count,
            posts_count: summary.posts_count,
            last_post: summary.last_post_at.map(|t| state.display_time(&t)),
        }
    }
}

/// Topic row on the board page.
#[derive(Debug, Clone)]
pub struct TopicRow {
    pub id: i64,
    pub subject: String,
    pub starter: String,
    pub replies: i64,
    pub last_updated: String,
}

impl TopicRow {
    pub fn from_summary(state: &AppState, summary: TopicSummary) -> Self {
        Self {
            id: summary.id,
            subject: summary.subject,
            starter: summary.starter_username,
            replies: summary.replies,
            last_updated: state.display_time(&summary.last_updated),
        }
    }
}

/// Post on the topic and reply pages.
#[derive(Debug, Clone)]
pub struct PostRow {
    pub id: i64,
    pub message: String,
    pub author: String,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl PostRow {
    pub fn from_post(state: &AppState, post: PostWithAuthor) -> Self {
        Self {
            id: post.id,
            message: post.message,
            author: post.author,
            created_at: state.display_time(&post.created_at),
            updated_at: post.updated_at.map(|t| state.display_time(&t)),
        }
    }
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub page: PageContext,
    pub boards: Vec<BoardRow>,
}

#[derive(Template)]
#[template(path = "topics.html")]
pub struct TopicsTemplate {
    pub page: PageContext,
    pub board: Board,
    pub topics: Vec<TopicRow>,
}

#[derive(Template)]
#[template(path = "new_topic.html")]
pub struct NewTopicTemplate {
    pub page: PageContext,
    pub board: Board,
    pub form: NewTopicForm,
    pub errors: FormErrors,
}

#[derive(Template)]
#[template(path = "topic_posts.html")]
pub struct TopicPostsTemplate {
    pub page: PageContext,
    pub board: Board,
    pub topic: Topic,
    pub posts: Vec<PostRow>,
}

#[derive(Template)]
#[template(path = "reply_topic.html")]
pub struct ReplyTopicTemplate {
    pub page: PageContext,
    pub board: Board,
    pub topic: Topic,
    pub form: ReplyForm,
    pub errors: FormErrors,
    /// Earlier posts, newest first.
    pub posts: Vec<PostRow>,
}

#[derive(Template)]
#[template(path = "signup.html")]
pub struct SignUpTemplate {
    pub page: PageContext,
    pub form: SignUpForm,
    pub errors: FormErrors,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub page: PageContext,
    pub username: String,
    pub errors: FormErrors,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub page: PageContext,
}
