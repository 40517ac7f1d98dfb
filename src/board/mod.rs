//! Board module for Boards.
//!
//! Boards hold topics, and topics hold posts. Reads go through the
//! repositories. Writes that touch several rows go through [`BoardService`].

mod post;
mod post_repository;
mod repository;
mod service;
mod topic;
mod topic_repository;
mod types;

pub use post::{NewReply, Post, PostWithAuthor, MAX_MESSAGE_LENGTH};
pub use post_repository::PostRepository;
pub use repository::BoardRepository;
pub use service::BoardService;
pub use topic::{NewTopic, Topic, TopicSummary, MAX_SUBJECT_LENGTH};
pub use topic_repository::TopicRepository;
pub use types::{
    Board, BoardSummary, NewBoard, MAX_BOARD_DESCRIPTION_LENGTH, MAX_BOARD_NAME_LENGTH,
};
