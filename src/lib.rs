//! Boards - a small discussion forum.
//!
//! Users browse boards, start topics, reply to them and manage accounts
//! through server-rendered HTML pages.

pub mod auth;
pub mod board;
pub mod config;
pub mod datetime;
pub mod db;
pub mod error;
pub mod logging;
pub mod web;

pub use auth::{
    authenticate, hash_password, register, validate_password, verify_password, LoginError,
    PasswordError, RegistrationError, RegistrationRequest, ValidationError,
};
pub use board::{Board, BoardService, NewReply, NewTopic, Post, Topic};
pub use config::Config;
pub use db::{Database, NewUser, Session, SessionRepository, User, UserRepository};
pub use error::{BoardsError, Result};
pub use web::{create_router, AppState, WebServer};
