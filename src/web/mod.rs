//! Web interface for Boards.
//!
//! Server-rendered HTML pages for boards, topics and accounts, with
//! cookie sessions and anti-forgery tokens on every form.

pub mod csrf;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;
pub mod templates;

pub use error::WebError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
