//! Shared helpers for the HTTP integration tests.
//!
//! Builds the real router over an in-memory database and provides helpers
//! for reading anti-forgery tokens and signing users up.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::{TestResponse, TestServer};
use boards::board::{BoardRepository, NewBoard, PostRepository, TopicRepository};
use boards::{create_router, AppState, Database, UserRepository};

/// Password accepted by the sign-up rules.
pub const PASSWORD: &str = "abcdef123456";

/// Server plus direct database access.
pub struct TestApp {
    pub server: TestServer,
    pub db: Arc<Database>,
    /// Id of the seeded "Django" board.
    pub board_id: i64,
}

impl TestApp {
    /// Topics in the seeded board.
    pub async fn topic_count(&self) -> i64 {
        TopicRepository::new(self.db.pool())
            .count_by_board(self.board_id)
            .await
            .unwrap()
    }

    /// Posts in the seeded board.
    pub async fn post_count(&self) -> i64 {
        PostRepository::new(self.db.pool())
            .count_by_board(self.board_id)
            .await
            .unwrap()
    }

    /// Registered users.
    pub async fn user_count(&self) -> i64 {
        UserRepository::new(self.db.pool()).count().await.unwrap()
    }
}

/// Create a test server with one board and cookie persistence.
pub async fn create_test_app() -> TestApp {
    let db = Arc::new(Database::open_in_memory().await.unwrap());
    let board = BoardRepository::new(db.pool())
        .create(&NewBoard::new("Django").with_description("Django board."))
        .await
        .unwrap();

    let router = create_router(Arc::new(AppState::new(db.clone())));
    let mut server = TestServer::new(router).expect("Failed to create test server");
    server.save_cookies();

    TestApp {
        server,
        db,
        board_id: board.id,
    }
}

/// Pull the anti-forgery token out of a rendered form.
pub fn extract_csrf_token(html: &str) -> String {
    let marker = r#"name="csrfmiddlewaretoken" value=""#;
    let start = html
        .find(marker)
        .map(|i| i + marker.len())
        .expect("page has no csrfmiddlewaretoken field");
    let end = html[start..].find('"').unwrap() + start;
    html[start..end].to_string()
}

/// GET a form page and return its anti-forgery token.
pub async fn csrf_token(server: &TestServer, path: &str) -> String {
    let response = server.get(path).await;
    response.assert_status_ok();
    extract_csrf_token(&response.text())
}

/// Sign up through the form. The session cookie is kept by the server.
pub async fn sign_up(server: &TestServer, username: &str) -> TestResponse {
    let token = csrf_token(server, "/signup/").await;
    server
        .post("/signup/")
        .form(&[
            ("csrfmiddlewaretoken", token.as_str()),
            ("username", username),
            ("email", "john@doe.com"),
            ("password1", PASSWORD),
            ("password2", PASSWORD),
        ])
        .await
}

/// Location header of a redirect.
pub fn location(response: &TestResponse) -> String {
    response
        .header("location")
        .to_str()
        .unwrap()
        .to_string()
}
