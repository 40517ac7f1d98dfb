//! Sign-up, login and logout tests.

mod common;

use axum::http::StatusCode;
use boards::{SessionRepository, UserRepository};
use common::{create_test_app, csrf_token, extract_csrf_token, location, sign_up, PASSWORD};

#[tokio::test]
async fn test_signup_page() {
    let app = create_test_app().await;

    let response = app.server.get("/signup/").await;
    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("csrfmiddlewaretoken"));
    assert!(html.contains(r#"name="password2""#));
}

#[tokio::test]
async fn test_signup_creates_user_and_signs_in() {
    let app = create_test_app().await;

    let response = sign_up(&app.server, "john").await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert_eq!(app.user_count().await, 1);

    let html = app.server.get("/").await.text();
    assert!(html.contains("john"));
    assert!(html.contains("Log out"));
}

#[tokio::test]
async fn test_signup_duplicate_username() {
    let app = create_test_app().await;
    sign_up(&app.server, "john").await;

    let response = sign_up(&app.server, "JOHN").await;
    response.assert_status_ok();
    assert!(response.text().contains("A user with that username already exists."));
    assert_eq!(app.user_count().await, 1);
}

#[tokio::test]
async fn test_signup_invalid_data() {
    let app = create_test_app().await;
    let token = csrf_token(&app.server, "/signup/").await;

    let response = app
        .server
        .post("/signup/")
        .form(&[
            ("csrfmiddlewaretoken", token.as_str()),
            ("username", "john"),
            ("email", "not-an-email"),
            ("password1", PASSWORD),
            ("password2", "different123"),
        ])
        .await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("Enter a valid email address."));
    assert!(!html.contains(PASSWORD));
    assert_eq!(app.user_count().await, 0);
}

#[tokio::test]
async fn test_signup_numeric_password() {
    let app = create_test_app().await;
    let token = csrf_token(&app.server, "/signup/").await;

    let response = app
        .server
        .post("/signup/")
        .form(&[
            ("csrfmiddlewaretoken", token.as_str()),
            ("username", "john"),
            ("email", "john@doe.com"),
            ("password1", "1234567890"),
            ("password2", "1234567890"),
        ])
        .await;

    response.assert_status_ok();
    assert!(response.text().contains("This password is entirely numeric."));
    assert_eq!(app.user_count().await, 0);
}

#[tokio::test]
async fn test_signup_rejects_missing_csrf_token() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/signup/")
        .form(&[
            ("username", "john"),
            ("email", "john@doe.com"),
            ("password1", PASSWORD),
            ("password2", PASSWORD),
        ])
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(app.user_count().await, 0);
}

#[tokio::test]
async fn test_login_and_logout() {
    let app = create_test_app().await;
    sign_up(&app.server, "john").await;

    // Log out
    let token = extract_csrf_token(&app.server.get("/").await.text());
    let response = app
        .server
        .post("/logout/")
        .form(&[("csrfmiddlewaretoken", token.as_str())])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert!(app.server.get("/").await.text().contains(r#"href="/login/""#));

    // Log back in
    let token = csrf_token(&app.server, "/login/").await;
    let response = app
        .server
        .post("/login/")
        .form(&[
            ("csrfmiddlewaretoken", token.as_str()),
            ("username", "john"),
            ("password", PASSWORD),
        ])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert!(app.server.get("/").await.text().contains("Log out"));
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = create_test_app().await;
    sign_up(&app.server, "john").await;
    let token = csrf_token(&app.server, "/login/").await;

    let response = app
        .server
        .post("/login/")
        .form(&[
            ("csrfmiddlewaretoken", token.as_str()),
            ("username", "john"),
            ("password", "wrong-password"),
        ])
        .await;

    response.assert_status_ok();
    assert!(response
        .text()
        .contains("Please enter a correct username and password."));
}

#[tokio::test]
async fn test_logout_rejects_bad_csrf_token() {
    let app = create_test_app().await;
    sign_up(&app.server, "john").await;

    let response = app
        .server
        .post("/logout/")
        .form(&[("csrfmiddlewaretoken", "forged")])
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert!(app.server.get("/").await.text().contains("Log out"));
}

#[tokio::test]
async fn test_login_purges_expired_sessions() {
    let app = create_test_app().await;
    sign_up(&app.server, "john").await;
    let user = UserRepository::new(app.db.pool())
        .get_by_username("john")
        .await
        .unwrap()
        .unwrap();
    SessionRepository::new(app.db.pool())
        .create(user.id, -1)
        .await
        .unwrap();

    let token = csrf_token(&app.server, "/login/").await;
    app.server
        .post("/login/")
        .form(&[
            ("csrfmiddlewaretoken", token.as_str()),
            ("username", "john"),
            ("password", PASSWORD),
        ])
        .await
        .assert_status(StatusCode::SEE_OTHER);

    let expired: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE expires_at <= datetime('now')")
            .fetch_one(app.db.pool())
            .await
            .unwrap();
    assert_eq!(expired, 0);
}

#[tokio::test]
async fn test_signup_without_form_body() {
    let app = create_test_app().await;
    csrf_token(&app.server, "/signup/").await;

    let response = app.server.post("/signup/").await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(app.user_count().await, 0);
}
