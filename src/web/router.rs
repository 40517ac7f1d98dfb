//! Router configuration for the web interface.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{self, AppState};
use super::middleware::security_headers;

/// Create the main router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let board_routes = Router::new()
        .route("/:pk/", get(handlers::board_topics))
        .route(
            "/:pk/new/",
            get(handlers::new_topic).post(handlers::new_topic_submit),
        )
        .route("/:pk/topics/:topic_pk/", get(handlers::topic_posts))
        .route(
            "/:pk/topics/:topic_pk/reply/",
            get(handlers::reply_topic).post(handlers::reply_topic_submit),
        );

    let account_routes = Router::new()
        .route("/signup/", get(handlers::signup).post(handlers::signup_submit))
        .route("/login/", get(handlers::login).post(handlers::login_submit))
        .route("/logout/", post(handlers::logout));

    // Plain-text pages
    let placeholder_routes = Router::new()
        .route("/questions/:pk/", get(handlers::question))
        .route("/posts/:slug/", get(handlers::post))
        .route("/blog/:slug/:pk/", get(handlers::blog_post))
        .route("/users/:username/", get(handlers::user_profile))
        .route("/years/:year/", get(handlers::year_archive));

    Router::new()
        .route("/", get(handlers::home))
        .route("/about/", get(handlers::about))
        .nest("/boards", board_routes)
        .merge(account_routes)
        .merge(placeholder_routes)
        .merge(create_health_router())
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(security_headers)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::util::ServiceExt;

    async fn app() -> Router {
        let db = Arc::new(Database::open_in_memory().await.unwrap());
        create_router(Arc::new(AppState::new(db)))
    }

    async fn get_path(router: Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    #[tokio::test]
    async fn test_health_check() {
        let (status, body) = get_path(app().await, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let (status, body) = get_path(app().await, "/nowhere/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("404"));
    }

    #[tokio::test]
    async fn test_non_numeric_board_is_not_found() {
        let (status, _) = get_path(app().await, "/boards/abc/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_fallback_has_security_headers() {
        let response = app()
            .await
            .oneshot(Request::builder().uri("/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(
            response.headers().get("X-Frame-Options").unwrap(),
            "DENY"
        );
    }
}
