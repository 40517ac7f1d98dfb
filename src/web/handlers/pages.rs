//! About page, plain-text placeholder pages and the not-found fallback.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::web::csrf::CsrfToken;
use crate::web::error::WebError;
use crate::web::middleware::CurrentUser;
use crate::web::templates::{AboutTemplate, PageContext};

use super::{parse_id, render, AppState};

fn is_slug(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn parse_slug(value: &str) -> Result<&str, WebError> {
    if is_slug(value) {
        Ok(value)
    } else {
        Err(WebError::not_found())
    }
}

fn parse_year(value: &str) -> Result<&str, WebError> {
    if value.len() == 4 && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(value)
    } else {
        Err(WebError::not_found())
    }
}

/// GET /about/
pub async fn about(
    State(state): State<Arc<AppState>>,
    csrf: CsrfToken,
    user: CurrentUser,
) -> Result<Response, WebError> {
    let template = AboutTemplate {
        page: PageContext::new(&state, user.username(), &csrf.token),
    };
    Ok((csrf.jar, render(&template)?).into_response())
}

/// GET /questions/:pk/
pub async fn question(Path(pk): Path<String>) -> Result<String, WebError> {
    Ok(format!("Question : {}", parse_id(&pk)?))
}

/// GET /posts/:slug/
pub async fn post(Path(slug): Path<String>) -> Result<String, WebError> {
    Ok(format!("slug : {}", parse_slug(&slug)?))
}

/// GET /blog/:slug/:pk/
pub async fn blog_post(Path((slug, pk)): Path<(String, String)>) -> Result<String, WebError> {
    let slug = parse_slug(&slug)?;
    let pk = parse_id(&pk)?;
    Ok(format!("Blog_post : {slug} and PK : {pk}"))
}

/// GET /users/:username/
pub async fn user_profile(Path(username): Path<String>) -> Result<String, WebError> {
    crate::auth::validation::validate_username(&username).map_err(|_| WebError::not_found())?;
    Ok(format!("User Name : {username}"))
}

/// GET /years/:year/
pub async fn year_archive(Path(year): Path<String>) -> Result<String, WebError> {
    Ok(format!("Year : {}", parse_year(&year)?))
}

/// Fallback for unknown paths.
pub async fn not_found() -> WebError {
    WebError::not_found()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_slug() {
        assert!(is_slug("hello-world_2"));
        assert!(!is_slug(""));
        assert!(!is_slug("hello world"));
        assert!(!is_slug("caf\u{e9}"));
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("2024").unwrap(), "2024");
        assert!(parse_year("999").is_err());
        assert!(parse_year("20245").is_err());
        assert!(parse_year("20a4").is_err());
    }

    #[tokio::test]
    async fn test_placeholders() {
        assert_eq!(
            question(Path("12".to_string())).await.unwrap(),
            "Question : 12"
        );
        assert_eq!(
            blog_post(Path(("intro".to_string(), "3".to_string())))
                .await
                .unwrap(),
            "Blog_post : intro and PK : 3"
        );
        assert_eq!(
            user_profile(Path("john".to_string())).await.unwrap(),
            "User Name : john"
        );
        assert!(year_archive(Path("24".to_string())).await.is_err());
    }
}
