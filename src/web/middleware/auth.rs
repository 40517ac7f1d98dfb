//! Session cookie authentication.

use std::sync::Arc;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::config::MAX_SESSION_TTL_DAYS;
use crate::db::{SessionRepository, User};
use crate::web::error::WebError;
use crate::web::handlers::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "sessionid";

/// Build the session cookie for a freshly created session.
///
/// `Max-Age` is capped at [`MAX_SESSION_TTL_DAYS`].
pub fn session_cookie(token: String, ttl_days: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::days(ttl_days.clamp(0, MAX_SESSION_TTL_DAYS)))
        .build()
}

/// Cookie that clears the session cookie in the browser.
pub fn session_removal_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}

/// The signed-in user, if any.
///
/// Resolved from the `sessionid` cookie. Missing, unknown or expired
/// sessions yield `None`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<User>);

impl CurrentUser {
    /// Username of the signed-in user.
    pub fn username(&self) -> Option<String> {
        self.0.as_ref().map(|u| u.username.clone())
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = WebError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let Some(token) = jar.get(SESSION_COOKIE).map(|c| c.value().to_string()) else {
            return Ok(CurrentUser(None));
        };

        let user = SessionRepository::new(state.db.pool())
            .get_valid_user(&token)
            .await?;
        Ok(CurrentUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("token".to_string(), 14, false);
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "token");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::days(14)));
    }

    #[test]
    fn test_session_cookie_max_age_is_capped() {
        let cookie = session_cookie("token".to_string(), i64::MAX, false);
        assert_eq!(cookie.max_age(), Some(Duration::days(MAX_SESSION_TTL_DAYS)));
    }

    #[test]
    fn test_removal_cookie_path() {
        let cookie = session_removal_cookie();
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.path(), Some("/"));
    }
}
