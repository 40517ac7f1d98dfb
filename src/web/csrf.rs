//! Anti-forgery protection for HTML forms.
//!
//! Double-submit scheme: a random token lives in the `csrftoken` cookie and
//! every form echoes it back in the hidden `csrfmiddlewaretoken` field.

use std::sync::Arc;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use rand::Rng;

use super::error::WebError;
use super::handlers::AppState;

/// Name of the anti-forgery cookie.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Name of the hidden form field.
pub const CSRF_FIELD: &str = "csrfmiddlewaretoken";

/// Length of generated tokens.
pub const TOKEN_LENGTH: usize = 64;

/// Generate a new random token.
pub fn generate_token() -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Compare two tokens without short-circuiting on the first difference.
fn tokens_match(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes().zip(b.bytes()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Build the anti-forgery cookie.
pub fn csrf_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((CSRF_COOKIE, token))
        .path("/")
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// Anti-forgery token for the current request.
///
/// Extracting it reuses the token from the request cookie, or issues a new
/// one and adds it to [`CsrfToken::jar`]. Handlers return the jar with
/// their response so the cookie reaches the browser.
#[derive(Debug, Clone)]
pub struct CsrfToken {
    /// Cookie jar to send back with the response.
    pub jar: CookieJar,
    /// Token to embed in forms.
    pub token: String,
    issued: bool,
}

impl CsrfToken {
    /// Read the token from a cookie jar, issuing one if absent.
    pub fn from_jar(jar: CookieJar, secure: bool) -> Self {
        match jar.get(CSRF_COOKIE).map(|c| c.value().to_string()) {
            Some(token) if !token.is_empty() => Self {
                jar,
                token,
                issued: false,
            },
            _ => {
                let token = generate_token();
                let jar = jar.add(csrf_cookie(token.clone(), secure));
                Self {
                    jar,
                    token,
                    issued: true,
                }
            }
        }
    }

    /// Check a submitted form token against the cookie.
    ///
    /// Fails when the request carried no cookie or the values differ.
    pub fn verify(&self, submitted: &str) -> Result<(), WebError> {
        if self.issued || submitted.is_empty() || !tokens_match(&self.token, submitted) {
            tracing::warn!("anti-forgery check failed");
            return Err(WebError::csrf_failed());
        }
        Ok(())
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for CsrfToken {
    type Rejection = WebError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(Self::from_jar(jar, state.secure_cookies))
    }
}
