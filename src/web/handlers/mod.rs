//! Request handlers for the web interface.

pub mod accounts;
pub mod boards;
pub mod pages;

pub use accounts::*;
pub use boards::*;
pub use pages::*;

use std::sync::Arc;

use askama::Template;
use axum::response::Html;

use crate::config::{SessionConfig, SiteConfig};
use crate::Database;

use super::error::WebError;

/// Shared database handle.
pub type SharedDatabase = Arc<Database>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database pool.
    pub db: SharedDatabase,
    /// Site name shown in the page header.
    pub site_name: String,
    /// Timezone used to display timestamps.
    pub timezone: String,
    /// Sign-in session lifetime in days.
    pub session_ttl_days: i64,
    /// Whether cookies carry the `Secure` attribute.
    pub secure_cookies: bool,
}

impl AppState {
    /// Create a new application state with default site and session settings.
    pub fn new(db: SharedDatabase) -> Self {
        let site = SiteConfig::default();
        let session = SessionConfig::default();
        Self {
            db,
            site_name: site.name,
            timezone: site.timezone,
            session_ttl_days: session.ttl_days,
            secure_cookies: session.secure_cookies,
        }
    }

    /// Apply site configuration.
    pub fn with_site_config(mut self, site: &SiteConfig) -> Self {
        self.site_name = site.name.clone();
        self.timezone = site.timezone.clone();
        self
    }

    /// Apply session configuration.
    pub fn with_session_config(mut self, session: &SessionConfig) -> Self {
        self.session_ttl_days = session.ttl_days;
        self.secure_cookies = session.secure_cookies;
        self
    }

    /// Format a stored timestamp for display.
    pub fn display_time(&self, datetime: &str) -> String {
        crate::datetime::format_display(datetime, &self.timezone)
    }
}

/// Parse a numeric path segment, answering 404 for anything else.
pub(crate) fn parse_id(segment: &str) -> Result<i64, WebError> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(WebError::not_found());
    }
    segment.parse().map_err(|_| WebError::not_found())
}

/// Render a template into an HTML response.
pub(crate) fn render<T: Template>(template: &T) -> Result<Html<String>, WebError> {
    Ok(Html(template.render()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id("007").unwrap(), 7);
        assert!(parse_id("").is_err());
        assert!(parse_id("-1").is_err());
        assert!(parse_id("abc").is_err());
        assert!(parse_id("99999999999999999999").is_err());
    }

    #[tokio::test]
    async fn test_app_state_config() {
        let db = Arc::new(Database::open_in_memory().await.unwrap());
        let site = SiteConfig {
            name: "Forum".to_string(),
            timezone: "Asia/Tokyo".to_string(),
        };
        let state = AppState::new(db).with_site_config(&site);
        assert_eq!(state.site_name, "Forum");
        assert_eq!(state.session_ttl_days, 14);
        assert_eq!(state.display_time("2024-01-15 10:30:00"), "Jan 15, 2024 19:30");
    }
}
