//! User model for Boards.

/// A registered account.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Login name (unique, case-insensitive).
    pub username: String,
    /// Email address (may be empty).
    pub email: String,
    /// Password hash (Argon2).
    pub password: String,
    /// Whether the account may sign in.
    pub is_active: bool,
    /// Account creation timestamp.
    pub date_joined: String,
    /// Last sign-in timestamp.
    pub last_login: Option<String>,
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login name.
    pub username: String,
    /// Password hash (should be pre-hashed with Argon2).
    pub password: String,
    /// Email address.
    pub email: String,
}

impl NewUser {
    /// Create a new user without an email address.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            email: String::new(),
        }
    }

    /// Set the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_builder() {
        let user = NewUser::new("alice", "hash").with_email("alice@example.com");
        assert_eq!(user.username, "alice");
        assert_eq!(user.password, "hash");
        assert_eq!(user.email, "alice@example.com");
    }

    #[test]
    fn test_new_user_defaults_to_empty_email() {
        let user = NewUser::new("bob", "hash");
        assert!(user.email.is_empty());
    }
}
