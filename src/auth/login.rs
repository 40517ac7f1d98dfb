//! Credential checks for sign-in.

use thiserror::Error;
use tracing::{info, warn};

use crate::auth::verify_password;
use crate::db::{User, UserRepository};

/// Sign-in errors.
#[derive(Error, Debug)]
pub enum LoginError {
    /// Unknown user, wrong password or inactive account.
    #[error("Please enter a correct username and password.")]
    InvalidCredentials,

    /// Database error.
    #[error("database error: {0}")]
    Database(String),
}

/// Check a username/password pair and record the sign-in.
///
/// Unknown users, wrong passwords and inactive accounts all yield
/// [`LoginError::InvalidCredentials`].
pub async fn authenticate(
    repo: &UserRepository<'_>,
    username: &str,
    password: &str,
) -> std::result::Result<User, LoginError> {
    let user = repo
        .get_by_username(username.trim())
        .await
        .map_err(|e| LoginError::Database(e.to_string()))?;

    let Some(user) = user else {
        warn!(username = %username, "login failed: unknown user");
        return Err(LoginError::InvalidCredentials);
    };

    if verify_password(password, &user.password).is_err() || !user.is_active {
        warn!(user_id = user.id, "login failed");
        return Err(LoginError::InvalidCredentials);
    }

    repo.update_last_login(user.id)
        .await
        .map_err(|e| LoginError::Database(e.to_string()))?;

    info!(user_id = user.id, username = %user.username, "user logged in");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{register, RegistrationRequest};
    use crate::db::Database;

    async fn setup() -> Database {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());
        register(&repo, RegistrationRequest::new("john", "john@doe.com", "abcdef123"))
            .await
            .unwrap();
        db
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let db = setup().await;
        let repo = UserRepository::new(db.pool());

        let user = authenticate(&repo, "John", "abcdef123").await.unwrap();
        assert_eq!(user.username, "john");

        let stored = repo.get_by_id(user.id).await.unwrap().unwrap();
        assert!(stored.last_login.is_some());
    }

    #[tokio::test]
    async fn test_authenticate_failures() {
        let db = setup().await;
        let repo = UserRepository::new(db.pool());

        assert!(matches!(
            authenticate(&repo, "john", "wrong-password").await,
            Err(LoginError::InvalidCredentials)
        ));
        assert!(matches!(
            authenticate(&repo, "nobody", "abcdef123").await,
            Err(LoginError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_authenticate_inactive_user() {
        let db = setup().await;
        sqlx::query("UPDATE users SET is_active = 0")
            .execute(db.pool())
            .await
            .unwrap();

        let repo = UserRepository::new(db.pool());
        assert!(matches!(
            authenticate(&repo, "john", "abcdef123").await,
            Err(LoginError::InvalidCredentials)
        ));
    }
}
