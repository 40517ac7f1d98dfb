//! Input validation for account sign-up.
//!
//! Each rule returns a [`ValidationError`] whose display text is shown next
//! to the offending form field.

use thiserror::Error;

/// Maximum username length.
pub const MAX_USERNAME_LENGTH: usize = 150;

/// Maximum email length.
pub const MAX_EMAIL_LENGTH: usize = 254;

pub use super::password::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Username is empty.
    #[error("This field is required.")]
    UsernameRequired,

    /// Username is too long.
    #[error("Ensure this value has at most {MAX_USERNAME_LENGTH} characters.")]
    UsernameTooLong,

    /// Username contains invalid characters.
    #[error("Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.")]
    UsernameInvalidChars,

    /// Email is empty.
    #[error("This field is required.")]
    EmailRequired,

    /// Email is too long.
    #[error("Ensure this value has at most {MAX_EMAIL_LENGTH} characters.")]
    EmailTooLong,

    /// Email format is invalid.
    #[error("Enter a valid email address.")]
    EmailInvalidFormat,

    /// Password is too short.
    #[error("This password is too short. It must contain at least {MIN_PASSWORD_LENGTH} characters.")]
    PasswordTooShort,

    /// Password is too long.
    #[error("Ensure this value has at most {MAX_PASSWORD_LENGTH} characters.")]
    PasswordTooLong,

    /// Password only has digits.
    #[error("This password is entirely numeric.")]
    PasswordEntirelyNumeric,

    /// Password is the same as username.
    #[error("The password is too similar to the username.")]
    PasswordSameAsUsername,

    /// Confirmation does not match.
    #[error("The two password fields didn't match.")]
    PasswordMismatch,
}

impl ValidationError {
    /// Name of the sign-up form field the error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::UsernameRequired | Self::UsernameTooLong | Self::UsernameInvalidChars => {
                "username"
            }
            Self::EmailRequired | Self::EmailTooLong | Self::EmailInvalidFormat => "email",
            Self::PasswordTooShort
            | Self::PasswordTooLong
            | Self::PasswordEntirelyNumeric
            | Self::PasswordSameAsUsername => "password1",
            Self::PasswordMismatch => "password2",
        }
    }
}

/// Validate a username.
///
/// Requirements:
/// - Length: 1-150 characters
/// - Characters: letters, digits and `@ . + - _`
///
/// # Examples
///
/// ```
/// use boards::auth::validation::validate_username;
///
/// assert!(validate_username("john.doe+forum@home").is_ok());
/// assert!(validate_username("").is_err());
/// assert!(validate_username("john doe").is_err());
/// ```
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.is_empty() {
        return Err(ValidationError::UsernameRequired);
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::UsernameTooLong);
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        return Err(ValidationError::UsernameInvalidChars);
    }
    Ok(())
}

/// Validate a sign-up password.
///
/// Requirements:
/// - Length: 8-128 characters
/// - Not entirely numeric
/// - Not the same as the username (case-insensitive)
pub fn validate_registration_password(
    password: &str,
    username: Option<&str>,
) -> Result<(), ValidationError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }
    if len > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooLong);
    }
    if password.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::PasswordEntirelyNumeric);
    }
    if let Some(user) = username {
        if password.to_lowercase() == user.to_lowercase() {
            return Err(ValidationError::PasswordSameAsUsername);
        }
    }
    Ok(())
}

/// Validate a required email address.
///
/// This is a structural check: one `@`, a non-empty local part, a dotted
/// domain with no empty labels, and no whitespace.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::EmailTooLong);
    }
    if email.chars().any(|c| c.is_whitespace()) {
        return Err(ValidationError::EmailInvalidFormat);
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::EmailInvalidFormat);
    };
    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return Err(ValidationError::EmailInvalidFormat);
    }
    if domain.split('.').any(|label| label.is_empty()) {
        return Err(ValidationError::EmailInvalidFormat);
    }
    Ok(())
}

/// Validate every sign-up field, collecting all failures.
pub fn validate_registration(
    username: &str,
    email: &str,
    password: &str,
    password_confirm: &str,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if let Err(e) = validate_username(username) {
        errors.push(e);
    }
    if let Err(e) = validate_email(email) {
        errors.push(e);
    }
    if let Err(e) = validate_registration_password(password, Some(username)) {
        errors.push(e);
    }
    if password != password_confirm {
        errors.push(ValidationError::PasswordMismatch);
    }
    errors
}
