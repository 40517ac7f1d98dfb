//! Form payloads and their validation rules.
//!
//! Every field defaults to an empty string, so a missing field is treated
//! the same as an empty one.

use std::collections::BTreeMap;

use axum::{extract::rejection::FormRejection, Form};
use serde::Deserialize;
use validator::Validate;

use crate::auth::validation::{validate_email, validate_username, ValidationError};
use crate::auth::RegistrationError;

/// Message used for every required field.
pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// Unwrap a submitted form, treating an unreadable body as an empty form.
///
/// Handlers still run their lookups and the anti-forgery check, so a body
/// that is not urlencoded ends in 404 or 403 rather than 415.
pub fn form_or_default<T: Default>(form: Result<Form<T>, FormRejection>) -> T {
    match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "form body not readable");
            T::default()
        }
    }
}

/// Validate that a string is not empty after trimming whitespace.
pub fn not_empty_trimmed(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(
            validator::ValidationError::new("required").with_message(REQUIRED_MESSAGE.into())
        );
    }
    Ok(())
}

fn to_validator_error(err: ValidationError) -> validator::ValidationError {
    validator::ValidationError::new("invalid").with_message(err.to_string().into())
}

fn username_rules(value: &str) -> Result<(), validator::ValidationError> {
    validate_username(value).map_err(to_validator_error)
}

fn email_rules(value: &str) -> Result<(), validator::ValidationError> {
    validate_email(value).map_err(to_validator_error)
}

/// New-topic form.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewTopicForm {
    /// Subject line.
    #[serde(default)]
    #[validate(
        custom(function = "not_empty_trimmed"),
        length(max = 255, message = "Ensure this value has at most 255 characters.")
    )]
    pub subject: String,
    /// Opening message.
    #[serde(default)]
    #[validate(
        custom(function = "not_empty_trimmed"),
        length(max = 4000, message = "Ensure this value has at most 4000 characters.")
    )]
    pub message: String,
    /// Anti-forgery token.
    #[serde(default)]
    pub csrfmiddlewaretoken: String,
}

/// Reply form.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ReplyForm {
    /// Message body.
    #[serde(default)]
    #[validate(
        custom(function = "not_empty_trimmed"),
        length(max = 4000, message = "Ensure this value has at most 4000 characters.")
    )]
    pub message: String,
    /// Anti-forgery token.
    #[serde(default)]
    pub csrfmiddlewaretoken: String,
}

/// Sign-up form.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SignUpForm {
    /// Desired username.
    #[serde(default)]
    #[validate(custom(function = "username_rules"))]
    pub username: String,
    /// Email address.
    #[serde(default)]
    #[validate(custom(function = "email_rules"))]
    pub email: String,
    /// Password.
    #[serde(default)]
    #[validate(custom(function = "not_empty_trimmed"))]
    pub password1: String,
    /// Password confirmation.
    #[serde(default)]
    #[validate(
        custom(function = "not_empty_trimmed"),
        must_match(other = "password1", message = "The two password fields didn't match.")
    )]
    pub password2: String,
    /// Anti-forgery token.
    #[serde(default)]
    pub csrfmiddlewaretoken: String,
}

/// Login form.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LoginForm {
    /// Username.
    #[serde(default)]
    #[validate(custom(function = "not_empty_trimmed"))]
    pub username: String,
    /// Password.
    #[serde(default)]
    #[validate(custom(function = "not_empty_trimmed"))]
    pub password: String,
    /// Anti-forgery token.
    #[serde(default)]
    pub csrfmiddlewaretoken: String,
}

/// Logout form, carrying only the anti-forgery token.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogoutForm {
    #[serde(default)]
    pub csrfmiddlewaretoken: String,
}

/// Field-level and form-wide error messages for re-rendering a form.
#[derive(Debug, Clone, Default)]
pub struct FormErrors {
    fields: BTreeMap<String, Vec<String>>,
    non_field: Vec<String>,
}

impl FormErrors {
    /// Create an empty error set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the form's validation rules and collect the messages.
    pub fn validate<T: Validate>(form: &T) -> Self {
        match form.validate() {
            Ok(()) => Self::new(),
            Err(errors) => Self::from_validation_errors(&errors),
        }
    }

    /// Collect messages from `validator` errors.
    pub fn from_validation_errors(errors: &validator::ValidationErrors) -> Self {
        let mut form_errors = Self::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Enter a valid value for {field}."));
                form_errors.add(field.to_string(), message);
            }
        }
        form_errors
    }

    /// Add a message to a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let messages = self.fields.entry(field.into()).or_default();
        let message = message.into();
        if !messages.contains(&message) {
            messages.push(message);
        }
    }

    /// Add a form-wide message.
    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.non_field.push(message.into());
    }

    /// Messages for a field.
    pub fn field(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether a field has messages.
    pub fn has(&self, name: &str) -> bool {
        !self.field(name).is_empty()
    }

    /// Form-wide messages.
    pub fn non_field(&self) -> &[String] {
        &self.non_field
    }

    /// Whether there are no messages at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.non_field.is_empty()
    }

    /// Fold a failed registration into field errors.
    ///
    /// Returns `false` for failures that are not the user's to fix.
    pub fn add_registration_error(&mut self, err: &RegistrationError) -> bool {
        match err {
            RegistrationError::Validation(errors) => {
                for e in errors {
                    self.add(e.field(), e.to_string());
                }
                true
            }
            RegistrationError::UsernameExists => {
                self.add("username", err.to_string());
                true
            }
            RegistrationError::Password(_) | RegistrationError::Database(_) => false,
        }
    }
}
