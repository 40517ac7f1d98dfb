//! Authentication module for Boards.
//!
//! This module provides password hashing, sign-up validation, user
//! registration and credential checks.

mod login;
mod password;
mod registration;
pub mod validation;

pub use login::{authenticate, LoginError};
pub use password::{hash_password, validate_password, verify_password, PasswordError};
pub use registration::{register, RegistrationError, RegistrationRequest};
pub use validation::ValidationError;
