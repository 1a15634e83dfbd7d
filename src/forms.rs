//! Sign-in, sign-up and profile forms
//!
//! Checked locally before anything reaches the backend. Only the first
//! failing field is reported, in form order, matching what the pages show
//! inline.

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::{
    error::{AppError, AppResult},
    models::UserProfile,
};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignInForm {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignUpForm {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProfileForm {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
}

/// Picks the message of the first failing field in `order`
fn first_error(errors: &ValidationErrors, order: &[&str]) -> AppError {
    let field_errors = errors.field_errors();

    let message = order
        .iter()
        .find_map(|field| {
            field_errors
                .iter()
                .find(|(name, _)| **name == *field)
                .and_then(|(_, errs)| errs.first())
                .and_then(|err| err.message.as_ref())
                .map(|message| message.to_string())
        })
        .unwrap_or_else(|| errors.to_string());

    AppError::Validation(message)
}

impl SignInForm {
    /// Trims the email and validates; the password is taken as typed
    pub fn validated(mut self) -> AppResult<Self> {
        self.email = self.email.trim().to_string();
        self.validate()
            .map_err(|e| first_error(&e, &["email", "password"]))?;
        Ok(self)
    }
}

impl SignUpForm {
    pub fn validated(mut self) -> AppResult<Self> {
        self.full_name = self.full_name.trim().to_string();
        self.email = self.email.trim().to_string();
        self.validate().map_err(|e| {
            first_error(&e, &["full_name", "email", "password", "confirm_password"])
        })?;
        Ok(self)
    }
}

impl ProfileForm {
    pub fn validated(mut self) -> AppResult<UserProfile> {
        self.full_name = self.full_name.trim().to_string();
        self.email = self.email.trim().to_string();
        self.validate()
            .map_err(|e| first_error(&e, &["full_name", "email"]))?;
        Ok(UserProfile {
            full_name: self.full_name,
            email: self.email,
        })
    }
}
