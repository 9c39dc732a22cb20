//! Client-side form validation.
//!
//! Each schema is evaluated synchronously before submission. Only the first
//! violated rule per field is reported, and a form with any error never
//! produces a request payload.
//!
//! # Module Structure
//!
//! - `credentials`: sign-in and sign-up forms, password strength hint
//! - `goal`: goal creation form
//! - `task`: task creation form

mod credentials;
mod goal;
mod task;

use std::fmt;

use serde::Serialize;

pub use credentials::{
    MIN_PASSWORD_LENGTH, PasswordStrength, SignInForm, SignUpForm, is_valid_email, password_strength,
};
pub use goal::GoalForm;
pub use task::TaskForm;

/// Minimum length of goal and task names, and of usernames.
pub const MIN_NAME_LENGTH: usize = 3;

/// A single violated rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// The set of field errors produced by one form evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation unless the field already has one.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.errors.push(FieldError {
                field,
                message: message.into(),
            });
        }
    }

    /// The message reported for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Returns `value` if no violation was recorded.
    pub fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Checks the shared "at least N characters" rule on a trimmed name.
fn check_name(errors: &mut ValidationErrors, field: &'static str, value: &str, message: &str) {
    if value.trim().chars().count() < MIN_NAME_LENGTH {
        errors.add(field, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_error_per_field_wins() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "too short");
        errors.add("name", "something else");
        errors.add("email", "invalid");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("name"), Some("too short"));
        assert_eq!(errors.to_string(), "name: too short; email: invalid");
    }

    #[test]
    fn test_finish_blocks_on_errors() {
        let mut errors = ValidationErrors::new();
        assert_eq!(errors.clone().finish(|| 1), Ok(1));

        errors.add("quantity", "not a number");
        assert!(errors.finish(|| 1).is_err());
    }
}
