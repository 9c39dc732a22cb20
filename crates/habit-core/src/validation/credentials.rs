//! Credential schemas.
//!
//! Both entry points enforce the same blocking password rule: non-empty and
//! at least [`MIN_PASSWORD_LENGTH`] characters. The mixed-case, digit and
//! symbol composition is only reported as a [`PasswordStrength`] hint.

use std::sync::LazyLock;

use regex::Regex;

use super::{ValidationErrors, check_name};
use crate::auth::{SignInRequest, SignUpRequest};

pub const MIN_PASSWORD_LENGTH: usize = 8;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

/// Returns true for a well-formed email address.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

fn check_email(errors: &mut ValidationErrors, email: &str) {
    if email.trim().is_empty() {
        errors.add("email", "Email is required.");
    } else if !is_valid_email(email) {
        errors.add("email", "Email must be a valid email address.");
    }
}

fn check_password(errors: &mut ValidationErrors, password: &str) {
    if password.is_empty() {
        errors.add("password", "Password is required.");
    } else if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.add(
            "password",
            format!("Password must be at least {} characters.", MIN_PASSWORD_LENGTH),
        );
    }
}

/// Sign-in form input.
#[derive(Debug, Clone, Default)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<SignInRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_email(&mut errors, &self.email);
        check_password(&mut errors, &self.password);

        errors.finish(|| SignInRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// Sign-up form input.
#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Terms and conditions accepted
    pub accept_terms: bool,
}

impl SignUpForm {
    pub fn validate(&self) -> Result<SignUpRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_name(
            &mut errors,
            "username",
            &self.username,
            "Username must be at least 3 characters.",
        );
        check_email(&mut errors, &self.email);
        check_password(&mut errors, &self.password);
        if !self.accept_terms {
            errors.add(
                "terms",
                "Please accept terms and conditions to create your account.",
            );
        }

        errors.finish(|| SignUpRequest {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// Non-blocking composition hint for a password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordStrength {
    pub long_enough: bool,
    pub has_lowercase: bool,
    pub has_uppercase: bool,
    pub has_digit: bool,
    pub has_symbol: bool,
}

impl PasswordStrength {
    pub fn is_strong(&self) -> bool {
        self.missing().is_empty()
    }

    /// Descriptions of the unmet composition rules.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (self.long_enough, "at least 8 characters"),
            (self.has_lowercase, "a lowercase letter"),
            (self.has_uppercase, "an uppercase letter"),
            (self.has_digit, "a number"),
            (self.has_symbol, "a special character"),
        ]
        .into_iter()
        .filter(|(ok, _)| !ok)
        .map(|(_, label)| label)
        .collect()
    }
}

pub fn password_strength(password: &str) -> PasswordStrength {
    PasswordStrength {
        long_enough: password.chars().count() >= MIN_PASSWORD_LENGTH,
        has_lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
        has_uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
        has_digit: password.chars().any(|c| c.is_ascii_digit()),
        has_symbol: password.chars().any(|c| !c.is_ascii_alphanumeric()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_sign_in() {
        let request = SignInForm::new(" reader@example.com ", "longenough")
            .validate()
            .unwrap();
        assert_eq!(request.email, "reader@example.com");
        assert_eq!(request.password, "longenough");
    }

    #[test]
    fn test_sign_in_rejects_bad_email_and_short_password() {
        let errors = SignInForm::new("not-an-email", "short").validate().unwrap_err();
        assert_eq!(errors.get("email"), Some("Email must be a valid email address."));
        assert_eq!(
            errors.get("password"),
            Some("Password must be at least 8 characters.")
        );
    }

    #[test]
    fn test_sign_in_required_fields() {
        let errors = SignInForm::default().validate().unwrap_err();
        assert_eq!(errors.get("email"), Some("Email is required."));
        assert_eq!(errors.get("password"), Some("Password is required."));
    }

    #[test]
    fn test_weak_password_is_not_blocking() {
        // Composition is a hint only; sign-in and sign-up share one rule.
        assert!(SignInForm::new("a@example.com", "alllowercase").validate().is_ok());

        let form = SignUpForm {
            username: "reader".to_string(),
            email: "a@example.com".to_string(),
            password: "alllowercase".to_string(),
            accept_terms: true,
        };
        assert!(form.validate().is_ok());
        assert!(!password_strength(&form.password).is_strong());
    }

    #[test]
    fn test_sign_up_requires_terms_and_username() {
        let form = SignUpForm {
            username: "ab".to_string(),
            email: "a@example.com".to_string(),
            password: "Secret#123".to_string(),
            accept_terms: false,
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.get("username").is_some());
        assert!(errors.get("terms").is_some());
        assert!(errors.get("password").is_none());
    }

    #[test]
    fn test_password_strength_report() {
        let strength = password_strength("abc");
        assert_eq!(
            strength.missing(),
            vec![
                "at least 8 characters",
                "an uppercase letter",
                "a number",
                "a special character"
            ]
        );
        assert!(password_strength("Secret#123").is_strong());
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("first.last+tag@sub.example.org"));
        assert!(!is_valid_email("missing-at.example.com"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@example.com"));
    }
}
