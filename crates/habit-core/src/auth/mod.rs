//! Authentication wire types.
//!
//! Credential payloads never print their password through `Debug`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Payload for `POST auth/signin`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for SignInRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Payload for `POST auth/signup`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct SignUpRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Response of a successful sign-in.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password() {
        let request = SignInRequest {
            email: "a@example.com".to_string(),
            password: "hunter22hunter".to_string(),
        };
        let printed = format!("{:?}", request);
        assert!(printed.contains("a@example.com"));
        assert!(!printed.contains("hunter22hunter"));
    }

    #[test]
    fn test_sign_up_wire_shape() {
        let request = SignUpRequest {
            username: "reader".to_string(),
            email: "a@example.com".to_string(),
            password: "Secret#123".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["username"], "reader");
        assert_eq!(value["password"], "Secret#123");
        assert!(value.get("tnc").is_none());
    }
}
