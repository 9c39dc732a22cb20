//! Bearer token storage port.
//!
//! The only state the client persists is the token string handed out by
//! `POST auth/signin`.

use std::sync::RwLock;

use crate::error::{HabitError, Result};

/// Durable storage for the bearer token.
///
/// # Security Note
///
/// Implementations must never log the token value.
pub trait TokenStore: Send + Sync {
    /// Returns the stored token, or `None` when signed out.
    fn load(&self) -> Result<Option<String>>;

    /// Persists `token`, replacing any previous value.
    fn save(&self, token: &str) -> Result<()>;

    /// Removes the stored token. Clearing an empty store succeeds.
    fn clear(&self) -> Result<()>;
}

/// Process-local token store.
///
/// Used by tests and by front ends that should not touch the disk.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        let guard = self
            .token
            .read()
            .map_err(|e| HabitError::internal(format!("token lock poisoned: {}", e)))?;
        Ok(guard.clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        let mut guard = self
            .token
            .write()
            .map_err(|e| HabitError::internal(format!("token lock poisoned: {}", e)))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self
            .token
            .write()
            .map_err(|e| HabitError::internal(format!("token lock poisoned: {}", e)))?;
        *guard = None;
        Ok(())
    }
}
