//! Session store.
//!
//! The session is an explicit context object shared as `Arc<Session>`. It
//! holds one boolean, "authenticated", and broadcasts every change through a
//! `tokio::sync::watch` channel so all views observe the same value.

use tokio::sync::watch;

use crate::token::TokenStore;

/// Client-local record of whether a bearer token is held.
///
/// The token itself is never inspected: presence alone means authenticated.
#[derive(Debug)]
pub struct Session {
    authenticated: watch::Sender<bool>,
}

impl Session {
    /// Creates a session with an explicit initial state.
    pub fn new(authenticated: bool) -> Self {
        let (authenticated, _) = watch::channel(authenticated);
        Self { authenticated }
    }

    /// Seeds the session from the presence of a stored token.
    ///
    /// A storage read failure is treated as "no token".
    pub fn initialize(tokens: &dyn TokenStore) -> Self {
        let has_token = match tokens.load() {
            Ok(token) => token.is_some_and(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!("Failed to read stored token, starting signed out: {}", e);
                false
            }
        };
        tracing::debug!(authenticated = has_token, "Session initialized");
        Self::new(has_token)
    }

    /// Marks the session authenticated. The caller has already persisted the
    /// token.
    pub fn login(&self) {
        self.authenticated.send_replace(true);
    }

    /// Marks the session signed out. The caller clears the persisted token
    /// and signs out on the server.
    pub fn logout(&self) {
        self.authenticated.send_replace(false);
    }

    pub fn is_authenticated(&self) -> bool {
        *self.authenticated.borrow()
    }

    /// Subscribes to authentication changes.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.authenticated.subscribe()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(false)
    }
}
