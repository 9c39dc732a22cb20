//! Authentication use case.
//!
//! Coordinates form validation, the auth endpoints, the token store and the
//! session so that front ends make one call per user action.

use std::sync::Arc;

use habit_core::Result;
use habit_core::session::Session;
use habit_core::token::TokenStore;
use habit_core::validation::{SignInForm, SignUpForm};

use crate::api::HabitApi;

pub struct AuthUseCase {
    api: HabitApi,
    tokens: Arc<dyn TokenStore>,
    session: Arc<Session>,
}

impl AuthUseCase {
    pub fn new(api: HabitApi, tokens: Arc<dyn TokenStore>, session: Arc<Session>) -> Self {
        Self {
            api,
            tokens,
            session,
        }
    }

    /// Validates the credentials, exchanges them for a token, persists it and
    /// marks the session authenticated.
    ///
    /// On any failure the session and the stored token are left untouched;
    /// invalid input never reaches the network.
    pub async fn sign_in(&self, form: &SignInForm) -> Result<()> {
        let request = form.validate()?;
        let token = self.api.sign_in(&request).await.inspect_err(|e| {
            tracing::warn!("Sign-in failed for {}: {}", request.email, e);
        })?;

        self.tokens.save(&token)?;
        self.session.login();
        tracing::info!("Signed in as {}", request.email);
        Ok(())
    }

    /// Validates the form and registers the account. The user signs in
    /// separately afterwards.
    pub async fn sign_up(&self, form: &SignUpForm) -> Result<()> {
        let request = form.validate()?;
        self.api.sign_up(&request).await.inspect_err(|e| {
            tracing::warn!("Sign-up failed for {}: {}", request.email, e);
        })?;
        tracing::info!("Registered account {}", request.username);
        Ok(())
    }

    /// Signs out on the server, then clears the stored token and the session.
    ///
    /// The local sign-out happens even if the server call fails, so a dead
    /// service never traps the user in a signed-in state.
    pub async fn sign_out(&self) -> Result<()> {
        if let Err(e) = self.api.sign_out().await {
            tracing::warn!("Server sign-out failed, clearing local session anyway: {}", e);
        }
        let cleared = self.tokens.clear();
        self.session.logout();
        tracing::info!("Signed out");
        cleared
    }
}
