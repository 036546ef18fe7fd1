use thiserror::Error;

use super::token_store::{StorageError, TokenStore};
use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{AuthResponse, AuthTokens, ProfileUpdate, RegisterRequest, User};

/// Errors surfaced by authentication operations.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("{0}")]
    Login(String),

    #[error("{0}")]
    Registration(String),

    #[error("Invalid response format from server")]
    InvalidResponse,

    #[error("Not logged in")]
    NotLoggedIn,

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Current user and token pair, plus the operations that change them.
///
/// Created once at startup and passed explicitly to whatever needs it.
/// The API client it holds is armed with the access token whenever a user
/// is logged in.
#[derive(Debug)]
pub struct AuthState<S> {
    api: ApiClient,
    store: S,
    user: Option<User>,
    tokens: Option<AuthTokens>,
    loading: bool,
}

impl<S: TokenStore> AuthState<S> {
    /// Creates a holder in the loading state; call [`AuthState::restore`]
    /// to resolve it.
    pub fn new(api: ApiClient, store: S) -> Self {
        Self {
            api,
            store,
            user: None,
            tokens: None,
            loading: true,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn tokens(&self) -> Option<&AuthTokens> {
        self.tokens.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Resolves the initial state from the persisted token entry.
    ///
    /// An unreadable entry is removed. A stored session whose profile
    /// cannot be fetched is logged out. Neither case is an error.
    pub async fn restore(&mut self) {
        self.loading = true;

        let stored = match self.store.load() {
            Ok(tokens) => tokens,
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable token entry");
                if let Err(e) = self.store.clear() {
                    tracing::warn!(error = %e, "failed to remove token entry");
                }
                None
            }
        };

        if let Some(tokens) = stored {
            self.api.set_token(Some(&tokens.access));
            match self.api.profile().await {
                Ok(user) => {
                    tracing::debug!(user = %user.username, "session restored");
                    self.user = Some(user);
                    self.tokens = Some(tokens);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "stored session rejected, logging out");
                    self.force_logout();
                }
            }
        }

        self.loading = false;
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        match self.api.login(email, password).await {
            Ok(response) => self.accept(response),
            Err(e) => {
                tracing::warn!(error = %e, "login failed");
                Err(AuthError::Login(e.message_from(&["error"], "Login failed")))
            }
        }
    }

    pub async fn register(&mut self, request: &RegisterRequest) -> Result<User, AuthError> {
        match self.api.register(request).await {
            Ok(response) => self.accept(response),
            Err(e) => {
                tracing::warn!(error = %e, "registration failed");
                Err(AuthError::Registration(e.message_from(
                    &["email", "username", "password"],
                    "Registration failed",
                )))
            }
        }
    }

    /// Clears the user, the tokens and the persisted entry, and disarms the
    /// client. In-memory state is cleared even if the entry cannot be removed.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.user = None;
        self.tokens = None;
        self.api.set_token(None);
        self.store.clear()?;
        Ok(())
    }

    /// Merges a partial profile into the in-memory user. No-op when logged out.
    pub fn update_user(&mut self, patch: &ProfileUpdate) {
        if let Some(user) = self.user.as_mut() {
            patch.apply_to(user);
        }
    }

    /// Sends a profile patch and replaces the user with the server's copy.
    pub async fn save_profile(&mut self, patch: &ProfileUpdate) -> Result<User, AuthError> {
        if self.user.is_none() {
            return Err(AuthError::NotLoggedIn);
        }
        let user = self.api.update_profile(patch).await.map_err(|e| {
            tracing::warn!(error = %e, "profile update failed");
            e
        })?;
        self.user = Some(user.clone());
        Ok(user)
    }

    /// Re-fetches the profile. Failure logs the user out.
    pub async fn refresh_profile(&mut self) -> Result<User, AuthError> {
        if self.tokens.is_none() {
            return Err(AuthError::NotLoggedIn);
        }
        match self.api.profile().await {
            Ok(user) => {
                self.user = Some(user.clone());
                Ok(user)
            }
            Err(e) => {
                tracing::warn!(error = %e, "profile refresh failed, logging out");
                self.force_logout();
                Err(e.into())
            }
        }
    }

    fn accept(&mut self, response: AuthResponse) -> Result<User, AuthError> {
        let (user, tokens) = match (response.user, response.tokens) {
            (Some(user), Some(tokens)) => (user, tokens),
            _ => {
                tracing::warn!("auth response missing user or tokens");
                return Err(AuthError::InvalidResponse);
            }
        };

        self.api.set_token(Some(&tokens.access));
        tracing::debug!(user = %user.username, "logged in");
        self.user = Some(user.clone());

        // Persisting is best effort; the in-memory session stays valid.
        if let Err(e) = self.store.save(&tokens) {
            tracing::warn!(error = %e, "failed to persist tokens");
        }
        self.tokens = Some(tokens);
        Ok(user)
    }

    fn force_logout(&mut self) {
        if let Err(e) = self.logout() {
            tracing::warn!(error = %e, "failed to clear stored session");
        }
    }
}
