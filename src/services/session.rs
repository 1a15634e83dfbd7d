use std::sync::Arc;

use chrono::Utc;

use crate::{
    catalog::Catalog,
    error::{AppError, AppResult},
    forms::{ProfileForm, SignInForm, SignUpForm},
    models::{AuthSession, MovieSummary, UserProfile},
    services::{filter, gateway::BackendGateway},
    store::{PreferencesStore, StorageBackend},
};

pub const LOGIN_REQUIRED: &str = "Please log in.";
pub const LOGIN_TO_MANAGE_LIST: &str = "Please log in to manage your list.";
pub const LOGIN_TO_VIEW_LIST: &str = "Please log in to view your list.";
pub const LOGIN_FOR_PROFILE: &str = "No user ID found. Please log in.";

/// Fails with `message` when nobody is signed in or the token has expired
pub fn require_auth<'a>(
    session: Option<&'a AuthSession>,
    message: &str,
) -> AppResult<&'a AuthSession> {
    match session {
        Some(session) if !session.is_expired(Utc::now()) => Ok(session),
        _ => Err(AppError::Unauthorized(message.to_string())),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated(AuthSession),
}

/// The signed-in user as seen from the storefront
///
/// Owns the preferences store and drives the gateway. A failed backend call
/// surfaces its message and leaves the state exactly as it was.
pub struct Session<B: StorageBackend> {
    gateway: Arc<dyn BackendGateway>,
    store: PreferencesStore<B>,
    state: SessionState,
}

impl<B: StorageBackend> Session<B> {
    /// Restores the signed-in state from a stored user id, if any
    pub fn new(gateway: Arc<dyn BackendGateway>, store: PreferencesStore<B>) -> Self {
        let state = match store.user_id() {
            Some(user_id) => SessionState::Authenticated(AuthSession::for_user(user_id)),
            None => SessionState::Unauthenticated,
        };

        Self {
            gateway,
            store,
            state,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    pub fn preferences(&self) -> &PreferencesStore<B> {
        &self.store
    }

    pub fn preferences_mut(&mut self) -> &mut PreferencesStore<B> {
        &mut self.store
    }

    fn auth(&self, message: &str) -> AppResult<&AuthSession> {
        let current = match &self.state {
            SessionState::Authenticated(session) => Some(session),
            SessionState::Unauthenticated => None,
        };
        require_auth(current, message)
    }

    /// Persists the user id first so a failed write leaves the state untouched
    fn enter(&mut self, session: AuthSession) -> AppResult<AuthSession> {
        self.store.set_user_id(session.user_id)?;
        self.state = SessionState::Authenticated(session.clone());
        Ok(session)
    }

    pub async fn sign_in(&mut self, form: SignInForm) -> AppResult<AuthSession> {
        let form = form.validated()?;
        let session = self.gateway.sign_in(&form.email, &form.password).await?;

        tracing::info!(user_id = %session.user_id, "Session authenticated");
        self.enter(session)
    }

    /// Registers and signs in; the session may still await email confirmation
    pub async fn sign_up(&mut self, form: SignUpForm) -> AppResult<AuthSession> {
        let form = form.validated()?;
        let session = self
            .gateway
            .sign_up(&form.full_name, &form.email, &form.password)
            .await?;

        tracing::info!(
            user_id = %session.user_id,
            awaiting_confirmation = session.awaiting_confirmation(),
            "Account created"
        );
        self.enter(session)
    }

    /// Ends the session and drops the per-user local data
    pub async fn sign_out(&mut self) -> AppResult<()> {
        if let SessionState::Authenticated(session) = &self.state {
            self.gateway
                .sign_out(session)
                .await
                .map_err(|e| e.context("log out"))?;
        }

        self.store.clear_session_data()?;
        self.state = SessionState::Unauthenticated;

        tracing::info!("Session ended");
        Ok(())
    }

    /// Signs out if possible and wipes everything stored on the device
    pub async fn delete_account(&mut self) -> AppResult<()> {
        if let SessionState::Authenticated(session) = &self.state {
            if let Err(e) = self.gateway.sign_out(session).await {
                tracing::warn!(error = %e, "Sign-out during account deletion failed");
            }
        }

        self.store.clear()?;
        self.state = SessionState::Unauthenticated;
        Ok(())
    }

    pub async fn is_in_watchlist(&self, movie_id: &str) -> AppResult<bool> {
        let session = self.auth(LOGIN_TO_MANAGE_LIST)?;
        self.gateway
            .contains_entry(session, movie_id)
            .await
            .map_err(|e| e.context("check watchlist"))
    }

    pub async fn add_to_watchlist(&self, movie_id: &str) -> AppResult<()> {
        let session = self.auth(LOGIN_TO_MANAGE_LIST)?;
        self.gateway
            .add_entry(session, movie_id)
            .await
            .map_err(|e| e.context("add to watchlist"))
    }

    pub async fn remove_from_watchlist(&self, movie_id: &str) -> AppResult<()> {
        let session = self.auth(LOGIN_TO_MANAGE_LIST)?;
        self.gateway
            .remove_entry(session, movie_id)
            .await
            .map_err(|e| e.context("remove from watchlist"))
    }

    /// Flips membership given what the page currently shows; returns the new membership
    pub async fn toggle_watchlist(&self, movie_id: &str, in_list: bool) -> AppResult<bool> {
        if in_list {
            self.remove_from_watchlist(movie_id).await?;
        } else {
            self.add_to_watchlist(movie_id).await?;
        }
        Ok(!in_list)
    }

    /// The user's saved titles that exist in `catalog`, in catalog order
    pub async fn watchlist(&self, catalog: &Catalog) -> AppResult<Vec<MovieSummary>> {
        let session = self.auth(LOGIN_TO_VIEW_LIST)?;
        let ids = self
            .gateway
            .list_entries(session)
            .await
            .map_err(|e| e.context("fetch your list"))?;

        Ok(filter::watchlist_projection(catalog.all(), &ids))
    }

    pub async fn profile(&self) -> AppResult<UserProfile> {
        let session = self.auth(LOGIN_FOR_PROFILE)?;
        self.gateway
            .fetch_profile(session)
            .await
            .map_err(|e| e.context("fetch user data"))
    }

    pub async fn update_profile(&self, form: ProfileForm) -> AppResult<UserProfile> {
        let session = self.auth(LOGIN_FOR_PROFILE)?;
        let profile = form.validated()?;
        self.gateway
            .update_profile(session, &profile)
            .await
            .map_err(|e| e.context("update user data"))?;
        Ok(profile)
    }

    pub fn record_view(&mut self, movie_id: &str) -> AppResult<()> {
        self.store.record_view(movie_id)
    }

    pub fn viewing_history(&self, catalog: &Catalog) -> Vec<MovieSummary> {
        filter::watchlist_projection(catalog.all(), self.store.viewing_history())
    }

    pub fn recommendations(&self, catalog: &Catalog) -> Vec<MovieSummary> {
        filter::summarize(filter::recommendations(
            catalog.all(),
            self.store.viewing_history(),
        ))
    }

    /// Clears history, which also empties the recommendations
    pub fn clear_history(&mut self) -> AppResult<()> {
        self.store.clear_history()
    }
}
