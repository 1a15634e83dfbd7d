//! Session/watchlist gateway abstraction
//!
//! Thin adapter between storefront actions and the hosted auth/data backend.
//! Implementations only shape requests and responses: no retries, no
//! backoff, and backend error messages are passed through unchanged as
//! `AppError::ExternalApi`.

use crate::{
    error::AppResult,
    models::{AuthSession, UserProfile},
};

pub mod supabase;

pub use supabase::SupabaseGateway;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait BackendGateway: Send + Sync {
    /// Exchanges email and password for a session
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthSession>;

    /// Registers a new account
    ///
    /// When the backend still requires email confirmation the returned session
    /// carries the new user id but no access token.
    async fn sign_up(&self, full_name: &str, email: &str, password: &str)
        -> AppResult<AuthSession>;

    async fn sign_out(&self, session: &AuthSession) -> AppResult<()>;

    /// Movie ids on the user's watchlist, in backend order
    async fn list_entries(&self, session: &AuthSession) -> AppResult<Vec<String>>;

    async fn contains_entry(&self, session: &AuthSession, movie_id: &str) -> AppResult<bool>;

    async fn add_entry(&self, session: &AuthSession, movie_id: &str) -> AppResult<()>;

    async fn remove_entry(&self, session: &AuthSession, movie_id: &str) -> AppResult<()>;

    async fn fetch_profile(&self, session: &AuthSession) -> AppResult<UserProfile>;

    async fn update_profile(&self, session: &AuthSession, profile: &UserProfile)
        -> AppResult<()>;

    /// Gateway name for logging and debugging
    fn name(&self) -> &'static str;
}
