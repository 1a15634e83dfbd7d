//! Supabase-style backend gateway
//!
//! Talks to two services behind one base URL:
//! 1. Auth: `/auth/v1/token`, `/auth/v1/signup`, `/auth/v1/logout`
//! 2. Data: `/rest/v1/watchlist` and `/rest/v1/users` (PostgREST filters)
//!
//! Every request carries the project key in `apikey`; authenticated calls add
//! the user's bearer token, falling back to the project key when the session
//! has none yet.

use crate::{
    error::{AppError, AppResult},
    models::{AuthSession, UserProfile, WatchlistEntry},
    services::gateway::BackendGateway,
};
use chrono::{DateTime, Duration, Utc};
use reqwest::{Client as HttpClient, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

const WATCHLIST_TABLE: &str = "watchlist";
const USERS_TABLE: &str = "users";

#[derive(Clone)]
pub struct SupabaseGateway {
    http_client: HttpClient,
    api_url: String,
    api_key: String,
}

/// Body of a token or auto-confirmed signup response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    #[serde(default)]
    user: Option<AuthUser>,
    /// Present when signup answers with the bare user object
    #[serde(default)]
    id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: Uuid,
}

#[derive(Debug, Deserialize)]
struct WatchlistRow {
    movie_id: String,
}

impl TokenResponse {
    fn into_session(self, now: DateTime<Utc>) -> AppResult<AuthSession> {
        let user_id = self
            .user
            .map(|u| u.id)
            .or(self.id)
            .ok_or_else(|| AppError::ExternalApi("Auth response did not include a user".to_string()))?;

        let expires_at = match (self.expires_at, self.expires_in) {
            (Some(at), _) => DateTime::from_timestamp(at, 0),
            // Out-of-range lifetimes are dropped rather than trusted
            (None, Some(secs)) => {
                Duration::try_seconds(secs).and_then(|d| now.checked_add_signed(d))
            }
            (None, None) => None,
        };

        Ok(AuthSession {
            user_id,
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
        })
    }
}

/// Pulls the human-readable message out of a backend error body
///
/// Auth errors use `error_description` or `msg`, PostgREST uses `message`.
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let message = parsed.as_ref().and_then(|value| {
        ["error_description", "msg", "message", "error"]
            .iter()
            .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
            .map(str::to_string)
    });

    match message {
        Some(message) if !message.is_empty() => message,
        _ if !body.trim().is_empty() => body.trim().to_string(),
        _ => format!("Backend returned status {}", status),
    }
}

fn eq_filter(value: &str) -> String {
    format!("eq.{}", value)
}

impl SupabaseGateway {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.api_url, path)
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.api_url, table)
    }

    fn bearer<'a>(&'a self, session: Option<&'a AuthSession>) -> &'a str {
        session
            .and_then(|s| s.access_token.as_deref())
            .unwrap_or(self.api_key.as_str())
    }

    fn with_keys(&self, builder: RequestBuilder, session: Option<&AuthSession>) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(self.bearer(session))
    }

    /// Turns a non-2xx response into `ExternalApi` carrying the backend's message
    async fn check(response: Response) -> AppResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = error_message(status, &body);

        tracing::warn!(status = %status, error = %message, "Backend request failed");

        Err(AppError::ExternalApi(message))
    }

    async fn watchlist_rows(
        &self,
        session: &AuthSession,
        movie_id: Option<&str>,
    ) -> AppResult<Vec<WatchlistRow>> {
        let user_filter = eq_filter(&session.user_id.to_string());
        let mut query = vec![("select", "movie_id".to_string()), ("user_id", user_filter)];
        if let Some(movie_id) = movie_id {
            query.push(("movie_id", eq_filter(movie_id)));
        }

        let response = self
            .with_keys(self.http_client.get(self.rest_url(WATCHLIST_TABLE)), Some(session))
            .query(&query)
            .send()
            .await?;

        let rows: Vec<WatchlistRow> = Self::check(response).await?.json().await?;
        Ok(rows)
    }
}

#[async_trait::async_trait]
impl BackendGateway for SupabaseGateway {
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let response = self
            .with_keys(self.http_client.post(self.auth_url("token")), None)
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let token: TokenResponse = Self::check(response).await?.json().await?;
        let session = token.into_session(Utc::now())?;

        tracing::info!(user_id = %session.user_id, gateway = self.name(), "Signed in");

        Ok(session)
    }

    async fn sign_up(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> AppResult<AuthSession> {
        let response = self
            .with_keys(self.http_client.post(self.auth_url("signup")), None)
            .json(&json!({
                "email": email,
                "password": password,
                "data": { "full_name": full_name }
            }))
            .send()
            .await?;

        let token: TokenResponse = Self::check(response).await?.json().await?;
        let session = token.into_session(Utc::now())?;

        tracing::info!(
            user_id = %session.user_id,
            awaiting_confirmation = session.awaiting_confirmation(),
            gateway = self.name(),
            "Signed up"
        );

        Ok(session)
    }

    async fn sign_out(&self, session: &AuthSession) -> AppResult<()> {
        let response = self
            .with_keys(self.http_client.post(self.auth_url("logout")), Some(session))
            .send()
            .await?;

        Self::check(response).await?;

        tracing::info!(user_id = %session.user_id, gateway = self.name(), "Signed out");
        Ok(())
    }

    async fn list_entries(&self, session: &AuthSession) -> AppResult<Vec<String>> {
        let rows = self.watchlist_rows(session, None).await?;

        tracing::debug!(user_id = %session.user_id, entries = rows.len(), "Watchlist fetched");

        Ok(rows.into_iter().map(|row| row.movie_id).collect())
    }

    async fn contains_entry(&self, session: &AuthSession, movie_id: &str) -> AppResult<bool> {
        let rows = self.watchlist_rows(session, Some(movie_id)).await?;
        Ok(!rows.is_empty())
    }

    async fn add_entry(&self, session: &AuthSession, movie_id: &str) -> AppResult<()> {
        let entry = WatchlistEntry {
            user_id: session.user_id,
            movie_id: movie_id.to_string(),
        };

        let response = self
            .with_keys(self.http_client.post(self.rest_url(WATCHLIST_TABLE)), Some(session))
            .header("Prefer", "return=minimal")
            .json(&entry)
            .send()
            .await?;

        Self::check(response).await?;

        tracing::info!(user_id = %session.user_id, movie_id = %movie_id, "Added to watchlist");
        Ok(())
    }

    async fn remove_entry(&self, session: &AuthSession, movie_id: &str) -> AppResult<()> {
        let response = self
            .with_keys(self.http_client.delete(self.rest_url(WATCHLIST_TABLE)), Some(session))
            .query(&[
                ("user_id", eq_filter(&session.user_id.to_string())),
                ("movie_id", eq_filter(movie_id)),
            ])
            .send()
            .await?;

        Self::check(response).await?;

        tracing::info!(user_id = %session.user_id, movie_id = %movie_id, "Removed from watchlist");
        Ok(())
    }

    async fn fetch_profile(&self, session: &AuthSession) -> AppResult<UserProfile> {
        let response = self
            .with_keys(self.http_client.get(self.rest_url(USERS_TABLE)), Some(session))
            .query(&[
                ("select", "full_name,email".to_string()),
                ("id", eq_filter(&session.user_id.to_string())),
            ])
            .send()
            .await?;

        let rows: Vec<UserProfile> = Self::check(response).await?.json().await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", session.user_id)))
    }

    async fn update_profile(&self, session: &AuthSession, profile: &UserProfile) -> AppResult<()> {
        let response = self
            .with_keys(self.http_client.patch(self.rest_url(USERS_TABLE)), Some(session))
            .query(&[("id", eq_filter(&session.user_id.to_string()))])
            .header("Prefer", "return=minimal")
            .json(profile)
            .send()
            .await?;

        Self::check(response).await?;

        tracing::info!(user_id = %session.user_id, "Profile updated");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "supabase"
    }
}
