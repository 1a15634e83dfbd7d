use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Profile row as stored by the backend's `users` table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub full_name: String,
    pub email: String,
}

/// Credentials issued by the backend after a successful sign-in or sign-up
///
/// `access_token` is absent after a sign-up that still awaits email
/// confirmation; calls then go out with only the project key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthSession {
    pub user_id: Uuid,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl AuthSession {
    /// Session known only by user id, as restored from the stored token
    pub fn for_user(user_id: Uuid) -> Self {
        Self {
            user_id,
            access_token: None,
            refresh_token: None,
            expires_at: None,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map(|at| at <= now).unwrap_or(false)
    }

    pub fn awaiting_confirmation(&self) -> bool {
        self.access_token.is_none()
    }
}

/// One saved-for-later title; at most one per (user, movie) pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct WatchlistEntry {
    pub user_id: Uuid,
    pub movie_id: String,
}
