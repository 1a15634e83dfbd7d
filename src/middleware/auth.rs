//! Caller identity for watchlist and profile routes.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::AuthSession,
    services::session::require_auth,
};

pub const USER_ID_HEADER: &str = "x-user-id";

/// Backend session rebuilt from the request headers, if the caller sent one
///
/// No `x-user-id` header means nobody is signed in; each handler decides the
/// message through [`AuthUser::require`]. `Authorization: Bearer <token>` is
/// optional because an account awaiting email confirmation has no token yet.
/// Malformed headers are rejected outright.
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     let session = auth.require(LOGIN_REQUIRED)?;
///     tracing::info!(user_id = %session.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub Option<AuthSession>);

impl AuthUser {
    pub fn require(self, message: &str) -> AppResult<AuthSession> {
        require_auth(self.0.as_ref(), message).cloned()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(user_id) = parts.headers.get(USER_ID_HEADER) else {
            return Ok(AuthUser(None));
        };

        let user_id = user_id
            .to_str()
            .ok()
            .and_then(|v| Uuid::parse_str(v.trim()).ok())
            .ok_or_else(|| AppError::Unauthorized("Invalid user id".into()))?;

        let access_token = match parts.headers.get("authorization") {
            None => None,
            Some(value) => {
                let value = value
                    .to_str()
                    .map_err(|_| AppError::Unauthorized("Invalid Authorization header".into()))?;
                let token = value.strip_prefix("Bearer ").ok_or_else(|| {
                    AppError::Unauthorized(
                        "Invalid Authorization format. Expected: Bearer <token>".into(),
                    )
                })?;
                Some(token.trim().to_string())
            }
        };

        Ok(AuthUser(Some(AuthSession {
            user_id,
            access_token,
            refresh_token: None,
            expires_at: None,
        })))
    }
}
