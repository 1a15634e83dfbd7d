use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    forms::ProfileForm,
    middleware::AuthUser,
    models::UserProfile,
    services::session::LOGIN_FOR_PROFILE,
};

use super::AppState;

pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<UserProfile>> {
    let session = auth.require(LOGIN_FOR_PROFILE)?;
    let profile = state
        .gateway
        .fetch_profile(&session)
        .await
        .map_err(|e| e.context("fetch user data"))?;
    Ok(Json(profile))
}

pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(form): Json<ProfileForm>,
) -> AppResult<Json<UserProfile>> {
    let session = auth.require(LOGIN_FOR_PROFILE)?;
    let profile = form.validated()?;
    state
        .gateway
        .update_profile(&session, &profile)
        .await
        .map_err(|e| e.context("update user data"))?;
    Ok(Json(profile))
}
