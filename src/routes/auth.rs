use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    forms::{SignInForm, SignUpForm},
    middleware::AuthUser,
    models::AuthSession,
    services::session::LOGIN_REQUIRED,
};

use super::AppState;

pub async fn sign_in(
    State(state): State<AppState>,
    Json(form): Json<SignInForm>,
) -> AppResult<Json<AuthSession>> {
    let form = form.validated()?;
    let session = state.gateway.sign_in(&form.email, &form.password).await?;
    tracing::info!(user_id = %session.user_id, "Signed in");
    Ok(Json(session))
}

/// Registers an account; the session has no token until the email is confirmed
pub async fn sign_up(
    State(state): State<AppState>,
    Json(form): Json<SignUpForm>,
) -> AppResult<(StatusCode, Json<AuthSession>)> {
    let form = form.validated()?;
    let session = state
        .gateway
        .sign_up(&form.full_name, &form.email, &form.password)
        .await?;

    tracing::info!(
        user_id = %session.user_id,
        awaiting_confirmation = session.awaiting_confirmation(),
        "Signed up"
    );
    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn sign_out(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<StatusCode> {
    let session = auth.require(LOGIN_REQUIRED)?;
    state
        .gateway
        .sign_out(&session)
        .await
        .map_err(|e| e.context("log out"))?;
    Ok(StatusCode::NO_CONTENT)
}
