use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::{
    error::{AppError, AppResult},
    middleware::AuthUser,
    models::MovieSummary,
    services::{
        filter,
        session::{LOGIN_TO_MANAGE_LIST, LOGIN_TO_VIEW_LIST},
    },
};

use super::AppState;

#[derive(Debug, Serialize)]
pub struct Membership {
    pub movie_id: String,
    pub in_list: bool,
}

/// The user's list joined against the catalog
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<MovieSummary>>> {
    let session = auth.require(LOGIN_TO_VIEW_LIST)?;
    let ids = state
        .gateway
        .list_entries(&session)
        .await
        .map_err(|e| e.context("fetch your list"))?;

    Ok(Json(filter::watchlist_projection(state.catalog.all(), &ids)))
}

pub async fn check(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(movie_id): Path<String>,
) -> AppResult<Json<Membership>> {
    let session = auth.require(LOGIN_TO_MANAGE_LIST)?;
    let in_list = state
        .gateway
        .contains_entry(&session, &movie_id)
        .await
        .map_err(|e| e.context("check watchlist"))?;

    Ok(Json(Membership { movie_id, in_list }))
}

pub async fn add(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(movie_id): Path<String>,
) -> AppResult<(StatusCode, Json<Membership>)> {
    let session = auth.require(LOGIN_TO_MANAGE_LIST)?;
    if state.catalog.by_id(&movie_id).is_none() {
        return Err(AppError::NotFound("Movie not found".to_string()));
    }

    state
        .gateway
        .add_entry(&session, &movie_id)
        .await
        .map_err(|e| e.context("add to watchlist"))?;

    tracing::info!(user_id = %session.user_id, movie_id = %movie_id, "Added to watchlist");
    Ok((
        StatusCode::CREATED,
        Json(Membership {
            movie_id,
            in_list: true,
        }),
    ))
}

pub async fn remove(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(movie_id): Path<String>,
) -> AppResult<StatusCode> {
    let session = auth.require(LOGIN_TO_MANAGE_LIST)?;
    state
        .gateway
        .remove_entry(&session, &movie_id)
        .await
        .map_err(|e| e.context("remove from watchlist"))?;

    tracing::info!(user_id = %session.user_id, movie_id = %movie_id, "Removed from watchlist");
    Ok(StatusCode::NO_CONTENT)
}
