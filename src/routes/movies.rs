use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{CategoryLabel, MovieRecord, MovieSummary},
    services::{
        feed::{home_feed, HomeFeed},
        filter,
    },
};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: String,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    seen_ids: Vec<String>,
}

pub async fn categories() -> Json<Vec<&'static str>> {
    Json(CategoryLabel::ALL.iter().map(|c| c.as_str()).collect())
}

/// Movies in a category; no category means All
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> AppResult<Json<Vec<MovieSummary>>> {
    let label = match params.category.as_deref() {
        Some(raw) => raw.parse::<CategoryLabel>()?,
        None => CategoryLabel::All,
    };

    let movies = filter::category_filter(state.catalog.all(), label);
    tracing::debug!(category = %label, results = movies.len(), "Category filter");
    Ok(Json(filter::summarize(movies)))
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Json<Vec<MovieSummary>> {
    let movies = filter::title_search(state.catalog.all(), &params.q);
    tracing::info!(query = %params.q, results = movies.len(), "Title search");
    Json(filter::summarize(movies))
}

pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MovieRecord>> {
    state
        .catalog
        .by_id(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))
}

pub async fn similar(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<MovieSummary>>> {
    let reference = state
        .catalog
        .by_id(&id)
        .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))?;

    Ok(Json(filter::summarize(filter::similar_movies(
        state.catalog.all(),
        reference,
    ))))
}

pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> Json<Vec<MovieSummary>> {
    let movies = filter::recommendations(state.catalog.all(), &request.seen_ids);
    tracing::debug!(
        seen = request.seen_ids.len(),
        results = movies.len(),
        "Recommendations"
    );
    Json(filter::summarize(movies))
}

pub async fn home(State(state): State<AppState>) -> Json<HomeFeed> {
    Json(home_feed(&state.catalog))
}
