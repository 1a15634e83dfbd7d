use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    catalog::Catalog,
    middleware::{make_span_with_request_id, request_id_middleware},
    services::BackendGateway,
};

pub mod auth;
pub mod movies;
pub mod profile;
pub mod watchlist;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub gateway: Arc<dyn BackendGateway>,
}

impl AppState {
    pub fn new(catalog: Catalog, gateway: Arc<dyn BackendGateway>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            gateway,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/categories", get(movies::categories))
        .route("/movies", get(movies::list))
        .route("/movies/search", get(movies::search))
        .route("/movies/:id", get(movies::get_movie))
        .route("/movies/:id/similar", get(movies::similar))
        .route("/recommendations", post(movies::recommend))
        .route("/home", get(movies::home))
        // Session
        .route("/auth/signin", post(auth::sign_in))
        .route("/auth/signup", post(auth::sign_up))
        .route("/auth/signout", post(auth::sign_out))
        .route("/profile", get(profile::get_profile).put(profile::update_profile))
        // Watchlist
        .route("/watchlist", get(watchlist::list))
        .route(
            "/watchlist/:movie_id",
            get(watchlist::check)
                .put(watchlist::add)
                .delete(watchlist::remove),
        )
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
