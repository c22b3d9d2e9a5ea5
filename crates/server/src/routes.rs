use axum::middleware;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use common::types::Health;

use crate::auth::{self, AppState};
use crate::polls;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public login and poll reads, plus
/// authenticated poll creation and voting.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/api/login", post(auth::login))
        .route("/api/polls", get(polls::get_all_polls))
        .route("/api/polls/:id", get(polls::get_poll));

    let protected = Router::new()
        .route("/api/polls", post(polls::create_poll))
        .route("/api/polls/:id/vote", post(polls::vote))
        .route_layer(middleware::from_fn(auth::require_auth));

    public
        .merge(protected)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
