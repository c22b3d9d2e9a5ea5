use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use common::types::ApiResponse;
use service::polls::PollService;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub polls: Arc<PollService>,
}

/// Voter identity attached to authenticated requests.
#[derive(Clone, Debug)]
pub struct VoterId(pub String);

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// `POST /api/login`. The returned token is literally the user's id; there
/// is no signing or expiry and nothing downstream verifies it.
pub async fn login(State(state): State<AppState>, Json(req): Json<LoginRequest>) -> Response {
    match state.polls.authenticate(&req.username, &req.password).await {
        Some(user) => Json(ApiResponse::data(json!({ "token": user.id }))).into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("authentication failed")),
        )
            .into_response(),
    }
}

/// Require a non-empty `Authorization` header.
///
/// The header value is never inspected beyond presence, and the voter
/// identity is a fixed placeholder rather than being derived from the
/// token. Both gaps are inherited from the original system and documented
/// rather than features.
pub async fn require_auth(mut req: Request, next: Next) -> Result<Response, Response> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if token.is_empty() {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("missing authorization token")),
        )
            .into_response());
    }

    req.extensions_mut().insert(VoterId("user123".to_string()));
    Ok(next.run(req).await)
}
