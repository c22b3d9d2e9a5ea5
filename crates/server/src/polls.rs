use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use common::types::ApiResponse;
use models::poll::Poll;
use service::polls::CreatePollInput;

use crate::auth::{AppState, VoterId};
use crate::errors::ApiError;

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub option_id: String,
}

/// `POST /api/polls` (auth required).
pub async fn create_poll(
    State(state): State<AppState>,
    Json(input): Json<CreatePollInput>,
) -> Result<(StatusCode, Json<ApiResponse<Poll>>), ApiError> {
    let poll = state.polls.create_poll(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::data(poll))))
}

/// `GET /api/polls`: reduced listing; `options` carries the option count,
/// not the option texts.
pub async fn get_all_polls(State(state): State<AppState>) -> Json<ApiResponse<Vec<Value>>> {
    let polls = state.polls.get_all_polls().await;
    let summaries = polls
        .iter()
        .map(|poll| {
            json!({
                "id": poll.id,
                "title": poll.title,
                "createdAt": poll.created_at,
                "endAt": poll.end_at,
                "options": poll.options.len(),
            })
        })
        .collect();
    Json(ApiResponse::data(summaries))
}

/// `GET /api/polls/{id}`: the full poll plus tallies aligned by option
/// index.
pub async fn get_poll(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    let poll = state.polls.get_poll(&id).await?;
    let vote_counts = poll.vote_counts();
    Ok(Json(ApiResponse::data(json!({
        "poll": poll,
        "vote_counts": vote_counts,
    }))))
}

/// `POST /api/polls/{id}/vote` (auth required).
pub async fn vote(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(voter): Extension<VoterId>,
    Json(req): Json<VoteRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.polls.vote(&id, &voter.0, &req.option_id).await?;
    Ok(Json(ApiResponse::message("vote recorded")))
}
