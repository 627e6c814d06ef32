//! Handlers for upvoting and downvoting queued tracks.
//!
//! A duplicate upvote is a 409 `ALREADY_VOTED`; a downvote with nothing to
//! remove is a successful no-op.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use muzer_core::types::DbId;
use muzer_db::ledger::VoteLedger;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of the upvote and downvote endpoints.
#[derive(Debug, Deserialize, Validate)]
pub struct VoteRequest {
    #[validate(range(min = 1))]
    pub stream_id: DbId,
}

/// `removed` is false when the caller had nothing to take back.
#[derive(Debug, Serialize)]
pub struct DownvoteResponse {
    pub track_id: DbId,
    pub removed: bool,
}

/// POST /api/v1/streams/upvote
pub async fn upvote(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(input): ValidatedJson<VoteRequest>,
) -> AppResult<impl IntoResponse> {
    let vote = VoteLedger::upvote(&state.pool, user.user_id, input.stream_id).await?;
    Ok(Json(DataResponse { data: vote }))
}

/// POST /api/v1/streams/downvote
pub async fn downvote(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(input): ValidatedJson<VoteRequest>,
) -> AppResult<impl IntoResponse> {
    let outcome = VoteLedger::downvote(&state.pool, user.user_id, input.stream_id).await?;
    Ok(Json(DataResponse {
        data: DownvoteResponse {
            track_id: input.stream_id,
            removed: outcome.removed(),
        },
    }))
}

/// GET /api/v1/streams/{id}/votes
///
/// Upvote count and the caller's vote state for one track.
pub async fn summary(
    State(state): State<AppState>,
    user: AuthUser,
    Path(track_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let summary = VoteLedger::summary(&state.pool, track_id, user.user_id).await?;
    Ok(Json(DataResponse { data: summary }))
}
