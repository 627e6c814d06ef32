//! Handlers for the `/streams` and `/creators` resources.
//!
//! A creator's "stream" is their queue of submitted tracks. Queue reads are
//! recomputed from the ledger on every request.

use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use muzer_core::error::CoreError;
use muzer_core::metadata::ResolveError;
use muzer_core::playback::{PlaybackCursor, Step};
use muzer_core::types::DbId;
use muzer_db::ledger::VoteLedger;
use muzer_db::models::track::{CreateTrack, QueueEntry};
use muzer_db::repositories::{TrackRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of `POST /streams`.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitStream {
    /// Whose queue the track goes on.
    #[validate(range(min = 1))]
    pub creator_id: DbId,
    #[validate(url, length(max = 2048))]
    pub url: String,
}

/// Query parameters for the now-playing endpoint.
#[derive(Debug, Deserialize)]
pub struct NowPlayingParams {
    /// Track the client is currently on, if any.
    pub from: Option<DbId>,
    #[serde(default)]
    pub step: Step,
}

/// The selected track plus where it sits in the current ranking.
#[derive(Debug, Serialize)]
pub struct NowPlaying {
    pub track: Option<QueueEntry>,
    pub position: Option<usize>,
    pub queue_length: usize,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/streams
///
/// Resolve the submitted URL and queue it on the creator's stream.
pub async fn submit(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(input): ValidatedJson<SubmitStream>,
) -> AppResult<impl IntoResponse> {
    if UserRepo::find_by_id(&state.pool, input.creator_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.creator_id,
        }));
    }

    let limit = Duration::from_secs(state.config.resolver_timeout_secs);
    let meta = tokio::time::timeout(limit, state.resolver.resolve(&input.url))
        .await
        .map_err(|_| {
            AppError::UpstreamTimeout(format!(
                "Metadata resolver did not answer within {}s",
                limit.as_secs()
            ))
        })?
        .map_err(|err| match err {
            ResolveError::Unsupported(url) => AppError::Core(CoreError::Validation(format!(
                "Unsupported media URL: {url}"
            ))),
            ResolveError::Provider(msg) => AppError::InternalError(msg),
        })?;

    let track = TrackRepo::create(
        &state.pool,
        &CreateTrack::from_resolved(input.creator_id, input.url, meta),
    )
    .await?;

    tracing::info!(
        track_id = track.id,
        creator_id = track.creator_id,
        submitted_by = user.user_id,
        extracted_id = %track.extracted_id,
        "Track submitted"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: track })))
}

/// GET /api/v1/streams/mine
///
/// The caller's own queue, ranked, with the caller's vote state.
pub async fn my_queue(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<impl IntoResponse> {
    let queue = VoteLedger::queue_for_creator(&state.pool, user.user_id, user.user_id).await?;
    Ok(Json(DataResponse { data: queue }))
}

/// GET /api/v1/creators/{creator_id}/streams
///
/// Another creator's queue as seen by the caller.
pub async fn creator_queue(
    State(state): State<AppState>,
    user: AuthUser,
    Path(creator_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let queue = VoteLedger::queue_for_creator(&state.pool, creator_id, user.user_id).await?;
    Ok(Json(DataResponse { data: queue }))
}

/// GET /api/v1/creators/{creator_id}/now-playing?from=&step=
///
/// Without `from` (or when `from` is no longer queued) this is the
/// top-ranked track. Otherwise `step` moves from `from` through the current
/// ranking, wrapping at both ends.
pub async fn now_playing(
    State(state): State<AppState>,
    user: AuthUser,
    Path(creator_id): Path<DbId>,
    Query(params): Query<NowPlayingParams>,
) -> AppResult<impl IntoResponse> {
    let queue = VoteLedger::queue_for_creator(&state.pool, creator_id, user.user_id).await?;
    let queue_length = queue.len();

    let from = params
        .from
        .and_then(|id| queue.iter().position(|entry| entry.id == id));
    let position = match from {
        Some(index) => PlaybackCursor::at(queue_length, index).step(params.step),
        None => PlaybackCursor::over(queue_length).current(),
    };

    let track = position.and_then(|index| queue.into_iter().nth(index));
    Ok(Json(DataResponse {
        data: NowPlaying {
            track,
            position,
            queue_length,
        },
    }))
}
