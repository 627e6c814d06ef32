//! Route definitions for streams (queued tracks) and votes.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{stream, vote};
use crate::state::AppState;

/// Routes mounted at `/streams`.
///
/// ```text
/// POST /              -> submit
/// GET  /mine          -> my_queue
/// POST /upvote        -> upvote
/// POST /downvote      -> downvote
/// GET  /{id}/votes    -> summary
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(stream::submit))
        .route("/mine", get(stream::my_queue))
        .route("/upvote", post(vote::upvote))
        .route("/downvote", post(vote::downvote))
        .route("/{id}/votes", get(vote::summary))
}

/// Routes mounted at `/creators`.
///
/// ```text
/// GET /{creator_id}/streams      -> creator_queue
/// GET /{creator_id}/now-playing  -> now_playing
/// ```
pub fn creator_router() -> Router<AppState> {
    Router::new()
        .route("/{creator_id}/streams", get(stream::creator_queue))
        .route("/{creator_id}/now-playing", get(stream::now_playing))
}
