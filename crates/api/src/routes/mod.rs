pub mod health;
pub mod stream;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /streams                                  submit (POST)
/// /streams/mine                             caller's ranked queue
/// /streams/upvote                           upvote (POST)
/// /streams/downvote                         downvote (POST)
/// /streams/{id}/votes                       vote count + caller's vote state
///
/// /creators/{creator_id}/streams            a creator's ranked queue
/// /creators/{creator_id}/now-playing        current / next / previous track
/// ```
///
/// Every route requires a Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/streams", stream::router())
        .nest("/creators", stream::creator_router())
}
