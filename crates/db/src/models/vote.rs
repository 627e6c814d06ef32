//! Vote entity model.
//!
//! A row exists exactly while the user has the track upvoted.

use muzer_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `votes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vote {
    pub id: DbId,
    pub user_id: DbId,
    pub track_id: DbId,
    pub created_at: Timestamp,
}

/// Aggregate vote state of one track as seen by one viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoteSummary {
    pub track_id: DbId,
    pub upvotes: i64,
    pub has_upvoted: bool,
}
