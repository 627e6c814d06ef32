//! Track entity model and DTOs.
//!
//! A track is one submitted piece of media queued on a creator's stream.
//! Metadata columns hold whatever the resolver returned at submission time.

use muzer_core::metadata::ResolvedMetadata;
use muzer_core::ranking::Rankable;
use muzer_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `tracks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Track {
    pub id: DbId,
    pub creator_id: DbId,
    pub url: String,
    pub extracted_id: String,
    pub title: String,
    pub small_thumbnail_url: String,
    pub large_thumbnail_url: String,
    pub created_at: Timestamp,
}

/// DTO for inserting a track once its URL has been resolved.
#[derive(Debug, Clone)]
pub struct CreateTrack {
    pub creator_id: DbId,
    pub url: String,
    pub extracted_id: String,
    pub title: String,
    pub small_thumbnail_url: String,
    pub large_thumbnail_url: String,
}

impl CreateTrack {
    /// Pair a submitted URL with the metadata resolved for it.
    pub fn from_resolved(creator_id: DbId, url: impl Into<String>, meta: ResolvedMetadata) -> Self {
        Self {
            creator_id,
            url: url.into(),
            extracted_id: meta.extracted_id,
            title: meta.title,
            small_thumbnail_url: meta.small_thumbnail_url,
            large_thumbnail_url: meta.large_thumbnail_url,
        }
    }
}

/// A track joined with its aggregate vote count and the viewer's vote state.
///
/// Produced by a single query so the count and the viewer flag come from
/// the same snapshot.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QueueEntry {
    pub id: DbId,
    pub creator_id: DbId,
    pub url: String,
    pub extracted_id: String,
    pub title: String,
    pub small_thumbnail_url: String,
    pub large_thumbnail_url: String,
    pub created_at: Timestamp,
    pub upvotes: i64,
    pub has_upvoted: bool,
}

impl Rankable for QueueEntry {
    fn rank_id(&self) -> DbId {
        self.id
    }

    fn submitted_at(&self) -> Timestamp {
        self.created_at
    }
}
