//! Repository for the `tracks` table.

use muzer_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::track::{CreateTrack, QueueEntry, Track};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, creator_id, url, extracted_id, title, \
                        small_thumbnail_url, large_thumbnail_url, created_at";

/// Provides insert and read operations for tracks. Tracks are never updated.
pub struct TrackRepo;

impl TrackRepo {
    /// Insert a new track, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTrack) -> Result<Track, sqlx::Error> {
        let query = format!(
            "INSERT INTO tracks \
                (creator_id, url, extracted_id, title, small_thumbnail_url, large_thumbnail_url) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Track>(&query)
            .bind(input.creator_id)
            .bind(&input.url)
            .bind(&input.extracted_id)
            .bind(&input.title)
            .bind(&input.small_thumbnail_url)
            .bind(&input.large_thumbnail_url)
            .fetch_one(pool)
            .await
    }

    /// Find a track by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Track>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tracks WHERE id = $1");
        sqlx::query_as::<_, Track>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a creator's tracks in submission order.
    pub async fn list_by_creator(pool: &PgPool, creator_id: DbId) -> Result<Vec<Track>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tracks WHERE creator_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Track>(&query)
            .bind(creator_id)
            .fetch_all(pool)
            .await
    }

    /// List a creator's tracks with their upvote counts and whether
    /// `viewer_id` has upvoted each one.
    ///
    /// Rows come back in submission order; ranking happens in the caller.
    pub async fn list_queue(
        pool: &PgPool,
        creator_id: DbId,
        viewer_id: DbId,
    ) -> Result<Vec<QueueEntry>, sqlx::Error> {
        sqlx::query_as::<_, QueueEntry>(
            "SELECT t.id, t.creator_id, t.url, t.extracted_id, t.title, \
                    t.small_thumbnail_url, t.large_thumbnail_url, t.created_at, \
                    COUNT(v.id) AS upvotes, \
                    COALESCE(BOOL_OR(v.user_id = $2), false) AS has_upvoted \
             FROM tracks t \
             LEFT JOIN votes v ON v.track_id = t.id \
             WHERE t.creator_id = $1 \
             GROUP BY t.id \
             ORDER BY t.created_at, t.id",
        )
        .bind(creator_id)
        .bind(viewer_id)
        .fetch_all(pool)
        .await
    }

    /// Check whether a track exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM tracks WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(exists)
    }

    /// Confirm the track exists and hold a key-share lock on the row until
    /// the surrounding transaction ends.
    pub async fn lock_for_share(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let row: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM tracks WHERE id = $1 FOR KEY SHARE")
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?;
        Ok(row.is_some())
    }

    /// Delete a track. Its votes are removed by cascade.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tracks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
