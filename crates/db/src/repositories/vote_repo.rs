//! Repository for the `votes` table.
//!
//! Uniqueness of (user, track) is enforced by the `uq_votes_user_track`
//! constraint. Inserts go through `ON CONFLICT DO NOTHING`, never through
//! a separate existence check.

use muzer_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::vote::{Vote, VoteSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, track_id, created_at";

/// Provides insert/delete/count operations for votes.
pub struct VoteRepo;

impl VoteRepo {
    /// Insert a vote unless one already exists for the pair.
    ///
    /// Returns `None` when the pair was already present. A concurrent
    /// insert for the same pair blocks on the constraint until the other
    /// transaction finishes, then also returns `None` if that one committed.
    pub async fn insert_if_absent(
        conn: &mut PgConnection,
        user_id: DbId,
        track_id: DbId,
    ) -> Result<Option<Vote>, sqlx::Error> {
        let query = format!(
            "INSERT INTO votes (user_id, track_id) \
             VALUES ($1, $2) \
             ON CONFLICT ON CONSTRAINT uq_votes_user_track DO NOTHING \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vote>(&query)
            .bind(user_id)
            .bind(track_id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Delete the vote for the pair.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(
        conn: &mut PgConnection,
        user_id: DbId,
        track_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM votes WHERE user_id = $1 AND track_id = $2")
            .bind(user_id)
            .bind(track_id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of upvotes on a track. Zero for tracks nobody voted on.
    pub async fn count_for_track(pool: &PgPool, track_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM votes WHERE track_id = $1")
            .bind(track_id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Whether `user_id` currently has `track_id` upvoted.
    pub async fn exists(pool: &PgPool, user_id: DbId, track_id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM votes WHERE user_id = $1 AND track_id = $2)",
        )
        .bind(user_id)
        .bind(track_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// Upvote count and viewer flag for one track, read in one statement.
    pub async fn summary(
        pool: &PgPool,
        track_id: DbId,
        viewer_id: DbId,
    ) -> Result<VoteSummary, sqlx::Error> {
        let (upvotes, has_upvoted): (i64, bool) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(BOOL_OR(user_id = $2), false) \
             FROM votes WHERE track_id = $1",
        )
        .bind(track_id)
        .bind(viewer_id)
        .fetch_one(pool)
        .await?;
        Ok(VoteSummary {
            track_id,
            upvotes,
            has_upvoted,
        })
    }
}
