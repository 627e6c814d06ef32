//! The vote ledger.
//!
//! Authoritative record of which users have upvoted which tracks. Every
//! mutation runs in a single transaction that first key-share locks the
//! referenced user and track rows (so neither can be deleted mid-write) and
//! then performs one constraint-guarded statement. Nothing is cached: every
//! read goes to the database.
//!
//! Duplicate upvotes are reported as [`CoreError::AlreadyVoted`]; duplicate
//! downvotes succeed as no-ops.

use std::collections::HashMap;

use muzer_core::error::CoreError;
use muzer_core::ranking;
use muzer_core::types::DbId;
use muzer_core::vote::DownvoteOutcome;
use sqlx::{PgConnection, PgPool};

use crate::models::track::QueueEntry;
use crate::models::vote::{Vote, VoteSummary};
use crate::repositories::{TrackRepo, UserRepo, VoteRepo};

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// A domain outcome the caller should surface as-is.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The store was unreachable or failed in a way not classified above.
    /// The transaction was rolled back.
    #[error("Storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Stateless facade over the vote tables.
pub struct VoteLedger;

impl VoteLedger {
    /// Record an upvote from `user_id` on `track_id`.
    pub async fn upvote(pool: &PgPool, user_id: DbId, track_id: DbId) -> LedgerResult<Vote> {
        let mut tx = pool.begin().await?;
        Self::ensure_participants(&mut tx, user_id, track_id).await?;

        let Some(vote) = VoteRepo::insert_if_absent(&mut tx, user_id, track_id).await? else {
            tracing::debug!(user_id, track_id, "Duplicate upvote rejected");
            // Dropping `tx` rolls back; nothing was written.
            return Err(CoreError::AlreadyVoted { user_id, track_id }.into());
        };

        tx.commit().await?;
        tracing::info!(user_id, track_id, vote_id = vote.id, "Upvote recorded");
        Ok(vote)
    }

    /// Remove `user_id`'s upvote on `track_id`, if any.
    pub async fn downvote(
        pool: &PgPool,
        user_id: DbId,
        track_id: DbId,
    ) -> LedgerResult<DownvoteOutcome> {
        let mut tx = pool.begin().await?;
        Self::ensure_participants(&mut tx, user_id, track_id).await?;

        let removed = VoteRepo::delete(&mut tx, user_id, track_id).await?;
        tx.commit().await?;

        if removed {
            tracing::info!(user_id, track_id, "Upvote removed");
            Ok(DownvoteOutcome::Removed)
        } else {
            tracing::debug!(user_id, track_id, "Downvote without upvote, nothing to remove");
            Ok(DownvoteOutcome::NotVoted)
        }
    }

    /// Current number of upvotes on `track_id`.
    pub async fn vote_count_for(pool: &PgPool, track_id: DbId) -> LedgerResult<i64> {
        Self::ensure_track(pool, track_id).await?;
        Ok(VoteRepo::count_for_track(pool, track_id).await?)
    }

    /// Whether `user_id` currently has `track_id` upvoted.
    ///
    /// Unknown users and tracks are `NotFound`, as for the mutations.
    pub async fn has_voted(pool: &PgPool, user_id: DbId, track_id: DbId) -> LedgerResult<bool> {
        Self::ensure_user(pool, user_id).await?;
        Self::ensure_track(pool, track_id).await?;
        Ok(VoteRepo::exists(pool, user_id, track_id).await?)
    }

    /// Upvote count plus `viewer_id`'s vote state for one track.
    pub async fn summary(pool: &PgPool, track_id: DbId, viewer_id: DbId) -> LedgerResult<VoteSummary> {
        Self::ensure_track(pool, track_id).await?;
        Ok(VoteRepo::summary(pool, track_id, viewer_id).await?)
    }

    /// The creator's queue, ranked, annotated for `viewer_id`.
    pub async fn queue_for_creator(
        pool: &PgPool,
        creator_id: DbId,
        viewer_id: DbId,
    ) -> LedgerResult<Vec<QueueEntry>> {
        Self::ensure_user(pool, creator_id).await?;

        let entries = TrackRepo::list_queue(pool, creator_id, viewer_id).await?;
        let counts: HashMap<DbId, i64> = entries.iter().map(|e| (e.id, e.upvotes)).collect();
        Ok(ranking::rank(entries, &counts))
    }

    async fn ensure_participants(
        conn: &mut PgConnection,
        user_id: DbId,
        track_id: DbId,
    ) -> LedgerResult<()> {
        if !UserRepo::lock_for_share(conn, user_id).await? {
            return Err(CoreError::NotFound {
                entity: "User",
                id: user_id,
            }
            .into());
        }
        if !TrackRepo::lock_for_share(conn, track_id).await? {
            return Err(CoreError::NotFound {
                entity: "Track",
                id: track_id,
            }
            .into());
        }
        Ok(())
    }

    async fn ensure_user(pool: &PgPool, user_id: DbId) -> LedgerResult<()> {
        match UserRepo::find_by_id(pool, user_id).await? {
            Some(_) => Ok(()),
            None => Err(CoreError::NotFound {
                entity: "User",
                id: user_id,
            }
            .into()),
        }
    }

    async fn ensure_track(pool: &PgPool, track_id: DbId) -> LedgerResult<()> {
        if TrackRepo::exists(pool, track_id).await? {
            Ok(())
        } else {
            Err(CoreError::NotFound {
                entity: "Track",
                id: track_id,
            }
            .into())
        }
    }
}
