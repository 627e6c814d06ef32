//! Queue ranking.
//!
//! The queue is a read-side projection of the vote ledger: every read
//! recomputes the order from the current aggregate counts. Nothing here
//! holds state, so ranking is safe to call on every request.
//!
//! Ordering, most significant key first:
//!
//! 1. vote count, descending
//! 2. submission time, ascending (earlier submissions surface first)
//! 3. track id, ascending
//!
//! Track ids are unique, so no two distinct tracks ever compare equal.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::types::{DbId, Timestamp};

/// Anything that can be placed in a ranked queue.
pub trait Rankable {
    /// Unique id of the track; the final tie-break.
    fn rank_id(&self) -> DbId;
    /// When the track was submitted; the secondary sort key.
    fn submitted_at(&self) -> Timestamp;
}

/// Fully resolved sort key for one track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankKey {
    pub votes: i64,
    pub created_at: Timestamp,
    pub id: DbId,
}

impl RankKey {
    /// Build the key for `item`, looking its vote count up in `vote_counts`.
    ///
    /// Tracks absent from the map have zero votes.
    pub fn for_item<T: Rankable>(item: &T, vote_counts: &HashMap<DbId, i64>) -> Self {
        let id = item.rank_id();
        Self {
            votes: vote_counts.get(&id).copied().unwrap_or(0),
            created_at: item.submitted_at(),
            id,
        }
    }
}

impl Ord for RankKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .votes
            .cmp(&self.votes)
            .then_with(|| self.created_at.cmp(&other.created_at))
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Queue order of two keys. `Less` means `a` plays before `b`.
pub fn compare_keys(a: &RankKey, b: &RankKey) -> Ordering {
    a.cmp(b)
}

/// Order `tracks` for queue display.
///
/// Returns a permutation of the input. Calling this again with the same
/// tracks and counts yields the same order.
pub fn rank<T: Rankable>(tracks: Vec<T>, vote_counts: &HashMap<DbId, i64>) -> Vec<T> {
    let mut keyed: Vec<(RankKey, T)> = tracks
        .into_iter()
        .map(|t| (RankKey::for_item(&t, vote_counts), t))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| compare_keys(a, b));
    keyed.into_iter().map(|(_, t)| t).collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct T {
        id: DbId,
        at: Timestamp,
    }

    impl Rankable for T {
        fn rank_id(&self) -> DbId {
            self.id
        }
        fn submitted_at(&self) -> Timestamp {
            self.at
        }
    }

    fn at(secs: i64) -> Timestamp {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn ids(ranked: &[T]) -> Vec<DbId> {
        ranked.iter().map(|t| t.id).collect()
    }

    #[test]
    fn orders_by_votes_descending() {
        let tracks = vec![
            T { id: 1, at: at(0) },
            T { id: 2, at: at(1) },
            T { id: 3, at: at(2) },
        ];
        let counts = HashMap::from([(1, 1), (2, 5), (3, 2)]);
        assert_eq!(ids(&rank(tracks, &counts)), vec![2, 3, 1]);
    }

    #[test]
    fn equal_votes_prefer_earlier_submission() {
        // A has 0 votes, B and C have 3; C was submitted before B.
        let a = T { id: 1, at: at(0) };
        let b = T { id: 2, at: at(20) };
        let c = T { id: 3, at: at(10) };
        let counts = HashMap::from([(2, 3), (3, 3)]);
        assert_eq!(ids(&rank(vec![a, b, c], &counts)), vec![3, 2, 1]);
    }

    #[test]
    fn identical_votes_and_time_fall_back_to_id() {
        let tracks = vec![
            T { id: 9, at: at(5) },
            T { id: 4, at: at(5) },
            T { id: 7, at: at(5) },
        ];
        assert_eq!(ids(&rank(tracks, &HashMap::new())), vec![4, 7, 9]);
    }

    #[test]
    fn missing_counts_are_zero() {
        let tracks = vec![T { id: 1, at: at(0) }, T { id: 2, at: at(1) }];
        let counts = HashMap::from([(2, 1)]);
        assert_eq!(ids(&rank(tracks, &counts)), vec![2, 1]);
    }

    #[test]
    fn empty_input_ranks_empty() {
        let ranked: Vec<T> = rank(Vec::new(), &HashMap::new());
        assert!(ranked.is_empty());
    }

    #[test]
    fn result_is_a_permutation_and_strict_order() {
        let tracks: Vec<T> = (0..40)
            .map(|i| T {
                id: i,
                at: at((i * 7) % 5),
            })
            .collect();
        let counts: HashMap<DbId, i64> = (0..40).map(|i| (i, (i * 13) % 4)).collect();

        let ranked = rank(tracks.clone(), &counts);
        let mut got = ids(&ranked);
        got.sort_unstable();
        assert_eq!(got, (0..40).collect::<Vec<_>>());

        for pair in ranked.windows(2) {
            let a = RankKey::for_item(&pair[0], &counts);
            let b = RankKey::for_item(&pair[1], &counts);
            assert_eq!(compare_keys(&a, &b), Ordering::Less, "{a:?} must sort strictly before {b:?}");
        }
    }

    #[test]
    fn ranking_is_stable_across_invocations() {
        let tracks: Vec<T> = (0..10).rev().map(|i| T { id: i, at: at(i % 3) }).collect();
        let counts: HashMap<DbId, i64> = (0..10).map(|i| (i, i % 2)).collect();

        let first = rank(tracks.clone(), &counts);
        let second = rank(tracks, &counts);
        assert_eq!(first, second);
        // Re-ranking an already ranked queue is a no-op.
        assert_eq!(rank(first.clone(), &counts), first);
    }

    #[test]
    fn distinct_tracks_never_compare_equal() {
        let a = RankKey { votes: 2, created_at: at(0), id: 1 };
        let b = RankKey { votes: 2, created_at: at(0), id: 2 };
        assert_ne!(a.cmp(&b), Ordering::Equal);
        assert_eq!(a.cmp(&a), Ordering::Equal);
    }
}
