//! Vote semantics.
//!
//! A vote is a two-state relation between a user and a track: either the
//! user has upvoted the track or they have not. There is no persisted
//! negative vote; downvoting means removing an existing upvote, and the
//! aggregate for a track is simply the number of upvotes.

/// Result of a downvote. Both outcomes are successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownvoteOutcome {
    /// An existing upvote was removed.
    Removed,
    /// The user had not upvoted the track; nothing changed.
    NotVoted,
}

impl DownvoteOutcome {
    pub fn removed(self) -> bool {
        matches!(self, DownvoteOutcome::Removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removed_flag() {
        assert!(DownvoteOutcome::Removed.removed());
        assert!(!DownvoteOutcome::NotVoted.removed());
    }
}
