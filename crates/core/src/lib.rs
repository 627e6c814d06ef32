//! Muzer domain core.
//!
//! Pure domain logic with zero internal dependencies: shared id/timestamp
//! types, the error taxonomy, queue ranking, playback navigation, and the
//! metadata resolver seam used by track submission.

pub mod error;
pub mod metadata;
pub mod playback;
pub mod ranking;
pub mod types;
pub mod vote;
