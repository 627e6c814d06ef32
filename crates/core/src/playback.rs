//! "Now playing" navigation over a ranked queue.
//!
//! The current track is derived, never stored: it is an index into the
//! ranking of the moment. Navigation wraps in both directions. On an empty
//! queue there is no current track and every move is a no-op.

use serde::Deserialize;

/// Direction of a playback move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    /// Stay on the current track.
    #[default]
    Current,
    /// Advance to the next track, wrapping to the first.
    Next,
    /// Go back to the previous track, wrapping to the last.
    Previous,
}

/// Position within a ranked queue of `len` tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackCursor {
    len: usize,
    index: Option<usize>,
}

impl PlaybackCursor {
    /// Cursor on the top-ranked track, or on nothing if the queue is empty.
    pub fn over(len: usize) -> Self {
        Self {
            len,
            index: (len > 0).then_some(0),
        }
    }

    /// Cursor resumed at `index`. Out-of-range positions fall back to the top.
    pub fn at(len: usize, index: usize) -> Self {
        if index < len {
            Self {
                len,
                index: Some(index),
            }
        } else {
            Self::over(len)
        }
    }

    /// Index of the current track, if any.
    pub fn current(&self) -> Option<usize> {
        self.index
    }

    pub fn next(&mut self) -> Option<usize> {
        if let Some(i) = self.index {
            self.index = Some((i + 1) % self.len);
        }
        self.index
    }

    pub fn previous(&mut self) -> Option<usize> {
        if let Some(i) = self.index {
            self.index = Some(if i == 0 { self.len - 1 } else { i - 1 });
        }
        self.index
    }

    /// Apply `step` and return the resulting index.
    pub fn step(&mut self, step: Step) -> Option<usize> {
        match step {
            Step::Current => self.current(),
            Step::Next => self.next(),
            Step::Previous => self.previous(),
        }
    }
}
