//! Scene, frame and agent records as read from storage.

use std::fmt;
use std::ops::Range;

use crate::id::TrackId;

/// A half-open `[start, end)` range into a flat record array.
///
/// Intervals are how each level of the hierarchy points into the next:
/// a scene's interval selects frames, a frame's interval selects agents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Interval {
    /// First position covered (inclusive).
    pub start: u64,
    /// One past the last position covered (exclusive).
    pub end: u64,
}

impl Interval {
    /// Create an interval from its bounds.
    pub const fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// Number of positions covered. Zero for inverted intervals.
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// Whether the interval covers no positions.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether `position` lies in `[start, end)`.
    pub fn contains(&self, position: u64) -> bool {
        self.start <= position && position < self.end
    }

    /// Translate both bounds down by `offset`.
    ///
    /// Used when re-basing an interval into a sub-view whose first record
    /// sits at `offset` in the parent array. Saturates at zero, so an
    /// interval that lies before the window collapses instead of wrapping.
    pub fn rebase(&self, offset: u64) -> Self {
        Self {
            start: self.start.saturating_sub(offset),
            end: self.end.saturating_sub(offset),
        }
    }

    /// The interval as a `usize` range, for slicing.
    pub fn to_range(&self) -> Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl From<(u64, u64)> for Interval {
    fn from((start, end): (u64, u64)) -> Self {
        Self { start, end }
    }
}

impl From<Interval> for (u64, u64) {
    fn from(interval: Interval) -> Self {
        (interval.start, interval.end)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// One recorded session: a contiguous run of frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneRecord {
    /// Frames belonging to this scene.
    pub frame_index_interval: Interval,
}

/// One time step within a scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameRecord {
    /// Agent records observed at this frame.
    pub agent_index_interval: Interval,
}

/// One observed agent at one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgentRecord {
    /// Identity of the agent across frames.
    pub track_id: TrackId,
}
