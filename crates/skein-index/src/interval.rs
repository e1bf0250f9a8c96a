//! Cumulative-boundary index over a partition of a flat array.
//!
//! An [`IntervalIndex`] stores only the exclusive upper bound of each
//! bucket. Because buckets are contiguous, the upper bound of bucket
//! `i - 1` doubles as the lower bound of bucket `i`, so one `Vec<u64>`
//! answers both "which bucket holds position p" and "where does bucket
//! i start".

use skein_core::{IndexKind, Interval, IntervalError};

/// Upper-bound search structure over contiguous, ordered buckets.
///
/// `upper_bounds[i]` is the exclusive end of bucket `i`. Bounds must be
/// non-decreasing; empty buckets (equal consecutive bounds) are allowed
/// and are never returned by [`locate`](Self::locate).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntervalIndex {
    upper_bounds: Vec<u64>,
}

impl IntervalIndex {
    /// Build from the exclusive upper bound of each bucket.
    pub fn from_upper_bounds(upper_bounds: Vec<u64>) -> Self {
        debug_assert!(
            upper_bounds.windows(2).all(|w| w[0] <= w[1]),
            "interval upper bounds must be non-decreasing"
        );
        Self { upper_bounds }
    }

    /// Build from the buckets' intervals, keeping only their upper bounds.
    ///
    /// Lower bounds are discarded: the index assumes each interval starts
    /// where the previous one ended. Use [`check_partition`] first when
    /// that assumption needs to be verified.
    pub fn from_intervals(intervals: impl IntoIterator<Item = Interval>) -> Self {
        Self::from_upper_bounds(intervals.into_iter().map(|iv| iv.end).collect())
    }

    /// Bucket containing `position`.
    ///
    /// Returns the smallest `i` with `position < upper_bounds[i]`. A
    /// position equal to a bound belongs to the *next* bucket, matching
    /// half-open interval semantics. Positions at or past the last bound
    /// yield [`len()`](Self::len), one past the final bucket.
    ///
    /// O(log n).
    pub fn locate(&self, position: u64) -> usize {
        self.upper_bounds.partition_point(|&bound| bound <= position)
    }

    /// First position of `bucket`: zero for bucket 0, otherwise the upper
    /// bound of the preceding bucket.
    ///
    /// Buckets past the end start at [`total()`](Self::total).
    pub fn offset(&self, bucket: usize) -> u64 {
        match bucket.checked_sub(1) {
            None => 0,
            Some(prev) => self
                .upper_bounds
                .get(prev)
                .copied()
                .unwrap_or_else(|| self.total()),
        }
    }

    /// The `[offset, upper_bound)` interval of `bucket`, if it exists.
    pub fn bucket(&self, bucket: usize) -> Option<Interval> {
        let end = *self.upper_bounds.get(bucket)?;
        Some(Interval::new(self.offset(bucket), end))
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.upper_bounds.len()
    }

    /// Whether the index has no buckets.
    pub fn is_empty(&self) -> bool {
        self.upper_bounds.is_empty()
    }

    /// Number of positions covered: the last upper bound, or zero.
    pub fn total(&self) -> u64 {
        self.upper_bounds.last().copied().unwrap_or(0)
    }

    /// Raw upper bounds, one per bucket.
    pub fn upper_bounds(&self) -> &[u64] {
        &self.upper_bounds
    }
}

/// Verify that `intervals` partition `[0, total)` without gaps or overlap.
///
/// This is the contiguity assumption that [`IntervalIndex`] and scene
/// slicing rely on. It is never checked on the resolution hot path;
/// datasets run it at construction only when asked to.
pub fn check_partition(
    level: IndexKind,
    intervals: impl IntoIterator<Item = Interval>,
    total: u64,
) -> Result<(), IntervalError> {
    let mut expected = 0u64;
    for (index, iv) in intervals.into_iter().enumerate() {
        if index == 0 && iv.start != 0 {
            return Err(IntervalError::BadStart {
                level,
                start: iv.start,
            });
        }
        if iv.end < iv.start {
            return Err(IntervalError::Inverted {
                level,
                index,
                start: iv.start,
                end: iv.end,
            });
        }
        if iv.start != expected {
            return Err(IntervalError::Gap {
                level,
                index,
                expected,
                found: iv.start,
            });
        }
        expected = iv.end;
    }
    if expected != total {
        return Err(IntervalError::Coverage {
            level,
            covered: expected,
            total,
        });
    }
    Ok(())
}
