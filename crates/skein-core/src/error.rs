//! Error types for dataset construction and index resolution.
//!
//! Two enums: [`DatasetError`] is what every public operation returns,
//! [`IntervalError`] describes a specific inconsistency found by the
//! opt-in interval validation pass.

use std::error::Error;
use std::fmt;

use smallvec::SmallVec;

use crate::signature::MaskSignature;

/// The coordinate space an out-of-range index was checked against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndexKind {
    /// Public (filtered) agent index, or a global agent-record position.
    Agent,
    /// Frame index.
    Frame,
    /// Scene index.
    Scene,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Agent => write!(f, "agent"),
            Self::Frame => write!(f, "frame"),
            Self::Scene => write!(f, "scene"),
        }
    }
}

/// Errors from dataset construction, derivation and index resolution.
#[derive(Clone, Debug, PartialEq)]
pub enum DatasetError {
    /// No validity mask is stored under the requested signature.
    ///
    /// Fatal for construction: a different mask is never substituted.
    ConfigMismatch {
        /// The signature that was looked up.
        signature: MaskSignature,
        /// Where the lookup was performed.
        location: String,
        /// Signatures that the store does hold.
        available: SmallVec<[MaskSignature; 4]>,
    },
    /// An index fell outside its valid domain after negative-index
    /// normalisation.
    IndexOutOfRange {
        /// Which coordinate space the index addresses.
        kind: IndexKind,
        /// The index as supplied by the caller.
        index: i64,
        /// Number of valid entries in that space.
        len: usize,
    },
    /// Configuration or construction input is invalid.
    InvalidConfig {
        /// What went wrong.
        reason: String,
    },
    /// Interval data failed the opt-in partition check.
    InconsistentIntervals(IntervalError),
}

impl DatasetError {
    /// Shorthand for an [`IndexOutOfRange`](Self::IndexOutOfRange) error.
    pub fn out_of_range(kind: IndexKind, index: impl TryInto<i64>, len: usize) -> Self {
        Self::IndexOutOfRange {
            kind,
            index: index.try_into().unwrap_or(i64::MAX),
            len,
        }
    }
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigMismatch {
                signature,
                location,
                available,
            } => {
                write!(
                    f,
                    "no agents mask '{signature}' in {location} (history_num_frames={}, \
                     future_num_frames={}, filter_agents_threshold={:?})",
                    signature.history_num_frames(),
                    signature.future_num_frames(),
                    signature.filter_agents_threshold(),
                )?;
                if available.is_empty() {
                    write!(f, "; the store holds no masks")
                } else {
                    write!(f, "; available:")?;
                    for sig in available {
                        write!(f, " {sig}")?;
                    }
                    Ok(())
                }
            }
            Self::IndexOutOfRange { kind, index, len } => {
                write!(f, "{kind} index {index} out of range for length {len}")
            }
            Self::InvalidConfig { reason } => write!(f, "invalid config: {reason}"),
            Self::InconsistentIntervals(e) => write!(f, "inconsistent intervals: {e}"),
        }
    }
}

impl Error for DatasetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InconsistentIntervals(e) => Some(e),
            _ => None,
        }
    }
}

impl From<IntervalError> for DatasetError {
    fn from(e: IntervalError) -> Self {
        Self::InconsistentIntervals(e)
    }
}

/// A violation of the interval partition invariant.
///
/// Intervals at each level must start at zero, be non-inverted, follow
/// each other without gaps or overlaps, and end at the length of the
/// array they index into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntervalError {
    /// The first interval does not start at position zero.
    BadStart {
        /// Level of the hierarchy the interval belongs to.
        level: IndexKind,
        /// Start of the first interval.
        start: u64,
    },
    /// An interval's end precedes its start.
    Inverted {
        /// Level of the hierarchy the interval belongs to.
        level: IndexKind,
        /// Position of the interval in its array.
        index: usize,
        /// Interval start.
        start: u64,
        /// Interval end.
        end: u64,
    },
    /// An interval does not begin where the previous one ended.
    Gap {
        /// Level of the hierarchy the interval belongs to.
        level: IndexKind,
        /// Position of the interval in its array.
        index: usize,
        /// End of the previous interval.
        expected: u64,
        /// Start of this interval.
        found: u64,
    },
    /// The last interval does not end at the length of the indexed array.
    Coverage {
        /// Level of the hierarchy the interval belongs to.
        level: IndexKind,
        /// End of the last interval.
        covered: u64,
        /// Length of the array being partitioned.
        total: u64,
    },
}

impl fmt::Display for IntervalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadStart { level, start } => {
                write!(f, "first {level} interval starts at {start}, expected 0")
            }
            Self::Inverted {
                level,
                index,
                start,
                end,
            } => write!(f, "{level} {index} has inverted interval [{start}, {end})"),
            Self::Gap {
                level,
                index,
                expected,
                found,
            } => write!(
                f,
                "{level} {index} starts at {found} but previous interval ended at {expected}"
            ),
            Self::Coverage {
                level,
                covered,
                total,
            } => write!(f, "{level} intervals cover {covered} records of {total}"),
        }
    }
}

impl Error for IntervalError {}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn config_mismatch_names_signature_and_location() {
        let err = DatasetError::ConfigMismatch {
            signature: MaskSignature::new(10, 50, 0.5),
            location: "/data/train.zarr".into(),
            available: smallvec![MaskSignature::new(10, 50, 0.8)],
        };
        let msg = err.to_string();
        assert!(msg.contains("10_50_0.5"), "{msg}");
        assert!(msg.contains("/data/train.zarr"), "{msg}");
        assert!(msg.contains("available: 10_50_0.8"), "{msg}");
    }

    #[test]
    fn config_mismatch_reports_empty_store() {
        let err = DatasetError::ConfigMismatch {
            signature: MaskSignature::new(1, 2, 0.1),
            location: "memory".into(),
            available: SmallVec::new(),
        };
        assert!(err.to_string().ends_with("the store holds no masks"));
    }

    #[test]
    fn out_of_range_saturates_huge_indices() {
        let err = DatasetError::out_of_range(IndexKind::Scene, usize::MAX, 3);
        assert_eq!(
            err,
            DatasetError::IndexOutOfRange {
                kind: IndexKind::Scene,
                index: i64::MAX,
                len: 3
            }
        );
        let err = DatasetError::out_of_range(IndexKind::Agent, -6isize, 5);
        assert_eq!(err.to_string(), "agent index -6 out of range for length 5");
    }

    #[test]
    fn interval_error_is_source() {
        let err: DatasetError = IntervalError::BadStart {
            level: IndexKind::Frame,
            start: 2,
        }
        .into();
        assert!(err.source().is_some());
        assert_eq!(
            err.to_string(),
            "inconsistent intervals: first frame interval starts at 2, expected 0"
        );
    }
}
