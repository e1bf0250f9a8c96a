//! The compacted (public) index space over valid agent records.

use skein_core::{DatasetError, IndexKind, Interval};

use crate::mask::ValidityMask;

/// Strictly increasing positions of the agent records a mask keeps.
///
/// Public index `i` addresses the `i`-th valid record. The index is
/// rebuilt from a mask rather than updated, and is immutable once built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompactedIndex {
    positions: Vec<u64>,
}

impl CompactedIndex {
    /// Collect the positions flagged valid in `mask`.
    pub fn build(mask: &ValidityMask) -> Self {
        let mut positions = Vec::with_capacity(mask.count_valid());
        positions.extend(mask.valid_positions().map(|p| p as u64));
        Self { positions }
    }

    /// Number of valid records, i.e. the public dataset length.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether no record is valid.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Normalise a possibly negative public index to `[0, len())`.
    ///
    /// Negative indices count from the end (`-1` is the last entry).
    /// Fails with [`DatasetError::IndexOutOfRange`] if the index, or the
    /// magnitude of a negative index, exceeds the length.
    pub fn normalize(&self, index: isize) -> Result<usize, DatasetError> {
        normalize_index(IndexKind::Agent, index, self.len())
    }

    /// Global agent-record position of public index `index`.
    pub fn resolve(&self, index: isize) -> Result<u64, DatasetError> {
        let i = self.normalize(index)?;
        Ok(self.positions[i])
    }

    /// Public indices whose record lies in `records`.
    ///
    /// Linear scan: compacted positions are not aligned to scene or frame
    /// boundaries. Equivalent to keeping `i` with
    /// `lo <= positions[i] <= hi` for the inclusive bounds
    /// `lo = records.start`, `hi = records.end - 1`.
    pub fn indices_within(&self, records: Interval) -> Vec<usize> {
        self.positions
            .iter()
            .enumerate()
            .filter_map(|(i, &p)| records.contains(p).then_some(i))
            .collect()
    }

    /// All positions, in public-index order.
    pub fn positions(&self) -> &[u64] {
        &self.positions
    }
}

/// Normalise a signed index against `len`, Python-style.
///
/// Shared by every level of the hierarchy so that agent, frame and scene
/// indices reject out-of-range input identically.
pub fn normalize_index(kind: IndexKind, index: isize, len: usize) -> Result<usize, DatasetError> {
    let normalized = if index < 0 {
        len.checked_sub(index.unsigned_abs())
    } else {
        Some(index as usize)
    };
    match normalized {
        Some(i) if i < len => Ok(i),
        _ => Err(DatasetError::out_of_range(kind, index, len)),
    }
}
