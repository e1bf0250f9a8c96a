//! Per-agent validity masks.

use std::ops::Range;
use std::sync::Arc;

use skein_core::{DatasetError, IndexKind, MaskSignature, RecordStore};
use smallvec::SmallVec;
use tracing::error;

/// One validity flag per agent record.
///
/// Masks loaded from a store share the store's allocation; slices taken
/// for scene views are fresh copies, so a derived dataset never aliases
/// its parent's mask.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidityMask {
    flags: Arc<[bool]>,
}

impl ValidityMask {
    /// Wrap an existing flag array.
    pub fn new(flags: impl Into<Arc<[bool]>>) -> Self {
        Self {
            flags: flags.into(),
        }
    }

    /// Load the mask stored under exactly `signature`.
    ///
    /// Fails with [`DatasetError::ConfigMismatch`] if the store has no mask
    /// for that signature. No other mask is ever substituted; the error
    /// lists what the store does hold so the caller can regenerate or
    /// fix their configuration.
    pub fn load<S: RecordStore + ?Sized>(
        store: &S,
        signature: &MaskSignature,
    ) -> Result<Self, DatasetError> {
        match store.mask(signature) {
            Some(flags) => Ok(Self { flags }),
            None => {
                let available: SmallVec<[MaskSignature; 4]> =
                    store.mask_signatures().into_iter().collect();
                error!(
                    signature = %signature,
                    location = store.location(),
                    available = ?available,
                    "agents mask not found for configured signature"
                );
                Err(DatasetError::ConfigMismatch {
                    signature: *signature,
                    location: store.location().to_string(),
                    available,
                })
            }
        }
    }

    /// Copy the flags for a contiguous range of agent records.
    ///
    /// Fails with [`DatasetError::IndexOutOfRange`] if the range reaches
    /// past the end of the mask or is inverted.
    pub fn slice(&self, range: Range<usize>) -> Result<Self, DatasetError> {
        let flags = self
            .flags
            .get(range.clone())
            .ok_or_else(|| DatasetError::out_of_range(IndexKind::Agent, range.end, self.len()))?;
        Ok(Self {
            flags: Arc::from(flags),
        })
    }

    /// Flag for agent record `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<bool> {
        self.flags.get(index).copied()
    }

    /// Number of agent records covered.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Whether the mask covers no records.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Number of records flagged valid.
    pub fn count_valid(&self) -> usize {
        self.flags.iter().filter(|&&v| v).count()
    }

    /// Positions flagged valid, in increasing order.
    pub fn valid_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.flags
            .iter()
            .enumerate()
            .filter_map(|(i, &v)| v.then_some(i))
    }

    /// The raw flags.
    pub fn as_slice(&self) -> &[bool] {
        &self.flags
    }
}

impl From<Vec<bool>> for ValidityMask {
    fn from(flags: Vec<bool>) -> Self {
        Self::new(flags)
    }
}
