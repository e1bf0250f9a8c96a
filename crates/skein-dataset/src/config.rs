//! Dataset configuration and validation.

use skein_core::{DatasetError, MaskSignature};

/// Parameters a dataset is built with.
///
/// The three model parameters only select which precomputed agents mask
/// to load; they do not change how indices are resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct DatasetConfig {
    /// History frames the model consumes. Default: 10.
    pub history_num_frames: u32,
    /// Future frames the model predicts. Default: 50.
    pub future_num_frames: u32,
    /// Minimum detection confidence for an agent to be kept. Default: 0.5.
    pub filter_agents_threshold: f64,
    /// Check that scene and frame intervals partition their arrays when
    /// the dataset is built. Default: `false`.
    pub validate_intervals: bool,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            history_num_frames: 10,
            future_num_frames: 50,
            filter_agents_threshold: 0.5,
            validate_intervals: false,
        }
    }
}

impl DatasetConfig {
    /// Signature of the agents mask this configuration selects.
    pub fn signature(&self) -> MaskSignature {
        MaskSignature::new(
            self.history_num_frames,
            self.future_num_frames,
            self.filter_agents_threshold,
        )
    }

    /// Check structural invariants.
    ///
    /// The threshold must be a finite probability in `[0, 1]`.
    pub fn validate(&self) -> Result<(), DatasetError> {
        let t = self.filter_agents_threshold;
        if !t.is_finite() || !(0.0..=1.0).contains(&t) {
            return Err(DatasetError::InvalidConfig {
                reason: format!("filter_agents_threshold must be in [0, 1], got {t}"),
            });
        }
        Ok(())
    }
}
