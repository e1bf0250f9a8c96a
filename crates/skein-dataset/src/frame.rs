//! Frame-indexed dataset view.
//!
//! [`FrameDataset`] addresses every frame of a store with a flat index and
//! resolves it to `(scene, frame state)`. It is the base that
//! [`AgentDataset`](crate::AgentDataset) composes with: the agent view
//! reuses its store window, hierarchy and scene slicing.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use skein_core::{DatasetError, FrameCoord, FrameSampler, IndexKind, RecordStore};
use skein_index::{normalize_index, HierarchicalIndex};
use skein_store::StoreView;
use tracing::{debug, warn};

use crate::config::DatasetConfig;

/// Flat index over the frames of a store window.
pub struct FrameDataset<S: RecordStore> {
    config: Arc<DatasetConfig>,
    view: StoreView<S>,
    hierarchy: Arc<HierarchicalIndex>,
}

impl<S: RecordStore> FrameDataset<S> {
    /// Build a dataset over the whole of `store`.
    pub fn new(config: DatasetConfig, store: Arc<S>) -> Result<Self, DatasetError> {
        config.validate()?;
        Self::from_view(Arc::new(config), StoreView::new(store))
    }

    /// Build a dataset over an existing window, sharing `config`.
    ///
    /// Builds the scene and frame boundary indexes from scratch. When
    /// `config.validate_intervals` is set, the window's intervals are
    /// checked first and an inconsistent window is rejected.
    pub fn from_view(config: Arc<DatasetConfig>, view: StoreView<S>) -> Result<Self, DatasetError> {
        if config.validate_intervals {
            if let Err(e) = HierarchicalIndex::validate(&view) {
                warn!(location = view.location(), error = %e, "interval validation failed");
                return Err(e);
            }
        }
        let hierarchy = HierarchicalIndex::build(&view)?;
        debug!(
            location = view.location(),
            scenes = hierarchy.scene_count(),
            frames = hierarchy.frame_count(),
            agents = view.agent_count(),
            "frame dataset built"
        );
        Ok(Self {
            config,
            view,
            hierarchy: Arc::new(hierarchy),
        })
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.hierarchy.frame_count()
    }

    /// Whether the dataset has no frames.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of scenes.
    pub fn scene_count(&self) -> usize {
        self.hierarchy.scene_count()
    }

    /// Scene and scene-local offset of frame `index`.
    ///
    /// Negative indices count from the end.
    pub fn get(&self, index: isize) -> Result<FrameCoord, DatasetError> {
        let frame_index = normalize_index(IndexKind::Frame, index, self.len())?;
        Ok(self.hierarchy.locate_frame(frame_index))
    }

    /// Resolve frame `index` and hand it to `sampler`.
    pub fn sample<F: FrameSampler>(
        &self,
        index: isize,
        sampler: &F,
    ) -> Result<F::Output, DatasetError> {
        let coord = self.get(index)?;
        sampler.sample(&self.view, coord.scene_index, coord.frame_state_index, None)
    }

    /// Dataset restricted to scene `scene_index`, re-based to start at
    /// frame zero.
    #[doc(alias = "get_scene_dataset")]
    pub fn scene_dataset(&self, scene_index: usize) -> Result<Self, DatasetError> {
        let window = self.view.scene_window(scene_index)?;
        Self::from_view(Arc::clone(&self.config), window)
    }

    /// Frame indices belonging to scene `scene_index`.
    pub fn indices_in_scene(&self, scene_index: usize) -> Result<Range<usize>, DatasetError> {
        let scene = self.view.scene(scene_index).ok_or_else(|| {
            DatasetError::out_of_range(IndexKind::Scene, scene_index, self.scene_count())
        })?;
        Ok(scene.frame_index_interval.to_range())
    }

    /// Frame indices for frame `frame_index`: just the frame itself.
    pub fn indices_in_frame(&self, frame_index: usize) -> Result<Range<usize>, DatasetError> {
        if frame_index >= self.len() {
            return Err(DatasetError::out_of_range(
                IndexKind::Frame,
                frame_index,
                self.len(),
            ));
        }
        Ok(frame_index..frame_index + 1)
    }

    /// The store window this dataset reads through.
    pub fn view(&self) -> &StoreView<S> {
        &self.view
    }

    /// Scene and frame boundary indexes.
    pub fn hierarchy(&self) -> &HierarchicalIndex {
        &self.hierarchy
    }

    /// Shared configuration.
    pub fn config(&self) -> &Arc<DatasetConfig> {
        &self.config
    }
}

impl<S: RecordStore> Clone for FrameDataset<S> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            view: self.view.clone(),
            hierarchy: Arc::clone(&self.hierarchy),
        }
    }
}

impl<S: RecordStore> fmt::Debug for FrameDataset<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameDataset")
            .field("view", &self.view)
            .field("scenes", &self.scene_count())
            .field("frames", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skein_store::MemoryStore;
    use skein_test_utils::{two_scene_store, RecordingSampler};

    fn dataset() -> FrameDataset<MemoryStore> {
        FrameDataset::new(DatasetConfig::default(), two_scene_store().into_shared()).unwrap()
    }

    fn coord(scene_index: usize, frame_state_index: usize) -> FrameCoord {
        FrameCoord {
            scene_index,
            frame_state_index,
        }
    }

    #[test]
    fn len_counts_frames() {
        let ds = dataset();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.scene_count(), 2);
    }

    #[test]
    fn get_resolves_scene_and_state() {
        let ds = dataset();
        assert_eq!(ds.get(0), Ok(coord(0, 0)));
        assert_eq!(ds.get(1), Ok(coord(0, 1)));
        assert_eq!(ds.get(2), Ok(coord(1, 0)));
        assert_eq!(ds.get(-1), ds.get(2));
        assert!(ds.get(3).is_err());
        assert!(ds.get(-4).is_err());
    }

    #[test]
    fn scene_dataset_is_rebased() {
        let ds = dataset();
        let scene1 = ds.scene_dataset(1).unwrap();
        assert_eq!(scene1.len(), 1);
        assert_eq!(scene1.scene_count(), 1);
        assert_eq!(scene1.get(0), Ok(coord(0, 0)));
        assert!(Arc::ptr_eq(scene1.config(), ds.config()));
        assert!(matches!(
            ds.scene_dataset(2),
            Err(DatasetError::IndexOutOfRange {
                kind: IndexKind::Scene,
                ..
            })
        ));
    }

    #[test]
    fn indices_cover_scene_frames() {
        let ds = dataset();
        assert_eq!(ds.indices_in_scene(0), Ok(0..2));
        assert_eq!(ds.indices_in_scene(1), Ok(2..3));
        assert!(ds.indices_in_scene(2).is_err());
        assert_eq!(ds.indices_in_frame(2), Ok(2..3));
        assert!(ds.indices_in_frame(3).is_err());
    }

    #[test]
    fn sample_passes_frame_without_track() {
        let ds = dataset();
        let s = ds.sample(1, &RecordingSampler).unwrap();
        assert_eq!(s.scene_index, 0);
        assert_eq!(s.frame_state_index, 1);
        assert_eq!(s.track_id, None);
    }

    #[test]
    fn invalid_config_is_rejected_before_reading_store() {
        let config = DatasetConfig {
            filter_agents_threshold: 2.0,
            ..Default::default()
        };
        let err = FrameDataset::new(config, two_scene_store().into_shared()).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidConfig { .. }));
    }
}
