//! Agent-indexed dataset view filtered by a validity mask.
//!
//! [`AgentDataset`] exposes only the agent records its mask keeps, in
//! storage order, under a compacted public index. Resolution composes
//! three lookups, each O(log n) or better:
//!
//! ```text
//! public i ─► agents_indices[i] = g ─► frame f ∋ g ─► scene s ∋ f
//!                                       state = f - first_frame(s)
//! ```
//!
//! Scene views rebuild every index from a copied mask slice instead of
//! re-basing the parent's, so a derived dataset is self-contained.

use std::fmt;
use std::sync::Arc;

use skein_core::{AgentCoord, DatasetError, FrameSampler, IndexKind, RecordStore};
use skein_index::{AgentLocation, CompactedIndex, ValidityMask};
use skein_store::StoreView;
use tracing::debug;

use crate::config::DatasetConfig;
use crate::frame::FrameDataset;

/// Filtered, agent-indexed view over a record store.
pub struct AgentDataset<S: RecordStore> {
    base: FrameDataset<S>,
    mask: ValidityMask,
    agents: CompactedIndex,
}

impl<S: RecordStore> AgentDataset<S> {
    /// Build over `store`, loading the mask that `config` selects.
    ///
    /// Fails with [`DatasetError::ConfigMismatch`] if the store holds no
    /// mask for `config.signature()`; nothing is returned in that case.
    pub fn new(config: DatasetConfig, store: Arc<S>) -> Result<Self, DatasetError> {
        let signature = config.signature();
        let base = FrameDataset::new(config, store)?;
        let mask = ValidityMask::load(base.view(), &signature)?;
        Self::from_base(base, mask)
    }

    /// Build over `store` with an explicitly supplied mask.
    ///
    /// The store's own masks are not consulted.
    pub fn with_mask(
        config: DatasetConfig,
        store: Arc<S>,
        mask: ValidityMask,
    ) -> Result<Self, DatasetError> {
        let base = FrameDataset::new(config, store)?;
        Self::from_base(base, mask)
    }

    /// Compose a frame-indexed base with a mask over the same window.
    ///
    /// Fails with [`DatasetError::InvalidConfig`] if the mask does not
    /// have exactly one flag per agent record of the window.
    pub fn from_base(base: FrameDataset<S>, mask: ValidityMask) -> Result<Self, DatasetError> {
        let agent_count = base.view().agent_count();
        if mask.len() != agent_count {
            return Err(DatasetError::InvalidConfig {
                reason: format!(
                    "agents mask has {} entries but {} holds {agent_count} agents",
                    mask.len(),
                    base.view().location(),
                ),
            });
        }
        let agents = CompactedIndex::build(&mask);
        debug!(
            location = base.view().location(),
            signature = %base.config().signature(),
            agents = agent_count,
            valid = agents.len(),
            "agent dataset built"
        );
        Ok(Self { base, mask, agents })
    }

    /// Number of valid agents, i.e. the size of the public index space.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether no agent passed the mask.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Where public index `index` lands in every coordinate space.
    ///
    /// Negative indices count from the end.
    pub fn locate(&self, index: isize) -> Result<AgentLocation, DatasetError> {
        self.base.hierarchy().resolve(&self.agents, index)
    }

    /// Resolve public index `index` to `(scene, frame state, track)`.
    pub fn get(&self, index: isize) -> Result<AgentCoord, DatasetError> {
        let location = self.locate(index)?;
        let view = self.base.view();
        let record = view.agent(location.agent_index as usize).ok_or_else(|| {
            DatasetError::out_of_range(IndexKind::Agent, location.agent_index, view.agent_count())
        })?;
        Ok(AgentCoord {
            scene_index: location.coord.scene_index,
            frame_state_index: location.coord.frame_state_index,
            track_id: record.track_id,
        })
    }

    /// Resolve public index `index` and hand it to `sampler`, centred on
    /// the agent's track.
    pub fn sample<F: FrameSampler>(
        &self,
        index: isize,
        sampler: &F,
    ) -> Result<F::Output, DatasetError> {
        let coord = self.get(index)?;
        sampler.sample(
            self.base.view(),
            coord.scene_index,
            coord.frame_state_index,
            Some(coord.track_id),
        )
    }

    /// Resolved coordinates of every valid agent, in public-index order.
    pub fn iter(&self) -> impl Iterator<Item = Result<AgentCoord, DatasetError>> + '_ {
        (0..self.len()).map(move |i| self.get(i as isize))
    }

    /// Dataset restricted to scene `scene_index`.
    ///
    /// The derived dataset owns a copy of this dataset's mask over the
    /// scene's agents and rebuilds its own indexes. Its public indices
    /// correspond, in order, to [`indices_in_scene`](Self::indices_in_scene).
    #[doc(alias = "derive_scene_view")]
    #[doc(alias = "get_scene_dataset")]
    pub fn scene_dataset(&self, scene_index: usize) -> Result<Self, DatasetError> {
        let agents = self.base.view().scene_agents(scene_index)?;
        let base = self.base.scene_dataset(scene_index)?;
        let mask = self.mask.slice(agents.to_range())?;
        debug!(scene = scene_index, agents = %agents, "deriving scene dataset");
        Self::from_base(base, mask)
    }

    /// Public indices of the valid agents in scene `scene_index`.
    pub fn indices_in_scene(&self, scene_index: usize) -> Result<Vec<usize>, DatasetError> {
        let agents = self.base.view().scene_agents(scene_index)?;
        Ok(self.agents.indices_within(agents))
    }

    /// Public indices of the valid agents in frame `frame_index`.
    pub fn indices_in_frame(&self, frame_index: usize) -> Result<Vec<usize>, DatasetError> {
        let view = self.base.view();
        let frame = view.frame(frame_index).ok_or_else(|| {
            DatasetError::out_of_range(IndexKind::Frame, frame_index, view.frame_count())
        })?;
        Ok(self.agents.indices_within(frame.agent_index_interval))
    }

    /// Storage positions of the valid agents (`agents_indices`).
    pub fn agents_indices(&self) -> &[u64] {
        self.agents.positions()
    }

    /// The mask this dataset was filtered with.
    pub fn mask(&self) -> &ValidityMask {
        &self.mask
    }

    /// The frame-indexed base view.
    pub fn frames(&self) -> &FrameDataset<S> {
        &self.base
    }

    /// The store window this dataset reads through.
    pub fn view(&self) -> &StoreView<S> {
        self.base.view()
    }

    /// Shared configuration.
    pub fn config(&self) -> &Arc<DatasetConfig> {
        self.base.config()
    }
}

impl<S: RecordStore> Clone for AgentDataset<S> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            mask: self.mask.clone(),
            agents: self.agents.clone(),
        }
    }
}

impl<S: RecordStore> fmt::Debug for AgentDataset<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentDataset")
            .field("base", &self.base)
            .field("agents", &self.mask.len())
            .field("valid", &self.len())
            .finish()
    }
}
