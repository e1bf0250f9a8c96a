//! Fully in-memory record store.
//!
//! [`MemoryStore`] keeps every record array in a `Vec` and its masks in an
//! `IndexMap`. It is the store used by tests and benchmarks, and is
//! adequate for datasets small enough to hold in RAM.

use std::sync::Arc;

use indexmap::IndexMap;
use skein_core::{
    AgentRecord, FrameRecord, Interval, MaskSignature, RecordStore, SceneRecord, TrackId,
};

/// Record store backed by plain vectors.
///
/// Masks are keyed by [`MaskSignature`] in insertion order, so
/// diagnostics list available signatures deterministically.
#[derive(Clone, Debug)]
pub struct MemoryStore {
    location: String,
    scenes: Vec<SceneRecord>,
    frames: Vec<FrameRecord>,
    agents: Vec<AgentRecord>,
    masks: IndexMap<MaskSignature, Arc<[bool]>>,
}

impl MemoryStore {
    /// Start building a store hierarchically, scene by scene.
    pub fn builder(location: impl Into<String>) -> MemoryStoreBuilder {
        MemoryStoreBuilder {
            store: Self::from_parts(location, Vec::new(), Vec::new(), Vec::new()),
        }
    }

    /// Assemble a store from raw record arrays.
    ///
    /// Intervals are taken verbatim and not checked, which makes this the
    /// way to construct deliberately inconsistent data in tests.
    pub fn from_parts(
        location: impl Into<String>,
        scenes: Vec<SceneRecord>,
        frames: Vec<FrameRecord>,
        tracks: Vec<TrackId>,
    ) -> Self {
        Self {
            location: location.into(),
            scenes,
            frames,
            agents: tracks
                .into_iter()
                .map(|track_id| AgentRecord { track_id })
                .collect(),
            masks: IndexMap::new(),
        }
    }

    /// Store a mask under `signature`, returning any mask it replaces.
    ///
    /// The length is not checked against the agent count here; datasets
    /// reject mismatched masks when they load them.
    pub fn insert_mask(
        &mut self,
        signature: MaskSignature,
        flags: impl Into<Arc<[bool]>>,
    ) -> Option<Arc<[bool]>> {
        self.masks.insert(signature, flags.into())
    }

    /// Builder-style [`insert_mask`](Self::insert_mask).
    pub fn with_mask(mut self, signature: MaskSignature, flags: impl Into<Arc<[bool]>>) -> Self {
        self.insert_mask(signature, flags);
        self
    }

    /// Wrap the store in an `Arc` for sharing between datasets.
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl RecordStore for MemoryStore {
    fn location(&self) -> &str {
        &self.location
    }

    fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn agent_count(&self) -> usize {
        self.agents.len()
    }

    fn scene(&self, index: usize) -> Option<SceneRecord> {
        self.scenes.get(index).copied()
    }

    fn frame(&self, index: usize) -> Option<FrameRecord> {
        self.frames.get(index).copied()
    }

    fn agent(&self, index: usize) -> Option<AgentRecord> {
        self.agents.get(index).copied()
    }

    fn mask(&self, signature: &MaskSignature) -> Option<Arc<[bool]>> {
        self.masks.get(signature).cloned()
    }

    fn mask_signatures(&self) -> Vec<MaskSignature> {
        self.masks.keys().copied().collect()
    }
}

/// Incremental builder producing contiguous, consistent intervals.
///
/// ```
/// use skein_core::RecordStore;
/// use skein_store::MemoryStore;
///
/// let store = MemoryStore::builder("memory")
///     .scene()
///     .frame([1, 2, 3])
///     .frame([1, 3])
///     .scene()
///     .frame([7, 8, 9])
///     .build();
/// assert_eq!(store.scene_count(), 2);
/// assert_eq!(store.agent_count(), 8);
/// ```
#[derive(Debug)]
pub struct MemoryStoreBuilder {
    store: MemoryStore,
}

impl MemoryStoreBuilder {
    /// Open a new, initially empty scene.
    pub fn scene(mut self) -> Self {
        let start = self.store.frames.len() as u64;
        self.store.scenes.push(SceneRecord {
            frame_index_interval: Interval::new(start, start),
        });
        self
    }

    /// Append a frame with the given track ids to the current scene.
    ///
    /// Opens a first scene implicitly if none exists yet.
    pub fn frame(mut self, tracks: impl IntoIterator<Item = u64>) -> Self {
        if self.store.scenes.is_empty() {
            self = self.scene();
        }
        let start = self.store.agents.len() as u64;
        self.store.agents.extend(tracks.into_iter().map(|t| AgentRecord {
            track_id: TrackId(t),
        }));
        let end = self.store.agents.len() as u64;
        self.store.frames.push(FrameRecord {
            agent_index_interval: Interval::new(start, end),
        });
        let frame_end = self.store.frames.len() as u64;
        if let Some(scene) = self.store.scenes.last_mut() {
            scene.frame_index_interval.end = frame_end;
        }
        self
    }

    /// Store a mask under `signature`.
    pub fn mask(mut self, signature: MaskSignature, flags: impl Into<Arc<[bool]>>) -> Self {
        self.store.insert_mask(signature, flags);
        self
    }

    /// Finish building.
    pub fn build(self) -> MemoryStore {
        self.store
    }
}
