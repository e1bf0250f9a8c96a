//! Re-based windows over a shared record store.
//!
//! A [`StoreView`] exposes a contiguous slice of scenes, with the frames
//! and agents they cover, as if it were a standalone store: every
//! interval it returns is shifted so the window's first frame is frame 0
//! and its first agent is agent 0. Windows compose, so a scene window of
//! a scene window is still a `StoreView<S>` over the same root store.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use skein_core::{
    AgentRecord, DatasetError, FrameRecord, IndexKind, Interval, MaskSignature, RecordStore,
    SceneRecord,
};
use tracing::debug;

/// A window of scenes over an `Arc`-shared root store.
///
/// Ranges are absolute positions in the root store's arrays. Nothing is
/// copied on construction; reads are translated on the fly.
pub struct StoreView<S: RecordStore> {
    store: Arc<S>,
    location: String,
    scenes: Range<usize>,
    frames: Range<usize>,
    agents: Range<usize>,
}

impl<S: RecordStore> StoreView<S> {
    /// A window covering the whole store.
    pub fn new(store: Arc<S>) -> Self {
        let location = store.location().to_string();
        let scenes = 0..store.scene_count();
        let frames = 0..store.frame_count();
        let agents = 0..store.agent_count();
        Self {
            store,
            location,
            scenes,
            frames,
            agents,
        }
    }

    /// Agents covered by scene `scene_index`, in this view's coordinates.
    ///
    /// The span runs from the first frame's interval start to the last
    /// frame's interval end. This relies on frame intervals being
    /// contiguous: agents between two frames' intervals would be swept
    /// into the span. A scene without frames covers an empty span placed
    /// at the agent position its next frame would start at.
    pub fn scene_agents(&self, scene_index: usize) -> Result<Interval, DatasetError> {
        let scene = self.scene(scene_index).ok_or_else(|| {
            DatasetError::out_of_range(IndexKind::Scene, scene_index, self.scene_count())
        })?;
        let frames = scene.frame_index_interval;
        if frames.is_empty() {
            let start = self
                .frame(frames.start as usize)
                .map(|f| f.agent_index_interval.start)
                .unwrap_or(self.agent_count() as u64);
            return Ok(Interval::new(start, start));
        }
        let first = self.frame_record(frames.start as usize)?;
        let last = self.frame_record(frames.end as usize - 1)?;
        Ok(Interval::new(
            first.agent_index_interval.start,
            last.agent_index_interval.end,
        ))
    }

    /// Narrow the window to a single scene.
    ///
    /// The returned view re-bases the scene's frames and agents to start
    /// at zero. Fails with [`DatasetError::IndexOutOfRange`] if
    /// `scene_index` is not a scene of this view.
    pub fn scene_window(&self, scene_index: usize) -> Result<Self, DatasetError> {
        let agents = self.scene_agents(scene_index)?;
        let frames = self
            .scene(scene_index)
            .map(|s| s.frame_index_interval)
            .unwrap_or_default();

        let scene_abs = self.scenes.start + scene_index;
        let frames_abs = clamp_window(&self.frames, frames);
        let agents_abs = clamp_window(&self.agents, agents);
        debug!(
            scene = scene_index,
            frames = ?frames_abs,
            agents = ?agents_abs,
            "narrowing store view to scene"
        );
        Ok(Self {
            store: Arc::clone(&self.store),
            location: format!("{}/scenes/{scene_index}", self.location),
            scenes: scene_abs..scene_abs + 1,
            frames: frames_abs,
            agents: agents_abs,
        })
    }

    /// The shared root store.
    pub fn root(&self) -> &Arc<S> {
        &self.store
    }

    /// Absolute range of root agent records covered by this window.
    pub fn agent_window(&self) -> Range<usize> {
        self.agents.clone()
    }

    /// Absolute range of root frames covered by this window.
    pub fn frame_window(&self) -> Range<usize> {
        self.frames.clone()
    }

    /// Absolute range of root scenes covered by this window.
    pub fn scene_window_range(&self) -> Range<usize> {
        self.scenes.clone()
    }

    fn frame_record(&self, index: usize) -> Result<FrameRecord, DatasetError> {
        self.frame(index)
            .ok_or_else(|| DatasetError::out_of_range(IndexKind::Frame, index, self.frame_count()))
    }
}

/// Translate a local interval into absolute positions, clipped to `window`.
fn clamp_window(window: &Range<usize>, local: Interval) -> Range<usize> {
    let len = window.len();
    let start = (local.start as usize).min(len);
    let end = (local.end as usize).clamp(start, len);
    window.start + start..window.start + end
}

impl<S: RecordStore> Clone for StoreView<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            location: self.location.clone(),
            scenes: self.scenes.clone(),
            frames: self.frames.clone(),
            agents: self.agents.clone(),
        }
    }
}

impl<S: RecordStore> fmt::Debug for StoreView<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreView")
            .field("location", &self.location)
            .field("scenes", &self.scenes)
            .field("frames", &self.frames)
            .field("agents", &self.agents)
            .finish()
    }
}

impl<S: RecordStore> RecordStore for StoreView<S> {
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
        if index >= self.scenes.len() {
            return None;
        }
        let record = self.store.scene(self.scenes.start + index)?;
        Some(SceneRecord {
            frame_index_interval: record.frame_index_interval.rebase(self.frames.start as u64),
        })
    }

    fn frame(&self, index: usize) -> Option<FrameRecord> {
        if index >= self.frames.len() {
            return None;
        }
        let record = self.store.frame(self.frames.start + index)?;
        Some(FrameRecord {
            agent_index_interval: record.agent_index_interval.rebase(self.agents.start as u64),
        })
    }

    fn agent(&self, index: usize) -> Option<AgentRecord> {
        if index >= self.agents.len() {
            return None;
        }
        self.store.agent(self.agents.start + index)
    }

    /// The root mask restricted to this window's agents.
    ///
    /// A full-store window shares the root allocation; narrower windows
    /// copy their slice.
    fn mask(&self, signature: &MaskSignature) -> Option<Arc<[bool]>> {
        let flags = self.store.mask(signature)?;
        if self.agents.start == 0 && self.agents.end == flags.len() {
            return Some(flags);
        }
        let end = self.agents.end.min(flags.len());
        let start = self.agents.start.min(end);
        Some(Arc::from(&flags[start..end]))
    }

    fn mask_signatures(&self) -> Vec<MaskSignature> {
        self.store.mask_signatures()
    }
}
