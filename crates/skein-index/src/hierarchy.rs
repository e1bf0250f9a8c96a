//! Two-level scene → frame → agent resolution.
//!
//! [`HierarchicalIndex`] composes two [`IntervalIndex`] levels built from
//! any [`RecordStore`]: scene upper bounds over the frame array and frame
//! upper bounds over the agent array. Combined with a
//! [`CompactedIndex`], it translates a public filtered index into a
//! scene-local coordinate.
//!
//! ```text
//! public i ──CompactedIndex──► agent g ──frames──► frame f ──scenes──► scene s
//!                                                   state = f - offset(s)
//! ```

use skein_core::{DatasetError, FrameCoord, IndexKind, Interval, RecordStore};

use crate::compacted::CompactedIndex;
use crate::interval::{check_partition, IntervalIndex};

/// Where a public agent index lands in every coordinate space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgentLocation {
    /// Global position of the agent record.
    pub agent_index: u64,
    /// Global position of the frame holding the record.
    pub frame_index: usize,
    /// Scene and scene-local frame offset.
    pub coord: FrameCoord,
}

/// Cumulative boundaries for both levels of the hierarchy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HierarchicalIndex {
    /// Scene `s` covers frames `[scenes.offset(s), scenes.upper_bounds()[s])`.
    scenes: IntervalIndex,
    /// Frame `f` covers agents `[frames.offset(f), frames.upper_bounds()[f])`.
    frames: IntervalIndex,
}

impl HierarchicalIndex {
    /// Read the interval upper bounds of every scene and frame in `store`.
    ///
    /// Missing records (a store reporting a count larger than what it can
    /// read) are treated as storage errors.
    pub fn build<S: RecordStore + ?Sized>(store: &S) -> Result<Self, DatasetError> {
        let scene_count = store.scene_count();
        let mut scene_bounds = Vec::with_capacity(scene_count);
        for s in 0..scene_count {
            let scene = store
                .scene(s)
                .ok_or_else(|| DatasetError::out_of_range(IndexKind::Scene, s, scene_count))?;
            scene_bounds.push(scene.frame_index_interval.end);
        }

        let frame_count = store.frame_count();
        let mut frame_bounds = Vec::with_capacity(frame_count);
        for f in 0..frame_count {
            let frame = store
                .frame(f)
                .ok_or_else(|| DatasetError::out_of_range(IndexKind::Frame, f, frame_count))?;
            frame_bounds.push(frame.agent_index_interval.end);
        }

        Ok(Self::from_upper_bounds(scene_bounds, frame_bounds))
    }

    /// Build directly from precomputed upper bounds.
    pub fn from_upper_bounds(scene_bounds: Vec<u64>, frame_bounds: Vec<u64>) -> Self {
        Self {
            scenes: IntervalIndex::from_upper_bounds(scene_bounds),
            frames: IntervalIndex::from_upper_bounds(frame_bounds),
        }
    }

    /// Check that scene intervals partition the frame array and frame
    /// intervals partition the agent array.
    ///
    /// Reads the full intervals (lower bounds included) from `store`,
    /// so it catches gaps that the upper-bound index alone cannot see.
    pub fn validate<S: RecordStore + ?Sized>(store: &S) -> Result<(), DatasetError> {
        check_partition(
            IndexKind::Scene,
            (0..store.scene_count())
                .filter_map(|s| store.scene(s))
                .map(|r| r.frame_index_interval),
            store.frame_count() as u64,
        )?;
        check_partition(
            IndexKind::Frame,
            (0..store.frame_count())
                .filter_map(|f| store.frame(f))
                .map(|r| r.agent_index_interval),
            store.agent_count() as u64,
        )?;
        Ok(())
    }

    /// Scene-level boundaries (`cumulative_sizes`).
    pub fn scenes(&self) -> &IntervalIndex {
        &self.scenes
    }

    /// Frame-level boundaries (`cumulative_sizes_agents`).
    pub fn frames(&self) -> &IntervalIndex {
        &self.frames
    }

    /// Number of scenes.
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Number of frames.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Scene and scene-local offset of global frame `frame_index`.
    ///
    /// The first scene starts at frame zero, so a single rebasing formula
    /// covers every scene.
    pub fn locate_frame(&self, frame_index: usize) -> FrameCoord {
        let scene_index = self.scenes.locate(frame_index as u64);
        let offset = self.scenes.offset(scene_index);
        FrameCoord {
            scene_index,
            frame_state_index: (frame_index as u64).saturating_sub(offset) as usize,
        }
    }

    /// Frame, scene and scene-local offset of global agent record `agent_index`.
    pub fn locate_agent(&self, agent_index: u64) -> AgentLocation {
        let frame_index = self.frames.locate(agent_index);
        AgentLocation {
            agent_index,
            frame_index,
            coord: self.locate_frame(frame_index),
        }
    }

    /// Resolve public index `public_index` through `compacted`.
    ///
    /// Only the public index is bounds-checked. Interval data is trusted:
    /// inconsistent boundaries give a wrong location, never a panic.
    /// (Non-decreasing bounds are asserted once, at build time, in debug
    /// builds.)
    pub fn resolve(
        &self,
        compacted: &CompactedIndex,
        public_index: isize,
    ) -> Result<AgentLocation, DatasetError> {
        let agent_index = compacted.resolve(public_index)?;
        Ok(self.locate_agent(agent_index))
    }

    /// Frames of scene `scene_index`, derived from the cumulative bounds.
    pub fn scene_frames(&self, scene_index: usize) -> Option<Interval> {
        self.scenes.bucket(scene_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skein_core::{FrameRecord, SceneRecord, TrackId};
    use skein_store::MemoryStore;
    use skein_test_utils::{two_scene_store, TWO_SCENE_MASK};

    use crate::mask::ValidityMask;

    fn two_scene() -> HierarchicalIndex {
        HierarchicalIndex::build(&two_scene_store()).unwrap()
    }

    #[test]
    fn build_collects_upper_bounds() {
        let h = two_scene();
        assert_eq!(h.scenes().upper_bounds(), &[2, 3]);
        assert_eq!(h.frames().upper_bounds(), &[3, 5, 8]);
        assert_eq!(h.scene_count(), 2);
        assert_eq!(h.frame_count(), 3);
    }

    #[test]
    fn locate_frame_rebases_into_scene() {
        let h = two_scene();
        let coord = |scene_index, frame_state_index| FrameCoord {
            scene_index,
            frame_state_index,
        };
        assert_eq!(h.locate_frame(0), coord(0, 0));
        assert_eq!(h.locate_frame(1), coord(0, 1));
        assert_eq!(h.locate_frame(2), coord(1, 0));
    }

    #[test]
    fn agent_on_frame_boundary_goes_to_next_frame() {
        let h = two_scene();
        assert_eq!(h.locate_agent(2).frame_index, 0);
        assert_eq!(h.locate_agent(3).frame_index, 1);
        assert_eq!(h.locate_agent(5).frame_index, 2);
        assert_eq!(h.locate_agent(5).coord.scene_index, 1);
    }

    #[test]
    fn resolve_goes_through_compacted_index() {
        let h = two_scene();
        let compacted = CompactedIndex::build(&ValidityMask::from(TWO_SCENE_MASK.to_vec()));
        let loc = h.resolve(&compacted, 2).unwrap();
        assert_eq!(
            loc,
            AgentLocation {
                agent_index: 3,
                frame_index: 1,
                coord: FrameCoord {
                    scene_index: 0,
                    frame_state_index: 1
                },
            }
        );
        assert!(h.resolve(&compacted, 5).is_err());
    }

    #[test]
    fn validate_accepts_consistent_store() {
        assert_eq!(HierarchicalIndex::validate(&two_scene_store()), Ok(()));
    }

    #[test]
    fn validate_reports_agent_gap() {
        let store = MemoryStore::from_parts(
            "gappy",
            vec![SceneRecord {
                frame_index_interval: Interval::new(0, 2),
            }],
            vec![
                FrameRecord {
                    agent_index_interval: Interval::new(0, 2),
                },
                FrameRecord {
                    agent_index_interval: Interval::new(3, 4),
                },
            ],
            (0..4).map(TrackId).collect(),
        );
        let err = HierarchicalIndex::validate(&store).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::InconsistentIntervals(skein_core::IntervalError::Gap {
                level: IndexKind::Frame,
                index: 1,
                ..
            })
        ));
    }

    #[test]
    fn inconsistent_bounds_resolve_without_panicking() {
        // Frame bounds end before the agent array does.
        let h = HierarchicalIndex::from_upper_bounds(vec![1], vec![2]);
        let loc = h.locate_agent(10);
        assert_eq!(loc.frame_index, 1);
        assert_eq!(loc.coord.scene_index, 1);
    }
}
