//! Reusable dataset fixtures.
//!
//! - [`two_scene_store`]: the smallest store exercising every boundary
//!   case (two scenes, a multi-frame scene, a frame-boundary agent).
//! - [`SyntheticProfile`]: deterministic generator for larger stores.
//! - [`RecordingSampler`]: a `FrameSampler` that returns what it was asked
//!   to sample, so tests can check what a dataset hands downstream.

use skein_core::{
    DatasetError, FrameSampler, IndexKind, Interval, MaskSignature, RecordStore, TrackId,
};
use skein_store::MemoryStore;

/// Validity flags of [`two_scene_store`]: `[T, F, T, T, F, T, T, F]`.
pub const TWO_SCENE_MASK: [bool; 8] = [true, false, true, true, false, true, true, false];

/// Signature every fixture stores its mask under: `10_50_0.5`.
pub fn default_signature() -> MaskSignature {
    MaskSignature::new(10, 50, 0.5)
}

/// Two scenes, three frames, eight agents.
///
/// ```text
/// scene 0: frame 0 agents [0,3) tracks 1 2 3
///          frame 1 agents [3,5) tracks 1 3
/// scene 1: frame 2 agents [5,8) tracks 1 2 4
/// mask:    T F T T F T T F  ->  agents_indices [0, 2, 3, 5, 6]
/// ```
pub fn two_scene_store() -> MemoryStore {
    MemoryStore::builder("memory://two-scene")
        .scene()
        .frame([1, 2, 3])
        .frame([1, 3])
        .scene()
        .frame([1, 2, 4])
        .mask(default_signature(), TWO_SCENE_MASK.to_vec())
        .build()
}

/// Shape of a deterministic synthetic store.
#[derive(Clone, Debug)]
pub struct SyntheticProfile {
    /// Number of scenes.
    pub scenes: usize,
    /// Frames in every scene.
    pub frames_per_scene: usize,
    /// Upper bound (inclusive) on agents per frame; frames may be empty.
    pub max_agents_per_frame: usize,
    /// Fraction of agents flagged valid, in thousandths.
    pub valid_per_mille: u64,
}

impl SyntheticProfile {
    /// Generate the store. Same profile and seed, same store.
    ///
    /// The mask is stored under [`default_signature`].
    pub fn build(&self, seed: u64) -> MemoryStore {
        let mut builder = MemoryStore::builder(format!("memory://synthetic/{seed}"));
        let mut mask = Vec::new();
        let mut state = seed;
        for _ in 0..self.scenes {
            builder = builder.scene();
            for _ in 0..self.frames_per_scene {
                let n = (splitmix64(&mut state) % (self.max_agents_per_frame as u64 + 1)) as usize;
                for _ in 0..n {
                    mask.push(splitmix64(&mut state) % 1000 < self.valid_per_mille);
                }
                builder = builder.frame(0..n as u64);
            }
        }
        builder.mask(default_signature(), mask).build()
    }
}

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// What a [`RecordingSampler`] saw for one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SampledFrame {
    pub location: String,
    pub scene_index: usize,
    pub frame_state_index: usize,
    pub track_id: Option<TrackId>,
    /// Agents of the sampled frame, in the store's coordinates.
    pub agents: Interval,
}

/// Sampler that looks up the requested frame and reports it back.
///
/// Fails with [`DatasetError::IndexOutOfRange`] when the coordinate does
/// not name a frame of the store, mirroring what a real rasterizer would
/// do when handed a bad coordinate.
#[derive(Clone, Copy, Debug, Default)]
pub struct RecordingSampler;

impl FrameSampler for RecordingSampler {
    type Output = SampledFrame;

    fn sample(
        &self,
        store: &dyn RecordStore,
        scene_index: usize,
        frame_state_index: usize,
        track_id: Option<TrackId>,
    ) -> Result<SampledFrame, DatasetError> {
        let scene = store.scene(scene_index).ok_or_else(|| {
            DatasetError::out_of_range(IndexKind::Scene, scene_index, store.scene_count())
        })?;
        let frames = scene.frame_index_interval;
        let frame_index = frames.start as usize + frame_state_index;
        if frame_state_index as u64 >= frames.len() {
            return Err(DatasetError::out_of_range(
                IndexKind::Frame,
                frame_state_index,
                frames.len() as usize,
            ));
        }
        let frame = store.frame(frame_index).ok_or_else(|| {
            DatasetError::out_of_range(IndexKind::Frame, frame_index, store.frame_count())
        })?;
        Ok(SampledFrame {
            location: store.location().to_string(),
            scene_index,
            frame_state_index,
            track_id,
            agents: frame.agent_index_interval,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_scene_store_matches_diagram() {
        let store = two_scene_store();
        assert_eq!(store.scene_count(), 2);
        assert_eq!(store.frame_count(), 3);
        assert_eq!(store.agent_count(), 8);
        assert_eq!(store.mask(&default_signature()).unwrap().len(), 8);
    }

    #[test]
    fn synthetic_store_is_deterministic() {
        let profile = SyntheticProfile {
            scenes: 4,
            frames_per_scene: 10,
            max_agents_per_frame: 6,
            valid_per_mille: 400,
        };
        let a = profile.build(7);
        let b = profile.build(7);
        assert_eq!(a.agent_count(), b.agent_count());
        assert_eq!(
            a.mask(&default_signature()),
            b.mask(&default_signature())
        );
        assert_eq!(a.frame_count(), 40);
        assert_eq!(
            a.mask(&default_signature()).unwrap().len(),
            a.agent_count()
        );
    }

    #[test]
    fn recording_sampler_reports_frame() {
        let store = two_scene_store();
        let s = RecordingSampler
            .sample(&store, 0, 1, Some(TrackId(3)))
            .unwrap();
        assert_eq!(s.agents, Interval::new(3, 5));
        assert_eq!(s.track_id, Some(TrackId(3)));
        assert!(RecordingSampler.sample(&store, 1, 1, None).is_err());
        assert!(RecordingSampler.sample(&store, 2, 0, None).is_err());
    }
}
