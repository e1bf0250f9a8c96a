//! Property tests: datasets agree with a brute-force scan of the store.

use proptest::prelude::*;
use skein_core::{AgentCoord, RecordStore};
use skein_dataset::{AgentDataset, DatasetConfig, FrameDataset};
use skein_store::MemoryStore;
use skein_test_utils::{default_signature, SyntheticProfile};

fn profile() -> impl Strategy<Value = (SyntheticProfile, u64)> {
    (1usize..6, 1usize..8, 0usize..5, 0u64..=1000, any::<u64>()).prop_map(
        |(scenes, frames_per_scene, max_agents_per_frame, valid_per_mille, seed)| {
            (
                SyntheticProfile {
                    scenes,
                    frames_per_scene,
                    max_agents_per_frame,
                    valid_per_mille,
                },
                seed,
            )
        },
    )
}

/// Coordinates of every valid agent, found by linear search.
fn scan(store: &MemoryStore) -> Vec<AgentCoord> {
    let mask = store.mask(&default_signature()).unwrap();
    let mut out = Vec::new();
    for g in 0..store.agent_count() {
        if !mask[g] {
            continue;
        }
        let f = (0..store.frame_count())
            .find(|&f| store.frame(f).unwrap().agent_index_interval.contains(g as u64))
            .unwrap();
        let s = (0..store.scene_count())
            .find(|&s| store.scene(s).unwrap().frame_index_interval.contains(f as u64))
            .unwrap();
        let first = store.scene(s).unwrap().frame_index_interval.start as usize;
        out.push(AgentCoord {
            scene_index: s,
            frame_state_index: f - first,
            track_id: store.agent(g).unwrap().track_id,
        });
    }
    out
}

proptest! {
    #[test]
    fn agent_dataset_matches_scan((p, seed) in profile()) {
        let store = p.build(seed);
        let expected = scan(&store);
        let ds = AgentDataset::new(DatasetConfig::default(), store.into_shared()).unwrap();
        let got: Vec<_> = ds.iter().collect::<Result<_, _>>().unwrap();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn scene_index_is_monotone((p, seed) in profile()) {
        let ds = AgentDataset::new(DatasetConfig::default(), p.build(seed).into_shared()).unwrap();
        let coords: Vec<_> = ds.iter().map(Result::unwrap).collect();
        for w in coords.windows(2) {
            prop_assert!(w[0].scene_index <= w[1].scene_index);
            if w[0].scene_index == w[1].scene_index {
                prop_assert!(w[0].frame_state_index <= w[1].frame_state_index);
            }
            prop_assert!(w[1].frame_state_index < p.frames_per_scene);
        }
    }

    #[test]
    fn negative_indices_mirror_positive((p, seed) in profile()) {
        let ds = AgentDataset::new(DatasetConfig::default(), p.build(seed).into_shared()).unwrap();
        let n = ds.len() as isize;
        for i in 0..n {
            prop_assert_eq!(ds.get(i - n), ds.get(i));
        }
        prop_assert!(ds.get(n).is_err());
        prop_assert!(ds.get(-n - 1).is_err());
    }

    #[test]
    fn scene_indices_partition_public_space((p, seed) in profile()) {
        let ds = AgentDataset::new(DatasetConfig::default(), p.build(seed).into_shared()).unwrap();
        let mut all = Vec::new();
        for s in 0..p.scenes {
            let indices = ds.indices_in_scene(s).unwrap();
            for &i in &indices {
                prop_assert_eq!(ds.get(i as isize).unwrap().scene_index, s);
            }
            all.extend(indices);
        }
        prop_assert_eq!(all, (0..ds.len()).collect::<Vec<_>>());
    }

    #[test]
    fn frame_indices_partition_public_space((p, seed) in profile()) {
        let ds = AgentDataset::new(DatasetConfig::default(), p.build(seed).into_shared()).unwrap();
        let mut all = Vec::new();
        for f in 0..ds.view().frame_count() {
            all.extend(ds.indices_in_frame(f).unwrap());
        }
        prop_assert_eq!(all, (0..ds.len()).collect::<Vec<_>>());
    }

    #[test]
    fn scene_view_matches_parent((p, seed) in profile()) {
        let ds = AgentDataset::new(DatasetConfig::default(), p.build(seed).into_shared()).unwrap();
        for s in 0..p.scenes {
            let scene = ds.scene_dataset(s).unwrap();
            let parent: Vec<_> = ds
                .indices_in_scene(s)
                .unwrap()
                .into_iter()
                .map(|i| ds.get(i as isize).unwrap())
                .collect();
            let derived: Vec<_> = scene.iter().map(Result::unwrap).collect();
            prop_assert_eq!(derived.len(), parent.len());
            for (d, q) in derived.iter().zip(&parent) {
                prop_assert_eq!(d.scene_index, 0);
                prop_assert_eq!(d.frame_state_index, q.frame_state_index);
                prop_assert_eq!(d.track_id, q.track_id);
            }
        }
    }

    #[test]
    fn frame_dataset_resets_state_at_scene_start((p, seed) in profile()) {
        let ds = FrameDataset::new(DatasetConfig::default(), p.build(seed).into_shared()).unwrap();
        prop_assert_eq!(ds.len(), p.scenes * p.frames_per_scene);
        for f in 0..ds.len() {
            let c = ds.get(f as isize).unwrap();
            prop_assert_eq!(c.scene_index, f / p.frames_per_scene);
            prop_assert_eq!(c.frame_state_index, f % p.frames_per_scene);
        }
    }

    #[test]
    fn validated_synthetic_stores_are_accepted((p, seed) in profile()) {
        let config = DatasetConfig { validate_intervals: true, ..Default::default() };
        prop_assert!(AgentDataset::new(config, p.build(seed).into_shared()).is_ok());
    }
}
