//! Benchmark profiles for the Skein dataset crates.
//!
//! - [`reference_profile`]: 100 scenes x 248 frames, up to 16 agents per
//!   frame (~200K agent records), 40% valid
//! - [`stress_profile`]: 10x the scene count of [`reference_profile`]
//! - [`sparse_profile`]: reference shape with 2% of agents valid, for
//!   range queries dominated by the linear compacted-index scan

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use skein_store::MemoryStore;
use skein_test_utils::SyntheticProfile;

/// Frames per scene in every profile.
pub const FRAMES_PER_SCENE: usize = 248;

/// Build the reference store.
pub fn reference_profile(seed: u64) -> MemoryStore {
    SyntheticProfile {
        scenes: 100,
        frames_per_scene: FRAMES_PER_SCENE,
        max_agents_per_frame: 16,
        valid_per_mille: 400,
    }
    .build(seed)
}

/// Build the stress store: 1000 scenes, ~2M agent records.
pub fn stress_profile(seed: u64) -> MemoryStore {
    SyntheticProfile {
        scenes: 1000,
        frames_per_scene: FRAMES_PER_SCENE,
        max_agents_per_frame: 16,
        valid_per_mille: 400,
    }
    .build(seed)
}

/// Build the sparse store.
pub fn sparse_profile(seed: u64) -> MemoryStore {
    SyntheticProfile {
        scenes: 100,
        frames_per_scene: FRAMES_PER_SCENE,
        max_agents_per_frame: 16,
        valid_per_mille: 20,
    }
    .build(seed)
}

/// `count` deterministic indices in `0..len`, for resolution loops.
///
/// Empty when `len` is zero.
pub fn probe_indices(len: usize, count: usize, seed: u64) -> Vec<isize> {
    if len == 0 {
        return Vec::new();
    }
    (0..count as u64)
        .map(|i| {
            let h = (i ^ seed).wrapping_mul(6364136223846793007);
            ((h >> 17) % len as u64) as isize
        })
        .collect()
}
