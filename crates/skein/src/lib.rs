//! Skein: flat public indices over hierarchical scene/frame/agent data.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Skein sub-crates. For most users, adding `skein` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use skein::prelude::*;
//!
//! // Two scenes; the middle agent of the first frame is filtered out.
//! let store = MemoryStore::builder("memory://quick-start")
//!     .scene()
//!     .frame([1, 2, 3])
//!     .frame([1, 3])
//!     .scene()
//!     .frame([1, 2, 4])
//!     .mask(
//!         MaskSignature::new(10, 50, 0.5),
//!         vec![true, false, true, true, false, true, true, false],
//!     )
//!     .build()
//!     .into_shared();
//!
//! let dataset = AgentDataset::new(DatasetConfig::default(), store).unwrap();
//! assert_eq!(dataset.len(), 5);
//!
//! let coord = dataset.get(2).unwrap();
//! assert_eq!((coord.scene_index, coord.frame_state_index), (0, 1));
//! assert_eq!(coord.track_id, TrackId(1));
//!
//! let scene1 = dataset.scene_dataset(1).unwrap();
//! assert_eq!(scene1.len(), 2);
//! assert_eq!(dataset.indices_in_scene(1).unwrap(), vec![3, 4]);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `skein-core` | Records, coordinates, signatures, errors, core traits |
//! | [`index`] | `skein-index` | Interval, mask, compacted and hierarchical indexes |
//! | [`store`] | `skein-store` | In-memory store and re-based store windows |
//! | [`dataset`] | `skein-dataset` | Frame and agent datasets, configuration |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and errors (`skein-core`).
///
/// Implement [`types::RecordStore`] to index a new storage backend and
/// [`types::FrameSampler`] to plug in feature extraction.
pub use skein_core as types;

/// Index structures (`skein-index`).
pub use skein_index as index;

/// Record stores (`skein-store`).
///
/// [`store::MemoryStore`] holds every array in memory;
/// [`store::StoreView`] windows any shared store.
pub use skein_store as store;

/// Dataset views (`skein-dataset`).
pub use skein_dataset as dataset;

/// Common imports for typical Skein usage.
///
/// ```rust
/// use skein::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use skein_core::{
        AgentCoord, FrameCoord, FrameSampler, Interval, MaskSignature, RecordStore, TrackId,
    };

    // Errors
    pub use skein_core::{DatasetError, IndexKind, IntervalError};

    // Stores
    pub use skein_store::{MemoryStore, StoreView};

    // Datasets
    pub use skein_dataset::{AgentDataset, DatasetConfig, FrameDataset};
}
