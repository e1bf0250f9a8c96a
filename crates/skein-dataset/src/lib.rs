//! Frame- and agent-indexed dataset views for Skein.
//!
//! A dataset maps a flat public index onto the scene/frame/agent
//! hierarchy of a [`RecordStore`](skein_core::RecordStore):
//!
//! - [`FrameDataset`]: one public index per frame.
//! - [`AgentDataset`]: one public index per agent that passes the agents
//!   mask selected by [`DatasetConfig`].
//!
//! Both are immutable after construction, cheap to clone, and safe to
//! share across threads. Scene views derived with `scene_dataset` are
//! independent datasets over a re-based window of the same store.
//!
//! ```
//! use skein_core::{MaskSignature, TrackId};
//! use skein_dataset::{AgentDataset, DatasetConfig};
//! use skein_store::MemoryStore;
//!
//! let store = MemoryStore::builder("memory://doc")
//!     .scene()
//!     .frame([7, 8])
//!     .frame([7])
//!     .mask(MaskSignature::new(10, 50, 0.5), vec![false, true, true])
//!     .build()
//!     .into_shared();
//!
//! let dataset = AgentDataset::new(DatasetConfig::default(), store)?;
//! assert_eq!(dataset.len(), 2);
//! let last = dataset.get(-1)?;
//! assert_eq!((last.scene_index, last.frame_state_index), (0, 1));
//! assert_eq!(last.track_id, TrackId(7));
//! # Ok::<(), skein_core::DatasetError>(())
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod agent;
pub mod config;
pub mod frame;

pub use agent::AgentDataset;
pub use config::DatasetConfig;
pub use frame::FrameDataset;
