//! Core types and traits for Skein hierarchical datasets.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Skein workspace:
//! record and coordinate types, mask signatures, error types, and the
//! storage and sampling traits that the index and dataset crates are
//! written against.
//!
//! # Data model
//!
//! ```text
//! scenes[s].frame_index_interval  ──►  frames[f0..f1)
//! frames[f].agent_index_interval  ──►  agents[a0..a1)
//! agents[a].track_id
//! agents_mask/<signature>[a]      ──►  bool per agent record
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod record;
pub mod signature;
pub mod traits;

pub use error::{DatasetError, IndexKind, IntervalError};
pub use id::{AgentCoord, FrameCoord, TrackId};
pub use record::{AgentRecord, FrameRecord, Interval, SceneRecord};
pub use signature::{MaskSignature, ParseSignatureError};
pub use traits::{FrameSampler, RecordStore};
