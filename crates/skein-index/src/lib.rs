//! Interval, mask and compacted index structures for Skein datasets.
//!
//! Everything here is built once from a [`RecordStore`](skein_core::RecordStore)
//! and then only read:
//!
//! - [`IntervalIndex`]: O(log n) "which bucket holds position p" over
//!   contiguous half-open intervals.
//! - [`ValidityMask`]: one flag per agent record, loaded by exact
//!   [`MaskSignature`](skein_core::MaskSignature).
//! - [`CompactedIndex`]: positions of valid records; the public index space.
//! - [`HierarchicalIndex`]: scene and frame boundaries composed to resolve
//!   a public index into `(scene, frame state)`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod compacted;
pub mod hierarchy;
pub mod interval;
pub mod mask;

pub use compacted::{normalize_index, CompactedIndex};
pub use hierarchy::{AgentLocation, HierarchicalIndex};
pub use interval::{check_partition, IntervalIndex};
pub use mask::ValidityMask;
