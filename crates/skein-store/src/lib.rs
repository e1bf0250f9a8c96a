//! Record stores for Skein datasets.
//!
//! - [`MemoryStore`]: every record array held in memory, with a builder
//!   that produces consistent, contiguous intervals.
//! - [`StoreView`]: a zero-copy, re-based window of scenes over any
//!   `Arc`-shared [`RecordStore`](skein_core::RecordStore). Scene views of
//!   a dataset are built on it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod memory;
pub mod view;

pub use memory::{MemoryStore, MemoryStoreBuilder};
pub use view::StoreView;
