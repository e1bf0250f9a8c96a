//! Test fixtures and mock collaborators for Skein development.
//!
//! Provides the canonical two-scene store, a deterministic synthetic
//! store generator ([`SyntheticProfile`]), and a [`RecordingSampler`]
//! that stands in for the feature-extraction layer.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    default_signature, two_scene_store, RecordingSampler, SampledFrame, SyntheticProfile,
    TWO_SCENE_MASK,
};
