//! Storage and sampling abstractions.

use std::sync::Arc;

use crate::error::DatasetError;
use crate::id::TrackId;
use crate::record::{AgentRecord, FrameRecord, SceneRecord};
use crate::signature::MaskSignature;

/// Read-only random access to a scene/frame/agent record store.
///
/// This is the seam between index resolution and the chunked array
/// storage that actually holds the records. Implementations return
/// `None` for positions past the end of an array. Every method takes
/// `&self`; implementations must tolerate concurrent readers, which
/// is why the trait requires `Send + Sync`.
///
/// Interval data is trusted as-is. A store whose frame intervals do not
/// partition its agent array produces undefined resolution results
/// unless the dataset is built with interval validation enabled. Release
/// builds never panic on such data; debug builds assert that interval
/// upper bounds are non-decreasing when the indexes are built.
pub trait RecordStore: Send + Sync {
    /// Human-readable location of the store, used in diagnostics.
    fn location(&self) -> &str;

    /// Number of scene records.
    fn scene_count(&self) -> usize;

    /// Number of frame records.
    fn frame_count(&self) -> usize;

    /// Number of agent records.
    fn agent_count(&self) -> usize;

    /// Read the scene record at `index`.
    fn scene(&self, index: usize) -> Option<SceneRecord>;

    /// Read the frame record at `index`.
    fn frame(&self, index: usize) -> Option<FrameRecord>;

    /// Read the agent record at `index`.
    fn agent(&self, index: usize) -> Option<AgentRecord>;

    /// Look up the validity mask stored under exactly `signature`.
    ///
    /// Returns one flag per agent record, or `None` if no mask with that
    /// signature exists. Implementations must not fall back to a
    /// "closest" signature.
    fn mask(&self, signature: &MaskSignature) -> Option<Arc<[bool]>>;

    /// Signatures of all masks held by the store, for diagnostics.
    fn mask_signatures(&self) -> Vec<MaskSignature>;
}

impl<S: RecordStore + ?Sized> RecordStore for Arc<S> {
    fn location(&self) -> &str {
        (**self).location()
    }

    fn scene_count(&self) -> usize {
        (**self).scene_count()
    }

    fn frame_count(&self) -> usize {
        (**self).frame_count()
    }

    fn agent_count(&self) -> usize {
        (**self).agent_count()
    }

    fn scene(&self, index: usize) -> Option<SceneRecord> {
        (**self).scene(index)
    }

    fn frame(&self, index: usize) -> Option<FrameRecord> {
        (**self).frame(index)
    }

    fn agent(&self, index: usize) -> Option<AgentRecord> {
        (**self).agent(index)
    }

    fn mask(&self, signature: &MaskSignature) -> Option<Arc<[bool]>> {
        (**self).mask(signature)
    }

    fn mask_signatures(&self) -> Vec<MaskSignature> {
        (**self).mask_signatures()
    }
}

/// Turns a resolved frame coordinate into a model input.
///
/// Implemented by the feature-extraction layer (rasterizers and the
/// like). Datasets resolve an index to `(scene, state, track)` and hand
/// the store plus that coordinate to the sampler. The store passed in
/// is the dataset's own view, so `scene_index` is local to it.
pub trait FrameSampler {
    /// What the sampler produces for one coordinate.
    type Output;

    /// Produce the model input for one frame.
    ///
    /// `track_id` is `Some` when sampling is centred on an agent and
    /// `None` when sampling a whole frame.
    fn sample(
        &self,
        store: &dyn RecordStore,
        scene_index: usize,
        frame_state_index: usize,
        track_id: Option<TrackId>,
    ) -> Result<Self::Output, DatasetError>;
}
