//! Strongly-typed identifiers and resolved coordinates.

use std::fmt;

/// Stable identity of an agent across the frames of a scene.
///
/// Track ids are only unique within a scene; the same numeric id may be
/// reused by an unrelated agent in another scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId(pub u64);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TrackId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Position of a frame expressed in scene-local coordinates.
///
/// `frame_state_index` is the frame's offset from the first frame of
/// `scene_index`, not its position in the global frame array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameCoord {
    /// Scene containing the frame.
    pub scene_index: usize,
    /// Offset of the frame within its scene.
    pub frame_state_index: usize,
}

impl fmt::Display for FrameCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scene {} state {}", self.scene_index, self.frame_state_index)
    }
}

/// A filtered agent index resolved to its scene, frame and track.
///
/// This is the triple handed to the feature-extraction collaborator:
/// the frame to featurize and which agent within it to centre on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AgentCoord {
    /// Scene containing the agent record.
    pub scene_index: usize,
    /// Offset of the agent's frame within its scene.
    pub frame_state_index: usize,
    /// Track id of the agent record.
    pub track_id: TrackId,
}

impl AgentCoord {
    /// The frame part of this coordinate.
    pub fn frame(&self) -> FrameCoord {
        FrameCoord {
            scene_index: self.scene_index,
            frame_state_index: self.frame_state_index,
        }
    }
}

impl fmt::Display for AgentCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "scene {} state {} track {}",
            self.scene_index, self.frame_state_index, self.track_id
        )
    }
}
