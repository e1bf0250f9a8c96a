//! Mask signatures: the typed key under which validity masks are stored.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Identifies one precomputed agent validity mask.
///
/// A mask is computed offline for a specific history length, future
/// length and detection-confidence threshold. Lookup is exact: two
/// signatures are equal only if all three components are identical,
/// including the bit pattern of the threshold.
///
/// The [`Display`](fmt::Display) form is the persisted group name, the
/// three values joined with underscores (e.g. `10_50_0.5`).
#[derive(Clone, Copy, Debug)]
pub struct MaskSignature {
    history_num_frames: u32,
    future_num_frames: u32,
    filter_agents_threshold: f64,
}

impl MaskSignature {
    /// Build a signature from its three components.
    ///
    /// A negative-zero threshold is normalised to positive zero so the
    /// two spellings of zero address the same mask.
    pub fn new(
        history_num_frames: u32,
        future_num_frames: u32,
        filter_agents_threshold: f64,
    ) -> Self {
        Self {
            history_num_frames,
            future_num_frames,
            filter_agents_threshold: filter_agents_threshold + 0.0,
        }
    }

    /// Number of history frames the mask was computed for.
    pub fn history_num_frames(&self) -> u32 {
        self.history_num_frames
    }

    /// Number of future frames the mask was computed for.
    pub fn future_num_frames(&self) -> u32 {
        self.future_num_frames
    }

    /// Minimum detection confidence an agent needed to be kept.
    pub fn filter_agents_threshold(&self) -> f64 {
        self.filter_agents_threshold
    }

    /// Persisted group name, e.g. `10_50_0.5`.
    pub fn group_name(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for MaskSignature {
    fn eq(&self, other: &Self) -> bool {
        self.history_num_frames == other.history_num_frames
            && self.future_num_frames == other.future_num_frames
            && self.filter_agents_threshold.to_bits() == other.filter_agents_threshold.to_bits()
    }
}

impl Eq for MaskSignature {}

impl Hash for MaskSignature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.history_num_frames.hash(state);
        self.future_num_frames.hash(state);
        self.filter_agents_threshold.to_bits().hash(state);
    }
}

impl fmt::Display for MaskSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_", self.history_num_frames, self.future_num_frames)?;
        write_threshold(f, self.filter_agents_threshold)
    }
}

/// Write a threshold the way the mask groups were named on disk.
///
/// `{:?}` already gives the shortest round-tripping digits, keeps the
/// trailing `.0` on integral values and switches to scientific notation
/// below `1e-4` and from `1e16`. The stored names spell the exponent
/// with an explicit sign and at least two digits (`1e-05`, `1e+16`).
fn write_threshold(f: &mut fmt::Formatter<'_>, threshold: f64) -> fmt::Result {
    let repr = format!("{threshold:?}");
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            write!(f, "{mantissa}e{sign}{digits:0>2}")
        }
        None => f.write_str(&repr),
    }
}

/// A group name that is not of the form `<history>_<future>_<threshold>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseSignatureError {
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for ParseSignatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid mask signature '{}': expected <history>_<future>_<threshold>",
            self.input
        )
    }
}

impl std::error::Error for ParseSignatureError {}

impl FromStr for MaskSignature {
    type Err = ParseSignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSignatureError {
            input: s.to_string(),
        };
        let mut parts = s.splitn(3, '_');
        let history = parts.next().ok_or_else(err)?.parse().map_err(|_| err())?;
        let future = parts.next().ok_or_else(err)?.parse().map_err(|_| err())?;
        let threshold: f64 = parts.next().ok_or_else(err)?.parse().map_err(|_| err())?;
        Ok(Self::new(history, future, threshold))
    }
}
