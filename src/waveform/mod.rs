//! Waveform data structures
//!
//! This module defines the peak pair and result types produced by the
//! analysis pipeline, plus the JSON response adapter consumed by upstream
//! services.

pub mod fallback;
pub mod reducer;

pub use fallback::estimate_duration_from_size;
pub use reducer::PeakReducer;

use crate::error::{Error, Result};
use serde::ser::SerializeTuple;
use serde::{Serialize, Serializer};

/// A (min, max) amplitude pair covering one time segment of audio.
///
/// Both values are in [-1.0, 1.0] with `min <= 0 <= max`; every reduction
/// path produces pairs symmetric around zero, a deliberate simplification
/// for visualization rather than a faithful asymmetric waveform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakPair {
    pub min: f32,
    pub max: f32,
}

impl PeakPair {
    /// Zero pair used to pad exhausted input
    pub const ZERO: PeakPair = PeakPair { min: 0.0, max: 0.0 };

    /// Build a pair symmetric around zero from a non-negative amplitude
    pub fn symmetric(amplitude: f32) -> Self {
        PeakPair {
            min: -amplitude,
            max: amplitude,
        }
    }

    /// True when both values are exactly zero.
    ///
    /// This is the degeneracy signal the pipeline's validation gate checks;
    /// negative zero compares equal and counts as zero here.
    pub fn is_zero(&self) -> bool {
        self.min == 0.0 && self.max == 0.0
    }
}

impl Serialize for PeakPair {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        // Wire format is a bare [min, max] array
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.min)?;
        tuple.serialize_element(&self.max)?;
        tuple.end()
    }
}

/// Result of one waveform extraction
#[derive(Debug, Clone, Serialize)]
pub struct WaveformResult {
    /// Duration in seconds, always finite and positive
    pub duration: f64,
    /// Exactly the requested number of peak pairs
    pub peaks: Vec<PeakPair>,
}

/// JSON response shape consumed by upstream callers.
///
/// The peaks are intentionally duplicated under both `peaks` and
/// `waveform_peaks`: historical callers read one or the other and both keys
/// must stay populated.
#[derive(Debug, Clone, Serialize)]
pub struct WaveformResponse {
    /// Duration rounded to 2 decimal places
    pub duration: f64,
    pub peaks: Vec<PeakPair>,
    pub waveform_peaks: Vec<PeakPair>,
}

impl From<WaveformResult> for WaveformResponse {
    fn from(result: WaveformResult) -> Self {
        let duration = (result.duration * 100.0).round() / 100.0;
        WaveformResponse {
            duration,
            waveform_peaks: result.peaks.clone(),
            peaks: result.peaks,
        }
    }
}

impl WaveformResponse {
    /// Convert to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::analysis(format!("JSON serialization failed: {}", e)))
    }

    /// Convert to compact JSON
    pub fn to_json_compact(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| Error::analysis(format!("JSON serialization failed: {}", e)))
    }
}
