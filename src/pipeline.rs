//! Analysis pipeline
//!
//! Sequences sniff, analyze, reduce, validate, and the fallback path into
//! one total function. [`process_audio`] never errors and never panics
//! outward: any byte sequence whatsoever produces a finite positive
//! duration and exactly the requested number of peak pairs. Malformed input
//! degrades through cheaper analysis methods and ultimately to a synthetic
//! waveform rather than surfacing a failure.

use crate::format::{Mp3Analyzer, WavAnalyzer};
use crate::probe::{FormatDetector, FormatKind};
use crate::waveform::{estimate_duration_from_size, PeakPair, PeakReducer, WaveformResult};
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

/// Default number of peak pairs per waveform
pub const DEFAULT_PEAKS_COUNT: usize = 200;

/// Extract duration and waveform peaks from an in-memory audio buffer.
///
/// This is the sole entry point external callers use. The caller-facing
/// contract is totality: the result always has a finite positive duration
/// and `peaks_count` pairs, even for an empty buffer or a text file passed
/// in by mistake. Unexpected internal panics are caught here and converted
/// to the fallback path.
pub fn process_audio(buffer: &[u8], peaks_count: usize) -> WaveformResult {
    let analysis = panic::catch_unwind(AssertUnwindSafe(|| analyze(buffer, peaks_count)));

    match analysis {
        Ok(result) => result,
        Err(_) => {
            warn!(
                buffer_len = buffer.len(),
                peaks_count, "analysis panicked, using fallback result"
            );
            WaveformResult {
                duration: estimate_duration_from_size(buffer.len()),
                peaks: PeakReducer::synthetic_envelope(peaks_count),
            }
        }
    }
}

/// Run one sniff → analyze → reduce pass and validate the outcome
fn analyze(buffer: &[u8], peaks_count: usize) -> WaveformResult {
    let kind = FormatDetector::sniff(buffer);
    debug!(%kind, buffer_len = buffer.len(), peaks_count, "sniffed input buffer");

    let (duration, peaks) = match kind {
        FormatKind::Wav => match WavAnalyzer::analyze(buffer) {
            Ok(meta) => {
                let peaks = PeakReducer::reduce_samples(buffer, &meta, peaks_count);
                (meta.duration, peaks)
            }
            Err(err) => {
                warn!(%err, "WAV analysis failed, falling back to byte heuristics");
                (
                    estimate_duration_from_size(buffer.len()),
                    PeakReducer::reduce_compressed(buffer, 0, peaks_count),
                )
            }
        },
        FormatKind::Mp3 => {
            let meta = Mp3Analyzer::analyze(buffer);
            let peaks = PeakReducer::reduce_compressed(buffer, meta.data_offset, peaks_count);
            (meta.duration, peaks)
        }
        FormatKind::Unknown => (
            estimate_duration_from_size(buffer.len()),
            PeakReducer::reduce_compressed(buffer, 0, peaks_count),
        ),
    };

    validate(buffer.len(), peaks_count, duration, peaks)
}

/// Single validation gate for the whole pipeline.
///
/// A non-finite or non-positive duration is re-estimated from the buffer
/// size; empty or all-zero peaks regenerate as a synthetic envelope. Known
/// limitation: a legitimately silent recording is indistinguishable from
/// failed analysis by this check and also regenerates (its duration is
/// still reported correctly), pending a product decision on telling the
/// two apart.
fn validate(
    buffer_len: usize,
    peaks_count: usize,
    duration: f64,
    peaks: Vec<PeakPair>,
) -> WaveformResult {
    let duration = if duration.is_finite() && duration > 0.0 {
        duration
    } else {
        warn!(duration, "invalid duration, re-estimating from size");
        estimate_duration_from_size(buffer_len)
    };

    let peaks = if peaks.is_empty() || peaks.iter().all(PeakPair::is_zero) {
        warn!(peaks_count, "degenerate peaks, regenerating synthetic envelope");
        PeakReducer::synthetic_envelope(peaks_count)
    } else {
        peaks
    };

    WaveformResult { duration, peaks }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer_is_total() {
        let result = process_audio(&[], 10);
        assert!(result.duration > 0.0);
        assert!(result.duration.is_finite());
        assert_eq!(result.peaks.len(), 10);
    }

    #[test]
    fn test_tiny_unknown_buffer() {
        let result = process_audio(&[0x00, 0x01, 0x02], 10);
        assert!(result.duration > 0.0);
        assert_eq!(result.peaks.len(), 10);
    }

    #[test]
    fn test_all_zero_buffer_regenerates_peaks() {
        // Zero bytes everywhere: the heuristic reducer emits only zero
        // pairs, which the validation gate must replace
        let result = process_audio(&vec![0u8; 4096], 32);
        assert_eq!(result.peaks.len(), 32);
        assert!(!result.peaks.iter().all(PeakPair::is_zero));
    }

    #[test]
    fn test_validate_replaces_bad_duration() {
        let result = validate(1000, 5, f64::NAN, vec![PeakPair::symmetric(0.5); 5]);
        assert!(result.duration > 0.0 && result.duration.is_finite());

        let result = validate(1000, 5, -3.0, vec![PeakPair::symmetric(0.5); 5]);
        assert!(result.duration > 0.0);
    }

    #[test]
    fn test_validate_keeps_good_result() {
        let peaks = vec![PeakPair::symmetric(0.4); 8];
        let result = validate(1000, 8, 12.5, peaks.clone());
        assert_eq!(result.duration, 12.5);
        assert_eq!(result.peaks, peaks);
    }

    #[test]
    fn test_validate_regenerates_empty_peaks() {
        let result = validate(1000, 6, 2.0, Vec::new());
        assert_eq!(result.peaks.len(), 6);
    }
}
