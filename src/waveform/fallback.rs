//! Size-based duration estimation
//!
//! Last line of defense when no container analysis produced a usable
//! duration: assume a typical compressed bitrate for the file's size class
//! and derive duration from that. Total over every input, always positive.

const MIB: usize = 1024 * 1024;

/// Assumed bitrates by file size class, in kbps
const SMALL_FILE_KBPS: f64 = 96.0;
const MEDIUM_FILE_KBPS: f64 = 128.0;
const LARGE_FILE_KBPS: f64 = 192.0;

/// Minimum duration returned for degenerate (empty) input, in seconds
const MIN_DURATION_SECS: f64 = 1.0;

/// Estimate a plausible duration from nothing but the buffer size.
///
/// Small files tend toward low-bitrate speech, large ones toward
/// higher-bitrate music; the tiers mirror that. An empty buffer still gets
/// a positive one-second floor so the result is usable downstream.
pub fn estimate_duration_from_size(buffer_len: usize) -> f64 {
    let assumed_kbps = if buffer_len < MIB {
        SMALL_FILE_KBPS
    } else if buffer_len < 5 * MIB {
        MEDIUM_FILE_KBPS
    } else {
        LARGE_FILE_KBPS
    };

    let duration = buffer_len as f64 * 8.0 / (assumed_kbps * 1000.0);
    if duration > 0.0 {
        duration
    } else {
        MIN_DURATION_SECS
    }
}
