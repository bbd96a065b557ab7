//! MP3 audio format support
//!
//! Heuristic, header-only MP3 analysis. There is no decoding here: the
//! analyzer skips an optional ID3v2 tag, finds the first plausible frame
//! sync, and estimates duration from compressed size over bitrate.

pub mod analyzer;

pub use analyzer::{Mp3Analyzer, Mp3Metadata};

/// MPEG-1 Layer III bitrate table in kbps, indexed by the 4-bit bitrate
/// field of the frame header. Indices 0 ("free") and 15 ("bad") are invalid.
pub const BITRATE_TABLE_KBPS: [u16; 16] = [
    0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 0,
];

/// Assumed bitrate when no valid frame header is found
pub const DEFAULT_BITRATE_KBPS: u16 = 128;

/// How far past the tag end the frame sync scan is allowed to look
pub const FRAME_SYNC_SCAN_WINDOW: usize = 2048;

/// Length of an ID3v2 tag header
pub const ID3V2_HEADER_LEN: usize = 10;

/// Check two bytes for the MPEG frame sync pattern (top 11 bits set)
pub fn is_frame_sync(b0: u8, b1: u8) -> bool {
    (u16::from_be_bytes([b0, b1]) & 0xFFE0) == 0xFFE0
}
