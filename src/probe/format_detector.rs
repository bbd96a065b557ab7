//! Audio Format Detection
//!
//! This module classifies audio buffers by examining file headers and magic
//! numbers. Detection only looks at the first bytes of the buffer and never
//! fails: anything unrecognized (including buffers too short to carry a
//! header) is classified as [`FormatKind::Unknown`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum buffer length required for a positive classification
pub const SNIFF_LEN: usize = 12;

/// Audio format classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormatKind {
    /// RIFF/WAVE container with raw PCM samples
    Wav,
    /// MPEG audio (ID3-tagged or bare frame stream)
    Mp3,
    /// Unrecognized or too short to classify
    Unknown,
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatKind::Wav => write!(f, "wav"),
            FormatKind::Mp3 => write!(f, "mp3"),
            FormatKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// Format detector for audio buffers
pub struct FormatDetector;

impl FormatDetector {
    /// Classify a buffer by its leading bytes.
    ///
    /// Reads at most the first 12 bytes. Buffers shorter than that are
    /// `Unknown` without error.
    pub fn sniff(buffer: &[u8]) -> FormatKind {
        if buffer.len() < SNIFF_LEN {
            return FormatKind::Unknown;
        }

        if Self::is_wav(buffer) {
            FormatKind::Wav
        } else if Self::is_mp3(buffer) {
            FormatKind::Mp3
        } else {
            FormatKind::Unknown
        }
    }

    /// Check if buffer is a WAV file
    fn is_wav(header: &[u8]) -> bool {
        if header.len() < 12 {
            return false;
        }
        // WAV: RIFF....WAVE
        &header[0..4] == b"RIFF" && &header[8..12] == b"WAVE"
    }

    /// Check if buffer is an MP3 file
    fn is_mp3(header: &[u8]) -> bool {
        if header.len() < 4 {
            return false;
        }
        // ID3v2 tag: "ID3" followed by a major version byte of 2, 3, or 4
        if &header[0..3] == b"ID3" && matches!(header[3], 2 | 3 | 4) {
            return true;
        }
        // Bare MPEG frame sync: top 11 bits of the first two bytes all set
        (u16::from_be_bytes([header[0], header[1]]) & 0xFFE0) == 0xFFE0
    }
}
