//! Heuristic MP3 analysis
//!
//! Duration here is `compressed bytes * 8 / bitrate`, with the bitrate read
//! from the first valid frame header after an optional ID3v2 tag. That is
//! accurate for CBR streams and a reasonable estimate for VBR; this analyzer
//! never hard-fails and falls back to 128 kbps when no frame is found.

use super::{
    is_frame_sync, BITRATE_TABLE_KBPS, DEFAULT_BITRATE_KBPS, FRAME_SYNC_SCAN_WINDOW,
    ID3V2_HEADER_LEN,
};
use tracing::debug;

/// Metadata estimated from an MP3 buffer
#[derive(Debug, Clone)]
pub struct Mp3Metadata {
    /// Bitrate in kbps from the first valid frame header, or the 128 kbps
    /// default when none was found
    pub bitrate_kbps: u16,
    /// Byte offset where compressed audio data starts
    pub data_offset: usize,
    /// Estimated duration in seconds
    pub duration: f64,
}

/// Heuristic MP3 analyzer
pub struct Mp3Analyzer;

impl Mp3Analyzer {
    /// Analyze an MP3 buffer. Always returns a best-effort estimate.
    pub fn analyze(buffer: &[u8]) -> Mp3Metadata {
        let scan_start = match Self::id3v2_tag_size(buffer) {
            Some(tag_size) => (ID3V2_HEADER_LEN + tag_size).min(buffer.len()),
            None => 0,
        };

        if let Some((offset, bitrate_kbps)) = Self::find_first_frame(buffer, scan_start) {
            let data_len = buffer.len() - offset;
            let duration = data_len as f64 * 8.0 / (f64::from(bitrate_kbps) * 1000.0);

            debug!(bitrate_kbps, offset, duration, "MP3 frame header found");

            return Mp3Metadata {
                bitrate_kbps,
                data_offset: offset,
                duration,
            };
        }

        // No valid frame in the scan window: assume the default bitrate
        // across the whole buffer.
        let duration =
            buffer.len() as f64 * 8.0 / (f64::from(DEFAULT_BITRATE_KBPS) * 1000.0);

        debug!(scan_start, duration, "no MP3 frame found, assuming 128 kbps");

        Mp3Metadata {
            bitrate_kbps: DEFAULT_BITRATE_KBPS,
            data_offset: scan_start,
            duration,
        }
    }

    /// Parse the synchsafe ID3v2 tag size if the buffer starts with a tag.
    ///
    /// Synchsafe sizes carry 7 bits per byte with the top bit always clear.
    fn id3v2_tag_size(buffer: &[u8]) -> Option<usize> {
        if buffer.len() < ID3V2_HEADER_LEN {
            return None;
        }
        if &buffer[0..3] != b"ID3" || !matches!(buffer[3], 2 | 3 | 4) {
            return None;
        }

        let size = (usize::from(buffer[6] & 0x7F) << 21)
            | (usize::from(buffer[7] & 0x7F) << 14)
            | (usize::from(buffer[8] & 0x7F) << 7)
            | usize::from(buffer[9] & 0x7F);

        Some(size)
    }

    /// Scan forward from `scan_start` (bounded by the scan window) for the
    /// first frame sync with a valid bitrate index.
    fn find_first_frame(buffer: &[u8], scan_start: usize) -> Option<(usize, u16)> {
        let scan_end = (scan_start + FRAME_SYNC_SCAN_WINDOW).min(buffer.len().saturating_sub(4));

        for i in scan_start..scan_end {
            if !is_frame_sync(buffer[i], buffer[i + 1]) {
                continue;
            }

            let header =
                u32::from_be_bytes([buffer[i], buffer[i + 1], buffer[i + 2], buffer[i + 3]]);
            let bitrate_index = ((header >> 12) & 0x0F) as usize;
            let bitrate_kbps = BITRATE_TABLE_KBPS[bitrate_index];

            if bitrate_kbps > 0 {
                return Some((i, bitrate_kbps));
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Frame header with the given bitrate index: sync + MPEG-1 Layer III
    fn frame_header(bitrate_index: u8) -> [u8; 4] {
        // 0xFFFB = sync + MPEG-1, Layer III, no CRC
        [0xFF, 0xFB, bitrate_index << 4, 0x00]
    }

    #[test]
    fn test_bare_stream_at_offset_zero() {
        let mut buf = frame_header(9).to_vec(); // 128 kbps
        buf.extend_from_slice(&[0xAA; 16_000 - 4]);

        let meta = Mp3Analyzer::analyze(&buf);
        assert_eq!(meta.bitrate_kbps, 128);
        assert_eq!(meta.data_offset, 0);
        // 16000 bytes at 128 kbps = 1 second
        assert!((meta.duration - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_id3_tag_skip() {
        let tag_size = 256usize;
        let mut buf = Vec::new();
        buf.extend_from_slice(b"ID3\x03\x00\x00");
        // Synchsafe encoding of 256: 0x00 0x00 0x02 0x00
        buf.extend_from_slice(&[0x00, 0x00, 0x02, 0x00]);
        buf.extend_from_slice(&vec![0u8; tag_size]);
        buf.extend_from_slice(&frame_header(14)); // 320 kbps
        buf.extend_from_slice(&[0xBB; 4000]);

        let meta = Mp3Analyzer::analyze(&buf);
        assert_eq!(meta.data_offset, 10 + tag_size);
        assert_eq!(meta.bitrate_kbps, 320);
    }

    #[test]
    fn test_invalid_bitrate_index_keeps_scanning() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&frame_header(15)); // "bad" index, invalid
        buf.extend_from_slice(&[0x00; 12]);
        buf.extend_from_slice(&frame_header(9));
        buf.extend_from_slice(&[0xAA; 1000]);

        let meta = Mp3Analyzer::analyze(&buf);
        assert_eq!(meta.bitrate_kbps, 128);
        assert_eq!(meta.data_offset, 16);
    }

    #[test]
    fn test_no_frame_defaults_to_128() {
        let buf = vec![0x11u8; 32_000];
        let meta = Mp3Analyzer::analyze(&buf);
        assert_eq!(meta.bitrate_kbps, DEFAULT_BITRATE_KBPS);
        assert_eq!(meta.data_offset, 0);
        // Whole buffer at 128 kbps = 2 seconds
        assert!((meta.duration - 2.0).abs() < 0.01);
    }

    #[test]
    fn test_tiny_buffer_does_not_panic() {
        let meta = Mp3Analyzer::analyze(&[0xFF, 0xFB]);
        assert_eq!(meta.bitrate_kbps, DEFAULT_BITRATE_KBPS);
        assert!(meta.duration >= 0.0);
    }

    #[test]
    fn test_declared_tag_larger_than_buffer() {
        let mut buf = b"ID3\x04\x00\x00\x7F\x7F\x7F\x7F".to_vec();
        buf.extend_from_slice(&[0u8; 32]);

        let meta = Mp3Analyzer::analyze(&buf);
        // Offset clamps to the buffer end rather than overflowing
        assert!(meta.data_offset <= buf.len());
    }
}
