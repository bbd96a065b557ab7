//! WAV audio format support
//!
//! This module implements RIFF/WAV header parsing for waveform extraction.
//! WAV is a simple uncompressed audio format widely used for audio
//! interchange.

pub mod analyzer;

pub use analyzer::{WavAnalyzer, WavMetadata};

/// WAV format magic numbers
pub const RIFF_MAGIC: &[u8; 4] = b"RIFF";
pub const WAVE_MAGIC: &[u8; 4] = b"WAVE";
pub const DATA_CHUNK: &[u8; 4] = b"data";

/// Offset of the first sub-chunk after the canonical RIFF + fmt header
pub const CHUNK_WALK_START: usize = 36;

/// Size of the canonical 44-byte header (RIFF + fmt + data chunk headers)
pub const CANONICAL_HEADER_LEN: usize = 44;

/// Chunk header (4 byte ID + 4 byte little-endian size)
#[derive(Debug, Clone, Copy)]
pub struct ChunkHeader {
    pub id: [u8; 4],
    pub size: u32,
}

impl ChunkHeader {
    /// Read a chunk header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 8 {
            return None;
        }

        let mut id = [0u8; 4];
        id.copy_from_slice(&bytes[0..4]);

        let size = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);

        Some(ChunkHeader { id, size })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_header_from_bytes() {
        let bytes = b"data\x10\x00\x00\x00";
        let header = ChunkHeader::from_bytes(bytes).unwrap();
        assert_eq!(&header.id, DATA_CHUNK);
        assert_eq!(header.size, 16);
    }

    #[test]
    fn test_chunk_header_short_input() {
        assert!(ChunkHeader::from_bytes(b"dat").is_none());
    }
}
