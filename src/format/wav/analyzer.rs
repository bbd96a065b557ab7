//! WAV header analysis
//!
//! Walks the RIFF chunk structure of an in-memory WAV buffer to find the
//! `fmt ` fields and the `data` extent, then reconciles up to three
//! independent duration calculations. Header values are never trusted on
//! their own: chunk sizes and the data extent are clamped against the real
//! buffer length, and implausible fmt fields demote the analysis to
//! byte-rate-only duration.

use super::{ChunkHeader, CANONICAL_HEADER_LEN, CHUNK_WALK_START, DATA_CHUNK, RIFF_MAGIC, WAVE_MAGIC};
use crate::error::{Error, Result};
use tracing::{debug, warn};

/// Sanity ceiling for any computed duration (24 hours)
const MAX_DURATION_SECS: f64 = 86_400.0;

/// Metadata extracted from a WAV header
#[derive(Debug, Clone)]
pub struct WavMetadata {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Bits per sample (8, 16, 24 or 32)
    pub bits_per_sample: u16,
    /// Number of channels
    pub channels: u16,
    /// Average bytes per second from the fmt chunk
    pub byte_rate: u32,
    /// Block alignment (bytes per sample frame)
    pub block_align: u16,
    /// Byte offset of the PCM data within the buffer
    pub data_offset: usize,
    /// Length of the PCM data in bytes, clamped to the buffer
    pub data_len: usize,
    /// Duration in seconds
    pub duration: f64,
}

/// Header-level WAV analyzer
pub struct WavAnalyzer;

impl WavAnalyzer {
    /// Analyze a WAV buffer.
    ///
    /// Returns an error only when no usable duration can be derived at all;
    /// the pipeline treats that as a signal to take the fallback path rather
    /// than a hard failure.
    pub fn analyze(buffer: &[u8]) -> Result<WavMetadata> {
        if buffer.len() < CANONICAL_HEADER_LEN {
            return Err(Error::BufferTooSmall {
                need: CANONICAL_HEADER_LEN,
                have: buffer.len(),
            });
        }

        if &buffer[0..4] != RIFF_MAGIC || &buffer[8..12] != WAVE_MAGIC {
            return Err(Error::format("not a valid RIFF/WAVE buffer"));
        }

        // Conventional fixed fmt chunk offsets. Real-world files written by
        // the common encoders all use this layout; anything else fails the
        // plausibility check below and demotes to byte-rate-only duration.
        let channels = u16::from_le_bytes([buffer[22], buffer[23]]);
        let sample_rate = u32::from_le_bytes([buffer[24], buffer[25], buffer[26], buffer[27]]);
        let byte_rate = u32::from_le_bytes([buffer[28], buffer[29], buffer[30], buffer[31]]);
        let block_align = u16::from_le_bytes([buffer[32], buffer[33]]);
        let bits_per_sample = u16::from_le_bytes([buffer[34], buffer[35]]);

        let fmt_plausible = sample_rate > 0
            && sample_rate <= 192_000
            && (1..=32).contains(&channels)
            && matches!(bits_per_sample, 8 | 16 | 24 | 32);

        if !fmt_plausible {
            warn!(
                sample_rate,
                channels, bits_per_sample, "implausible fmt fields, using byte-rate duration only"
            );
        }

        let (data_offset, data_len) = match Self::find_data_chunk(buffer) {
            Some((offset, len)) => (offset, len),
            None => {
                // No data chunk located: assume the canonical 44-byte header
                // and treat the rest of the file as sample data.
                debug!("no data chunk found, assuming canonical header layout");
                (
                    CANONICAL_HEADER_LEN,
                    buffer.len().saturating_sub(CANONICAL_HEADER_LEN),
                )
            }
        };

        // Never trust the declared size past the end of the real buffer
        let data_offset = data_offset.min(buffer.len());
        let data_len = data_len.min(buffer.len() - data_offset);

        let duration = Self::select_duration(
            data_len,
            byte_rate,
            sample_rate,
            bits_per_sample,
            channels,
            block_align,
            fmt_plausible,
        )
        .ok_or_else(|| Error::analysis("no valid duration candidate"))?;

        debug!(
            sample_rate,
            bits_per_sample, channels, data_offset, data_len, duration, "WAV analysis complete"
        );

        Ok(WavMetadata {
            sample_rate,
            bits_per_sample,
            channels,
            byte_rate,
            block_align,
            data_offset,
            data_len,
            duration,
        })
    }

    /// Walk sub-chunks from offset 36 looking for the data chunk.
    ///
    /// Returns the data offset and its declared (unclamped) size. The walk
    /// aborts on a zero-sized or buffer-overrunning chunk so a malformed
    /// file can neither loop forever nor push reads out of bounds.
    fn find_data_chunk(buffer: &[u8]) -> Option<(usize, usize)> {
        let mut pos = CHUNK_WALK_START;

        while pos + 8 <= buffer.len() {
            let header = ChunkHeader::from_bytes(&buffer[pos..])?;
            let size = header.size as usize;

            // A data chunk declaring zero bytes is as useless as no data
            // chunk at all; let the canonical-layout fallback handle it
            if &header.id == DATA_CHUNK && size > 0 {
                return Some((pos + 8, size));
            }

            if size == 0 || size > buffer.len() {
                warn!(chunk_size = size, offset = pos, "aborting chunk walk on bad size");
                return None;
            }

            debug!(
                chunk = %String::from_utf8_lossy(&header.id),
                size,
                "skipping chunk"
            );

            // RIFF chunks are word-aligned: odd sizes carry one pad byte
            pos += 8 + size + (size % 2);
        }

        None
    }

    /// Compute up to three duration candidates and pick the first valid one,
    /// in priority order: byte rate, then sample math, then block align.
    fn select_duration(
        data_len: usize,
        byte_rate: u32,
        sample_rate: u32,
        bits_per_sample: u16,
        channels: u16,
        block_align: u16,
        fmt_plausible: bool,
    ) -> Option<f64> {
        let mut candidates: Vec<f64> = Vec::with_capacity(3);

        if byte_rate > 0 {
            candidates.push(data_len as f64 / byte_rate as f64);
        }

        if fmt_plausible {
            let bytes_per_sample = f64::from(bits_per_sample) / 8.0;
            let total_samples = data_len as f64 / bytes_per_sample / f64::from(channels);
            candidates.push(total_samples / f64::from(sample_rate));

            if block_align > 0 {
                let total_blocks = data_len as f64 / f64::from(block_align);
                candidates.push(total_blocks / f64::from(sample_rate));
            }
        }

        candidates
            .into_iter()
            .find(|d| d.is_finite() && *d > 0.0 && *d <= MAX_DURATION_SECS)
    }
}
