//! Common test utilities for wavegen integration tests
//!
//! Builders for synthetic WAV and MP3 buffers so test inputs are
//! constructed byte by byte rather than loaded from fixtures.

#![allow(dead_code)]

use std::f32::consts::PI;

/// Build a complete 16-bit PCM WAV buffer from raw samples
pub fn build_wav_16bit(sample_rate: u32, channels: u16, samples: &[i16]) -> Vec<u8> {
    let data_size = (samples.len() * 2) as u32;
    let block_align = channels * 2;
    let byte_rate = sample_rate * u32::from(block_align);

    let mut buf = Vec::with_capacity(44 + data_size as usize);

    // RIFF header
    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&(36 + data_size).to_le_bytes());
    buf.extend_from_slice(b"WAVE");

    // fmt chunk
    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&16u32.to_le_bytes());
    buf.extend_from_slice(&1u16.to_le_bytes()); // PCM
    buf.extend_from_slice(&channels.to_le_bytes());
    buf.extend_from_slice(&sample_rate.to_le_bytes());
    buf.extend_from_slice(&byte_rate.to_le_bytes());
    buf.extend_from_slice(&block_align.to_le_bytes());
    buf.extend_from_slice(&16u16.to_le_bytes());

    // data chunk
    buf.extend_from_slice(b"data");
    buf.extend_from_slice(&data_size.to_le_bytes());
    for s in samples {
        buf.extend_from_slice(&s.to_le_bytes());
    }

    buf
}

/// Generate mono sine samples at the given frequency and amplitude
pub fn sine_samples(sample_rate: u32, seconds: f32, frequency: f32, amplitude: f32) -> Vec<i16> {
    let num_samples = (sample_rate as f32 * seconds) as usize;
    (0..num_samples)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            (amplitude * (2.0 * PI * frequency * t).sin() * 32767.0) as i16
        })
        .collect()
}

/// Build a WAV with an extra non-data chunk spliced before the data chunk
pub fn build_wav_with_list_chunk(
    sample_rate: u32,
    samples: &[i16],
    list_payload: &[u8],
) -> Vec<u8> {
    let mut buf = build_wav_16bit(sample_rate, 1, samples);

    let mut chunk = Vec::new();
    chunk.extend_from_slice(b"LIST");
    chunk.extend_from_slice(&(list_payload.len() as u32).to_le_bytes());
    chunk.extend_from_slice(list_payload);
    if list_payload.len() % 2 == 1 {
        chunk.push(0); // RIFF pad byte
    }

    let tail = buf.split_off(36);
    buf.extend_from_slice(&chunk);
    buf.extend_from_slice(&tail);
    buf
}

/// Build an MP3-shaped buffer: ID3v2 tag of `tag_size` bytes, then a frame
/// header carrying `bitrate_index`, then `payload_len` pseudo-compressed
/// bytes
pub fn build_mp3_with_id3(tag_size: usize, bitrate_index: u8, payload_len: usize) -> Vec<u8> {
    assert!(tag_size < 1 << 28, "synchsafe sizes carry 28 bits");

    let mut buf = Vec::with_capacity(10 + tag_size + 4 + payload_len);
    buf.extend_from_slice(b"ID3\x03\x00\x00");
    buf.push(((tag_size >> 21) & 0x7F) as u8);
    buf.push(((tag_size >> 14) & 0x7F) as u8);
    buf.push(((tag_size >> 7) & 0x7F) as u8);
    buf.push((tag_size & 0x7F) as u8);
    buf.extend_from_slice(&vec![0u8; tag_size]);

    // Frame sync + MPEG-1 Layer III, bitrate index in the top nibble
    buf.extend_from_slice(&[0xFF, 0xFB, bitrate_index << 4, 0x00]);
    buf.extend(pseudo_compressed_bytes(payload_len));

    buf
}

/// Deterministic non-zero byte soup standing in for compressed audio data
pub fn pseudo_compressed_bytes(len: usize) -> Vec<u8> {
    let mut state: u32 = 0x1234_5678;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            ((state >> 24) as u8) | 1
        })
        .collect()
}
