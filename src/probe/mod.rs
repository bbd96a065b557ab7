//! Audio File Probing
//!
//! This module provides the file-level entry point for waveform extraction:
//! it reads a whole audio file into memory and runs the analysis pipeline
//! over the buffer.
//!
//! # Usage
//!
//! ```rust,no_run
//! use wavegen_lib::probe::WaveformProbe;
//!
//! let probe = WaveformProbe::new("audio.mp3")?;
//! let result = probe.analyze(200)?;
//!
//! println!("{}s, {} peaks", result.duration, result.peaks.len());
//! # Ok::<(), wavegen_lib::error::Error>(())
//! ```

pub mod format_detector;

use crate::error::Result;
use crate::pipeline::process_audio;
use crate::waveform::WaveformResult;
use std::fs;
use std::path::Path;

pub use format_detector::{FormatDetector, FormatKind};

/// Waveform probe for an audio file on disk
pub struct WaveformProbe {
    /// Path to the audio file
    file_path: String,
    /// File size in bytes
    file_size: u64,
}

impl WaveformProbe {
    /// Create a new probe for a file
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file_path = path.as_ref().to_string_lossy().to_string();
        let metadata = fs::metadata(&path)?;

        Ok(Self {
            file_path,
            file_size: metadata.len(),
        })
    }

    /// File size in bytes
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Sniff the file's format from its leading bytes
    pub fn format(&self) -> Result<FormatKind> {
        let buffer = fs::read(&self.file_path)?;
        Ok(FormatDetector::sniff(&buffer))
    }

    /// Read the file and extract duration and waveform peaks.
    ///
    /// Only IO can fail here; the analysis itself is total and always
    /// produces a populated result.
    pub fn analyze(&self, peaks_count: usize) -> Result<WaveformResult> {
        let buffer = fs::read(&self.file_path)?;
        Ok(process_audio(&buffer, peaks_count))
    }
}
