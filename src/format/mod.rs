//! Container format analyzers
//!
//! Lightweight header-level analysis for the formats the pipeline
//! understands. These analyzers never decode audio: they walk container
//! structure just far enough to locate the raw data extent and estimate a
//! duration.

pub mod mp3;
pub mod wav;

pub use mp3::{Mp3Analyzer, Mp3Metadata};
pub use wav::{WavAnalyzer, WavMetadata};
