//! wavegen - audio waveform peak extraction in pure Rust
//!
//! wavegen turns an arbitrary, untrusted audio buffer into a duration
//! estimate and a fixed-size sequence of min/max amplitude pairs suitable
//! for rendering a waveform, without invoking a full decoding toolchain.
//!
//! # Architecture
//!
//! - `probe`: format sniffing and the file-level probe entry point
//! - `format`: header-level WAV and MP3 analyzers
//! - `waveform`: peak reduction algorithms, fallback estimation, and the
//!   result/response types
//! - `pipeline`: the orchestrator tying sniff → analyze → reduce →
//!   validate → fallback into one total function
//!
//! The core guarantee is totality: [`process_audio`] returns a plausible
//! result for any byte sequence whatsoever, preferring a synthetic but
//! usable waveform over a hard failure.

pub mod error;
pub mod format;
pub mod pipeline;
pub mod probe;
pub mod waveform;

pub use error::{Error, Result};
pub use pipeline::{process_audio, DEFAULT_PEAKS_COUNT};
pub use probe::{FormatDetector, FormatKind, WaveformProbe};
pub use waveform::{PeakPair, WaveformResponse, WaveformResult};

/// wavegen version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const VERSION_MAJOR: u32 = 0;
pub const VERSION_MINOR: u32 = 1;
pub const VERSION_PATCH: u32 = 0;

/// Configuration for the wavegen library
#[derive(Debug, Clone)]
pub struct Config {
    /// Enable verbose logging
    pub verbose: bool,
    /// Enable debug output
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose: false,
            debug: false,
        }
    }
}

/// Initialize the wavegen library with the given configuration
pub fn init(config: Config) -> Result<()> {
    if config.verbose || config.debug {
        let level = if config.debug { "debug" } else { "info" };
        tracing_subscriber::fmt()
            .with_env_filter(level)
            .try_init()
            .map_err(|e| Error::Init(format!("Failed to initialize logging: {}", e)))?;
    }

    Ok(())
}
