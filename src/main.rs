//! wavegen CLI - waveform extraction from the command line
//!
//! A small tool for inspecting audio files and extracting waveform peaks.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use wavegen_lib::{init, Config, Error, WaveformProbe, WaveformResponse, DEFAULT_PEAKS_COUNT};

#[derive(Parser)]
#[command(name = "wavegen")]
#[command(about = "Audio waveform peak extraction", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract duration and waveform peaks from an audio file
    Analyze {
        /// Input file path
        input: PathBuf,

        /// Number of peak pairs to generate
        #[arg(short, long, default_value_t = DEFAULT_PEAKS_COUNT)]
        peaks: usize,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Sniff the container format of a file
    Sniff {
        /// Input file path
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config {
        verbose: cli.verbose,
        debug: cli.debug,
    };
    init(config)?;

    match cli.command {
        Commands::Analyze {
            input,
            peaks,
            pretty,
        } => {
            if !(1..=1000).contains(&peaks) {
                return Err(Error::invalid_input(format!(
                    "peaks count must be in [1, 1000], got {}",
                    peaks
                ))
                .into());
            }

            let probe = WaveformProbe::new(&input)?;
            info!(path = %input.display(), size = probe.file_size(), "analyzing file");

            let result = probe.analyze(peaks)?;
            let response = WaveformResponse::from(result);

            let json = if pretty {
                response.to_json()?
            } else {
                response.to_json_compact()?
            };
            println!("{}", json);
        }

        Commands::Sniff { input } => {
            let probe = WaveformProbe::new(&input)?;
            let kind = probe.format()?;
            println!("{}: {}", input.display(), kind);
        }
    }

    Ok(())
}
