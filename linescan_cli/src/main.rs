//! Line-scan registration and binarization from the command line.
//!
//! # Usage
//!
//! ```bash
//! linescan register scan.pgm registered.pgm --scan-length 8
//! linescan binarize fingerprint.pgm binary.pgm
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use linescan::{Config, LineRegistration, Placement, SpectrumSchedule, DEFAULT_SCAN_LENGTH};

#[derive(Parser)]
#[command(name = "linescan")]
#[command(version, about = "Line-scan strip registration", long_about = None)]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: String,

    /// Also write daily-rolling log files into this directory
    #[arg(long, value_name = "DIR", global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a stack of scanlines and stitch it into one image
    Register {
        /// Input graymap holding the stacked scanlines
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output graymap for the stitched composite
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Rows per scanline
        #[arg(short, long, value_name = "ROWS", default_value_t = DEFAULT_SCAN_LENGTH)]
        scan_length: usize,

        /// Transform all scanlines concurrently
        #[arg(long)]
        parallel: bool,

        /// How consecutive scanlines are placed on the canvas
        #[arg(long, value_enum, default_value_t = PlacementArg::Overlay)]
        placement: PlacementArg,
    },

    /// Binarize a graymap with Otsu's threshold
    Binarize {
        /// Input graymap
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output graymap
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PlacementArg {
    /// Every scanline is offset only by the measured drift
    Overlay,
    /// Every scanline also advances by one scan length downwards
    Stacked,
}

impl From<PlacementArg> for Placement {
    fn from(arg: PlacementArg) -> Self {
        match arg {
            PlacementArg::Overlay => Placement::Overlay,
            PlacementArg::Stacked => Placement::Stacked,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    common::log_setup::setup_logging("linescan", &cli.log_level, cli.log_dir.as_deref());

    match cli.command {
        Commands::Register {
            input,
            output,
            scan_length,
            parallel,
            placement,
        } => {
            let config = Config {
                scan_length,
                spectra: if parallel {
                    SpectrumSchedule::Parallel
                } else {
                    SpectrumSchedule::Sequential
                },
                placement: placement.into(),
            };
            cmd_register(&input, &output, config)
        }
        Commands::Binarize { input, output } => cmd_binarize(&input, &output),
    }
}

fn cmd_register(input: &Path, output: &Path, config: Config) -> Result<()> {
    let stack = linescan::raster::load(input)
        .with_context(|| format!("Failed to load scan stack {}", input.display()))?;
    tracing::info!(
        rows = stack.rows(),
        cols = stack.cols(),
        scan_length = config.scan_length,
        "loaded scan stack"
    );

    let result = LineRegistration::from_config(config)
        .run(&stack)
        .with_context(|| format!("Failed to register {}", input.display()))?;

    for (i, shift) in result.shifts.iter().enumerate() {
        tracing::info!("Scanline {} -> {}: {}", i, i + 1, shift);
    }

    linescan::raster::store(output, &result.canvas)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    tracing::info!(
        "Wrote {}x{} composite to {} in {:.1} ms",
        result.canvas.rows(),
        result.canvas.cols(),
        output.display(),
        result.elapsed_ms
    );

    Ok(())
}

fn cmd_binarize(input: &Path, output: &Path) -> Result<()> {
    let mut image = linescan::raster::load(input)
        .with_context(|| format!("Failed to load {}", input.display()))?;

    linescan::binarize_in_place(&mut image);

    linescan::raster::store(output, &image)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    tracing::info!("Wrote binarized image to {}", output.display());

    Ok(())
}
