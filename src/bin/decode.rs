//! # Decode Binary Entry Point
//!
//! Recovers a message hidden by `encode`.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin decode -- <input_image> <bit_plane> <output_text>
//! ```
//!
//! `bit_plane` must match the one given to `encode`. When no end of message turns up in
//! the three planes, whatever was read is decoded and written anyway, with a warning.

use anyhow::Context;
use clap::Parser;
use log::{info, LevelFilter};
use std::path::PathBuf;

use bitplane_stego::common::config::StegoConfig;
use bitplane_stego::common::logging::init_logger;
use bitplane_stego::processing::steganography::decode_file;
use bitplane_stego::BitPlane;

/// Command-line arguments for the decoder
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Image carrying a message
    input_image: PathBuf,

    /// First bit plane the message was written to: 0, 1 or 2
    bit_plane: BitPlane,

    /// Where to write the recovered text
    output_text: PathBuf,

    /// Path to a configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to write a JSON report of plane usage
    #[arg(long)]
    report: Option<PathBuf>,

    /// Log every plane operation
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = StegoConfig::from_optional_file(args.config.as_ref())
        .context("failed to load configuration")?;

    init_logger(if args.verbose {
        LevelFilter::Debug
    } else {
        config.logging.level_filter()
    });

    let output_text = config.output.resolve(&args.output_text);
    let report = decode_file(&args.input_image, args.bit_plane, &output_text)
        .with_context(|| format!("failed to decode {}", args.input_image.display()))?;

    info!("{}", report);

    if let Some(report_path) = args.report.or(config.output.report) {
        report
            .export_to_json(&report_path)
            .with_context(|| format!("failed to write report {}", report_path.display()))?;
        println!("Report exported to: {}", report_path.display());
    }

    Ok(())
}
