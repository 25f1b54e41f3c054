//! # Encode Binary Entry Point
//!
//! Hides a text file in the low bit planes of an image.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin encode -- <input_image> <input_text> <bit_plane> <output_image>
//! ```
//!
//! `bit_plane` is the plane filled first: `0` (least significant), `1` or `2`. A message
//! that does not fit spills into the remaining planes, least significant first. If all
//! three fill up the image is still written with as much of the message as fit.

use anyhow::Context;
use clap::Parser;
use log::{info, LevelFilter};
use std::path::PathBuf;

use bitplane_stego::common::config::StegoConfig;
use bitplane_stego::common::logging::init_logger;
use bitplane_stego::processing::steganography::encode_file;
use bitplane_stego::BitPlane;

/// Command-line arguments for the encoder
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cover image
    input_image: PathBuf,

    /// Text file to hide
    input_text: PathBuf,

    /// First bit plane to fill: 0, 1 or 2
    bit_plane: BitPlane,

    /// Where to write the image carrying the message
    output_image: PathBuf,

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

    let output_image = config.output.resolve(&args.output_image);
    let report = encode_file(
        &args.input_image,
        &args.input_text,
        args.bit_plane,
        &output_image,
    )
    .with_context(|| {
        format!(
            "failed to hide {} in {}",
            args.input_text.display(),
            args.input_image.display()
        )
    })?;

    info!("{}", report);

    if let Some(report_path) = args.report.or(config.output.report) {
        report
            .export_to_json(&report_path)
            .with_context(|| format!("failed to write report {}", report_path.display()))?;
        println!("Report exported to: {}", report_path.display());
    }

    Ok(())
}
