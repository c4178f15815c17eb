use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use geodesic_snap::{batch, logging, Point, Result, SnapConfig, Snapper};
use log::LevelFilter;
use serde_json::json;

#[derive(Debug, Parser)]
#[command(name = "geodesic-snap")]
#[command(version)]
#[command(about = "Right-angle snapping for lines drawn on the ellipsoid.", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,
    /// Log debug output
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Bearing of the perpendicular through the last point
    Azimuth {
        #[command(flatten)]
        points: SegmentArgs,
    },
    /// Cursor snapped onto the perpendicular through the last point
    Destination {
        #[command(flatten)]
        points: SegmentArgs,
    },
    /// Right-angle bend from a single anchor
    Fallback {
        #[arg(long, required = true, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
        last: Vec<f64>,
        #[arg(long, required = true, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
        cursor: Vec<f64>,
    },
    /// Snap every row of a CSV file
    Batch {
        input: PathBuf,
        /// Output file, stdout when omitted
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

/// Host-CRS coordinates of the last two anchors and the cursor
#[derive(Debug, clap::Args)]
struct SegmentArgs {
    #[arg(long, required = true, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
    last: Vec<f64>,
    #[arg(long, required = true, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
    penultimate: Vec<f64>,
    #[arg(long, required = true, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
    cursor: Vec<f64>,
}

fn point(values: &[f64]) -> Point {
    Point::new(values[0], values[1])
}

fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => SnapConfig::load(path)?,
        None => SnapConfig::default(),
    };

    match args.command {
        Command::Azimuth { points } => {
            let snapper = Snapper::from_config(&config)?;
            let azimuth = snapper.perpendicular_azimuth(
                point(&points.last),
                point(&points.penultimate),
                point(&points.cursor),
            )?;
            println!("{}", json!({ "azimuth": azimuth }));
        }
        Command::Destination { points } => {
            let snapper = Snapper::from_config(&config)?;
            let destination = snapper.perpendicular_destination(
                point(&points.last),
                point(&points.penultimate),
                point(&points.cursor),
            )?;
            println!("{}", json!(destination));
        }
        Command::Fallback { last, cursor } => {
            let snapper = Snapper::from_config(&config)?;
            let path = snapper.fallback_path(point(&last), point(&cursor));
            println!("{}", json!({ "path": path }));
        }
        Command::Batch { input, output } => {
            let report = batch::run_batch(&config, BufReader::new(File::open(input)?));
            match output {
                Some(path) => report.write_csv(BufWriter::new(File::create(path)?))?,
                None => report.write_csv(io::stdout().lock())?,
            }
        }
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    logging::init(if args.verbose { LevelFilter::Debug } else { LevelFilter::Info });

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
