//! `cvutils` CLI - load, inspect and display images from the command line.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ndarray::Array2;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cvutils::{get_images_from_dir, rolling_average, to_uint8, LoadConfig, Mode};

/// Image-centric numeric helpers.
#[derive(Parser, Debug)]
#[command(name = "cvutils")]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the images directly inside a directory as grayscale.
    Load {
        /// Directory to scan.
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Keep at most this many images.
        #[arg(short = 'n', long, value_name = "INT")]
        max_count: Option<usize>,

        /// Shuffle the images before truncating.
        #[arg(short, long)]
        shuffle: bool,

        /// Random seed for reproducible shuffles.
        #[arg(long, value_name = "INT")]
        seed: Option<u64>,

        /// Display each loaded image.
        #[arg(long)]
        show: bool,
    },

    /// Display an image file as grayscale.
    Show {
        /// Image file to display.
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Caption drawn in the bottom-right corner.
        #[arg(short, long, default_value = "", value_name = "TEXT")]
        caption: String,
    },

    /// Print the moving average of a sequence.
    Rolling {
        /// Number of consecutive values per average.
        #[arg(short, long, value_name = "INT")]
        window: usize,

        /// Input values.
        #[arg(value_name = "VALUES", required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },

    /// Convert a 16-bit grayscale decode of an image to 8 bits.
    Convert {
        /// Image file to convert.
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Conversion mode: clip or norm.
        #[arg(short, long, default_value = "clip", value_name = "MODE")]
        mode: String,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("cvutils={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(err) = run(args.command) {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Load {
            dir,
            max_count,
            shuffle,
            seed,
            show,
        } => {
            let config = LoadConfig {
                max_count,
                shuffle,
                seed,
            };
            let images = get_images_from_dir(&dir, &config)
                .with_context(|| format!("Failed to load images from {}", dir.display()))?;

            tracing::info!("Loaded {} images from {}", images.len(), dir.display());
            for (i, image) in images.iter().enumerate() {
                let (height, width) = image.dim();
                println!("{i}\t{width}x{height}");
                if show {
                    display(image, &i.to_string())?;
                }
            }
            Ok(())
        }
        Command::Show { file, caption } => {
            let image = cvutils::image::load_grayscale(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            display(&image, &caption)
        }
        Command::Rolling { window, values } => {
            let averages = rolling_average(&values, window).context("Failed to average values")?;
            let line: Vec<String> = averages.iter().map(ToString::to_string).collect();
            println!("{}", line.join(" "));
            Ok(())
        }
        Command::Convert { file, mode } => {
            let mode: Mode = mode.parse()?;
            let image = load_gray16(&file)?;
            let converted = to_uint8(&image, mode)?;

            let min = converted.iter().copied().min().unwrap_or(0);
            let max = converted.iter().copied().max().unwrap_or(0);
            let (height, width) = converted.dim();
            println!("{width}x{height}\tmode={mode}\tmin={min}\tmax={max}");
            Ok(())
        }
    }
}

/// Decode a file as 16-bit grayscale, keeping the source bit depth.
fn load_gray16(path: &Path) -> Result<Array2<u16>> {
    let img = image::open(path)
        .with_context(|| format!("Failed to read {}", path.display()))?
        .into_luma16();
    let (width, height) = (img.width() as usize, img.height() as usize);
    Array2::from_shape_vec((height, width), img.into_raw()).context("Invalid image buffer")
}

#[cfg(feature = "viewer")]
fn display(image: &Array2<u8>, caption: &str) -> Result<()> {
    cvutils::plot_image(image, caption).context("Failed to display image")
}

#[cfg(not(feature = "viewer"))]
fn display(_image: &Array2<u8>, _caption: &str) -> Result<()> {
    anyhow::bail!("Display support is disabled; rebuild with the `viewer` feature")
}
