//! pixkit - raster adjustment, line art, grids and collages from the shell
//!
//! Every subcommand decodes one or more images to RGBA8, runs a single
//! engine entry point from `pixkit-ops` and encodes the result by the
//! output file extension.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pixkit_core::{Rect, Rgb};
use pixkit_ops::{Align, Direction, Filter, FilterPreset, GrayMode};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// Default admission limit: 64 megapixels.
const DEFAULT_MAX_PIXELS: u64 = 64 * 1024 * 1024;

#[derive(Parser)]
#[command(name = "pixkit")]
#[command(author, version, about = "Raster transformation toolkit")]
#[command(long_about = "
Photo adjustment, grayscale, line-art extraction, grid slicing and
multi-image compositing over 8-bit RGBA images.

Examples:
  pixkit tone photo.jpg -o warm.png --temperature 70 --vignette 40
  pixkit tone photo.jpg -o out.png --preset vintage --rotate 90
  pixkit tone photo.jpg -o out.png --params look.yaml --resize 800x600 --keep-aspect
  pixkit grayscale photo.png -o bw.png --mode high-contrast
  pixkit sketch photo.png -o lines.png --threshold 25 --thickness 70
  pixkit grid photo.png -o cells/ --size 3 --padding 8 --sheet sheet.png
  pixkit merge a.png b.png c.png -o strip.png --gap 10 --align center
  pixkit presets -v
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Refuse to decode images larger than this many pixels
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_PIXELS)]
    max_pixels: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Adjust tone, apply a preset, and rotate/flip/resize/crop
    #[command(visible_alias = "t")]
    Tone(ToneArgs),

    /// Convert to grayscale
    #[command(visible_alias = "gray")]
    Grayscale(GrayscaleArgs),

    /// Extract white-on-black line art
    Sketch(SketchArgs),

    /// Slice the centered square into an N x N grid of cells
    Grid(GridArgs),

    /// Stack several images onto one canvas
    #[command(visible_alias = "m")]
    Merge(MergeArgs),

    /// List filter presets
    Presets(PresetsArgs),
}

#[derive(Args)]
struct ToneArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// YAML file with a full parameter set; flags override its values
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Brightness (-100..100)
    #[arg(long, allow_negative_numbers = true)]
    brightness: Option<f64>,

    /// Contrast (-100..100)
    #[arg(long, allow_negative_numbers = true)]
    contrast: Option<f64>,

    /// Saturation (-100..100)
    #[arg(long, allow_negative_numbers = true)]
    saturation: Option<f64>,

    /// Highlights (-100..100)
    #[arg(long, allow_negative_numbers = true)]
    highlights: Option<f64>,

    /// Shadows (-100..100)
    #[arg(long, allow_negative_numbers = true)]
    shadows: Option<f64>,

    /// Temperature (0..100, 50 = neutral)
    #[arg(long)]
    temperature: Option<f64>,

    /// Sharpness (0..100)
    #[arg(long)]
    sharpness: Option<f64>,

    /// Vignette (0..100)
    #[arg(long)]
    vignette: Option<f64>,

    /// Filter preset (see `pixkit presets`)
    #[arg(long)]
    preset: Option<FilterPreset>,

    /// Clockwise rotation in degrees
    #[arg(short, long, allow_negative_numbers = true)]
    rotate: Option<f64>,

    /// Mirror left-right
    #[arg(long)]
    flip_h: bool,

    /// Mirror top-bottom
    #[arg(long)]
    flip_v: bool,

    /// Resize to WIDTHxHEIGHT
    #[arg(long, value_name = "WxH")]
    resize: Option<String>,

    /// Fit inside --resize instead of stretching
    #[arg(long, requires = "resize")]
    keep_aspect: bool,

    /// Resampling filter for --resize
    #[arg(long, requires = "resize")]
    filter: Option<Filter>,

    /// Crop region X,Y,W,H applied last
    #[arg(long, value_name = "X,Y,W,H")]
    crop: Option<Rect>,
}

#[derive(Args)]
struct GrayscaleArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Luma scheme: classic, high-contrast, soft
    #[arg(short, long, default_value = "classic")]
    mode: GrayMode,

    /// Brightness percent (0..200)
    #[arg(long, default_value = "100")]
    brightness: f64,

    /// Contrast percent (0..200)
    #[arg(long, default_value = "100")]
    contrast: f64,
}

#[derive(Args)]
struct SketchArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Edge threshold (0..100)
    #[arg(long, default_value = "30")]
    threshold: f64,

    /// Line thickness (0..100)
    #[arg(long, default_value = "50")]
    thickness: f64,

    /// Pre-blur smoothing (0..100)
    #[arg(long, default_value = "50")]
    smoothing: f64,
}

#[derive(Args)]
struct GridArgs {
    /// Input image
    input: PathBuf,

    /// Output directory for cell_<row>_<col>.png
    #[arg(short, long)]
    output: PathBuf,

    /// Cells per side (2 or 3)
    #[arg(short, long, default_value = "3")]
    size: u32,

    /// Background frame around each cell
    #[arg(long, default_value = "0")]
    padding: u32,

    /// Spacing between cells on the reassembled sheet
    #[arg(long, default_value = "0")]
    gap: u32,

    /// Frame and gap color
    #[arg(long, default_value = "#FFFFFF")]
    bg: Rgb,

    /// Also write the reassembled sheet to this file
    #[arg(long)]
    sheet: Option<PathBuf>,
}

#[derive(Args)]
struct MergeArgs {
    /// Input images, in stacking order
    #[arg(required = true, num_args = 1..)]
    inputs: Vec<PathBuf>,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Stacking axis: horizontal, vertical
    #[arg(short, long, default_value = "horizontal")]
    direction: Direction,

    /// Cross-axis alignment: start, center, end
    #[arg(short, long, default_value = "start")]
    align: Align,

    /// Spacing between images; positive values draw separators
    #[arg(long, default_value = "0")]
    gap: u32,

    /// Border around the whole canvas
    #[arg(long, default_value = "0")]
    padding: u32,

    /// Canvas color
    #[arg(long, default_value = "#FFFFFF")]
    bg: Rgb,

    /// Resample every image into uniform WxH slots
    #[arg(long, value_name = "WxH")]
    cell: Option<String>,
}

#[derive(Args)]
struct PresetsArgs {
    /// Print only this preset
    name: Option<FilterPreset>,
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let ctx = commands::Context {
        verbose: cli.verbose,
        max_pixels: cli.max_pixels,
    };

    match cli.command {
        Commands::Tone(args) => commands::tone::run(args, &ctx),
        Commands::Grayscale(args) => commands::grayscale::run(args, &ctx),
        Commands::Sketch(args) => commands::sketch::run(args, &ctx),
        Commands::Grid(args) => commands::grid::run(args, &ctx),
        Commands::Merge(args) => commands::merge::run(args, &ctx),
        Commands::Presets(args) => commands::presets::run(args, &ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_tone_flags() {
        let cli = Cli::try_parse_from([
            "pixkit", "-vv", "tone", "in.png", "-o", "out.png", "--brightness", "-20",
            "--preset", "vintage", "--crop", "1,2,3,4", "--resize", "64x32", "--keep-aspect",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Tone(args) = cli.command else {
            panic!("expected tone");
        };
        assert_eq!(args.brightness, Some(-20.0));
        assert_eq!(args.preset, Some(FilterPreset::Vintage));
        assert_eq!(args.crop, Some(Rect::new(1, 2, 3, 4)));
        assert!(args.keep_aspect);
    }

    #[test]
    fn test_parse_merge_flags() {
        let cli = Cli::try_parse_from([
            "pixkit", "merge", "a.png", "b.png", "-o", "c.png", "-d", "vertical", "-a",
            "center", "--bg", "#000000",
        ])
        .unwrap();
        let Commands::Merge(args) = cli.command else {
            panic!("expected merge");
        };
        assert_eq!(args.inputs.len(), 2);
        assert_eq!(args.direction, Direction::Vertical);
        assert_eq!(args.align, Align::Center);
        assert_eq!(args.bg, Rgb::BLACK);
    }

    #[test]
    fn test_keep_aspect_requires_resize() {
        assert!(Cli::try_parse_from(["pixkit", "tone", "a.png", "-o", "b.png", "--keep-aspect"]).is_err());
    }

    #[test]
    fn test_bad_grayscale_mode() {
        assert!(Cli::try_parse_from(["pixkit", "gray", "a.png", "-o", "b.png", "-m", "sepia"]).is_err());
    }
}
