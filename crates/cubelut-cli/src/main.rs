//! cubelut - apply `.cube` 3D LUTs to images in batch

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "cubelut")]
#[command(author, version, about = "Apply .cube 3D LUTs to images")]
#[command(long_about = "
Applies one or more Adobe/Resolve .cube 3D LUTs to one or more images,
writing one graded output per (image, LUT) pair.

Examples:
  cubelut apply photo.jpg -l look.cube            # writes photo_look.jpg
  cubelut apply shots/ -l luts/ -o graded/ -t     # 500px previews of every look
  cubelut apply scan.tif -l film.cube -g --tetrahedral
  cubelut info luts/*.cube
  cubelut identity neutral.cube -s 65
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity: -v info, -vv debug, -vvv trace (RUST_LOG overrides)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply LUT(s) to image(s)
    #[command(visible_alias = "a")]
    Apply(ApplyArgs),

    /// Show LUT information
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Write an identity LUT
    Identity(IdentityArgs),
}

#[derive(Args)]
struct ApplyArgs {
    /// Input image or directory of images
    input: PathBuf,

    /// LUT file or directory of .cube files
    #[arg(short, long)]
    lut: PathBuf,

    /// Output directory (must exist; required for directory input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Wrap the lookup in a 2.2 gamma encode/decode
    #[arg(short = 'g', long)]
    log: bool,

    /// Shrink so the longest side is N pixels before applying
    #[arg(
        short,
        long,
        num_args = 0..=1,
        default_missing_value = "500",
        value_name = "N",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    thumb: Option<u32>,

    /// Use tetrahedral instead of trilinear interpolation
    #[arg(long)]
    tetrahedral: bool,

    /// Clamp LUT values into the declared domain at load
    #[arg(long)]
    clip: bool,

    /// Thumbnail filter: nearest, bilinear, bicubic, lanczos
    #[arg(long, default_value = "bicubic")]
    filter: String,

    /// JPEG output quality (1-100)
    #[arg(long, default_value = "95", value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,
}

#[derive(Args)]
struct InfoArgs {
    /// LUT file(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

#[derive(Args)]
struct IdentityArgs {
    /// Output .cube path
    output: PathBuf,

    /// Lattice size per axis
    #[arg(short, long, default_value = "33")]
    size: usize,

    /// Title written to the file
    #[arg(long)]
    title: Option<String>,
}

/// Installs the global subscriber. The returned guard flushes the file
/// writer on drop and must outlive all logging.
fn init_logging(verbose: u8, log_file: Option<&PathBuf>) -> Result<Option<WorkerGuard>> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            (Some(fmt::layer().with_writer(writer).with_ansi(false)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .with(file_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(guard)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.verbose, cli.log_file.as_ref())?;

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Apply(args) => commands::apply::run(args),
        Commands::Info(args) => commands::info::run(args),
        Commands::Identity(args) => commands::identity::run(args),
    }
}
