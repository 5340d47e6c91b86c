//! platescan CLI: license plate recognition from the command line.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use platescan::core::{hsv_at, DebugDump};
use platescan::locate::{extract_candidates, LocateParams};
use platescan::{PlateColor, PlateRecognitionResult, Recognizer, RecognizerConfig};
use serde::Serialize;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "bmp", "webp"];

#[derive(Parser)]
#[command(name = "platescan")]
#[command(about = "Locate and read vehicle license plates in photographs")]
#[command(version)]
struct Cli {
    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[cfg(feature = "tracing")]
    #[arg(long, global = true)]
    json_log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recognize the plates in one image.
    Recognize(RecognizeArgs),

    /// Recognize every image in a directory, in parallel.
    Batch(BatchArgs),

    /// Print the HSV value of one pixel.
    Hsv {
        image: PathBuf,
        x: u32,
        y: u32,
    },

    /// Print image size and the plate candidates found, without models.
    Info {
        image: PathBuf,

        /// Recognizer config to take the locate settings from.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Run the HSV pass for every plate color.
        #[arg(long)]
        all_colors: bool,
    },
}

#[derive(Debug, Clone, Args)]
struct RecognizeArgs {
    image: PathBuf,

    /// Recognizer config (JSON).
    #[arg(long)]
    config: PathBuf,

    /// Write intermediate images here; overrides the config.
    #[arg(long)]
    debug_dir: Option<PathBuf>,

    /// Run the HSV pass for every plate color.
    #[arg(long)]
    all_colors: bool,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Clone, Args)]
struct BatchArgs {
    dir: PathBuf,

    /// Recognizer config (JSON).
    #[arg(long)]
    config: PathBuf,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

#[derive(Serialize)]
struct BatchEntry {
    path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    plates: Option<Vec<PlateRecognitionResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct HsvSample {
    x: u32,
    y: u32,
    h: u8,
    s: u8,
    v: u8,
}

#[derive(Serialize)]
struct CandidateInfo {
    strategy: String,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

#[derive(Serialize)]
struct ImageInfo {
    width: u32,
    height: u32,
    candidates: Vec<CandidateInfo>,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    match cli.command {
        Commands::Recognize(args) => run_recognize(&args),
        Commands::Batch(args) => run_batch(&args),
        Commands::Hsv { image, x, y } => run_hsv(&image, x, y),
        Commands::Info {
            image,
            config,
            all_colors,
        } => run_info(&image, config.as_deref(), all_colors),
    }
}

#[cfg(feature = "tracing")]
fn init_logging(cli: &Cli) {
    platescan::core::init_tracing(cli.json_log);
    // no-op when the subscriber already bridged `log` records
    let _ = tracing_log::LogTracer::init();
    log::debug!("verbosity {}", cli.verbose);
}

#[cfg(not(feature = "tracing"))]
fn init_logging(cli: &Cli) {
    let level = platescan::core::level_from_verbosity(cli.verbose);
    if let Err(e) = platescan::core::init_with_level(level) {
        eprintln!("logger already installed: {e}");
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> CliResult<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

fn run_recognize(args: &RecognizeArgs) -> CliResult<()> {
    let mut config = RecognizerConfig::load_json(&args.config)?;
    if args.debug_dir.is_some() {
        config.debug_dir = args.debug_dir.clone();
    }
    if args.all_colors {
        config.pipeline.locate.hsv.colors = PlateColor::PRIORITY.to_vec();
    }
    let recognizer = Recognizer::from_config(&config)?;
    log::info!("recognizing {}", args.image.display());
    let plates = recognizer.recognize_path(&args.image)?;
    print_json(&plates, args.pretty)
}

fn list_images(dir: &Path) -> CliResult<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_image = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
        if is_image && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn run_batch(args: &BatchArgs) -> CliResult<()> {
    let config = RecognizerConfig::load_json(&args.config)?;
    let recognizer = Recognizer::from_config(&config)?;
    let paths = list_images(&args.dir)?;
    log::info!("{} image(s) in {}", paths.len(), args.dir.display());

    let entries: Vec<BatchEntry> = recognizer
        .recognize_paths(&paths)
        .into_iter()
        .zip(paths)
        .map(|(res, path)| match res {
            Ok(plates) => BatchEntry {
                path,
                plates: Some(plates),
                error: None,
            },
            Err(e) => {
                log::warn!("{}: {e}", path.display());
                BatchEntry {
                    path,
                    plates: None,
                    error: Some(e.to_string()),
                }
            }
        })
        .collect();
    print_json(&entries, args.pretty)
}

fn run_hsv(image: &Path, x: u32, y: u32) -> CliResult<()> {
    let img = image::open(image)
        .map_err(|e| -> CliError { format!("cannot open {}: {e}", image.display()).into() })?
        .to_rgb8();
    let [h, s, v] = hsv_at(&img, x, y).ok_or_else(|| -> CliError {
        format!(
            "pixel ({x}, {y}) is outside the {}x{} image",
            img.width(),
            img.height()
        )
        .into()
    })?;
    print_json(&HsvSample { x, y, h, s, v }, false)
}

fn run_info(image: &Path, config: Option<&Path>, all_colors: bool) -> CliResult<()> {
    let mut params = match config {
        Some(path) => RecognizerConfig::load_json(path)?.pipeline.locate,
        None => LocateParams::default(),
    };
    if all_colors {
        params.hsv.colors = PlateColor::PRIORITY.to_vec();
    }
    let img = image::open(image)
        .map_err(|e| -> CliError { format!("cannot open {}: {e}", image.display()).into() })?
        .to_rgb8();
    let candidates = extract_candidates(&img, &params, &DebugDump::disabled())
        .into_iter()
        .map(|c| CandidateInfo {
            strategy: c.strategy.to_string(),
            x: c.source.x,
            y: c.source.y,
            width: c.source.width,
            height: c.source.height,
        })
        .collect();
    let info = ImageInfo {
        width: img.width(),
        height: img.height(),
        candidates,
    };
    print_json(&info, true)
}
