use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ridereel::corpus::stats::{CorpusStats, TrackInspection, concat_indexes};
use ridereel::corpus::store::{read_json, write_json};
use ridereel::{
    Canvas, FrameErrorPolicy, JsonCorpus, RenderAssets, RenderConfig, RenderMode, TextStamper,
    Track, TrackCorpus,
};

#[derive(Parser, Debug)]
#[command(name = "ridereel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the ride collection as a numbered PNG frame sequence.
    Render(RenderArgs),
    /// Print totals over a ride index.
    Stats(StatsArgs),
    /// Compare great-circle formulas over one track file.
    Inspect(InspectArgs),
    /// Merge several ride index files into one.
    Concat(ConcatArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Ride index JSON (`{"models": [...]}`).
    #[arg(long)]
    index: PathBuf,

    /// Directory holding one `<ride id>.json` track per ride.
    #[arg(long)]
    maps: PathBuf,

    /// Output directory for the frames; created if missing.
    #[arg(long)]
    out: PathBuf,

    /// Background map image. Frames are drawn on white without one.
    #[arg(long)]
    background: Option<PathBuf>,

    /// Label font file. Falls back to the system sans-serif face.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Render without ride/distance labels.
    #[arg(long, default_value_t = false)]
    no_labels: bool,

    /// JSON render config; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    frames: Option<usize>,

    #[arg(long)]
    workers: Option<usize>,

    /// Trailing window length in points.
    #[arg(long)]
    points_to_draw: Option<usize>,

    #[arg(long, value_enum)]
    mode: Option<RenderMode>,

    #[arg(long, value_enum)]
    on_frame_error: Option<FrameErrorPolicy>,

    /// Steps longer than this many meters are treated as recording gaps.
    #[arg(long)]
    max_step_m: Option<f64>,

    #[arg(long)]
    point_radius: Option<u32>,

    #[arg(long)]
    margin: Option<u32>,
}

#[derive(Parser, Debug)]
struct StatsArgs {
    /// Ride index JSON.
    #[arg(long)]
    index: PathBuf,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Track JSON (`{"latlng": [[lat, lon], ...]}`).
    track: PathBuf,
}

#[derive(Parser, Debug)]
struct ConcatArgs {
    /// Merged index output path.
    #[arg(long)]
    out: PathBuf,

    /// Index files, merged in the order given.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Stats(args) => cmd_stats(args),
        Command::Inspect(args) => cmd_inspect(args),
        Command::Concat(args) => cmd_concat(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;

    let background = args
        .background
        .as_deref()
        .map(Canvas::load_background)
        .transpose()
        .context("load background")?;
    let stamper = load_stamper(&args, &config)?;
    let assets = RenderAssets {
        background,
        stamper,
    };

    let corpus = JsonCorpus::new(&args.index, &args.maps);
    let report = ridereel::render_frames(&corpus, &assets, &args.out, &config)?;

    eprintln!(
        "wrote {} frames to {} ({} failed, {} not attempted, {} gap steps skipped)",
        report.frames.len(),
        args.out.display(),
        report.failures.len(),
        report.abandoned,
        report.anomalies,
    );
    if let Some(d) = report.final_distance_m() {
        eprintln!("final distance: {:.1} km", d / 1000.0);
    }
    if !report.is_complete() {
        anyhow::bail!(
            "{} of {} frames were not written",
            report.failures.len() + report.abandoned,
            config.frames
        );
    }
    Ok(())
}

fn resolve_config(args: &RenderArgs) -> anyhow::Result<RenderConfig> {
    let mut config = match &args.config {
        Some(path) => RenderConfig::from_path(path)?,
        None => RenderConfig::default(),
    };
    if let Some(v) = args.frames {
        config.frames = v;
    }
    if let Some(v) = args.workers {
        config.workers = v;
    }
    if let Some(v) = args.points_to_draw {
        config.points_to_draw = v;
    }
    if let Some(v) = args.mode {
        config.mode = v;
    }
    if let Some(v) = args.on_frame_error {
        config.on_frame_error = v;
    }
    if let Some(v) = args.max_step_m {
        config.max_step_m = v;
    }
    if let Some(v) = args.point_radius {
        config.point_radius = v;
    }
    if let Some(v) = args.margin {
        config.margin = v;
    }
    config.validate()?;
    Ok(config)
}

/// An explicit font must load; the system fallback is best effort.
fn load_stamper(
    args: &RenderArgs,
    config: &RenderConfig,
) -> anyhow::Result<Option<TextStamper>> {
    if args.no_labels {
        return Ok(None);
    }
    if let Some(path) = &args.font {
        let stamper = TextStamper::from_path(path, config.font_size)
            .with_context(|| format!("load font '{}'", path.display()))?;
        return Ok(Some(stamper));
    }
    match TextStamper::system_default(config.font_size) {
        Ok(stamper) => Ok(Some(stamper)),
        Err(e) => {
            tracing::warn!(error = %e, "no usable system font, rendering without labels");
            Ok(None)
        }
    }
}

fn cmd_stats(args: StatsArgs) -> anyhow::Result<()> {
    let corpus = JsonCorpus::new(&args.index, Path::new("."));
    let rides = corpus.rides()?;
    let stats = CorpusStats::from_rides(&rides);

    println!("rides: {}", stats.rides);
    println!("total distance: {:.1} km", stats.total_distance_m / 1000.0);
    println!("total moving time: {:.1} h", stats.total_moving_time_s / 3600.0);
    println!("average speed (total): {:.1} km/h", stats.overall_speed_kmh);
    println!("average speed (per ride): {:.1} km/h", stats.mean_ride_speed_kmh);
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let track: Track = read_json(&args.track)?;
    let inspection = TrackInspection::of(&track);

    println!("points: {}", inspection.points);
    println!("haversine: {:.1} m", inspection.haversine_m);
    println!("cosine law: {:.1} m", inspection.cosine_law_m);
    if !inspection.nan_steps.is_empty() {
        println!(
            "non-finite steps skipped: {} (first at {})",
            inspection.nan_steps.len(),
            inspection.nan_steps[0]
        );
    }
    Ok(())
}

fn cmd_concat(args: ConcatArgs) -> anyhow::Result<()> {
    let merged = concat_indexes(&args.inputs)?;
    write_json(&args.out, &merged)
        .with_context(|| format!("write index '{}'", args.out.display()))?;
    eprintln!("wrote {} rides to {}", merged.rides.len(), args.out.display());
    Ok(())
}
