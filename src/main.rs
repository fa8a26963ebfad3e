//! `blobtrack` CLI: replay recorded blob detections through the tracker.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blobtrack_rs::{PipelineConfig, ReplaySource, TrackerPipeline};
use clap::Parser;
use serde_json::json;

#[derive(Parser)]
#[command(name = "blobtrack", about = "Track motion blobs from a recorded detection log")]
struct Cli {
    /// Newline-delimited JSON frames: {"timestamp": secs, "boxes": [[x, y, w, h], ...]}
    input: PathBuf,
    /// JSON pipeline config ({"tracker": {...}, "filter": {...}})
    #[arg(long)]
    config: Option<PathBuf>,
    /// Maximum centroid distance (pixels) for a blob to lock on to a track
    #[arg(long)]
    lock_on_distance: Option<f64>,
    /// Seconds a track survives without a match
    #[arg(long)]
    track_timeout: Option<f64>,
    /// Keep at most this many trail points per track
    #[arg(long)]
    max_trail_len: Option<usize>,
    /// Minimum blob area in square pixels
    #[arg(long)]
    min_area: Option<i64>,
    /// Minimum blob width in pixels
    #[arg(long)]
    min_width: Option<i32>,
    /// Print a JSON line with every frame's tracks
    #[arg(long)]
    emit_frames: bool,
    /// Quit after this many frames, even if the input has more
    #[arg(long)]
    max_frames: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;

    let source = ReplaySource::from_path(&cli.input)
        .with_context(|| format!("opening {}", cli.input.display()))?;
    let mut pipeline = TrackerPipeline::new(source, config)?;

    let emit_frames = cli.emit_frames;
    let max_frames = cli.max_frames;
    let stop = pipeline.stop_handle();
    let summary = pipeline.run(|tracker, report| {
        if frame_limit_reached(report.frame, max_frames) {
            stop.request_stop();
        }
        if emit_frames {
            let line = json!({
                "frame": report.frame,
                "timestamp": report.timestamp,
                "expired": report.expired.iter().map(ToString::to_string).collect::<Vec<_>>(),
                "tracks": tracker.snapshots(),
            });
            println!("{}", line);
        }
    })?;

    let result = json!({
        "frames": summary.frames,
        "stopped": summary.stopped,
        "tracks_created": summary.tracks_created,
        "tracks_expired": summary.tracks_expired,
        "tracks": pipeline.tracker().snapshots(),
    });
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

/// The quit request fires after the frame that reaches the limit, so that
/// frame is fully processed first.
fn frame_limit_reached(frame: u64, max_frames: Option<u64>) -> bool {
    max_frames.is_some_and(|limit| frame >= limit)
}

fn build_config(cli: &Cli) -> Result<PipelineConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => PipelineConfig::default(),
    };

    if let Some(v) = cli.lock_on_distance {
        config.tracker.lock_on_distance = v;
    }
    if let Some(v) = cli.track_timeout {
        config.tracker.track_timeout = v;
    }
    if let Some(v) = cli.max_trail_len {
        config.tracker.max_trail_len = Some(v);
    }
    if let Some(v) = cli.min_area {
        config.filter.min_area = v;
    }
    if let Some(v) = cli.min_width {
        config.filter.min_width = v;
    }
    Ok(config)
}

fn load_config(path: &Path) -> Result<PipelineConfig> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}
