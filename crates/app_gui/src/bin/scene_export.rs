//! Headless rendering of the scene view for one step, as CSV or JSON.

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use scene_core::{
    Overrides, ViewTree, ViewerConfig, export_csv, load_evaluation_set, render, scan_frames,
    to_json, write_csv,
};
use std::fs;
use std::io;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Csv,
    Json,
}

/// Render the scene view for one step without opening a window.
#[derive(Debug, Parser)]
#[command(name = "scene-export", version = env!("SCENE_VIEWER_VERSION"))]
struct Args {
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    records: Option<PathBuf>,
    #[arg(long)]
    bucket: Option<String>,
    #[arg(long)]
    step: Option<u32>,
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,
    /// Output file; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Fail when a frame of the view is missing under `frames_root`.
    #[arg(long)]
    require_frames: bool,
}

fn main() {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    if let Err(e) = run(Args::parse()) {
        eprintln!("scene-export failed: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = ViewerConfig::resolve(
        args.config.as_deref(),
        Overrides {
            bucket: args.bucket.clone(),
            records: args.records.clone(),
            step: args.step,
        },
    )
    .context("could not read viewer config")?;
    let view = build_view(&config)?;

    if let Some(root) = &config.frames_root {
        let missing = scan_frames(root)?.missing(&view);
        for url in &missing {
            tracing::warn!("missing frame: {url}");
        }
        if args.require_frames && !missing.is_empty() {
            bail!("{} frame(s) missing under {}", missing.len(), root.display());
        }
    } else if args.require_frames {
        bail!("--require-frames needs `frames_root` in the config");
    }

    write_view(&view, args.format, args.out.as_ref())
}

fn build_view(config: &ViewerConfig) -> Result<ViewTree> {
    let Some(records_path) = &config.records else {
        bail!("no evaluation records given (use --records or `records` in the config)");
    };
    let records = load_evaluation_set(records_path)
        .with_context(|| format!("loading {}", records_path.display()))?;
    let state = config.initial_state()?;
    Ok(render(&records, &state, &config.bucket))
}

fn write_view(view: &ViewTree, format: Format, out: Option<&PathBuf>) -> Result<()> {
    match (format, out) {
        (Format::Csv, Some(path)) => export_csv(view, path)?,
        (Format::Csv, None) => write_csv(view, io::stdout().lock())?,
        (Format::Json, Some(path)) => fs::write(path, to_json(view)? + "\n")?,
        (Format::Json, None) => println!("{}", to_json(view)?),
    }
    if let Some(path) = out {
        tracing::info!("wrote {} scenes to {}", view.scenes.len(), path.display());
    }
    Ok(())
}
