mod app;

use anyhow::{Context, anyhow};
use clap::Parser;
use eframe::NativeOptions;
use scene_core::{Overrides, ViewerConfig};
use std::path::PathBuf;

use crate::app::UiApp;

/// Desktop viewer for per-step evaluation frames.
#[derive(Debug, Parser)]
#[command(name = "SceneViewer", version = env!("SCENE_VIEWER_VERSION"))]
struct Args {
    /// Viewer config (TOML).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Evaluation records (JSON), overrides `records` in the config.
    #[arg(long)]
    records: Option<PathBuf>,
    /// Image bucket prefix, overrides `bucket` in the config.
    #[arg(long)]
    bucket: Option<String>,
    /// Step shown on start.
    #[arg(long)]
    step: Option<u32>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            bucket: self.bucket.clone(),
            records: self.records.clone(),
            step: self.step,
        }
    }
}

fn main() {
    tracing_subscriber::fmt::init();
    if let Err(e) = run(Args::parse()) {
        eprintln!("SceneViewer stopped with error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = ViewerConfig::resolve(args.config.as_deref(), args.overrides())
        .context("could not read viewer config")?;
    let app = UiApp::new(config).context("could not initialise viewer")?;

    let options = NativeOptions::default();
    eframe::run_native(
        &format!("Scene Viewer {}", env!("SCENE_VIEWER_VERSION")),
        options,
        Box::new(|cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            let app: Box<dyn eframe::App> = Box::new(app);
            Ok(app)
        }),
    )
    .map_err(|e| anyhow!("{e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_map_to_overrides() {
        let args = Args::try_parse_from([
            "SceneViewer",
            "--records",
            "eval.json",
            "--bucket",
            "https://x/",
            "--step",
            "3",
        ])
        .unwrap();
        assert_eq!(args.config, None);
        assert_eq!(
            args.overrides(),
            Overrides {
                bucket: Some("https://x/".into()),
                records: Some(PathBuf::from("eval.json")),
                step: Some(3),
            }
        );
    }

    #[test]
    fn negative_step_is_rejected() {
        assert!(Args::try_parse_from(["SceneViewer", "--step", "-1"]).is_err());
    }
}
