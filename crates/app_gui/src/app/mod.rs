//! Viewer application state. `UiApp` owns the step index; panels read the
//! rendered view and request step changes through `UiApp::dispatch`.

mod scenes;
mod settings;

use anyhow::Context;
use eframe::{App, Frame, egui};
use rfd::FileDialog;
use scene_core::{
    EvaluationSet, FrameInventory, StepAction, StepRange, ViewTree, ViewerConfig, ViewerState,
    export_csv, load_evaluation_set, render, scan_frames,
};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

const DEFAULT_TILE_SIZE: f32 = 240.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Panel {
    Scenes,
    Settings,
}

pub struct UiApp {
    config: ViewerConfig,
    state: ViewerState,
    records: Option<EvaluationSet>,
    records_path: Option<PathBuf>,
    frames: Option<FrameInventory>,
    panel: Panel,
    status: String,
    tile_size: f32,
    // Settings inputs, applied on demand.
    pending_bucket: String,
    pending_first: u32,
    pending_last: u32,
}

impl UiApp {
    pub fn new(config: ViewerConfig) -> anyhow::Result<Self> {
        let state = config.initial_state()?;
        let mut app = Self {
            pending_bucket: config.bucket.clone(),
            pending_first: state.range().first(),
            pending_last: state.range().last(),
            state,
            records: None,
            records_path: None,
            frames: None,
            panel: Panel::Scenes,
            status: String::new(),
            tile_size: DEFAULT_TILE_SIZE,
            config,
        };
        if let Some(root) = app.config.frames_root.clone() {
            app.scan_frames_root(&root);
        }
        if let Some(path) = app.config.records.clone() {
            app.load_records(&path)
                .with_context(|| format!("loading {}", path.display()))?;
        }
        Ok(app)
    }

    /// The only place the step index changes.
    fn dispatch(&mut self, action: StepAction) {
        self.state = self.state.dispatch(action);
    }

    fn view(&self) -> Option<ViewTree> {
        self.records
            .as_ref()
            .map(|records| render(records, &self.state, &self.config.bucket))
    }

    fn load_records(&mut self, path: &Path) -> anyhow::Result<()> {
        let records = load_evaluation_set(path)?;
        self.status = format!("Loaded {} scenes from {}", records.len(), path.display());
        self.records = Some(records);
        self.records_path = Some(path.to_path_buf());
        self.fit_range_to_frames();
        Ok(())
    }

    fn scan_frames_root(&mut self, root: &Path) {
        match scan_frames(root) {
            Ok(inv) => {
                self.status = format!(
                    "Found {} local frames in {}",
                    inv.frame_count(),
                    root.display()
                );
                self.frames = Some(inv);
                self.fit_range_to_frames();
            }
            Err(e) => {
                tracing::warn!("frame scan failed: {e}");
                self.status = format!("Frame scan failed: {e}");
                self.frames = None;
            }
        }
    }

    /// Narrow the step range to what was recorded locally for the loaded set,
    /// taking the union over every block/test the records mention.
    fn fit_range_to_frames(&mut self) {
        let (Some(frames), Some(records)) = (&self.frames, &self.records) else {
            return;
        };
        let pairs: BTreeSet<(&str, &str)> = records
            .records()
            .iter()
            .map(|r| (r.block.as_str(), r.test.as_str()))
            .collect();
        let union = pairs
            .into_iter()
            .filter_map(|(block, test)| frames.step_range(block, test))
            .map(|r| (r.first(), r.last()))
            .reduce(|(lo, hi), (first, last)| (lo.min(first), hi.max(last)));
        let Some((first, last)) = union else {
            return;
        };
        match StepRange::new(first, last) {
            Ok(range) => {
                self.state = self.state.with_range(range);
                self.pending_first = range.first();
                self.pending_last = range.last();
            }
            Err(e) => tracing::warn!("ignoring local frame range: {e}"),
        }
    }

    fn open_records_dialog(&mut self) {
        let Some(path) = FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_directory(".")
            .pick_file()
        else {
            return;
        };
        if let Err(e) = self.load_records(&path) {
            self.status = format!("Could not load records: {e:#}");
        }
    }

    fn export_dialog(&mut self) {
        let Some(view) = self.view() else {
            return;
        };
        let Some(path) = FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name(format!("scenes_step_{}.csv", view.step))
            .save_file()
        else {
            return;
        };
        match export_csv(&view, &path) {
            Ok(()) => self.status = format!("CSV exported: {}", path.display()),
            Err(e) => self.status = format!("Export failed: {e}"),
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let action = ctx.input(|i| {
            if i.key_pressed(egui::Key::ArrowRight) {
                Some(StepAction::Next)
            } else if i.key_pressed(egui::Key::ArrowLeft) {
                Some(StepAction::Previous)
            } else if i.key_pressed(egui::Key::Home) {
                Some(StepAction::First)
            } else if i.key_pressed(egui::Key::End) {
                Some(StepAction::Last)
            } else {
                None
            }
        });
        if let Some(action) = action {
            self.dispatch(action);
        }
    }

    fn render_step_bar(&mut self, ui: &mut egui::Ui) {
        let range = self.state.range();
        ui.horizontal(|ui| {
            if ui.button("⏮").clicked() {
                self.dispatch(StepAction::First);
            }
            if ui.button("◀").clicked() {
                self.dispatch(StepAction::Previous);
            }
            let mut step = self.state.step();
            let slider = egui::Slider::new(&mut step, range.first()..=range.last()).text("Step");
            if ui.add(slider).changed() {
                self.dispatch(StepAction::Set(step));
            }
            if ui.button("▶").clicked() {
                self.dispatch(StepAction::Next);
            }
            if ui.button("⏭").clicked() {
                self.dispatch(StepAction::Last);
            }
        });
    }
}

impl App for UiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.handle_keys(ctx);

        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open records...").clicked() {
                    self.open_records_dialog();
                }

                let can_export = self.records.is_some();
                if ui
                    .add_enabled(can_export, egui::Button::new("Export CSV"))
                    .clicked()
                {
                    self.export_dialog();
                }

                ui.separator();
                ui.selectable_value(&mut self.panel, Panel::Scenes, "Scenes");
                ui.selectable_value(&mut self.panel, Panel::Settings, "Settings");

                if !self.status.is_empty() {
                    ui.separator();
                    ui.label(&self.status);
                }
            });
        });

        if self.panel == Panel::Scenes && self.records.is_some() {
            egui::TopBottomPanel::bottom("steps").show(ctx, |ui| {
                self.render_step_bar(ui);
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| match self.panel {
            Panel::Scenes => self.render_scenes_panel(ui),
            Panel::Settings => self.render_settings_panel(ui),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const RECORDS: &str = r#"[
        {"block": "block1", "test": "t1", "ground_truth": "0", "plausibility": 0.2,
         "complexity": 5, "occluder": true, "num_objects": 2},
        {"block": "block1", "test": "t1", "ground_truth": "1", "plausibility": 0.9,
         "complexity": 5, "occluder": true, "num_objects": 2}
    ]"#;

    #[test]
    fn new_without_records_has_no_view() -> anyhow::Result<()> {
        let app = UiApp::new(ViewerConfig::default())?;
        assert!(app.view().is_none());
        assert_eq!(app.state.step(), 0);
        Ok(())
    }

    #[test]
    fn records_from_config_are_loaded() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("eval.json");
        fs::write(&path, RECORDS)?;
        let config = ViewerConfig {
            bucket: "https://x/".into(),
            records: Some(path),
            initial_step: Some(3),
            ..ViewerConfig::default()
        };
        let mut app = UiApp::new(config)?;
        let view = app.view().unwrap();
        assert_eq!(view.scenes.len(), 2);
        assert_eq!(
            view.scenes[0].image_url,
            "https://x/block1/t1/1/scene/scene_3.png"
        );

        app.dispatch(StepAction::Next);
        let view = app.view().unwrap();
        assert_eq!(
            view.scenes[1].image_url,
            "https://x/block1/t1/2/scene/scene_4.png"
        );
        Ok(())
    }

    #[test]
    fn missing_records_file_fails_startup() {
        let config = ViewerConfig {
            records: Some(PathBuf::from("/definitely/not/here.json")),
            ..ViewerConfig::default()
        };
        assert!(UiApp::new(config).is_err());
    }

    #[test]
    fn local_frames_narrow_step_range() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let records = dir.path().join("eval.json");
        fs::write(&records, RECORDS)?;
        let frames = dir.path().join("frames");
        for step in 2..=6 {
            let scene_dir = frames.join("block1/t1/1/scene");
            fs::create_dir_all(&scene_dir)?;
            fs::write(scene_dir.join(format!("scene_{step}.png")), b"")?;
        }
        let config = ViewerConfig {
            records: Some(records),
            frames_root: Some(frames),
            ..ViewerConfig::default()
        };
        let mut app = UiApp::new(config)?;
        assert_eq!(app.state.range().first(), 2);
        assert_eq!(app.state.range().last(), 6);
        assert_eq!(app.state.step(), 2);
        app.dispatch(StepAction::Last);
        assert_eq!(app.state.step(), 6);
        Ok(())
    }

    #[test]
    fn step_range_spans_every_test_in_the_records() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let records = dir.path().join("eval.json");
        fs::write(
            &records,
            r#"[
                {"block": "block1", "test": "t1", "ground_truth": 0, "plausibility": 0.2,
                 "complexity": 5, "occluder": true, "num_objects": 2},
                {"block": "block1", "test": "t2", "ground_truth": 1, "plausibility": 0.9,
                 "complexity": 5, "occluder": true, "num_objects": 2}
            ]"#,
        )?;
        let frames = dir.path().join("frames");
        for (test, steps) in [("t1", 2..=4), ("t2", 5..=9)] {
            let scene_dir = frames.join(format!("block1/{test}/1/scene"));
            fs::create_dir_all(&scene_dir)?;
            for step in steps {
                fs::write(scene_dir.join(format!("scene_{step}.png")), b"")?;
            }
        }
        let config = ViewerConfig {
            records: Some(records),
            frames_root: Some(frames),
            ..ViewerConfig::default()
        };
        let app = UiApp::new(config)?;
        assert_eq!(app.state.range().first(), 2);
        assert_eq!(app.state.range().last(), 9);
        assert_eq!((app.pending_first, app.pending_last), (2, 9));
        Ok(())
    }
}
