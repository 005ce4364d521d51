//! Settings panel rendering for the bucket, step range and local frames.

use super::{Panel, UiApp};
use eframe::egui;
use rfd::FileDialog;
use scene_core::StepRange;

impl UiApp {
    /// Renders the settings screen; values take effect on "Apply".
    pub(super) fn render_settings_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Settings");
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label("Image bucket");
            ui.add(
                egui::TextEdit::singleline(&mut self.pending_bucket)
                    .hint_text("https://bucket.example/eval/")
                    .desired_width(420.0),
            );
            if ui.button("Apply").clicked() {
                self.config.bucket = self.pending_bucket.clone();
                self.status = format!("Bucket set to {}", self.config.bucket);
            }
        });
        ui.label("The bucket is used verbatim as URL prefix; include the trailing slash.");

        ui.add_space(12.0);
        ui.horizontal(|ui| {
            ui.label("First step");
            ui.add(egui::DragValue::new(&mut self.pending_first).speed(1));
            ui.label("Last step");
            ui.add(egui::DragValue::new(&mut self.pending_last).speed(1));
            if ui.button("Apply").clicked() {
                match StepRange::new(self.pending_first, self.pending_last) {
                    Ok(range) => {
                        self.state = self.state.with_range(range);
                        self.status =
                            format!("Step range {}..={}", range.first(), range.last());
                        self.panel = Panel::Scenes;
                    }
                    Err(e) => self.status = e.to_string(),
                }
            }
        });

        ui.add_space(12.0);
        ui.horizontal(|ui| {
            let slider = egui::Slider::new(&mut self.tile_size, 96.0..=640.0)
                .text("Tile size")
                .custom_formatter(|v, _| format!("{v:.0}px"));
            ui.add(slider);
        });

        ui.add_space(12.0);
        ui.separator();
        ui.add_space(6.0);
        ui.heading("Local frames");
        match &self.frames {
            Some(frames) => {
                ui.label(format!(
                    "{}: {} frames",
                    frames.root().display(),
                    frames.frame_count()
                ));
            }
            None => {
                ui.label("No local frame directory selected.");
            }
        }
        if ui.button("Choose frames folder...").clicked()
            && let Some(dir) = FileDialog::new().set_directory(".").pick_folder()
        {
            self.scan_frames_root(&dir);
        }

        ui.add_space(16.0);
        ui.separator();
        ui.label(format!("Version: {}", env!("SCENE_VIEWER_VERSION")));
        if let Some(path) = &self.records_path {
            ui.label(format!("Records: {}", path.display()));
        }
    }
}
