//! Scene grid: shared metadata banner plus one bordered tile per scene.

use super::UiApp;
use eframe::egui;
use scene_core::{Rgb, SceneView};

fn color(rgb: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}

fn scene_tile(ui: &mut egui::Ui, scene: &SceneView, size: f32) {
    let stroke = egui::Stroke::new(scene.border.width, color(scene.border.color));
    egui::Frame::new()
        .stroke(stroke)
        .inner_margin(6.0)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                ui.strong(&scene.label);
                // Fetching, caching and broken-image display are left to the
                // installed egui image loaders.
                ui.add(
                    egui::Image::new(scene.image_url.as_str())
                        .fit_to_exact_size(egui::vec2(size, size)),
                )
                .on_hover_text(&scene.image_url);
                ui.label(&scene.annotation);
            });
        });
}

impl UiApp {
    pub(super) fn render_scenes_panel(&self, ui: &mut egui::Ui) {
        let Some(view) = self.view() else {
            ui.heading("No evaluation records loaded");
            ui.label("Use \"Open records...\" or pass --records on the command line.");
            return;
        };

        ui.horizontal(|ui| {
            ui.label(view.banner.to_string());
            ui.separator();
            ui.label(format!(
                "Step {} of {}",
                view.step,
                self.state.range().last()
            ));
            ui.separator();
            ui.label(format!(
                "Scenes: {}  Implausible: {}",
                view.scenes.len(),
                view.implausible_count()
            ));
        });

        if let Some(frames) = &self.frames {
            let missing = frames.missing(&view);
            if !missing.is_empty() {
                ui.colored_label(
                    egui::Color32::YELLOW,
                    format!(
                        "{} frame(s) for this step are missing under {}",
                        missing.len(),
                        frames.root().display()
                    ),
                );
            }
        }

        ui.add_space(6.0);
        let size = self.tile_size;
        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for scene in &view.scenes {
                        scene_tile(ui, scene, size);
                    }
                });
            });
    }
}
