//! Pure view model for the scene grid.

use serde::Serialize;
use std::fmt;

use crate::image_url::SceneImageRef;
use crate::record::{EvaluationSet, GroundTruth};
use crate::state::ViewerState;
use crate::style::{BorderStyle, Highlight};

/// Descriptive metadata shared by every scene of an evaluation set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SharedMetadata {
    pub complexity: u32,
    pub occluder: bool,
    pub num_objects: u32,
}

impl fmt::Display for SharedMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Complexity: {}  Occluder: {}  Objects: {}",
            self.complexity, self.occluder, self.num_objects
        )
    }
}

/// One tile of the scene grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneView {
    /// 1-based scene number.
    pub scene: usize,
    pub label: String,
    pub image: SceneImageRef,
    pub image_url: String,
    pub highlight: Highlight,
    pub border: BorderStyle,
    pub plausibility: f64,
    pub ground_truth: GroundTruth,
    pub annotation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewTree {
    pub step: u32,
    /// Shown once for the whole set.
    pub banner: SharedMetadata,
    pub scenes: Vec<SceneView>,
}

impl ViewTree {
    pub fn implausible_count(&self) -> usize {
        self.scenes
            .iter()
            .filter(|s| s.highlight == Highlight::Implausible)
            .count()
    }
}

/// Build the view for `records` at the state's current step.
///
/// Pure: no IO, identical inputs give identical trees. Only image URLs and
/// `ViewTree::step` depend on the step.
pub fn render(records: &EvaluationSet, state: &ViewerState, bucket: &str) -> ViewTree {
    let step = state.step();
    let scenes = records
        .records()
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let scene = idx + 1;
            let image = SceneImageRef {
                bucket: bucket.to_string(),
                block: record.block.clone(),
                test: record.test.clone(),
                scene,
                step,
            };
            let highlight = Highlight::for_ground_truth(&record.ground_truth);
            SceneView {
                scene,
                label: format!("Scene {scene}"),
                image_url: image.url(),
                image,
                highlight,
                border: highlight.border(),
                plausibility: record.plausibility,
                ground_truth: record.ground_truth.clone(),
                annotation: format!(
                    "Plausibility: {}  Ground truth: {}",
                    record.plausibility, record.ground_truth
                ),
            }
        })
        .collect();

    ViewTree {
        step,
        banner: records.shared_metadata(),
        scenes,
    }
}
