//! Scene viewer core: evaluation records, the bucket image scheme and the
//! pure view model rendered by the desktop viewer and the headless exporter.

pub mod config;
pub mod error;
pub mod export;
pub mod frames;
pub mod image_url;
pub mod record;
pub mod state;
pub mod style;
pub mod view;

pub use config::{Overrides, ViewerConfig};
pub use error::{Result, SceneError};
pub use export::{export_csv, to_json, write_csv};
pub use frames::{FrameInventory, scan_frames};
pub use image_url::{SceneImageRef, scene_image_url};
pub use record::{EvaluationRecord, EvaluationSet, GroundTruth, load_evaluation_set};
pub use state::{StepAction, StepRange, ViewerState};
pub use style::{BorderStyle, Highlight, Rgb};
pub use view::{SceneView, SharedMetadata, ViewTree, render};
