use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Result, SceneError};
use crate::state::{DEFAULT_LAST_STEP, StepAction, StepRange, ViewerState};

/// Viewer configuration, usually read from `viewer.toml`.
///
/// ```toml
/// bucket = "https://example-bucket.s3.amazonaws.com/eval/"
/// records = "results/block1.json"
/// first_step = 0
/// last_step = 40
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Prefix prepended verbatim to every frame path.
    pub bucket: String,
    pub records: Option<PathBuf>,
    pub first_step: u32,
    pub last_step: u32,
    pub initial_step: Option<u32>,
    /// Local directory mirroring the bucket layout, used to detect the
    /// recorded step range and missing frames.
    pub frames_root: Option<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            records: None,
            first_step: 0,
            last_step: DEFAULT_LAST_STEP,
            initial_step: None,
            frames_root: None,
        }
    }
}

/// Command-line values; each one set takes precedence over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub bucket: Option<String>,
    pub records: Option<PathBuf>,
    pub step: Option<u32>,
}

impl ViewerConfig {
    /// Load `path` when given (defaults otherwise) and apply `overrides`.
    pub fn resolve(path: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let cfg = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(cfg.with_overrides(overrides))
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(bucket) = overrides.bucket {
            self.bucket = bucket;
        }
        if let Some(records) = overrides.records {
            self.records = Some(records);
        }
        if let Some(step) = overrides.step {
            self.initial_step = Some(step);
        }
        self
    }

    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| SceneError::Config {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(SceneError::NotFound(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };
        let cfg = Self::from_toml_str(&text, path)?;
        tracing::info!("loaded viewer config from {}", path.display());
        Ok(cfg)
    }

    pub fn step_range(&self) -> Result<StepRange> {
        StepRange::new(self.first_step, self.last_step)
    }

    /// Viewer state positioned at `initial_step` (clamped), or at the first step.
    pub fn initial_state(&self) -> Result<ViewerState> {
        let state = ViewerState::new(self.step_range()?);
        Ok(match self.initial_step {
            Some(step) => state.dispatch(StepAction::Set(step)),
            None => state,
        })
    }
}
