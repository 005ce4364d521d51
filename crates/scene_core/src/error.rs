use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by record ingestion, configuration and the frame inventory.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("the given file '{}' cannot be found", .0.display())]
    NotFound(PathBuf),

    #[error("the given file '{}' does not contain valid JSON: {source}", .path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid evaluation records: {0}")]
    Records(#[from] serde_json::Error),

    #[error("invalid viewer config '{}': {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("evaluation set contains no records")]
    EmptyEvaluationSet,

    #[error("invalid step range: first step {first} is after last step {last}")]
    InvalidStepRange { first: u32, last: u32 },

    #[error("frames root is not a directory: {}", .0.display())]
    MissingFramesRoot(PathBuf),

    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SceneError>;
