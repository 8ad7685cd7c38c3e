use std::path::PathBuf;
use thiserror::Error;
use crate::core::Vec2;

/// A stage descriptor that cannot become a [`Stage`](crate::stage::Stage).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidStageError {
    #[error("stage descriptor is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("stage dimensions must be positive, got {width}x{height}")]
    NonPositiveDimension { width: i32, height: i32 },

    #[error("stage of {width}x{height} exceeds the limit of {max} cells")]
    TooLarge { width: i32, height: i32, max: usize },

    #[error("grid size must be positive, got {0}")]
    NonPositiveCellSize(i32),

    #[error("`{kind}` entry is not an [x, y] pair")]
    MalformedCell { kind: &'static str },

    #[error("stage needs exactly one human, found {0}")]
    HumanCount(usize),

    #[error("`{kind}` cell ({}, {}) lies outside the stage", .cell.x, .cell.y)]
    OutOfBounds { kind: &'static str, cell: Vec2 },

    #[error("cell ({}, {}) holds more than one item", .cell.x, .cell.y)]
    Overlap { cell: Vec2 },
}

/// Failure to turn a file on disk into a stage.
#[derive(Error, Debug)]
pub enum StageLoadError {
    #[error("could not read stage file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("stage file '{}' is not valid JSON: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Invalid(#[from] InvalidStageError),
}
