use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use crate::stage::{Stage, StageDescriptor, StageLoadError};

/// `dir/stage{n}.json`
pub fn stage_path(dir: &Path, stage_num: u32) -> PathBuf {
    dir.join(format!("stage{}.json", stage_num))
}

#[instrument(level = "debug")]
pub fn load_descriptor(path: &Path) -> Result<StageDescriptor, StageLoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| StageLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let descriptor = StageDescriptor::from_json(&text).map_err(|source| StageLoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "read stage descriptor");
    Ok(descriptor)
}

pub fn load_stage_file(path: &Path) -> Result<Stage, StageLoadError> {
    let descriptor = load_descriptor(path)?;
    Ok(Stage::load(&descriptor)?)
}

pub fn save_descriptor(path: &Path, descriptor: &StageDescriptor) -> Result<(), StageLoadError> {
    let json = descriptor.to_json().map_err(|source| StageLoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, json).map_err(|source| StageLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}
