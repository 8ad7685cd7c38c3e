mod descriptor;
mod error;
mod grid;
mod loader;

pub use descriptor::StageDescriptor;
pub use error::{InvalidStageError, StageLoadError};
pub use grid::{MAX_STAGE_CELLS, Stage};
pub use loader::{load_descriptor, load_stage_file, save_descriptor, stage_path};
