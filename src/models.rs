use std::time::Duration;
use crate::controller::EngineSnapshot;
use crate::core::GameUpdate;

pub struct GameRenderState {
    pub game: EngineSnapshot,
    pub elapsed: Duration,
    pub error: Option<String>,
    pub last_update: Option<GameUpdate>,
}

pub struct EditorRenderState {
    pub status: Option<String>,
    pub out_path: String,
}
