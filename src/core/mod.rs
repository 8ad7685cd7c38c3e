pub mod bounded_grid;
pub mod bounds;
mod goals;
mod model_helpers;
mod models;
mod update;

pub use goals::{active_boxes, count_boxes_on_goals, is_solved};
pub use models::{Direction, EntityState, GameUpdate, MoveOutcome, Tile, UserAction, Vec2};
pub use update::resolve;
