use crate::core::{Direction, EntityState, MoveOutcome};
use crate::stage::Stage;

/// Decides what a single step in `direction` does, without mutating anything.
///
/// The human may not enter a border (or leave the stage). Walking into a box
/// pushes it one cell, provided the cell beyond is neither blocked nor holds
/// another box. Only one box is ever considered, so a row of two boxes cannot
/// be pushed.
pub fn resolve(direction: Direction, game: &EntityState, stage: &Stage) -> MoveOutcome {
    let delta = direction.delta();
    let next_human = game.human + delta;

    if stage.is_blocked(next_human) {
        return MoveOutcome::Blocked;
    }

    let Some(box_index) = game.box_index_at(next_human) else {
        return MoveOutcome::HumanMoved(next_human);
    };

    let next_box = next_human + delta;
    if stage.is_blocked(next_box) || game.has_box_at(next_box) {
        return MoveOutcome::Blocked;
    }

    MoveOutcome::HumanPushedBox {
        human: next_human,
        box_index,
        new_box: next_box,
    }
}
