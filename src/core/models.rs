/// A grid cell coordinate. Origin is the bottom-left cell, `y` grows upward.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
pub struct Vec2 {
    pub x: i32,
    pub y: i32,
}

/// Static terrain of a single cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Tile {
    #[default]
    Floor,
    Border,
    Goal,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum UserAction {
    Move(Direction),
    Undo,
    Redo,
    Noop,
}

/// Mutable positions of everything that can move. Box indices are stable for
/// the lifetime of a stage.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct EntityState {
    pub human: Vec2,
    pub boxes: Vec<Vec2>,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum MoveOutcome {
    Blocked,
    HumanMoved(Vec2),
    HumanPushedBox {
        human: Vec2,
        box_index: usize,
        new_box: Vec2,
    },
}

/// What a single controller action did to the engine.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameUpdate {
    Committed(MoveOutcome),
    Rejected,
    Navigated { move_num: usize },
    NoChange,
}
