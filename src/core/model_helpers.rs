use std::ops::Add;
use crate::core::{Direction, EntityState, MoveOutcome, Vec2};

impl Vec2 {
    pub const fn new(x: i32, y: i32) -> Vec2 {
        Vec2 { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2 { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Direction {
    /// Unit step in stage coordinates. Up is `+y`.
    pub fn delta(self) -> Vec2 {
        match self {
            Direction::Up => Vec2 { x: 0, y: 1 },
            Direction::Down => Vec2 { x: 0, y: -1 },
            Direction::Left => Vec2 { x: -1, y: 0 },
            Direction::Right => Vec2 { x: 1, y: 0 },
        }
    }

    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }
}

impl EntityState {
    pub fn box_index_at(&self, cell: Vec2) -> Option<usize> {
        self.boxes.iter().position(|&b| b == cell)
    }

    pub fn has_box_at(&self, cell: Vec2) -> bool {
        self.boxes.contains(&cell)
    }

    /// Applies a resolved outcome. Both entities update together or not at all.
    pub fn commit(&mut self, outcome: MoveOutcome) {
        match outcome {
            MoveOutcome::Blocked => {}
            MoveOutcome::HumanMoved(human) => {
                self.human = human;
            }
            MoveOutcome::HumanPushedBox { human, box_index, new_box } => {
                self.human = human;
                self.boxes[box_index] = new_box;
            }
        }
    }
}

impl MoveOutcome {
    pub fn is_blocked(&self) -> bool {
        matches!(self, MoveOutcome::Blocked)
    }
}
