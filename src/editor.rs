use thiserror::Error;
use tracing::{debug, warn};
use crate::core::bounds::BoundsOriginRoot;
use crate::core::{Direction, Vec2};
use crate::stage::{InvalidStageError, Stage, StageDescriptor};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("cell ({}, {}) is already occupied", .cell.x, .cell.y)]
    Occupied { cell: Vec2 },

    #[error("cell ({}, {}) is outside the stage", .cell.x, .cell.y)]
    OutOfBounds { cell: Vec2 },

    #[error("nothing to erase at ({}, {})", .cell.x, .cell.y)]
    NothingToErase { cell: Vec2 },

    #[error("stage size must be positive, got {width}x{height}")]
    InvalidSize { width: i32, height: i32 },

    #[error("grid size must be positive, got {0}")]
    InvalidGridSize(i32),

    #[error("no tool selected")]
    NoToolSelected,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EditorItem {
    Border,
    Box,
    Goal,
    Human,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tool {
    Place(EditorItem),
    Eraser,
}

/// Authoring state for a stage: items placed on a grid plus a cursor.
#[derive(Clone, Debug)]
pub struct StageEditor {
    bounds: BoundsOriginRoot,
    grid_size: i32,
    borders: Vec<Vec2>,
    boxes: Vec<Vec2>,
    goals: Vec<Vec2>,
    human: Option<Vec2>,
    cursor: Vec2,
    tool: Option<Tool>,
}

impl StageEditor {
    pub fn new(width: i32, height: i32, grid_size: i32) -> Result<StageEditor, EditorError> {
        if width <= 0 || height <= 0 {
            return Err(EditorError::InvalidSize { width, height });
        }
        if grid_size <= 0 {
            return Err(EditorError::InvalidGridSize(grid_size));
        }
        Ok(StageEditor {
            bounds: BoundsOriginRoot::new(width, height),
            grid_size,
            borders: Vec::new(),
            boxes: Vec::new(),
            goals: Vec::new(),
            human: None,
            cursor: Vec2::new(0, 0),
            tool: None,
        })
    }

    /// Opens an existing stage for editing.
    pub fn from_descriptor(descriptor: &StageDescriptor) -> Result<StageEditor, InvalidStageError> {
        let stage = Stage::load(descriptor)?;
        let initial = stage.initial_state();
        Ok(StageEditor {
            bounds: stage.bounds(),
            grid_size: stage.cell_size(),
            borders: stage.borders().collect(),
            boxes: initial.boxes.clone(),
            goals: stage.goals().collect(),
            human: Some(initial.human),
            cursor: Vec2::new(0, 0),
            tool: None,
        })
    }

    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    pub fn tool(&self) -> Option<Tool> {
        self.tool
    }

    pub fn select(&mut self, tool: Tool) {
        self.tool = Some(tool);
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        self.cursor = self.bounds.clamp(self.cursor + direction.delta());
    }

    pub fn item_at(&self, cell: Vec2) -> Option<EditorItem> {
        if self.human == Some(cell) {
            Some(EditorItem::Human)
        } else if self.boxes.contains(&cell) {
            Some(EditorItem::Box)
        } else if self.goals.contains(&cell) {
            Some(EditorItem::Goal)
        } else if self.borders.contains(&cell) {
            Some(EditorItem::Border)
        } else {
            None
        }
    }

    pub fn apply_at_cursor(&mut self) -> Result<(), EditorError> {
        self.apply(self.cursor)
    }

    /// Uses the selected tool on `cell`. Every cell holds at most one item;
    /// placing a human moves the existing one.
    pub fn apply(&mut self, cell: Vec2) -> Result<(), EditorError> {
        let tool = self.tool.ok_or(EditorError::NoToolSelected)?;
        if !self.bounds.contains(&cell) {
            return Err(EditorError::OutOfBounds { cell });
        }
        let existing = self.item_at(cell);
        let result = match tool {
            Tool::Eraser => self.erase(cell, existing),
            Tool::Place(item) => match existing {
                Some(_) => Err(EditorError::Occupied { cell }),
                None => {
                    self.place(cell, item);
                    Ok(())
                }
            },
        };
        match &result {
            Ok(()) => debug!(?tool, x = cell.x, y = cell.y, "editor applied tool"),
            Err(err) => warn!(%err, "editor refused tool"),
        }
        result
    }

    fn place(&mut self, cell: Vec2, item: EditorItem) {
        match item {
            EditorItem::Border => self.borders.push(cell),
            EditorItem::Box => self.boxes.push(cell),
            EditorItem::Goal => self.goals.push(cell),
            EditorItem::Human => self.human = Some(cell),
        }
    }

    fn erase(&mut self, cell: Vec2, existing: Option<EditorItem>) -> Result<(), EditorError> {
        match existing {
            None => return Err(EditorError::NothingToErase { cell }),
            Some(EditorItem::Human) => self.human = None,
            Some(EditorItem::Box) => self.boxes.retain(|&b| b != cell),
            Some(EditorItem::Goal) => self.goals.retain(|&g| g != cell),
            Some(EditorItem::Border) => self.borders.retain(|&b| b != cell),
        }
        Ok(())
    }

    /// Changes the stage size, dropping anything that no longer fits.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), EditorError> {
        if width <= 0 || height <= 0 {
            return Err(EditorError::InvalidSize { width, height });
        }
        let bounds = BoundsOriginRoot::new(width, height);
        self.bounds = bounds;
        self.borders.retain(|c| bounds.contains(c));
        self.boxes.retain(|c| bounds.contains(c));
        self.goals.retain(|c| bounds.contains(c));
        self.human = self.human.filter(|c| bounds.contains(c));
        self.cursor = bounds.clamp(self.cursor);
        Ok(())
    }

    pub fn to_descriptor(&self) -> StageDescriptor {
        StageDescriptor::from_cells(
            self.width(),
            self.height(),
            self.grid_size,
            &self.borders,
            &self.boxes,
            &self.goals,
            self.human,
        )
    }

    /// Runs the exported descriptor through the same checks a game load does.
    pub fn validate(&self) -> Result<Stage, InvalidStageError> {
        Stage::load(&self.to_descriptor())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn editor() -> StageEditor {
        StageEditor::new(4, 3, 40).unwrap()
    }

    #[test]
    fn rejects_empty_size() {
        assert_eq!(
            StageEditor::new(0, 3, 40).unwrap_err(),
            EditorError::InvalidSize { width: 0, height: 3 }
        );
    }

    #[test]
    fn rejects_non_positive_grid_size() {
        assert_eq!(StageEditor::new(4, 3, 0).unwrap_err(), EditorError::InvalidGridSize(0));
        assert_eq!(StageEditor::new(4, 3, -5).unwrap_err(), EditorError::InvalidGridSize(-5));
    }

    #[test]
    fn apply_without_tool_fails() {
        let mut e = editor();
        assert_eq!(e.apply(Vec2::new(0, 0)), Err(EditorError::NoToolSelected));
    }

    #[test]
    fn places_and_refuses_occupied_cells() {
        let mut e = editor();
        e.select(Tool::Place(EditorItem::Box));
        e.apply(Vec2::new(1, 1)).unwrap();
        e.select(Tool::Place(EditorItem::Goal));
        assert_eq!(e.apply(Vec2::new(1, 1)), Err(EditorError::Occupied { cell: Vec2::new(1, 1) }));
        assert_eq!(e.item_at(Vec2::new(1, 1)), Some(EditorItem::Box));
    }

    #[test]
    fn placing_human_moves_it() {
        let mut e = editor();
        e.select(Tool::Place(EditorItem::Human));
        e.apply(Vec2::new(0, 0)).unwrap();
        e.apply(Vec2::new(2, 2)).unwrap();
        assert_eq!(e.item_at(Vec2::new(0, 0)), None);
        assert_eq!(e.item_at(Vec2::new(2, 2)), Some(EditorItem::Human));
        assert_eq!(e.to_descriptor().human, Some(vec![vec![2, 2]]));
    }

    #[test]
    fn eraser_removes_item() {
        let mut e = editor();
        e.select(Tool::Place(EditorItem::Border));
        e.apply(Vec2::new(3, 0)).unwrap();
        e.select(Tool::Eraser);
        e.apply(Vec2::new(3, 0)).unwrap();
        assert_eq!(e.item_at(Vec2::new(3, 0)), None);
        assert_eq!(
            e.apply(Vec2::new(3, 0)),
            Err(EditorError::NothingToErase { cell: Vec2::new(3, 0) })
        );
    }

    #[test]
    fn cursor_is_clamped() {
        let mut e = editor();
        e.move_cursor(Direction::Left);
        e.move_cursor(Direction::Down);
        assert_eq!(e.cursor(), Vec2::new(0, 0));
        for _ in 0..10 {
            e.move_cursor(Direction::Up);
            e.move_cursor(Direction::Right);
        }
        assert_eq!(e.cursor(), Vec2::new(3, 2));
    }

    #[test]
    fn resize_drops_items_outside() {
        let mut e = editor();
        e.select(Tool::Place(EditorItem::Box));
        e.apply(Vec2::new(3, 2)).unwrap();
        e.apply(Vec2::new(0, 0)).unwrap();
        e.resize(2, 2).unwrap();
        assert_eq!(e.to_descriptor().boxes, Some(vec![vec![0, 0]]));
    }

    #[test]
    fn exported_stage_is_playable() {
        let mut e = editor();
        e.select(Tool::Place(EditorItem::Human));
        e.apply(Vec2::new(0, 0)).unwrap();
        e.select(Tool::Place(EditorItem::Box));
        e.apply(Vec2::new(1, 0)).unwrap();
        e.select(Tool::Place(EditorItem::Goal));
        e.apply(Vec2::new(2, 0)).unwrap();

        let stage = e.validate().unwrap();
        assert_eq!(stage.total_goals(), 1);

        let reopened = StageEditor::from_descriptor(&e.to_descriptor()).unwrap();
        assert_eq!(reopened.to_descriptor(), e.to_descriptor());
    }

    #[test]
    fn stage_without_human_does_not_validate() {
        let e = editor();
        assert_eq!(e.validate().unwrap_err(), InvalidStageError::HumanCount(0));
    }
}
