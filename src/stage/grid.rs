use tracing::{info, instrument, warn};
use crate::core::bounded_grid::BoundedGrid;
use crate::core::bounds::BoundsOriginRoot;
use crate::core::{EntityState, Tile, Vec2};
use crate::stage::descriptor::{pairs_to_cells, required};
use crate::stage::{InvalidStageError, StageDescriptor};

/// Upper bound on `width * height` for a loadable stage.
pub const MAX_STAGE_CELLS: usize = 1 << 20;

/// Stage geometry. Immutable once loaded.
#[derive(Clone, Debug)]
pub struct Stage {
    cell_size: i32,
    terrain: BoundedGrid<Tile>,
    initial: EntityState,
}

impl Stage {
    /// Parses and validates a descriptor. Nothing is returned unless every
    /// declared cell is in bounds and no two items share a cell.
    #[instrument(level = "debug", skip(descriptor))]
    pub fn load(descriptor: &StageDescriptor) -> Result<Stage, InvalidStageError> {
        let result = Self::try_load(descriptor);
        match &result {
            Ok(stage) => info!(
                width = stage.width(),
                height = stage.height(),
                boxes = stage.initial.boxes.len(),
                "stage loaded"
            ),
            Err(err) => warn!(%err, "rejected stage descriptor"),
        }
        result
    }

    fn try_load(descriptor: &StageDescriptor) -> Result<Stage, InvalidStageError> {
        let width = *required(&descriptor.width, "width")?;
        let height = *required(&descriptor.height, "height")?;
        let cell_size = *required(&descriptor.grid_size, "gridSize")?;
        let border = pairs_to_cells(required(&descriptor.border, "border")?, "border")?;
        let boxes = pairs_to_cells(required(&descriptor.boxes, "box")?, "box")?;
        let goal = pairs_to_cells(required(&descriptor.goal, "goal")?, "goal")?;
        let human = pairs_to_cells(required(&descriptor.human, "human")?, "human")?;

        if width <= 0 || height <= 0 {
            return Err(InvalidStageError::NonPositiveDimension { width, height });
        }
        let bounds = BoundsOriginRoot::new(width, height);
        if bounds.area().is_none_or(|area| area > MAX_STAGE_CELLS) {
            return Err(InvalidStageError::TooLarge { width, height, max: MAX_STAGE_CELLS });
        }
        if cell_size <= 0 {
            return Err(InvalidStageError::NonPositiveCellSize(cell_size));
        }
        let &[human] = human.as_slice() else {
            return Err(InvalidStageError::HumanCount(human.len()));
        };

        let mut occupied = BoundedGrid::new(bounds, false);
        let mut terrain = BoundedGrid::new(bounds, Tile::Floor);

        let groups: [(&'static str, Option<Tile>, &[Vec2]); 4] = [
            ("border", Some(Tile::Border), border.as_slice()),
            ("goal", Some(Tile::Goal), goal.as_slice()),
            ("box", None, boxes.as_slice()),
            ("human", None, std::slice::from_ref(&human)),
        ];
        for (kind, tile, cells) in groups {
            for cell in cells {
                if !bounds.contains(cell) {
                    return Err(InvalidStageError::OutOfBounds { kind, cell: *cell });
                }
                if occupied[cell] {
                    return Err(InvalidStageError::Overlap { cell: *cell });
                }
                occupied[cell] = true;
                if let Some(tile) = tile {
                    terrain[cell] = tile;
                }
            }
        }

        Ok(Stage {
            cell_size,
            terrain,
            initial: EntityState { human, boxes },
        })
    }

    pub fn width(&self) -> i32 {
        self.terrain.size().width()
    }

    pub fn height(&self) -> i32 {
        self.terrain.size().height()
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    pub fn bounds(&self) -> BoundsOriginRoot {
        self.terrain.size()
    }

    pub fn initial_state(&self) -> &EntityState {
        &self.initial
    }

    /// Terrain at `cell`, or `None` outside the declared bounds.
    pub fn tile(&self, cell: Vec2) -> Option<Tile> {
        self.terrain.get(&cell).copied()
    }

    pub fn is_border(&self, cell: Vec2) -> bool {
        self.tile(cell) == Some(Tile::Border)
    }

    pub fn is_goal(&self, cell: Vec2) -> bool {
        self.tile(cell) == Some(Tile::Goal)
    }

    /// Borders block movement, and so does everything outside the stage.
    pub fn is_blocked(&self, cell: Vec2) -> bool {
        match self.tile(cell) {
            None | Some(Tile::Border) => true,
            Some(_) => false,
        }
    }

    pub fn borders(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.cells_with(Tile::Border)
    }

    pub fn goals(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.cells_with(Tile::Goal)
    }

    pub fn total_goals(&self) -> usize {
        self.goals().count()
    }

    fn cells_with(&self, tile: Tile) -> impl Iterator<Item = Vec2> + '_ {
        self.terrain
            .iter()
            .filter(move |&(_, &t)| t == tile)
            .map(|(pos, _)| pos)
    }

    /// Converts back into the serialized form.
    pub fn to_descriptor(&self) -> StageDescriptor {
        let borders: Vec<Vec2> = self.borders().collect();
        let goals: Vec<Vec2> = self.goals().collect();
        StageDescriptor::from_cells(
            self.width(),
            self.height(),
            self.cell_size,
            &borders,
            &self.initial.boxes,
            &goals,
            Some(self.initial.human),
        )
    }
}
