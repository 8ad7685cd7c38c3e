use crate::core::bounds::BoundsOriginRoot;
use crate::core::Vec2;

/// Dense row-major storage over a [`BoundsOriginRoot`], row 0 being `y == 0`.
#[derive(Clone, Debug)]
pub struct BoundedGrid<T> {
    bounds: BoundsOriginRoot,
    cells: Vec<T>,
}

impl<T> BoundedGrid<T> {
    pub fn new_with_size(width: i32, height: i32, default: T) -> Self
    where
        T: Clone,
    {
        let bounds = BoundsOriginRoot::new(width, height);
        BoundedGrid::new(bounds, default)
    }

    pub fn new(bounds: BoundsOriginRoot, default: T) -> Self
    where
        T: Clone,
    {
        let cells = vec![default; bounds.area().unwrap_or(0)];
        BoundedGrid {
            bounds,
            cells,
        }
    }

    pub fn size(&self) -> BoundsOriginRoot {
        self.bounds
    }

    pub fn contains(&self, pos: &Vec2) -> bool {
        self.bounds.contains(pos)
    }

    pub fn get(&self, pos: &Vec2) -> Option<&T> {
        if !self.bounds.contains(pos) {
            return None;
        }
        Some(&self[pos])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Vec2, &T)> {
        let width = self.bounds.extent.x;
        self.cells.iter().enumerate().map(move |(i, t)| {
            let i = i as i32;
            (Vec2 { x: i % width, y: i / width }, t)
        })
    }
}

impl<T> std::ops::Index<&Vec2> for BoundedGrid<T> {
    type Output = T;

    fn index(&self, index: &Vec2) -> &Self::Output {
        &self.cells[(index.y * self.bounds.extent.x + index.x) as usize]
    }
}

impl<T> std::ops::IndexMut<&Vec2> for BoundedGrid<T> {
    fn index_mut(&mut self, index: &Vec2) -> &mut Self::Output {
        &mut self.cells[(index.y * self.bounds.extent.x + index.x) as usize]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn get_outside_bounds_is_none() {
        let mut grid = BoundedGrid::new_with_size(2, 2, 0u8);
        grid[&Vec2::new(1, 1)] = 7;
        assert_eq!(grid.get(&Vec2::new(1, 1)), Some(&7));
        assert_eq!(grid.get(&Vec2::new(2, 1)), None);
        assert_eq!(grid.get(&Vec2::new(0, -1)), None);
    }

    #[test]
    fn iter_yields_coordinates_row_major() {
        let grid = BoundedGrid::new_with_size(2, 2, ());
        let cells: Vec<Vec2> = grid.iter().map(|(pos, _)| pos).collect();
        assert_eq!(cells, vec![Vec2::new(0, 0), Vec2::new(1, 0), Vec2::new(0, 1), Vec2::new(1, 1)]);
    }
}
