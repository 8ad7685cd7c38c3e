use crate::core::Vec2;

/// A bounding box with one corner fixed at 0,0 and assumed to have positive extent
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundsOriginRoot {
    pub extent: Vec2,
}

impl BoundsOriginRoot {
    pub fn new(x: i32, y: i32) -> BoundsOriginRoot {
        BoundsOriginRoot {
            extent: Vec2 { x, y }
        }
    }

    pub fn contains(&self, pos: &Vec2) -> bool {
        pos.x >= 0 && pos.x < self.extent.x && pos.y >= 0 && pos.y < self.extent.y
    }

    /// Number of cells covered, or `None` if it does not fit in `usize`.
    pub fn area(&self) -> Option<usize> {
        let width = usize::try_from(self.extent.x.max(0)).ok()?;
        let height = usize::try_from(self.extent.y.max(0)).ok()?;
        width.checked_mul(height)
    }

    pub fn width(&self) -> i32 {
        self.extent.x
    }

    pub fn height(&self) -> i32 {
        self.extent.y
    }

    /// Clamps `pos` into the bounds, component-wise.
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        Vec2 {
            x: pos.x.clamp(0, (self.extent.x - 1).max(0)),
            y: pos.y.clamp(0, (self.extent.y - 1).max(0)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let bounds = BoundsOriginRoot::new(3, 2);
        assert!(bounds.contains(&Vec2::new(0, 0)));
        assert!(bounds.contains(&Vec2::new(2, 1)));
        assert!(!bounds.contains(&Vec2::new(3, 0)));
        assert!(!bounds.contains(&Vec2::new(0, 2)));
        assert!(!bounds.contains(&Vec2::new(-1, 0)));
    }

    #[test]
    fn area_does_not_overflow() {
        assert_eq!(BoundsOriginRoot::new(3, 2).area(), Some(6));
        assert_eq!(BoundsOriginRoot::new(-3, 2).area(), Some(0));
        assert_eq!(BoundsOriginRoot::new(70_000, 70_000).area(), 70_000usize.checked_mul(70_000));
    }

    #[test]
    fn clamp_pulls_into_range() {
        let bounds = BoundsOriginRoot::new(3, 2);
        assert_eq!(bounds.clamp(Vec2::new(5, -4)), Vec2::new(2, 0));
    }
}
