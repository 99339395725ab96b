//! # Roads
//!
//! A road is a strip of cells with a centerline divider running down its
//! middle and plain lanes on either side. Unlike walled structures, a road at
//! `(x1, y1)` of size `width x height` covers exactly the cells
//! `x1..x1 + width` by `y1..y1 + height`.

use crate::generation::Structure;
use crate::Position;
use serde::{Deserialize, Serialize};

/// Direction a road runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A straight road segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Road {
    pub bounds: Structure,
    pub axis: Axis,
}

impl Road {
    /// Creates a road, taking its direction from the longer side.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprawl::generation::{Axis, Road, Structure};
    ///
    /// let road = Road::new(Structure::new(5, 0, 3, 20));
    /// assert_eq!(road.axis, Axis::Vertical);
    /// assert_eq!(road.thickness(), 3);
    /// ```
    pub fn new(bounds: Structure) -> Self {
        let axis = if bounds.width < bounds.height {
            Axis::Vertical
        } else {
            Axis::Horizontal
        };
        Self { bounds, axis }
    }

    pub fn is_vertical(&self) -> bool {
        self.axis == Axis::Vertical
    }

    /// Width across the direction of travel.
    pub fn thickness(&self) -> i32 {
        match self.axis {
            Axis::Vertical => self.bounds.width,
            Axis::Horizontal => self.bounds.height,
        }
    }

    /// Length along the direction of travel.
    pub fn length(&self) -> i32 {
        match self.axis {
            Axis::Vertical => self.bounds.height,
            Axis::Horizontal => self.bounds.width,
        }
    }

    fn x_range(&self) -> std::ops::Range<i32> {
        self.bounds.x1..self.bounds.x1 + self.bounds.width
    }

    fn y_range(&self) -> std::ops::Range<i32> {
        self.bounds.y1..self.bounds.y1 + self.bounds.height
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.x_range().contains(&pos.x) && self.y_range().contains(&pos.y)
    }

    /// Every cell of the road.
    pub fn cells(&self) -> Vec<Position> {
        let mut cells = Vec::new();
        for y in self.y_range() {
            for x in self.x_range() {
                cells.push(Position::new(x, y));
            }
        }
        cells
    }

    /// Whether `pos` lies on the middle cell line.
    pub fn is_center_line(&self, pos: Position) -> bool {
        if !self.contains(pos) {
            return false;
        }
        match self.axis {
            Axis::Vertical => pos.x == self.bounds.x1 + self.bounds.width / 2,
            Axis::Horizontal => pos.y == self.bounds.y1 + self.bounds.height / 2,
        }
    }

    pub fn center_line(&self) -> Vec<Position> {
        self.cells()
            .into_iter()
            .filter(|pos| self.is_center_line(*pos))
            .collect()
    }

    pub fn lanes(&self) -> Vec<Position> {
        self.cells()
            .into_iter()
            .filter(|pos| !self.is_center_line(*pos))
            .collect()
    }

    /// Cells where this road meets a road running the other way.
    ///
    /// The patch is the vertical road's columns crossed with the horizontal
    /// road's rows, so it is at most `thickness x thickness`. It is returned
    /// when the roads overlap or touch side to end; roads that only meet
    /// diagonally, run the same way, or do not touch give `None`.
    pub fn junction_with(&self, other: &Road) -> Option<Vec<Position>> {
        let (vertical, horizontal) = match (self.axis, other.axis) {
            (Axis::Vertical, Axis::Horizontal) => (self, other),
            (Axis::Horizontal, Axis::Vertical) => (other, self),
            _ => return None,
        };

        let vx = vertical.x_range();
        let vy = vertical.y_range();
        let hx = horizontal.x_range();
        let hy = horizontal.y_range();

        let x_overlap = hx.start < vx.end && hx.end > vx.start;
        let x_touch = hx.start <= vx.end && hx.end >= vx.start;
        let y_overlap = vy.start < hy.end && vy.end > hy.start;
        let y_touch = vy.start <= hy.end && vy.end >= hy.start;

        if !(x_touch && y_touch) || !(x_overlap || y_overlap) {
            return None;
        }

        let mut patch = Vec::new();
        for y in hy {
            for x in vx.clone() {
                patch.push(Position::new(x, y));
            }
        }
        Some(patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_from_aspect() {
        assert_eq!(Road::new(Structure::new(0, 5, 10, 3)).axis, Axis::Horizontal);
        assert_eq!(Road::new(Structure::new(5, 0, 3, 10)).axis, Axis::Vertical);
    }

    #[test]
    fn test_center_line_is_centered() {
        let road = Road::new(Structure::new(4, 0, 3, 6));
        let center = road.center_line();
        assert_eq!(center.len(), 6);
        assert!(center.iter().all(|pos| pos.x == 5));

        let lanes = road.lanes();
        assert_eq!(lanes.len(), 12);
        assert!(lanes.iter().all(|pos| pos.x == 4 || pos.x == 6));
    }

    #[test]
    fn test_crossing_junction() {
        let horizontal = Road::new(Structure::new(0, 5, 10, 3));
        let vertical = Road::new(Structure::new(5, 0, 3, 10));

        let patch = horizontal.junction_with(&vertical).unwrap();
        assert_eq!(patch.len(), 9);
        assert!(patch.iter().all(|pos| (5..8).contains(&pos.x) && (5..8).contains(&pos.y)));
        assert_eq!(vertical.junction_with(&horizontal), Some(patch));
    }

    #[test]
    fn test_tee_junction_lands_on_through_road() {
        // Horizontal road ends right where the vertical road begins.
        let horizontal = Road::new(Structure::new(0, 10, 12, 3));
        let vertical = Road::new(Structure::new(12, 0, 3, 30));

        let patch = horizontal.junction_with(&vertical).unwrap();
        assert_eq!(patch.len(), 9);
        assert!(patch.iter().all(|pos| vertical.contains(*pos)));
        assert!(patch.iter().any(|pos| vertical.is_center_line(*pos)));
    }

    #[test]
    fn test_no_junction_for_parallel_or_distant_roads() {
        let a = Road::new(Structure::new(0, 0, 10, 3));
        let b = Road::new(Structure::new(0, 3, 10, 3));
        assert_eq!(a.junction_with(&b), None);

        let far = Road::new(Structure::new(20, 20, 3, 10));
        assert_eq!(a.junction_with(&far), None);

        // Only the corners meet.
        let diagonal = Road::new(Structure::new(10, 3, 3, 10));
        assert_eq!(a.junction_with(&diagonal), None);
    }
}
