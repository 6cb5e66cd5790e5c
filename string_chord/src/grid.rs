use num_traits::{NumCast, Unsigned};

use crate::geometry::Point;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid<T = usize> {
    pub height: T,
    pub width: T,
}

impl<T> Grid<T> {
    pub fn new(height: T, width: T) -> Self {
        Self { height, width }
    }
}

impl<T: PartialEq> Grid<T> {
    pub fn is_square(&self) -> bool {
        self.height == self.width
    }
}

impl Grid {
    pub fn square(side: usize) -> Self {
        Self::new(side, side)
    }

    pub fn area(&self) -> usize {
        self.height * self.width
    }

    /// Inverse of [`Grid::index_of`]: `(row, col)` of a flat pixel index.
    pub fn coords_of(&self, index: usize) -> (usize, usize) {
        (index / self.width, index % self.width)
    }
}

impl<T: NumCast + Unsigned + PartialOrd + Copy> Grid<T> {
    pub fn index_of(&self, point: Point<T>) -> Option<T> {
        if point.x < self.width && point.y < self.height {
            Some(point.y * self.width + point.x)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_and_coords_agree() {
        let grid = Grid::new(3usize, 5usize);
        let index = grid.index_of(Point { x: 4, y: 2 }).unwrap();
        assert_eq!(index, 14);
        assert_eq!(grid.coords_of(index), (2, 4));
    }

    #[test]
    fn out_of_bounds_has_no_index() {
        let grid = Grid::square(4);
        assert_eq!(grid.index_of(Point { x: 4, y: 0 }), None);
        assert_eq!(grid.index_of(Point { x: 0, y: 4 }), None);
    }
}
