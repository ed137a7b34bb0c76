use std::collections::HashSet;
use std::iter::FromIterator;

use crate::{Cell, GridInt};

// 32x24 cells, the original 640x480 playfield at 20px per cell
pub const GRID_WIDTH: GridInt = 32;
pub const GRID_HEIGHT: GridInt = 24;

/// Normalizes a coordinate onto the torus: the result is always in
/// `[0, extent)`, however far out of range the input is on either side.
pub fn wrap(coord: i32, extent: GridInt) -> GridInt {
    coord.rem_euclid(extent as i32) as GridInt
}

pub fn center() -> Cell {
    (GRID_WIDTH / 2, GRID_HEIGHT / 2)
}

/// Every cell of the grid, row by row.
pub fn cells() -> impl Iterator<Item = Cell> {
    (0..GRID_HEIGHT).flat_map(|y| (0..GRID_WIDTH).map(move |x| (x, y)))
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }
}

/// The set of snake-occupied cells. Kept in lockstep with the snake body and
/// consulted both for self-collision and to keep apples off the snake.
#[derive(Debug, Default)]
pub struct Occupancy(HashSet<Cell>);

impl Occupancy {
    pub fn new() -> Self {
        Occupancy(HashSet::new())
    }

    pub fn insert(&mut self, cell: Cell) {
        self.0.insert(cell);
    }

    pub fn remove(&mut self, cell: Cell) {
        self.0.remove(&cell);
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.0.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<Cell> for Occupancy {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Occupancy(iter.into_iter().collect())
    }
}
