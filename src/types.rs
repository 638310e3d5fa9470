//! Type definitions shared by the generator, the pathfinder and the item layer.

use std::fmt;

/// Kind of a single grid cell.
///
/// The generator and the pathfinder only tell passable cells apart from walls. The marker
/// variants are laid on top of floor cells by the item layer and stay passable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Solid wall material.
    ///
    /// This variant represents both the outer border and the wall thickness left between two
    /// logical cells of the maze.
    #[default]
    Wall,
    /// Carved floor.
    Floor,
    /// Floor cell holding a food pickup.
    Food,
    /// Floor cell holding the spawn marker.
    Spawn,
}

impl CellKind {
    /// Returns whether a walker may stand on a cell of this kind.
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Wall)
    }

    /// Returns the character used for this kind in the plain-text grid layout.
    ///
    /// The codes follow the numeric tile values of the game the maze is embedded in: `1` for
    /// walls, `0` for floor, `2` for food and `3` for the spawn marker.
    pub const fn symbol(self) -> char {
        match self {
            Self::Wall => '1',
            Self::Floor => '0',
            Self::Food => '2',
            Self::Spawn => '3',
        }
    }

    /// Maps a layout character back to its cell kind.
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '1' => Some(Self::Wall),
            '0' => Some(Self::Floor),
            '2' => Some(Self::Food),
            '3' => Some(Self::Spawn),
            _ => None,
        }
    }
}

/// A grid coordinate.
///
/// `x` is the column and `y` the row, both 0-indexed from the top-left corner. Points order
/// row-major, which keeps every collection of points iterated in a reproducible order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    /// Column index.
    pub x: usize,
    /// Row index.
    pub y: usize,
}

impl Point {
    /// Builds a point from a column and a row.
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the Manhattan distance to another point.
    ///
    /// This is the admissible heuristic of the pathfinder: with unit-cost moves restricted to
    /// the four axis directions, no route can be shorter than this distance.
    pub const fn manhattan(self, other: Self) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Returns the point shifted by the given offsets, or `None` if that leaves `usize` range.
    pub const fn offset(self, dx: isize, dy: isize) -> Option<Self> {
        let Some(x) = self.x.checked_add_signed(dx) else {
            return None;
        };
        let Some(y) = self.y.checked_add_signed(dy) else {
            return None;
        };

        Some(Self { x, y })
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{},{}", self.x, self.y)
    }
}

/// An ordered route of 4-adjacent points, start and end inclusive.
///
/// An empty path means no route exists between the requested endpoints.
pub type Path = Vec<Point>;
