//! Grid data and plain-text layout module.
//!
//! This module contains the [`Grid`] value handed between the generator, the pathfinder and
//! their callers, together with its plain-text layout: one line per row, one symbol per cell.

use std::{fmt, str::FromStr};

use color_eyre::eyre::{bail, ensure, eyre, OptionExt as _, Report, Result};

use crate::types::{CellKind, Point};

/// Offsets of the four axis-aligned neighbours, in up, down, left, right order.
pub(crate) const DIRECTIONS: [(isize, isize); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Rectangular maze grid.
///
/// This structure stores cells row-major, addressed by [`Point`] with `x` as the column and `y`
/// as the row. Its dimensions are fixed at construction and never change afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Cell storage as rows of cells.
    ///
    /// Every row holds exactly [`width`](Grid::width) cells.
    cells: Vec<Vec<CellKind>>,
}

impl Grid {
    /// Builds a grid of the given size with every cell set to `fill`.
    pub fn filled(width: usize, height: usize, fill: CellKind) -> Self {
        Self {
            cells: vec![vec![fill; width]; height],
        }
    }

    /// Builds a grid from rows of cells.
    ///
    /// # Errors
    ///
    /// This function returns an error if there are no rows, if the first row is empty or if the
    /// rows differ in length.
    pub fn from_rows(cells: Vec<Vec<CellKind>>) -> Result<Self> {
        let width = cells
            .first()
            .ok_or_eyre("a grid needs at least one row")?
            .len();
        ensure!(width > 0, "a grid needs at least one column");

        if let Some((index, row)) = cells
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != width)
        {
            bail!(
                "row {index} holds {} cells but the first row holds {width}",
                row.len()
            );
        }

        Ok(Self { cells })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.cells.len()
    }

    /// Read-only view of the rows.
    pub fn rows(&self) -> &[Vec<CellKind>] {
        &self.cells
    }

    /// Returns whether the point lies inside the grid.
    pub fn contains(&self, point: Point) -> bool {
        point.x < self.width() && point.y < self.height()
    }

    /// Returns the cell at `point`, or `None` when it is out of bounds.
    pub fn get(&self, point: Point) -> Option<CellKind> {
        self.cells
            .get(point.y)
            .and_then(|row| row.get(point.x))
            .copied()
    }

    /// Overwrites the cell at `point`.
    ///
    /// Returns `false` and leaves the grid untouched when the point is out of bounds.
    pub fn set(&mut self, point: Point, kind: CellKind) -> bool {
        match self
            .cells
            .get_mut(point.y)
            .and_then(|row| row.get_mut(point.x))
        {
            Some(cell) => {
                *cell = kind;
                true
            }
            None => false,
        }
    }

    /// Returns whether `point` is inside the grid and passable.
    pub fn is_passable(&self, point: Point) -> bool {
        self.get(point).is_some_and(CellKind::is_passable)
    }

    /// Returns whether `point` sits on the outermost ring of cells.
    pub fn is_border(&self, point: Point) -> bool {
        self.contains(point)
            && (point.x == 0
                || point.y == 0
                || point.x + 1 == self.width()
                || point.y + 1 == self.height())
    }

    /// Iterates the passable 4-adjacent neighbours of `point`.
    ///
    /// Neighbours come in up, down, left, right order; the pathfinder relies on this order to
    /// break ties reproducibly.
    pub fn neighbours(&self, point: Point) -> impl Iterator<Item = Point> + '_ {
        DIRECTIONS
            .into_iter()
            .filter_map(move |(dx, dy)| point.offset(dx, dy))
            .filter(move |neighbour| self.is_passable(*neighbour))
    }

    /// Iterates every point of the grid in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, _)| Point::new(x, y))
        })
    }

    /// Returns the entry opening: the first passable cell of the bottom row.
    pub fn entry(&self) -> Option<Point> {
        let y = self.height().checked_sub(1)?;
        self.first_passable_in_row(y)
    }

    /// Returns the exit opening: the first passable cell of the top row.
    pub fn exit(&self) -> Option<Point> {
        self.first_passable_in_row(0)
    }

    /// Finds the leftmost passable cell of row `y`.
    fn first_passable_in_row(&self, y: usize) -> Option<Point> {
        self.cells
            .get(y)?
            .iter()
            .position(|cell| cell.is_passable())
            .map(|x| Point::new(x, y))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.cells.iter().enumerate() {
            if index > 0 {
                writeln!(formatter)?;
            }
            for cell in row {
                write!(formatter, "{}", cell.symbol())?;
            }
        }

        Ok(())
    }
}

impl FromStr for Grid {
    type Err = Report;

    /// Parses the plain-text layout.
    ///
    /// Surrounding whitespace is ignored, as is trailing whitespace at the end of each line.
    /// Every other character must be a cell symbol and all rows must be equally long.
    fn from_str(input: &str) -> Result<Self> {
        let mut rows = Vec::new();

        for (line_index, line) in input.trim().lines().enumerate() {
            let row = line
                .trim_end()
                .chars()
                .enumerate()
                .map(|(column, symbol)| {
                    CellKind::from_symbol(symbol).ok_or_else(|| {
                        eyre!("invalid cell symbol {symbol:?} at row {line_index}, column {column}")
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            rows.push(row);
        }

        Self::from_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds the small hand-drawn grid shared by several tests.
    fn sample_grid() -> Grid {
        "\
10111
10001
11101
10001
11101"
            .parse()
            .expect("sample layout should parse")
    }

    #[test]
    fn test_grid_filled_dimensions() {
        let grid = Grid::filled(5, 3, CellKind::Wall);

        assert_eq!(grid.width(), 5, "width is the column count");
        assert_eq!(grid.height(), 3, "height is the row count");
        assert!(
            grid.points().all(|point| grid.get(point) == Some(CellKind::Wall)),
            "every cell takes the fill value"
        );
    }

    #[test]
    fn test_grid_get_and_set() {
        let mut grid = Grid::filled(3, 3, CellKind::Wall);

        assert!(grid.set(Point::new(1, 2), CellKind::Floor), "in-bounds write succeeds");
        assert_eq!(grid.get(Point::new(1, 2)), Some(CellKind::Floor), "write is visible");
        assert!(!grid.set(Point::new(3, 0), CellKind::Floor), "out-of-bounds write fails");
        assert_eq!(grid.get(Point::new(0, 3)), None, "out-of-bounds read is None");
    }

    #[test]
    fn test_grid_neighbours_order_and_filtering() {
        let grid = sample_grid();

        let neighbours: Vec<_> = grid.neighbours(Point::new(2, 1)).collect();
        assert_eq!(
            neighbours,
            vec![Point::new(1, 1), Point::new(3, 1)],
            "only passable neighbours are listed, left before right"
        );

        let corner: Vec<_> = grid.neighbours(Point::new(0, 0)).collect();
        assert_eq!(corner, vec![Point::new(1, 0)], "offsets below zero are skipped");
    }

    #[test]
    fn test_grid_openings() {
        let grid = sample_grid();

        assert_eq!(grid.exit(), Some(Point::new(1, 0)), "exit is on the top row");
        assert_eq!(grid.entry(), Some(Point::new(3, 4)), "entry is on the bottom row");
    }

    #[test]
    fn test_grid_border_detection() {
        let grid = sample_grid();

        assert!(grid.is_border(Point::new(0, 2)), "left column is border");
        assert!(grid.is_border(Point::new(4, 4)), "bottom-right corner is border");
        assert!(!grid.is_border(Point::new(2, 2)), "centre is interior");
        assert!(!grid.is_border(Point::new(9, 9)), "outside points are not border");
    }

    #[test]
    fn test_grid_display_matches_parsed_layout() {
        let layout = "111\n101\n111";
        let grid: Grid = layout.parse().expect("layout should parse");

        assert_eq!(grid.to_string(), layout, "display writes the parsed layout back");
    }

    #[test]
    fn test_grid_parse_trims_whitespace() {
        let grid: Grid = "\n  111\n101  \n111\n\n"
            .parse()
            .expect("whitespace around the layout is ignored");

        assert_eq!(grid.height(), 3, "blank lines around the layout are dropped");
        assert_eq!(grid.width(), 3, "trailing spaces are dropped");
    }

    #[test]
    fn test_grid_parse_empty_input() {
        assert!("".parse::<Grid>().is_err(), "empty layout is rejected");
        assert!("   \n ".parse::<Grid>().is_err(), "blank layout is rejected");
    }

    #[test]
    fn test_grid_parse_inconsistent_rows() {
        assert!(
            "111\n10\n111".parse::<Grid>().is_err(),
            "rows of different length are rejected"
        );
    }

    #[test]
    fn test_grid_parse_invalid_symbol() {
        let error = "111\n1x1\n111"
            .parse::<Grid>()
            .expect_err("unknown symbols are rejected");

        assert!(
            error.to_string().contains("row 1, column 1"),
            "error names the offending position"
        );
    }

    #[test]
    fn test_grid_from_rows_rejects_empty_row() {
        assert!(
            Grid::from_rows(vec![Vec::new()]).is_err(),
            "zero-width grids are rejected"
        );
    }
}
