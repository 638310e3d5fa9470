//! Maze generation module.
//!
//! This module builds perfect mazes row by row with Eller's algorithm. Logical cells sit on odd
//! grid coordinates and the even coordinates between them hold the wall material, so every
//! carved passage is one cell wide and every wall one cell thick.

use std::collections::BTreeMap;

use log::{debug, trace};
use rand::{rngs::StdRng, Rng, SeedableRng as _};

use crate::{
    grid::Grid,
    types::{CellKind, Point},
};

/// Smallest grid side produced by the generator.
///
/// Three cells leave room for one logical cell surrounded by the border, which is the smallest
/// maze that can still hold an entry and an exit.
pub const MIN_DIMENSION: usize = 3;

/// Probability of merging two horizontally adjacent cells of different sets.
const JOIN_PROBABILITY: f64 = 0.5;

/// Probability of a cell extending its set down into the next logical row.
const DESCEND_PROBABILITY: f64 = 0.5;

/// Generates a perfect maze with randomness drawn from `rng`.
///
/// The requested dimensions are first clamped to [`MIN_DIMENSION`] and then rounded up to the
/// next odd number, so the grid may be one cell wider or taller than requested; read the actual
/// size from the returned [`Grid`]. The outer border is solid wall except for the exit on the top
/// row and the entry on the bottom row, both in the same column.
pub fn generate<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Grid {
    let cols = normalize_dimension(width);
    let rows = normalize_dimension(height);
    debug!("generating maze: requested {width}x{height}, normalized to {cols}x{rows}");

    let mut grid = Grid::filled(cols, rows, CellKind::Wall);
    carve_passages(&mut grid, rng);
    seal_border(&mut grid);
    carve_openings(&mut grid);

    grid
}

/// Generates a perfect maze from an optional seed.
///
/// The same seed always produces the same grid. Without a seed the generator is seeded from the
/// operating system's entropy source.
pub fn generate_seeded(width: usize, height: usize, seed: Option<u64>) -> Grid {
    let mut rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    generate(width, height, &mut rng)
}

/// Clamps a requested side length to the minimum and rounds it up to an odd value.
const fn normalize_dimension(requested: usize) -> usize {
    let clamped = if requested < MIN_DIMENSION {
        MIN_DIMENSION
    } else {
        requested
    };

    if clamped % 2 == 0 {
        clamped + 1
    } else {
        clamped
    }
}

/// Grid coordinate of the logical cell at `index`.
const fn grid_coord(index: usize) -> usize {
    index * 2 + 1
}

/// Runs Eller's algorithm over the interior of an all-wall grid.
///
/// Only the current logical row's sets are tracked: `sets[column]` is the set id of that column's
/// cell. Merging rewrites every occurrence of the absorbed id, which is all the bookkeeping a
/// single row window needs.
fn carve_passages<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    let logical_cols = (grid.width() - 1) / 2;
    let logical_rows = (grid.height() - 1) / 2;

    let mut sets: Vec<usize> = (0..logical_cols).collect();
    let mut next_set_id = logical_cols;

    for row in 0..logical_rows {
        let y = grid_coord(row);
        let is_last_row = row + 1 == logical_rows;

        for column in 0..logical_cols {
            let _ = grid.set(Point::new(grid_coord(column), y), CellKind::Floor);
        }

        for column in 1..logical_cols {
            if rng.gen_bool(JOIN_PROBABILITY) {
                join_cells(grid, &mut sets, column, y);
            }
        }

        if is_last_row {
            for column in 1..logical_cols {
                join_cells(grid, &mut sets, column, y);
            }
        } else {
            sets = descend(grid, &sets, y, &mut next_set_id, rng);
        }

        trace!("logical row {row} sets: {sets:?}");
    }
}

/// Merges the sets of logical cells `column - 1` and `column` when they differ.
///
/// The wall between the two cells is carved only on an actual merge; joining two cells of the
/// same set would close a loop.
fn join_cells(grid: &mut Grid, sets: &mut [usize], column: usize, y: usize) {
    let (Some(&kept), Some(&absorbed)) = (sets.get(column - 1), sets.get(column)) else {
        return;
    };
    if kept == absorbed {
        return;
    }

    for set in sets.iter_mut().filter(|set| **set == absorbed) {
        *set = kept;
    }
    let _ = grid.set(Point::new(grid_coord(column) - 1, y), CellKind::Floor);
}

/// Carves the vertical passages out of logical row `y` and returns the next row's sets.
///
/// Every set sends at least one cell down. Members are drawn in column order and, should no
/// draw succeed, the last member is forced down so the set keeps a way forward. Cells that do
/// not descend leave their column to a fresh set in the next row.
fn descend<R: Rng + ?Sized>(
    grid: &mut Grid,
    sets: &[usize],
    y: usize,
    next_set_id: &mut usize,
    rng: &mut R,
) -> Vec<usize> {
    let mut members: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (column, set) in sets.iter().enumerate() {
        members.entry(*set).or_default().push(column);
    }

    let mut next: Vec<Option<usize>> = vec![None; sets.len()];
    for (set, columns) in &members {
        let mut descended = false;

        for (position, column) in columns.iter().enumerate() {
            let forced = !descended && position + 1 == columns.len();
            if rng.gen_bool(DESCEND_PROBABILITY) || forced {
                let _ = grid.set(Point::new(grid_coord(*column), y + 1), CellKind::Floor);
                if let Some(slot) = next.get_mut(*column) {
                    *slot = Some(*set);
                }
                descended = true;
            }
        }
    }

    next.into_iter()
        .map(|set| {
            set.unwrap_or_else(|| {
                let fresh = *next_set_id;
                *next_set_id += 1;
                fresh
            })
        })
        .collect()
}

/// Forces every border cell back to wall.
fn seal_border(grid: &mut Grid) {
    let border: Vec<Point> = grid.points().filter(|point| grid.is_border(*point)).collect();
    for point in border {
        let _ = grid.set(point, CellKind::Wall);
    }
}

/// Column of the two openings: the odd column nearest the horizontal centre.
fn opening_column(cols: usize) -> usize {
    let clamped = (cols / 2).clamp(1, cols - 2);
    if clamped % 2 == 0 {
        clamped - 1
    } else {
        clamped
    }
}

/// Carves the exit through the top border and the entry through the bottom border.
///
/// Each opening is extended one cell inwards. That cell lies on a logical row and is already
/// floor, so the openings hang off the spanning tree as two extra leaves.
fn carve_openings(grid: &mut Grid) {
    let x = opening_column(grid.width());
    let bottom = grid.height() - 1;

    for y in [0, 1, bottom - 1, bottom] {
        let _ = grid.set(Point::new(x, y), CellKind::Floor);
    }
    debug!("openings carved at column {x}: exit (top) and entry (bottom)");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis;

    /// Seeded generator shared by the tests.
    fn seeded(seed: u64) -> StdRng {
        <StdRng as rand::SeedableRng>::seed_from_u64(seed)
    }

    #[test]
    fn test_normalize_dimension() {
        assert_eq!(normalize_dimension(21), 21, "odd sizes are kept");
        assert_eq!(normalize_dimension(20), 21, "even sizes grow by one");
        assert_eq!(normalize_dimension(4), 5, "small even sizes grow by one");
        assert_eq!(normalize_dimension(2), 3, "two is clamped to the minimum");
        assert_eq!(normalize_dimension(1), 3, "one is clamped to the minimum");
        assert_eq!(normalize_dimension(0), 3, "zero is clamped to the minimum");
    }

    #[test]
    fn test_opening_column() {
        assert_eq!(opening_column(21), 9, "centre 10 is even, step left to 9");
        assert_eq!(opening_column(11), 5, "centre 5 is odd and kept");
        assert_eq!(opening_column(3), 1, "the only logical column");
    }

    #[test]
    fn test_generate_dimensions() {
        let grid = generate(20, 14, &mut seeded(1));
        assert_eq!(grid.width(), 21, "even width is rounded up");
        assert_eq!(grid.height(), 15, "even height is rounded up");

        let grid = generate(9, 7, &mut seeded(1));
        assert_eq!(grid.width(), 9, "odd width is unchanged");
        assert_eq!(grid.height(), 7, "odd height is unchanged");
    }

    #[test]
    fn test_generate_clamps_degenerate_sizes() {
        let grid = generate(0, 0, &mut seeded(3));

        assert_eq!(grid.width(), MIN_DIMENSION, "width is clamped");
        assert_eq!(grid.height(), MIN_DIMENSION, "height is clamped");
        assert_eq!(
            grid.to_string(),
            "101\n101\n101",
            "a single logical cell joins entry and exit in a straight line"
        );
    }

    #[test]
    fn test_generate_single_logical_column() {
        let grid = generate(3, 11, &mut seeded(5));

        assert!(
            grid.rows()
                .iter()
                .all(|row| row.get(1) == Some(&CellKind::Floor)),
            "a one-column maze is a straight corridor"
        );
        assert_eq!(analysis::floor_components(&grid), 1, "corridor is connected");
    }

    #[test]
    fn test_generate_single_logical_row() {
        let grid = generate(15, 3, &mut seeded(8));

        assert_eq!(analysis::floor_components(&grid), 1, "the row is fully merged");
        assert_eq!(
            analysis::passage_count(&grid) + 1,
            analysis::floor_count(&grid),
            "the row forms a tree"
        );
    }

    #[test]
    fn test_generate_is_perfect() {
        for seed in 0..20 {
            let grid = generate(25, 17, &mut seeded(seed));

            assert_eq!(
                analysis::floor_components(&grid),
                1,
                "seed {seed}: every floor cell is reachable"
            );
            assert_eq!(
                analysis::passage_count(&grid) + 1,
                analysis::floor_count(&grid),
                "seed {seed}: floor cells form a spanning tree"
            );
        }
    }

    #[test]
    fn test_generate_border_integrity() {
        let grid = generate(21, 21, &mut seeded(11));
        let openings = analysis::border_openings(&grid);

        assert_eq!(
            openings,
            vec![Point::new(9, 0), Point::new(9, 20)],
            "exactly one top and one bottom opening, in the same column"
        );
        assert_eq!(grid.exit(), Some(Point::new(9, 0)), "exit is the top opening");
        assert_eq!(grid.entry(), Some(Point::new(9, 20)), "entry is the bottom opening");
        assert_eq!(
            grid.get(Point::new(9, 1)),
            Some(CellKind::Floor),
            "exit leads into the interior"
        );
        assert_eq!(
            grid.get(Point::new(9, 19)),
            Some(CellKind::Floor),
            "entry leads into the interior"
        );
    }

    #[test]
    fn test_generate_lattice_structure() {
        let grid = generate(31, 19, &mut seeded(21));

        for point in grid.points().filter(|point| !grid.is_border(*point)) {
            let cell = grid.get(point);
            if point.x % 2 == 1 && point.y % 2 == 1 {
                assert_eq!(cell, Some(CellKind::Floor), "logical cell {point} is carved");
            }
            if point.x % 2 == 0 && point.y % 2 == 0 {
                assert_eq!(cell, Some(CellKind::Wall), "wall post {point} is never carved");
            }
        }
    }

    #[test]
    fn test_generate_is_deterministic() {
        let first = generate(33, 27, &mut seeded(42));
        let second = generate(33, 27, &mut seeded(42));

        assert_eq!(first, second, "same seed yields the same maze");
        assert_eq!(
            generate_seeded(33, 27, Some(42)),
            first,
            "seeded entry point matches an explicitly seeded generator"
        );
    }

    #[test]
    fn test_generate_seeds_differ() {
        let first = generate_seeded(41, 41, Some(1));
        let second = generate_seeded(41, 41, Some(2));

        assert_ne!(first, second, "different seeds yield different mazes");
    }

    #[test]
    fn test_generate_unseeded_is_perfect() {
        let grid = generate_seeded(19, 13, None);

        assert_eq!(analysis::floor_components(&grid), 1, "entropy-seeded maze is connected");
        assert_eq!(
            analysis::passage_count(&grid) + 1,
            analysis::floor_count(&grid),
            "entropy-seeded maze is a tree"
        );
    }
}
