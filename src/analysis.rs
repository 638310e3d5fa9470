//! Structural checks over grids.
//!
//! These functions measure the properties a generated maze promises: a single connected region
//! of passable cells, a tree-shaped passage graph and exactly two openings in the border. They
//! are breadth-first and independent of the A* search, so they double as a reference for it.

use std::collections::{hash_map::Entry, HashMap, HashSet, VecDeque};

use crate::{grid::Grid, types::Point};

/// Counts the passable cells.
pub fn floor_count(grid: &Grid) -> usize {
    grid.points().filter(|point| grid.is_passable(*point)).count()
}

/// Counts the adjacencies between passable cells.
///
/// Each pair of horizontally or vertically adjacent passable cells is counted once. On a
/// perfect maze this is exactly [`floor_count`] minus one.
pub fn passage_count(grid: &Grid) -> usize {
    grid.points()
        .filter(|point| grid.is_passable(*point))
        .map(|point| {
            [point.offset(1, 0), point.offset(0, 1)]
                .into_iter()
                .flatten()
                .filter(|neighbour| grid.is_passable(*neighbour))
                .count()
        })
        .sum()
}

/// Counts the connected regions of passable cells under 4-directional movement.
pub fn floor_components(grid: &Grid) -> usize {
    let mut seen: HashSet<Point> = HashSet::new();
    let mut components = 0;

    for point in grid.points().filter(|point| grid.is_passable(*point)) {
        if !seen.insert(point) {
            continue;
        }
        components += 1;

        let mut queue = VecDeque::from([point]);
        while let Some(current) = queue.pop_front() {
            for neighbour in grid.neighbours(current) {
                if seen.insert(neighbour) {
                    queue.push_back(neighbour);
                }
            }
        }
    }

    components
}

/// Number of steps on a shortest route between two passable cells.
///
/// Returns `None` when either cell is blocked or out of bounds, or when no route exists.
pub fn shortest_distance(grid: &Grid, start: Point, end: Point) -> Option<usize> {
    if !grid.is_passable(start) || !grid.is_passable(end) {
        return None;
    }

    let mut distances: HashMap<Point, usize> = HashMap::from([(start, 0)]);
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        let distance = *distances.get(&current)?;
        if current == end {
            return Some(distance);
        }

        for neighbour in grid.neighbours(current) {
            if let Entry::Vacant(entry) = distances.entry(neighbour) {
                let _ = entry.insert(distance + 1);
                queue.push_back(neighbour);
            }
        }
    }

    None
}

/// Lists the passable border cells in row-major order.
pub fn border_openings(grid: &Grid) -> Vec<Point> {
    grid.points()
        .filter(|point| grid.is_border(*point) && grid.is_passable(*point))
        .collect()
}
