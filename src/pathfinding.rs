//! Pathfinding algorithm module.
//!
//! This module contains the A* search used to find a shortest route between two cells of a
//! [`Grid`], moving one cell at a time along the four axis directions.

use std::{
    cmp::Ordering,
    collections::{BinaryHeap, HashMap},
};

use log::{debug, trace};

use crate::{
    grid::Grid,
    types::{Path, Point},
};

/// Frontier entry of the A* search.
///
/// Entries order so that [`BinaryHeap`], a max-heap, pops the lowest `f` first and, among equal
/// `f` values, the entry pushed earliest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Node {
    /// Estimated total route length through this point, `g + h`.
    f_cost: usize,
    /// Steps from the start when this entry was pushed.
    g_cost: usize,
    /// Push counter used for tie-breaking.
    sequence: usize,
    /// The cell this entry stands for.
    point: Point,
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on both keys for min-heap behaviour.
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Finds a shortest route from `start` to `end`.
///
/// The route lists every cell from `start` to `end` inclusive, each one 4-adjacent to the next.
/// An empty path means there is no route: the two cells are not connected, or one of them lies
/// outside the grid or on a wall. None of these cases is treated as an error.
///
/// Ties between routes of equal length are settled by expansion order, so the same grid and
/// endpoints always produce the same route.
pub fn find_path(grid: &Grid, start: Point, end: Point) -> Path {
    if !grid.is_passable(start) || !grid.is_passable(end) {
        debug!(
            "no path from {start} to {end}: endpoint out of bounds or blocked on a {}x{} grid",
            grid.width(),
            grid.height()
        );
        return Vec::new();
    }

    let mut frontier = BinaryHeap::new();
    let mut best_cost: HashMap<Point, usize> = HashMap::new();
    let mut came_from: HashMap<Point, Point> = HashMap::new();
    let mut sequence = 0_usize;
    let mut expanded = 0_usize;

    let _ = best_cost.insert(start, 0);
    frontier.push(Node {
        f_cost: start.manhattan(end),
        g_cost: 0,
        sequence,
        point: start,
    });

    while let Some(node) = frontier.pop() {
        // A cheaper route to this point was pushed after this entry.
        if best_cost
            .get(&node.point)
            .is_some_and(|&best| best < node.g_cost)
        {
            continue;
        }

        if node.point == end {
            let path = reconstruct(&came_from, start, end);
            trace!(
                "path from {start} to {end}: {} cells, {expanded} nodes expanded",
                path.len()
            );
            return path;
        }
        expanded += 1;

        let tentative = node.g_cost + 1;
        for neighbour in grid.neighbours(node.point) {
            if best_cost
                .get(&neighbour)
                .is_some_and(|&known| known <= tentative)
            {
                continue;
            }

            let _ = best_cost.insert(neighbour, tentative);
            let _ = came_from.insert(neighbour, node.point);
            sequence += 1;
            frontier.push(Node {
                f_cost: tentative + neighbour.manhattan(end),
                g_cost: tentative,
                sequence,
                point: neighbour,
            });
        }
    }

    debug!("no path from {start} to {end}: frontier exhausted after {expanded} expansions");
    Vec::new()
}

/// Walks the predecessor links back from `end` and returns the route in forward order.
fn reconstruct(came_from: &HashMap<Point, Point>, start: Point, end: Point) -> Path {
    let mut path = vec![end];
    let mut current = end;

    while current != start {
        let Some(&previous) = came_from.get(&current) else {
            break;
        };
        path.push(previous);
        current = previous;
    }

    path.reverse();
    path
}
