//! Item placement on top of a generated maze.
//!
//! Games built on the kernel scatter food over the floor and put one spawn marker in the lower
//! part of the maze. The decoration never touches walls or the border, so the maze keeps its
//! shape and every route found before decorating stays valid afterwards.

use color_eyre::eyre::{ensure, Result};
use log::debug;
use rand::{seq::SliceRandom as _, Rng};

use crate::{
    grid::Grid,
    types::{CellKind, Point},
};

/// Item placement settings.
///
/// This structure holds the chance of a floor cell receiving food and the row, as a percentage
/// of the grid height, from which the spawn marker may be placed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemConfig {
    /// Chance in `[0, 1]` that an interior floor cell holds food.
    food_probability: f64,
    /// First row of the spawn zone, in percent of the grid height.
    spawn_zone_percent: u8,
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self {
            food_probability: 0.05,
            spawn_zone_percent: 65,
        }
    }
}

impl ItemConfig {
    /// Builds a validated configuration.
    ///
    /// # Errors
    ///
    /// This function returns an error if `food_probability` is not a number within `[0, 1]` or if
    /// `spawn_zone_percent` exceeds 100.
    pub fn new(food_probability: f64, spawn_zone_percent: u8) -> Result<Self> {
        ensure!(
            (0.0..=1.0).contains(&food_probability),
            "food probability must lie within [0, 1], got {food_probability}"
        );
        ensure!(
            spawn_zone_percent <= 100,
            "spawn zone must start within the grid, got {spawn_zone_percent}%"
        );

        Ok(Self {
            food_probability,
            spawn_zone_percent,
        })
    }

    /// Chance that an interior floor cell holds food.
    pub const fn food_probability(&self) -> f64 {
        self.food_probability
    }

    /// First row of the spawn zone, in percent of the grid height.
    pub const fn spawn_zone_percent(&self) -> u8 {
        self.spawn_zone_percent
    }

    /// First grid row of the spawn zone for a grid of the given height.
    fn spawn_zone_start(&self, height: usize) -> usize {
        height * usize::from(self.spawn_zone_percent) / 100
    }
}

/// Returns a copy of `grid` decorated with food and one spawn marker.
///
/// Every interior floor cell becomes food with the configured probability. The spawn marker then
/// replaces one food cell inside the spawn zone; when the zone holds no food, it goes on an
/// interior cell of `route` inside the zone instead. When neither exists no spawn is placed.
pub fn place_items<R: Rng + ?Sized>(
    grid: &Grid,
    route: &[Point],
    config: &ItemConfig,
    rng: &mut R,
) -> Grid {
    let mut decorated = grid.clone();

    let interior_floor: Vec<Point> = grid
        .points()
        .filter(|point| !grid.is_border(*point) && grid.get(*point) == Some(CellKind::Floor))
        .collect();
    let mut food = 0_usize;
    for point in interior_floor {
        if rng.gen_bool(config.food_probability) {
            let _ = decorated.set(point, CellKind::Food);
            food += 1;
        }
    }

    let zone_start = config.spawn_zone_start(grid.height());
    let in_zone = |point: &Point| point.y >= zone_start && !grid.is_border(*point);

    let mut candidates: Vec<Point> = decorated
        .points()
        .filter(|point| in_zone(point) && decorated.get(*point) == Some(CellKind::Food))
        .collect();
    if candidates.is_empty() {
        candidates = route
            .iter()
            .copied()
            .filter(|point| in_zone(point) && decorated.is_passable(*point))
            .collect();
    }

    let spawn = candidates.choose(rng).copied();
    if let Some(point) = spawn {
        let _ = decorated.set(point, CellKind::Spawn);
    }
    debug!(
        "placed {food} food cells, spawn at {}",
        spawn.map_or_else(|| "nowhere".to_owned(), |point| point.to_string())
    );

    decorated
}
