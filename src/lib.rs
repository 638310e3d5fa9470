//! Perfect-maze generation and shortest-path search.
//!
//! The crate builds mazes with Eller's algorithm and solves them with A*. Both operations are pure
//! functions over plain values: [`generate`] turns dimensions and a random source into a [`Grid`],
//! and [`find_path`] turns a grid and two points into a [`Path`]. Nothing is shared between calls.
//!
//! Generated mazes open to the outside through an entry on the bottom border and an exit on the
//! top border; [`Grid::entry`] and [`Grid::exit`] locate them, and a route between the two always
//! exists. The [`analysis`] module measures the structural guarantees, and [`place_items`] layers
//! game items over a finished maze.

#![expect(
    unused_crate_dependencies,
    reason = "The command line dependencies are used in the binary crate."
)]

pub mod analysis;
mod generator;
mod grid;
mod items;
mod pathfinding;
mod types;

pub use generator::{generate, generate_seeded, MIN_DIMENSION};
pub use grid::Grid;
pub use items::{place_items, ItemConfig};
pub use pathfinding::find_path;
pub use types::{CellKind, Path, Point};
