//! This crate contains the source code for the `mazekit` command line driver.
//!
//! The driver generates one maze, optionally solves and decorates it, and writes the grid in its
//! plain-text layout to standard output. Logging goes to standard error and is configured through
//! the `RUST_LOG` environment variable.

#![cfg_attr(
    test,
    expect(
        unused_crate_dependencies,
        reason = "The test-only dependencies are used in the library crate."
    )
)]

use std::io::{self, BufWriter, Write as _};

use clap::Parser;
use color_eyre::{eyre::Result, install};
use log::info;
use mazekit::{find_path, generate, place_items, ItemConfig};
use rand::{rngs::StdRng, SeedableRng as _};

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Requested maze width; even values grow by one.
    #[arg(long, default_value_t = 21)]
    width: usize,
    /// Requested maze height; even values grow by one.
    #[arg(long, default_value_t = 21)]
    height: usize,
    /// Seed for a reproducible maze; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Write the route from entry to exit after the grid.
    #[arg(long)]
    solve: bool,
    /// Scatter food and a spawn marker over the maze.
    #[arg(long)]
    items: bool,
    /// Chance of an interior floor cell holding food.
    #[arg(long, default_value_t = 0.05)]
    food_probability: f64,
}

fn main() -> Result<()> {
    install()?;
    env_logger::init();

    let cli = Cli::parse();
    let config = ItemConfig::new(
        cli.food_probability,
        ItemConfig::default().spawn_zone_percent(),
    )?;
    let mut rng = cli
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

    let grid = generate(cli.width, cli.height, &mut rng);
    let entry = grid.entry();
    let exit = grid.exit();
    info!(
        "generated {}x{} maze, entry {entry:?}, exit {exit:?}",
        grid.width(),
        grid.height()
    );

    let route = match (entry, exit) {
        (Some(entry), Some(exit)) if cli.solve || cli.items => find_path(&grid, entry, exit),
        _ => Vec::new(),
    };
    if cli.solve {
        info!("route from entry to exit spans {} cells", route.len());
    }

    let grid = if cli.items {
        place_items(&grid, &route, &config, &mut rng)
    } else {
        grid
    };

    let mut out = BufWriter::new(io::stdout().lock());
    writeln!(out, "{grid}")?;
    if cli.solve {
        writeln!(out)?;
        for point in &route {
            writeln!(out, "{point}")?;
        }
    }
    out.flush()?;

    Ok(())
}
