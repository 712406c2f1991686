//! `lockcube-unlock` - Generates a lock cube, solves it and clicks the
//! answer back in.
//!
//! **Usage:**
//! ```text
//! lockcube-unlock [--config <file>] [--x <n> --y <n> --z <n>] [--seed <n>]
//!                 [--threads <n>] [--no-verify] [--json] [-v...]
//! ```
//!
//! Exits with status 1 when the cube is still locked afterwards.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::io;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use lockcube_clients::{unlock, Settings};
use lockcube_solver::{Extents, Solver};
use lockcube_world::LockCube;
use tracing_subscriber::EnvFilter;

/// Unlock a randomly generated lock cube.
#[derive(Parser)]
#[command(name = "lockcube-unlock", about = "Generate a lock cube and unlock it")]
struct Args {
    /// TOML file with optional [world] and [solver] sections.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fixed X extent (requires --y and --z).
    #[arg(long, requires_all = ["y", "z"])]
    x: Option<usize>,

    /// Fixed Y extent (requires --x and --z).
    #[arg(long, requires_all = ["x", "z"])]
    y: Option<usize>,

    /// Fixed Z extent (requires --x and --y).
    #[arg(long, requires_all = ["x", "y"])]
    z: Option<usize>,

    /// Seed for cube generation.
    #[arg(long)]
    seed: Option<u64>,

    /// Smallest generated axis length, inclusive.
    #[arg(long)]
    min_axis: Option<usize>,

    /// Largest generated axis length, exclusive.
    #[arg(long)]
    max_axis: Option<usize>,

    /// Each cell is clicked during generation unless a roll modulo this is 0.
    #[arg(long)]
    lock_frequency: Option<u64>,

    /// Size of the elimination worker pool.
    #[arg(long)]
    threads: Option<usize>,

    /// Skip replaying the toggles before applying them.
    #[arg(long)]
    no_verify: bool,

    /// Print a JSON report instead of text.
    #[arg(long)]
    json: bool,

    /// Log more (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        let world = &mut settings.world;
        if let Some(seed) = self.seed {
            world.seed = Some(seed);
        }
        if let Some(min) = self.min_axis {
            world.min_axis = min;
        }
        if let Some(max) = self.max_axis {
            world.max_axis = max;
        }
        if let Some(freq) = self.lock_frequency {
            world.lock_frequency = freq;
        }
        if let Some(threads) = self.threads {
            settings.solver.threads = Some(threads);
        }
        if self.no_verify {
            settings.solver.verify = false;
        }
        Ok(settings)
    }

    fn extents(&self) -> Result<Option<Extents>> {
        match (self.x, self.y, self.z) {
            (Some(x), Some(y), Some(z)) => Extents::new(x, y, z)
                .map(Some)
                .context("Invalid cube extents"),
            _ => Ok(None),
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let settings = args.settings()?;
    let mut cube = match args.extents()? {
        Some(extents) => LockCube::generate_with_extents(extents, &settings.world)
            .context("Failed to generate cube")?,
        None => {
            settings.validate()?;
            LockCube::generate(&settings.world).context("Failed to generate cube")?
        }
    };
    let solver = Solver::new(settings.solver);

    let extents = cube.extents();
    if !args.json {
        println!("Size x: {}", extents.x());
        println!("Size y: {}", extents.y());
        println!("Size z: {}", extents.z());
    }
    tracing::info!(%extents, locked = cube.locked_count(), "cube generated");

    let report = unlock(&mut cube, &solver)?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{json}");
    } else {
        println!("Time taken to unlock the cube: {} milliseconds", report.elapsed_ms);
        if report.unlocked {
            println!("The cube is unlocked!");
        } else {
            println!("The cube is still locked!");
        }
    }

    if !report.unlocked {
        process::exit(1);
    }
    Ok(())
}
