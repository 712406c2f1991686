//! Outcome of one unlock run.

use std::time::Instant;

use anyhow::{Context, Result};
use lockcube_solver::{Extents, Solver};
use lockcube_world::LockCube;
use serde::Serialize;

/// What happened to one cube. Serialized as the `--json` output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UnlockReport {
    /// Cube dimensions.
    pub extents: Extents,
    /// `X·Y·Z`.
    pub cells: usize,
    /// Rank of the toggle matrix.
    pub rank: usize,
    /// Number of free variables.
    pub nullity: usize,
    /// Number of clicks sent to the cube.
    pub toggles: usize,
    /// Wall time of read, solve and apply.
    pub elapsed_ms: u128,
    /// True when no cell is locked afterwards.
    pub unlocked: bool,
}

/// Reads `cube`, solves it and clicks the answer back in, timing all three.
///
/// # Errors
///
/// Returns an error if the solver fails or the cube rejects a click.
pub fn unlock(cube: &mut LockCube, solver: &Solver) -> Result<UnlockReport> {
    let start = Instant::now();
    let snapshot = cube.read();
    let solution = solver
        .solve(&snapshot)
        .with_context(|| format!("Failed to solve {} cube", snapshot.extents()))?;
    cube.apply(solution.coords()).context("Cube rejected a toggle")?;
    let elapsed = start.elapsed();

    Ok(UnlockReport {
        extents: solution.extents(),
        cells: solution.extents().cell_count(),
        rank: solution.rank(),
        nullity: solution.nullity(),
        toggles: solution.toggle_count(),
        elapsed_ms: elapsed.as_millis(),
        unlocked: !cube.is_locked(),
    })
}
