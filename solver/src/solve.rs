//! Snapshot in, toggle list out.

use crate::bitrow::BitRow;
use crate::config::SolverConfig;
use crate::eliminate::Eliminator;
use crate::error::{Result, SolveError};
use crate::grid::{Coord, Extents, GridSnapshot};
use crate::system::LinearSystem;

/// Computes toggle sets that unlock a cube.
///
/// A solver holds only configuration; each call to [`Solver::solve`] builds,
/// reduces and discards its own matrix.
#[derive(Clone, Debug, Default)]
pub struct Solver {
    eliminator: Eliminator,
}

impl Solver {
    /// Creates a solver.
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        Self {
            eliminator: Eliminator::new(config),
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        self.eliminator.config()
    }

    /// Finds a set of toggles that drives every cell of `snapshot` to unlocked.
    ///
    /// Free variables are left unfired, so the result is one valid solution,
    /// not necessarily the smallest.
    ///
    /// # Errors
    ///
    /// - [`SolveError::Oversized`] if the toggle matrix cannot be allocated.
    /// - [`SolveError::InconsistentSystem`] if no toggle set unlocks the cube.
    /// - [`SolveError::InvalidConfig`] / [`SolveError::WorkerPool`] if the
    ///   configuration cannot drive a solve.
    /// - [`SolveError::Unverified`] if the replay check is enabled and fails.
    pub fn solve(&self, snapshot: &GridSnapshot) -> Result<Solution> {
        let extents = snapshot.extents();
        let span = tracing::info_span!(
            "solve",
            x = extents.x(),
            y = extents.y(),
            z = extents.z()
        );
        let _enter = span.enter();

        let system = LinearSystem::build(snapshot)?;
        debug_assert!(system.is_symmetric());

        let reduced = self.eliminator.reduce(system)?;
        let solution = Solution {
            extents,
            toggles: reduced.back_substitute(),
            rank: reduced.rank(),
        };

        if self.config().verify {
            solution.verify(snapshot)?;
        }
        tracing::info!(
            rank = solution.rank,
            nullity = solution.nullity(),
            toggles = solution.toggle_count(),
            "solved"
        );
        Ok(solution)
    }
}

/// Solves `snapshot` with the default configuration and returns the
/// coordinates to toggle, in ascending linear order.
///
/// # Errors
///
/// See [`Solver::solve`].
pub fn solve(snapshot: &GridSnapshot) -> Result<Vec<Coord>> {
    Ok(Solver::default().solve(snapshot)?.coords().collect())
}

/// The toggles chosen for one cube.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    extents: Extents,
    toggles: BitRow,
    rank: usize,
}

impl Solution {
    /// Dimensions of the solved cube.
    #[must_use]
    pub fn extents(&self) -> Extents {
        self.extents
    }

    /// One bit per cell: fire the toggle centred there.
    #[must_use]
    pub fn toggles(&self) -> &BitRow {
        &self.toggles
    }

    /// Rank of the cube's toggle matrix.
    #[must_use]
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Number of free variables; `2^nullity` toggle sets solve the cube.
    #[must_use]
    pub fn nullity(&self) -> usize {
        self.extents.cell_count() - self.rank
    }

    /// Number of toggles to fire.
    #[must_use]
    pub fn toggle_count(&self) -> usize {
        self.toggles.count_ones()
    }

    /// True when the toggle at `c` is part of the solution.
    #[must_use]
    pub fn contains(&self, c: Coord) -> bool {
        self.extents
            .checked_index(c)
            .is_ok_and(|index| self.toggles.get(index))
    }

    /// Coordinates to toggle, in ascending linear order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.toggles.iter_ones().map(|index| self.extents.coord(index))
    }

    /// Fires every chosen toggle on `snapshot`.
    ///
    /// # Errors
    ///
    /// [`SolveError::DimensionMismatch`] if `snapshot` has other extents.
    pub fn apply_to(&self, snapshot: &mut GridSnapshot) -> Result<()> {
        if snapshot.extents() != self.extents {
            return Err(SolveError::DimensionMismatch {
                expected: self.extents.cell_count(),
                found: snapshot.extents().cell_count(),
                axis: None,
            });
        }
        for c in self.coords() {
            snapshot.toggle(c)?;
        }
        Ok(())
    }

    fn verify(&self, snapshot: &GridSnapshot) -> Result<()> {
        let mut replay = snapshot.clone();
        self.apply_to(&mut replay)?;
        if replay.is_unlocked() {
            Ok(())
        } else {
            Err(SolveError::Unverified {
                locked: replay.locked_count(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_decode_row_major() {
        let ext = Extents::new(2, 3, 4).unwrap();
        let mut snap = GridSnapshot::new(ext);
        snap.toggle(Coord::new(1, 2, 3)).unwrap();
        let solution = Solver::default().solve(&snap).unwrap();

        let mut replay = snap.clone();
        solution.apply_to(&mut replay).unwrap();
        assert!(replay.is_unlocked());
        assert!(solution.coords().all(|c| ext.contains(c)));
        assert!(!solution.contains(Coord::new(2, 0, 0)));
    }

    #[test]
    fn unlocked_cube_needs_no_toggles() {
        let snap = GridSnapshot::new(Extents::new(3, 3, 3).unwrap());
        assert!(solve(&snap).unwrap().is_empty());
    }

    #[test]
    fn apply_rejects_other_extents() {
        let snap = GridSnapshot::new(Extents::new(2, 2, 2).unwrap());
        let solution = Solver::default().solve(&snap).unwrap();
        let mut other = GridSnapshot::new(Extents::new(2, 2, 3).unwrap());
        assert!(matches!(
            solution.apply_to(&mut other),
            Err(SolveError::DimensionMismatch { .. })
        ));
    }
}
