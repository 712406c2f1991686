//! Augmented GF(2) system for a cube: one equation and one unknown per cell.
//!
//! Row `i` states which toggles flip cell `i`; column `j < N` is the
//! unknown "fire toggle `j`", and the trailing bit at column `N` is the
//! cell's current lock state. Firing a set of toggles unlocks the cube
//! exactly when, for every row, the parity of fired toggles in the row
//! equals the RHS bit.
//!
//! ```text
//! 2×1×1 cube, cells A=(0,0,0) B=(1,0,0), state [locked, locked]
//!
//!        A B | rhs
//! row A [1 1 | 1]
//! row B [1 1 | 1]
//! ```

use rayon::prelude::*;

use crate::bitrow::{BitRow, WORD_BITS};
use crate::error::{Result, SolveError};
use crate::grid::{Extents, GridSnapshot};

/// Storage words of the augmented matrix for `extents`: `N` rows of
/// `ceil((N + 1) / 64)` words each. Fails unless the matrix can be
/// addressed in bytes.
fn matrix_words(extents: Extents) -> Result<usize> {
    let n = extents.cell_count();
    (n + 1)
        .div_ceil(WORD_BITS)
        .checked_mul(n)
        .filter(|words| {
            words
                .checked_mul(core::mem::size_of::<u64>())
                .is_some_and(|bytes| isize::try_from(bytes).is_ok())
        })
        .ok_or(SolveError::Oversized {
            x: extents.x(),
            y: extents.y(),
            z: extents.z(),
        })
}

/// `N` equations over `N` unknowns, each row `N + 1` bits wide.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinearSystem {
    rows: Vec<BitRow>,
    unknowns: usize,
}

impl LinearSystem {
    /// Translates a snapshot and the toggle rule into an augmented matrix.
    ///
    /// # Errors
    ///
    /// [`SolveError::Oversized`] if the matrix would not fit in the address
    /// space. Nothing is allocated in that case.
    pub fn build(snapshot: &GridSnapshot) -> Result<Self> {
        let extents = snapshot.extents();
        let n = extents.cell_count();
        let words = matrix_words(extents)?;
        tracing::debug!(%extents, unknowns = n, words, "building toggle system");
        let state = snapshot.cells();

        let rows: Vec<BitRow> = (0..n)
            .into_par_iter()
            .map(|cell| {
                let mut row = BitRow::new(n + 1);
                for col in extents.footprint(extents.coord(cell)) {
                    row.set(col);
                }
                row.set_to(n, state.get(cell));
                row
            })
            .collect();

        Ok(Self { rows, unknowns: n })
    }

    /// Wraps hand-made augmented rows.
    ///
    /// # Errors
    ///
    /// [`SolveError::DimensionMismatch`] unless there are exactly `unknowns`
    /// rows (at least one), each `unknowns + 1` bits wide.
    pub fn from_rows(rows: Vec<BitRow>, unknowns: usize) -> Result<Self> {
        if unknowns == 0 || rows.len() != unknowns {
            return Err(SolveError::DimensionMismatch {
                expected: unknowns.max(1),
                found: rows.len(),
                axis: None,
            });
        }
        if let Some(bad) = rows.iter().find(|r| r.len() != unknowns + 1) {
            return Err(SolveError::DimensionMismatch {
                expected: unknowns + 1,
                found: bad.len(),
                axis: None,
            });
        }
        Ok(Self { rows, unknowns })
    }

    /// Number of unknowns (and of equations).
    #[inline]
    #[must_use]
    pub fn unknowns(&self) -> usize {
        self.unknowns
    }

    /// The augmented rows.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[BitRow] {
        &self.rows
    }

    /// Coefficient of unknown `col` in equation `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not below [`LinearSystem::unknowns`].
    #[must_use]
    pub fn coefficient(&self, row: usize, col: usize) -> bool {
        assert!(col < self.unknowns, "column {col} is not an unknown");
        self.rows[row].get(col)
    }

    /// Right-hand side of equation `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row` is not below [`LinearSystem::unknowns`].
    #[must_use]
    pub fn rhs(&self, row: usize) -> bool {
        self.rows[row].get(self.unknowns)
    }

    /// True when the coefficient matrix equals its transpose.
    ///
    /// Holds for every freshly built cube system; elimination destroys it.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        self.rows.iter().enumerate().all(|(i, row)| {
            row.ones_in(0..self.unknowns).all(|j| self.rows[j].get(i))
        })
    }

    /// True when `solution` satisfies every equation.
    ///
    /// # Panics
    ///
    /// Panics if `solution` is shorter than the number of unknowns.
    #[must_use]
    pub fn is_satisfied_by(&self, solution: &BitRow) -> bool {
        self.rows
            .iter()
            .all(|row| row.parity_and(solution, self.unknowns) == row.get(self.unknowns))
    }

    pub(crate) fn into_rows(self) -> Vec<BitRow> {
        self.rows
    }
}
