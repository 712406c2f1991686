//! Back-substitution on a reduced system.
//!
//! Free columns take a fixed value (zero unless the caller supplies an
//! assignment). Pivot rows are then resolved from the last pivot to the
//! first: row `i` reads
//!
//! ```text
//! x[pivots[i]] = rhs[i] ⊕ Σ { x[j] : j > pivots[i], row[i][j] = 1 }
//! ```
//!
//! Elimination already zeroed every other pivot column in row `i`, so the
//! sum only picks up free columns, whose values are fixed before the loop.

use crate::bitrow::BitRow;
use crate::eliminate::ReducedSystem;
use crate::error::{Result, SolveError};

impl ReducedSystem {
    /// One solution, with every free variable set to zero.
    #[must_use]
    pub fn back_substitute(&self) -> BitRow {
        let mut solution = BitRow::new(self.unknowns);
        self.resolve_pivots(&mut solution);
        solution
    }

    /// The solution whose free variables match `free`.
    ///
    /// Entries of `free` at pivot columns are ignored. Different assignments
    /// walk the whole solution space of an underdetermined system.
    ///
    /// # Errors
    ///
    /// [`SolveError::DimensionMismatch`] if `free` does not have one entry
    /// per unknown.
    pub fn back_substitute_with(&self, free: &BitRow) -> Result<BitRow> {
        if free.len() != self.unknowns {
            return Err(SolveError::DimensionMismatch {
                expected: self.unknowns,
                found: free.len(),
                axis: None,
            });
        }
        let mut solution = BitRow::new(self.unknowns);
        for col in self.free_columns() {
            solution.set_to(col, free.get(col));
        }
        self.resolve_pivots(&mut solution);
        Ok(solution)
    }

    fn resolve_pivots(&self, solution: &mut BitRow) {
        let n = self.unknowns;
        let rank = self.rank();
        for (row, &col) in self.rows[..rank].iter().zip(&self.pivots).rev() {
            let mut value = row.get(n);
            for j in row.ones_in(col + 1..n) {
                value ^= solution.get(j);
            }
            solution.set_to(col, value);
        }
    }
}
