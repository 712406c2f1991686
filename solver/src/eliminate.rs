//! Parallel Gauss-Jordan elimination over GF(2).
//!
//! Columns are processed left to right. For each column the pivot search
//! and row swap run on the calling thread, because they depend on the fully
//! reduced state left by the previous column. The elimination pass that
//! follows is data-parallel: every row other than the pivot row is owned by
//! exactly one worker, which XORs it against the shared, read-only pivot row
//! when its bit in the current column is set.
//!
//! ```text
//! rows:  [ 0 .. rank )  [rank]  ( rank .. N )
//!         \_ chunked _/  pivot   \_ chunked _/
//!              │         (read)       │
//!              └──── par_chunks_mut ──┘  → barrier → next column
//! ```
//!
//! Clearing the column above the pivot as well as below it leaves the
//! matrix in reduced row-echelon form: pivot row `i` has its leading one at
//! `pivots[i]` and a zero in every other pivot column.
//!
//! # Invariant
//!
//! When column `col` is processed, every row at or below position `rank` is
//! zero in all columns left of `col`. The pivot row is therefore zero in
//! every word before `col / 64`, and the pass only XORs the word suffix.

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::bitrow::{BitRow, WORD_BITS};
use crate::config::SolverConfig;
use crate::error::{Result, SolveError};
use crate::system::LinearSystem;

/// Runs forward elimination on owned systems.
#[derive(Clone, Debug, Default)]
pub struct Eliminator {
    config: SolverConfig,
}

impl Eliminator {
    /// Creates an eliminator with the given configuration.
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Reduces `system` and rejects it if a row reads `0 = 1`.
    ///
    /// # Errors
    ///
    /// - [`SolveError::InconsistentSystem`] if the system has no solution.
    /// - [`SolveError::InvalidConfig`] / [`SolveError::WorkerPool`] if the
    ///   worker pool cannot be set up.
    pub fn reduce(&self, system: LinearSystem) -> Result<ReducedSystem> {
        let reduced = self.eliminate(system)?;
        reduced.check_consistency()?;
        Ok(reduced)
    }

    /// Reduces `system` without judging consistency.
    ///
    /// The rank and pivots are meaningful whether or not a solution exists.
    ///
    /// # Errors
    ///
    /// [`SolveError::InvalidConfig`] / [`SolveError::WorkerPool`] if the
    /// worker pool cannot be set up.
    pub fn eliminate(&self, system: LinearSystem) -> Result<ReducedSystem> {
        self.config.validate()?;
        let unknowns = system.unknowns();
        let mut rows = system.into_rows();

        let pivots = match self.config.threads {
            Some(threads) => {
                let pool = ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("lockcube-elim-{i}"))
                    .build()
                    .map_err(|e| SolveError::WorkerPool(e.to_string()))?;
                pool.install(|| self.forward(&mut rows, unknowns))
            }
            None => self.forward(&mut rows, unknowns),
        };

        tracing::debug!(unknowns, rank = pivots.len(), "elimination finished");
        Ok(ReducedSystem {
            rows,
            unknowns,
            pivots,
        })
    }

    fn forward(&self, rows: &mut [BitRow], unknowns: usize) -> Vec<usize> {
        let mut pivots = Vec::new();
        let mut rank = 0;

        for col in 0..unknowns {
            if rank == unknowns {
                break;
            }
            if let Some(offset) = rows[rank..].iter().position(|row| row.get(col)) {
                rows.swap(rank, rank + offset);
                pivots.push(col);
                self.clear_column(rows, rank, col);
                rank += 1;
            }
            // After the barrier: no worker is touching the rows.
            if (col + 1) % self.config.progress_interval == 0 {
                tracing::debug!(column = col, of = unknowns, rank, "column eliminated");
            }
        }
        pivots
    }

    /// XORs the pivot row into every other row with a one in `col`.
    fn clear_column(&self, rows: &mut [BitRow], pivot: usize, col: usize) {
        let (above, rest) = rows.split_at_mut(pivot);
        let Some((pivot_row, below)) = rest.split_first_mut() else {
            return;
        };
        let pivot_row: &BitRow = pivot_row;
        debug_assert!(pivot_row.is_zero_below(col));

        let start_word = col / WORD_BITS;
        let clear = |row: &mut BitRow| {
            if row.get(col) {
                row.xor_assign_from_word(pivot_row, start_word);
            }
        };

        let pending = above.len() + below.len();
        let workers = rayon::current_num_threads();
        if pending < self.config.min_parallel_rows || workers <= 1 {
            above.iter_mut().chain(below.iter_mut()).for_each(&clear);
            return;
        }

        let chunk = pending.div_ceil(workers).max(1);
        above
            .par_chunks_mut(chunk)
            .chain(below.par_chunks_mut(chunk))
            .for_each(|block| block.iter_mut().for_each(&clear));
    }
}

/// A system in reduced row-echelon form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReducedSystem {
    pub(crate) rows: Vec<BitRow>,
    pub(crate) unknowns: usize,
    pub(crate) pivots: Vec<usize>,
}

impl ReducedSystem {
    /// Rank of the coefficient matrix over GF(2).
    #[inline]
    #[must_use]
    pub fn rank(&self) -> usize {
        self.pivots.len()
    }

    /// Pivot column of each of the first [`rank`](Self::rank) rows,
    /// strictly increasing.
    #[inline]
    #[must_use]
    pub fn pivots(&self) -> &[usize] {
        &self.pivots
    }

    /// Number of unknowns.
    #[inline]
    #[must_use]
    pub fn unknowns(&self) -> usize {
        self.unknowns
    }

    /// Number of free variables, `unknowns - rank`.
    #[inline]
    #[must_use]
    pub fn nullity(&self) -> usize {
        self.unknowns - self.rank()
    }

    /// The reduced augmented rows.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[BitRow] {
        &self.rows
    }

    /// Columns that never received a pivot, ascending.
    pub fn free_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.unknowns).filter(|c| self.pivots.binary_search(c).is_err())
    }

    /// First row past the rank whose coefficients vanish but whose RHS is 1.
    #[must_use]
    pub fn inconsistent_row(&self) -> Option<usize> {
        let rank = self.rank();
        self.rows[rank..]
            .iter()
            .position(|row| row.get(self.unknowns) && row.is_zero_below(self.unknowns))
            .map(|offset| rank + offset)
    }

    /// Fails if any row reads `0 = 1`.
    ///
    /// # Errors
    ///
    /// [`SolveError::InconsistentSystem`] naming the first such row.
    pub fn check_consistency(&self) -> Result<()> {
        match self.inconsistent_row() {
            Some(row) => Err(SolveError::InconsistentSystem { row }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Extents, GridSnapshot};
    use std::fmt;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing::{Event, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    fn cube_system(x: usize, y: usize, z: usize) -> LinearSystem {
        // Reached by toggling, so always consistent.
        let ext = Extents::new(x, y, z).unwrap();
        let mut snap = GridSnapshot::new(ext);
        for i in (0..ext.cell_count()).filter(|i| i % 5 == 0) {
            snap.toggle(ext.coord(i)).unwrap();
        }
        LinearSystem::build(&snap).unwrap()
    }

    fn rows_from(bits: &[&[bool]]) -> LinearSystem {
        let rows = bits.iter().map(|r| BitRow::from_bools(r)).collect();
        LinearSystem::from_rows(rows, bits.len()).unwrap()
    }

    #[test]
    fn contradiction_is_reported() {
        // x0 + x1 = 1 and x0 + x1 = 0
        let sys = rows_from(&[&[true, true, true], &[true, true, false]]);
        let err = Eliminator::default().reduce(sys.clone()).unwrap_err();
        assert_eq!(err, SolveError::InconsistentSystem { row: 1 });

        let reduced = Eliminator::default().eliminate(sys).unwrap();
        assert_eq!(reduced.rank(), 1);
        assert_eq!(reduced.pivots(), &[0]);
        assert_eq!(reduced.free_columns().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn pivot_found_below_is_swapped_up() {
        // Column 0 only appears in the last row.
        let sys = rows_from(&[
            &[false, true, false, true],
            &[false, false, true, false],
            &[true, true, false, false],
        ]);
        let reduced = Eliminator::default().reduce(sys).unwrap();
        assert_eq!(reduced.rank(), 3);
        assert_eq!(reduced.pivots(), &[0, 1, 2]);
        assert_eq!(reduced.nullity(), 0);
        // Fully reduced: identity on the left, solution on the right.
        assert_eq!(reduced.rows()[0], BitRow::from_bools(&[true, false, false, true]));
        assert_eq!(reduced.rows()[1], BitRow::from_bools(&[false, true, false, true]));
        assert_eq!(reduced.rows()[2], BitRow::from_bools(&[false, false, true, false]));
    }

    #[test]
    fn reduced_form_clears_other_pivot_columns() {
        let reduced = Eliminator::default().reduce(cube_system(3, 4, 2)).unwrap();
        let pivots = reduced.pivots();
        assert!(pivots.windows(2).all(|w| w[0] < w[1]));
        for (i, &p) in pivots.iter().enumerate() {
            let row = &reduced.rows()[i];
            assert!(row.is_zero_below(p), "row {i} has ones left of its pivot");
            for (k, &q) in pivots.iter().enumerate() {
                assert_eq!(row.get(q), i == k, "row {i}, pivot column {q}");
            }
        }
        for row in &reduced.rows()[reduced.rank()..] {
            assert_eq!(row.count_ones(), 0);
        }
    }

    #[test]
    fn parallel_pass_matches_sequential() {
        let sys = cube_system(4, 5, 6);
        let sequential = Eliminator::new(SolverConfig::default().with_threads(1))
            .reduce(sys.clone())
            .unwrap();
        let parallel = Eliminator::new(
            SolverConfig::default()
                .with_threads(4)
                .with_min_parallel_rows(0),
        )
        .reduce(sys)
        .unwrap();
        assert_eq!(sequential, parallel);
    }

    #[derive(Clone, Default)]
    struct Progress(Arc<Mutex<Vec<(u64, u64)>>>);

    #[derive(Default)]
    struct ProgressFields {
        column: Option<u64>,
        rank: Option<u64>,
    }

    impl Visit for ProgressFields {
        fn record_u64(&mut self, field: &Field, value: u64) {
            match field.name() {
                "column" => self.column = Some(value),
                "rank" => self.rank = Some(value),
                _ => {}
            }
        }

        fn record_debug(&mut self, _field: &Field, _value: &dyn fmt::Debug) {}
    }

    impl<S: Subscriber> Layer<S> for Progress {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut fields = ProgressFields::default();
            event.record(&mut fields);
            if let (Some(column), Some(rank)) = (fields.column, fields.rank) {
                self.0.lock().unwrap().push((column, rank));
            }
        }
    }

    #[test]
    fn progress_reports_the_rank_after_each_column() {
        // x0 + x1 = 1 twice: column 0 pivots, column 1 stays free.
        let sys = rows_from(&[&[true, true, true], &[true, true, true]]);
        let progress = Progress::default();
        let subscriber = tracing_subscriber::registry().with(progress.clone());
        tracing::subscriber::with_default(subscriber, || {
            Eliminator::new(SolverConfig::default().with_progress_interval(1))
                .reduce(sys)
                .unwrap();
        });
        assert_eq!(*progress.0.lock().unwrap(), vec![(0, 1), (1, 1)]);
    }

    #[test]
    fn zero_threads_is_a_config_error() {
        let err = Eliminator::new(SolverConfig::default().with_threads(0))
            .reduce(cube_system(1, 1, 1))
            .unwrap_err();
        assert!(matches!(err, SolveError::InvalidConfig(_)));
    }

    #[test]
    fn full_rank_stops_early() {
        let reduced = Eliminator::default().reduce(cube_system(1, 1, 1)).unwrap();
        assert_eq!(reduced.rank(), 1);
        assert_eq!(reduced.inconsistent_row(), None);
    }
}
