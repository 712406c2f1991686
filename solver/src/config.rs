//! Solver tuning knobs.
//!
//! Nothing here changes the result of a solve; the knobs only trade
//! parallelism and logging against overhead. Hosts usually load the
//! configuration from a file (the `serde` feature derives the impls) and
//! fall back to [`SolverConfig::default`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, SolveError};

/// Default row count below which an elimination pass stays on one thread.
pub const DEFAULT_MIN_PARALLEL_ROWS: usize = 256;

/// Default number of columns between two progress events.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 1000;

/// Configuration of a [`Solver`](crate::Solver).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SolverConfig {
    /// Size of a dedicated worker pool. `None` runs on rayon's global pool,
    /// which is sized to the hardware.
    pub threads: Option<usize>,
    /// Elimination passes over fewer rows than this run on the calling thread.
    pub min_parallel_rows: usize,
    /// A progress event is logged every this many columns.
    pub progress_interval: usize,
    /// Replay the toggles on a copy of the snapshot before returning them.
    pub verify: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            threads: None,
            min_parallel_rows: DEFAULT_MIN_PARALLEL_ROWS,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            verify: true,
        }
    }
}

impl SolverConfig {
    /// Pins the worker pool size.
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Sets the sequential cutoff for elimination passes.
    #[must_use]
    pub fn with_min_parallel_rows(mut self, rows: usize) -> Self {
        self.min_parallel_rows = rows;
        self
    }

    /// Sets the progress logging interval, in columns.
    #[must_use]
    pub fn with_progress_interval(mut self, columns: usize) -> Self {
        self.progress_interval = columns;
        self
    }

    /// Enables or disables the replay check.
    #[must_use]
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Rejects values that cannot drive a solve.
    ///
    /// # Errors
    ///
    /// [`SolveError::InvalidConfig`] for a zero-sized pool or a zero
    /// progress interval.
    pub fn validate(&self) -> Result<()> {
        if self.threads == Some(0) {
            return Err(SolveError::InvalidConfig(
                "threads must be at least 1".into(),
            ));
        }
        if self.progress_interval == 0 {
            return Err(SolveError::InvalidConfig(
                "progress_interval must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
