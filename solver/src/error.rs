//! Error type shared by every stage of a solve.

use thiserror::Error;

/// Failure of a solver operation.
///
/// Every variant is permanent for the given input: the solver is
/// deterministic, so retrying the same call reproduces the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// Two shapes that must agree do not (row widths, vector word counts,
    /// snapshot buffer length, jagged nested input), or a grid axis is
    /// empty. `axis` names the grid axis when one is to blame.
    #[error("dimension mismatch{}: expected {expected}, found {found}", along(.axis))]
    DimensionMismatch {
        /// The size the operation required.
        expected: usize,
        /// The size it was given.
        found: usize,
        /// The offending grid axis: `'x'`, `'y'` or `'z'`.
        axis: Option<char>,
    },

    /// The cell count or the augmented row width does not fit in `usize`.
    #[error("cube {x}x{y}x{z} is too large to index")]
    Oversized {
        /// Extent along X.
        x: usize,
        /// Extent along Y.
        y: usize,
        /// Extent along Z.
        z: usize,
    },

    /// A bit position or coordinate exceeds its declared bound.
    #[error("index {index} out of range (bound {bound})")]
    IndexOutOfRange {
        /// The requested position.
        index: usize,
        /// The exclusive upper bound.
        bound: usize,
    },

    /// After elimination a row with all-zero coefficients demands RHS 1:
    /// no toggle sequence reaches the all-unlocked state.
    #[error("inconsistent system: reduced row {row} reads 0 = 1")]
    InconsistentSystem {
        /// Index of the contradictory row in the reduced matrix.
        row: usize,
    },

    /// A configuration value is out of its accepted range.
    #[error("invalid solver configuration: {0}")]
    InvalidConfig(String),

    /// The dedicated worker pool could not be started.
    #[error("failed to build worker pool: {0}")]
    WorkerPool(String),

    /// Replaying the computed toggles left cells locked.
    #[error("solution replay left {locked} cell(s) locked")]
    Unverified {
        /// Number of cells still locked after replay.
        locked: usize,
    },
}

impl SolveError {
    /// Returns true for the shape errors raised before any elimination work.
    #[must_use]
    pub fn is_dimension_error(&self) -> bool {
        matches!(self, Self::DimensionMismatch { .. } | Self::Oversized { .. })
    }
}

fn along(axis: &Option<char>) -> String {
    axis.map(|a| format!(" along axis {a}")).unwrap_or_default()
}

/// Result alias used throughout the solver.
pub type Result<T> = core::result::Result<T, SolveError>;
