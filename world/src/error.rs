//! World errors.

use lockcube_solver::SolveError;
use thiserror::Error;

/// Failure while generating or manipulating a cube.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    /// A generation parameter is out of range.
    #[error("invalid world configuration: {0}")]
    InvalidConfig(String),

    /// A coordinate or shape was rejected by the grid.
    #[error(transparent)]
    Grid(#[from] SolveError),
}
