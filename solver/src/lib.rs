//! Lock cube solver - GF(2) linear algebra for a 3-D toggle puzzle.
//!
//! A cube of `X × Y × Z` cells is either locked or unlocked cell by cell.
//! Toggling a cell flips it together with every cell on its X-, Y- and
//! Z-line. Which toggles to fire is a linear system over GF(2): one equation
//! per cell, one unknown per toggle, addition is XOR.
//!
//! # Pipeline
//!
//! ```text
//! GridSnapshot ──build──▶ LinearSystem ──reduce──▶ ReducedSystem ──back_substitute──▶ Solution
//!  (flat bits)            N rows × (N+1) bits      rank, pivots      free vars = 0       toggle coords
//! ```
//!
//! | Stage | Module | Cost |
//! |-------|--------|------|
//! | Packed rows | [`bitrow`] | `O(1)` bit ops, `O(N/64)` XOR |
//! | Builder | [`system`] | `O(N·(X+Y+Z))` |
//! | Elimination | [`eliminate`] | `O(N³/64)`, parallel per column |
//! | Back-substitution | [`backsub`] | `O(N²/64)` |
//!
//! The solver never touches a live cube. It reads a [`GridSnapshot`] and
//! returns coordinates; applying them is the host's business.
//!
//! # Example
//!
//! ```
//! use lockcube_solver::{Coord, Extents, GridSnapshot, Solver, SolverConfig};
//!
//! let ext = Extents::new(3, 4, 2).unwrap();
//! let mut cube = GridSnapshot::new(ext);
//! cube.toggle(Coord::new(1, 2, 0)).unwrap();
//! cube.toggle(Coord::new(2, 0, 1)).unwrap();
//!
//! let solution = Solver::new(SolverConfig::default()).solve(&cube).unwrap();
//! for c in solution.coords() {
//!     cube.toggle(c).unwrap();
//! }
//! assert!(cube.is_unlocked());
//! ```
//!
//! # Failure
//!
//! A state that no toggle set can clear is reported as
//! [`SolveError::InconsistentSystem`], never as a partial answer:
//!
//! ```
//! use lockcube_solver::{solve, Extents, GridSnapshot, SolveError};
//!
//! // Two cells on one line: every toggle flips both, so [locked, unlocked]
//! // is unreachable.
//! let ext = Extents::new(2, 1, 1).unwrap();
//! let cube = GridSnapshot::from_cells(ext, &[true, false]).unwrap();
//! assert!(matches!(solve(&cube), Err(SolveError::InconsistentSystem { .. })));
//! ```

#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::missing_errors_doc
    )
)]
#![deny(missing_docs)]

pub mod backsub;
pub mod bitrow;
pub mod config;
pub mod eliminate;
pub mod error;
pub mod grid;
pub mod solve;
pub mod system;

pub use bitrow::{BitRow, Ones, WORD_BITS};
pub use config::SolverConfig;
pub use eliminate::{Eliminator, ReducedSystem};
pub use error::{Result, SolveError};
pub use grid::{Coord, Extents, GridSnapshot};
pub use solve::{solve, Solution, Solver};
pub use system::LinearSystem;
