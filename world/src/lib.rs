//! The lock cube puzzle world.
//!
//! Hosts a randomly locked cube and the only operation that changes it,
//! [`LockCube::click`]. The solver never sees this type; it works on the
//! [`GridSnapshot`](lockcube_solver::GridSnapshot) returned by
//! [`LockCube::read`], and the host clicks the coordinates it returns.
//!
//! # Example
//!
//! ```
//! use lockcube_world::{LockCube, WorldConfig};
//!
//! let cfg = WorldConfig {
//!     max_axis: 8,
//!     seed: Some(42),
//!     ..WorldConfig::default()
//! };
//! let mut cube = LockCube::generate(&cfg).unwrap();
//!
//! let toggles = lockcube_solver::solve(&cube.read()).unwrap();
//! cube.apply(toggles).unwrap();
//! assert!(!cube.is_locked());
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

mod config;
mod cube;
mod error;

pub use config::{WorldConfig, DEFAULT_LOCK_FREQUENCY, DEFAULT_MAX_AXIS, DEFAULT_MIN_AXIS};
pub use cube::LockCube;
pub use error::WorldError;
