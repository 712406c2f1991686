//! Host-side plumbing for the `lockcube-unlock` binary: configuration files
//! and the timed read, solve and apply loop.

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

pub mod report;
pub mod settings;

pub use report::{unlock, UnlockReport};
pub use settings::Settings;
