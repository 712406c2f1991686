//! Cube generation parameters.

use serde::{Deserialize, Serialize};

use crate::error::WorldError;

/// Default smallest axis length (inclusive).
pub const DEFAULT_MIN_AXIS: usize = 4;

/// Default largest axis length (exclusive).
pub const DEFAULT_MAX_AXIS: usize = 16;

/// Default lock frequency: each cell is clicked with probability
/// `1 - 1/lock_frequency` during generation.
pub const DEFAULT_LOCK_FREQUENCY: u64 = 3;

/// How [`LockCube::generate`](crate::LockCube::generate) draws a cube.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    /// Smallest axis length, inclusive.
    pub min_axis: usize,
    /// Largest axis length, exclusive.
    pub max_axis: usize,
    /// Generation skips a cell's click when a roll modulo this value is 0.
    pub lock_frequency: u64,
    /// RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            min_axis: DEFAULT_MIN_AXIS,
            max_axis: DEFAULT_MAX_AXIS,
            lock_frequency: DEFAULT_LOCK_FREQUENCY,
            seed: None,
        }
    }
}

impl WorldConfig {
    /// Checks that the axis range is non-empty and the frequency positive.
    ///
    /// # Errors
    ///
    /// [`WorldError::InvalidConfig`] describing the first bad value.
    pub fn validate(&self) -> Result<(), WorldError> {
        if self.min_axis == 0 {
            return Err(WorldError::InvalidConfig("min_axis must be at least 1".into()));
        }
        if self.min_axis >= self.max_axis {
            return Err(WorldError::InvalidConfig(format!(
                "axis range {}..{} is empty",
                self.min_axis, self.max_axis
            )));
        }
        if self.lock_frequency == 0 {
            return Err(WorldError::InvalidConfig(
                "lock_frequency must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(WorldConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_range_rejected() {
        let cfg = WorldConfig {
            min_axis: 5,
            max_axis: 5,
            ..WorldConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(WorldError::InvalidConfig(m)) if m.contains("5..5")));

        let cfg = WorldConfig {
            min_axis: 0,
            ..WorldConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = WorldConfig {
            lock_frequency: 0,
            ..WorldConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
