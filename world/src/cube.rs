//! The live cube.

use lockcube_solver::{Coord, Extents, GridSnapshot};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::WorldConfig;
use crate::error::WorldError;

/// A lock cube that only changes through [`LockCube::click`].
///
/// Generation starts from the all-unlocked state and clicks cells at
/// random, so every generated cube is solvable.
#[derive(Clone, Debug)]
pub struct LockCube {
    state: GridSnapshot,
    clicks: u64,
}

impl LockCube {
    /// Draws extents and a lock pattern from `config`.
    ///
    /// # Errors
    ///
    /// [`WorldError::InvalidConfig`] if `config` does not validate.
    pub fn generate(config: &WorldConfig) -> Result<Self, WorldError> {
        config.validate()?;
        let mut rng = seeded(config.seed);
        let mut axis = || rng.gen_range(config.min_axis..config.max_axis);
        let extents = Extents::new(axis(), axis(), axis())?;
        Self::lock_randomly(extents, config.lock_frequency, &mut rng)
    }

    /// Draws a lock pattern for fixed `extents`. The axis range of `config`
    /// is ignored.
    ///
    /// # Errors
    ///
    /// [`WorldError::InvalidConfig`] if `config.lock_frequency` is zero.
    pub fn generate_with_extents(
        extents: Extents,
        config: &WorldConfig,
    ) -> Result<Self, WorldError> {
        check_frequency(config.lock_frequency)?;
        Self::lock_randomly(extents, config.lock_frequency, &mut seeded(config.seed))
    }

    /// A cube with fixed extents and a seeded lock pattern.
    ///
    /// # Errors
    ///
    /// [`WorldError::InvalidConfig`] if `lock_frequency` is zero.
    pub fn with_extents(
        extents: Extents,
        lock_frequency: u64,
        seed: u64,
    ) -> Result<Self, WorldError> {
        check_frequency(lock_frequency)?;
        Self::lock_randomly(extents, lock_frequency, &mut StdRng::seed_from_u64(seed))
    }

    /// Adopts an existing lock state.
    #[must_use]
    pub fn from_snapshot(state: GridSnapshot) -> Self {
        Self { state, clicks: 0 }
    }

    fn lock_randomly(
        extents: Extents,
        lock_frequency: u64,
        rng: &mut impl Rng,
    ) -> Result<Self, WorldError> {
        let mut state = GridSnapshot::new(extents);
        for index in 0..extents.cell_count() {
            if rng.gen_range(0..lock_frequency) != 0 {
                state.toggle(extents.coord(index))?;
            }
        }
        tracing::debug!(%extents, locked = state.locked_count(), "generated cube");
        Ok(Self::from_snapshot(state))
    }

    /// Cube dimensions.
    #[must_use]
    pub fn extents(&self) -> Extents {
        self.state.extents()
    }

    /// Toggles `c` and every cell on its three axis lines.
    ///
    /// # Errors
    ///
    /// [`WorldError::Grid`] wrapping `IndexOutOfRange` if `c` lies outside
    /// the cube; the cube is left untouched.
    pub fn click(&mut self, c: Coord) -> Result<(), WorldError> {
        self.state.toggle(c)?;
        self.clicks += 1;
        Ok(())
    }

    /// Clicks every coordinate in order.
    ///
    /// # Errors
    ///
    /// Stops at the first coordinate [`LockCube::click`] rejects.
    pub fn apply<I>(&mut self, coords: I) -> Result<(), WorldError>
    where
        I: IntoIterator<Item = Coord>,
    {
        coords.into_iter().try_for_each(|c| self.click(c))
    }

    /// True while any cell is locked.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        !self.state.is_unlocked()
    }

    /// Number of locked cells.
    #[must_use]
    pub fn locked_count(&self) -> usize {
        self.state.locked_count()
    }

    /// Number of clicks applied since the cube was created.
    #[must_use]
    pub fn clicks(&self) -> u64 {
        self.clicks
    }

    /// A copy of the current lock state.
    #[must_use]
    pub fn read(&self) -> GridSnapshot {
        self.state.clone()
    }

    /// The current lock state as `state[x][y][z]`.
    #[must_use]
    pub fn read_nested(&self) -> Vec<Vec<Vec<bool>>> {
        let ext = self.extents();
        (0..ext.x())
            .map(|x| {
                (0..ext.y())
                    .map(|y| {
                        (0..ext.z())
                            .map(|z| self.state.get(Coord::new(x, y, z)))
                            .collect()
                    })
                    .collect()
            })
            .collect()
    }
}

fn seeded(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
}

fn check_frequency(lock_frequency: u64) -> Result<(), WorldError> {
    if lock_frequency == 0 {
        return Err(WorldError::InvalidConfig(
            "lock_frequency must be at least 1".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_generation_is_reproducible() {
        let cfg = WorldConfig {
            seed: Some(7),
            ..WorldConfig::default()
        };
        let a = LockCube::generate(&cfg).unwrap();
        let b = LockCube::generate(&cfg).unwrap();
        assert_eq!(a.read(), b.read());
        assert_eq!(a.clicks(), 0);
    }

    #[test]
    fn frequency_one_never_clicks() {
        let ext = Extents::new(3, 3, 3).unwrap();
        let cube = LockCube::with_extents(ext, 1, 99).unwrap();
        assert!(!cube.is_locked());
        assert!(LockCube::with_extents(ext, 0, 99).is_err());
    }

    #[test]
    fn fixed_extents_follow_the_seed() {
        let ext = Extents::new(3, 5, 2).unwrap();
        let cfg = WorldConfig {
            seed: Some(11),
            ..WorldConfig::default()
        };
        let a = LockCube::generate_with_extents(ext, &cfg).unwrap();
        let b = LockCube::with_extents(ext, cfg.lock_frequency, 11).unwrap();
        assert_eq!(a.extents(), ext);
        assert_eq!(a.read(), b.read());
    }

    #[test]
    fn click_outside_leaves_cube_alone() {
        let ext = Extents::new(2, 2, 2).unwrap();
        let mut cube = LockCube::with_extents(ext, 3, 1).unwrap();
        let before = cube.read();
        assert!(cube.click(Coord::new(0, 2, 0)).is_err());
        assert_eq!(cube.read(), before);
        assert_eq!(cube.clicks(), 0);
    }
}
