//! Property tests for the lock cube world.

use lockcube_solver::{Coord, Extents, GridSnapshot};
use lockcube_world::{LockCube, WorldConfig, WorldError};
use proptest::prelude::*;

fn small_cube() -> impl Strategy<Value = (LockCube, Coord)> {
    (1usize..6, 1usize..6, 1usize..6, any::<u64>()).prop_flat_map(|(x, y, z, seed)| {
        let ext = Extents::new(x, y, z).unwrap();
        let cube = LockCube::with_extents(ext, 3, seed).unwrap();
        (Just(cube), (0..x, 0..y, 0..z).prop_map(Coord::from))
    })
}

// =============================================================================
// Click
// =============================================================================

proptest! {
    /// Clicking the same cell twice restores the original state.
    #[test]
    fn prop_click_is_self_inverse((mut cube, c) in small_cube()) {
        let before = cube.read();
        cube.click(c).unwrap();
        cube.click(c).unwrap();
        prop_assert_eq!(cube.read(), before);
        prop_assert_eq!(cube.clicks(), 2);
    }

    /// A click flips exactly the three axis lines through the cell.
    #[test]
    fn prop_click_flips_its_lines((mut cube, c) in small_cube()) {
        let before = cube.read();
        cube.click(c).unwrap();
        let after = cube.read();
        let ext = cube.extents();
        for i in 0..ext.cell_count() {
            let d = ext.coord(i);
            let shared =
                usize::from(d.x == c.x) + usize::from(d.y == c.y) + usize::from(d.z == c.z);
            prop_assert_eq!(before.get(d) != after.get(d), shared >= 2, "cell {}", d);
        }
    }

    /// The nested view and the flat snapshot agree.
    #[test]
    fn prop_nested_view_matches_snapshot((cube, _c) in small_cube()) {
        let nested = GridSnapshot::from_nested(&cube.read_nested()).unwrap();
        prop_assert_eq!(nested, cube.read());
    }
}

// =============================================================================
// Generation
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Generated extents stay inside the configured half-open range.
    #[test]
    fn prop_generated_extents_in_range(
        seed in any::<u64>(),
        min in 1usize..4,
        span in 1usize..4
    ) {
        let cfg = WorldConfig {
            min_axis: min,
            max_axis: min + span,
            lock_frequency: 3,
            seed: Some(seed),
        };
        let cube = LockCube::generate(&cfg).unwrap();
        let ext = cube.extents();
        for len in [ext.x(), ext.y(), ext.z()] {
            prop_assert!((min..min + span).contains(&len));
        }
    }
}

#[test]
fn invalid_config_is_rejected_before_generation() {
    let cfg = WorldConfig {
        min_axis: 8,
        max_axis: 4,
        ..WorldConfig::default()
    };
    assert!(matches!(
        LockCube::generate(&cfg),
        Err(WorldError::InvalidConfig(_))
    ));
}

#[test]
fn apply_stops_at_first_bad_coordinate() {
    let ext = Extents::new(2, 2, 2).unwrap();
    let mut cube = LockCube::from_snapshot(GridSnapshot::new(ext));
    let err = cube
        .apply([Coord::new(0, 0, 0), Coord::new(5, 0, 0), Coord::new(1, 1, 1)])
        .unwrap_err();
    assert!(matches!(err, WorldError::Grid(_)));
    assert_eq!(cube.clicks(), 1);
    assert_eq!(cube.locked_count(), 4);
}
