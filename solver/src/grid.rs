//! Cube geometry: extents, coordinates and the flat lock-state snapshot.
//!
//! Cells are addressed in row-major order,
//! `index(x, y, z) = x·Y·Z + y·Z + z`, and the lock state is held in a single
//! packed [`BitRow`] with the same layout as one matrix row. There is no
//! nested per-axis container anywhere in the solver.
//!
//! # Toggle footprint
//!
//! Toggling `(x, y, z)` flips every cell that shares at least two of its
//! three coordinates: the whole X-line, Y-line and Z-line through it. In
//! linear order the footprint comes out already sorted:
//!
//! ```text
//! X-line, i < x   →  below the x-slab
//! Y-line, j < y   →  inside the slab, before the Z-line
//! Z-line, all k   →  contiguous run, contains the cell itself
//! Y-line, j > y
//! X-line, i > x   →  above the x-slab
//! ```
//!
//! # Example
//!
//! ```
//! use lockcube_solver::{Coord, Extents};
//!
//! let ext = Extents::new(2, 3, 4).unwrap();
//! assert_eq!(ext.cell_count(), 24);
//! assert_eq!(ext.index(Coord::new(1, 2, 3)), 23);
//! assert_eq!(ext.coord(23), Coord::new(1, 2, 3));
//! assert_eq!(ext.footprint(Coord::new(0, 0, 0)).count(), 2 + 3 + 4 - 2);
//! ```

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bitrow::BitRow;
use crate::error::{Result, SolveError};

/// A cell position inside a cube.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coord {
    /// Position along the X axis.
    pub x: usize,
    /// Position along the Y axis.
    pub y: usize,
    /// Position along the Z axis.
    pub z: usize,
}

impl Coord {
    /// Creates a coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }
}

impl From<(usize, usize, usize)> for Coord {
    fn from((x, y, z): (usize, usize, usize)) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Cube dimensions. Every axis is at least 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Extents {
    x: usize,
    y: usize,
    z: usize,
}

impl Extents {
    /// Validates and creates cube extents.
    ///
    /// Every valid cube can be indexed: `X·Y·Z + 1` (the augmented row
    /// width) fits in `usize`.
    ///
    /// # Errors
    ///
    /// - [`SolveError::DimensionMismatch`] naming the axis if any axis is zero.
    /// - [`SolveError::Oversized`] if the cell count or the row width
    ///   overflows `usize`.
    pub fn new(x: usize, y: usize, z: usize) -> Result<Self> {
        for (axis, len) in [('x', x), ('y', y), ('z', z)] {
            if len == 0 {
                return Err(SolveError::DimensionMismatch {
                    expected: 1,
                    found: 0,
                    axis: Some(axis),
                });
            }
        }
        x.checked_mul(y)
            .and_then(|plane| plane.checked_mul(z))
            .and_then(|cells| cells.checked_add(1))
            .ok_or(SolveError::Oversized { x, y, z })?;
        Ok(Self { x, y, z })
    }

    /// Extent along X.
    #[inline]
    #[must_use]
    pub const fn x(&self) -> usize {
        self.x
    }

    /// Extent along Y.
    #[inline]
    #[must_use]
    pub const fn y(&self) -> usize {
        self.y
    }

    /// Extent along Z.
    #[inline]
    #[must_use]
    pub const fn z(&self) -> usize {
        self.z
    }

    /// Total number of cells, `X·Y·Z`. Never overflows; see [`Extents::new`].
    #[inline]
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.x * self.y * self.z
    }

    /// True when `c` lies inside the cube.
    #[inline]
    #[must_use]
    pub const fn contains(&self, c: Coord) -> bool {
        c.x < self.x && c.y < self.y && c.z < self.z
    }

    /// Row-major linear index of `c`.
    ///
    /// `c` must lie inside the cube; see [`Extents::checked_index`].
    #[inline]
    #[must_use]
    pub const fn index(&self, c: Coord) -> usize {
        debug_assert!(self.contains(c));
        c.x * self.y * self.z + c.y * self.z + c.z
    }

    /// Row-major linear index of `c`, rejecting coordinates outside the cube.
    ///
    /// # Errors
    ///
    /// [`SolveError::IndexOutOfRange`] naming the first offending component
    /// and its axis extent.
    pub fn checked_index(&self, c: Coord) -> Result<usize> {
        for (value, bound) in [(c.x, self.x), (c.y, self.y), (c.z, self.z)] {
            if value >= bound {
                return Err(SolveError::IndexOutOfRange {
                    index: value,
                    bound,
                });
            }
        }
        Ok(self.index(c))
    }

    /// Inverse of [`Extents::index`].
    #[inline]
    #[must_use]
    pub const fn coord(&self, index: usize) -> Coord {
        debug_assert!(index < self.cell_count());
        let plane = self.y * self.z;
        let rem = index % plane;
        Coord {
            x: index / plane,
            y: rem / self.z,
            z: index % self.z,
        }
    }

    /// Linear indices flipped by toggling `c`, in ascending order.
    ///
    /// The relation is symmetric: `j` is in the footprint of `i` exactly
    /// when `i` is in the footprint of `j`. The cell itself appears once.
    pub fn footprint(&self, c: Coord) -> impl Iterator<Item = usize> {
        debug_assert!(self.contains(c));
        let (ny, nz) = (self.y, self.z);
        let plane = ny * nz;
        let slab = c.x * plane;
        let x_line = move |i: usize| i * plane + c.y * nz + c.z;
        let y_line = move |j: usize| slab + j * nz + c.z;
        let z_start = slab + c.y * nz;

        (0..c.x)
            .map(x_line)
            .chain((0..c.y).map(y_line))
            .chain(z_start..z_start + nz)
            .chain((c.y + 1..ny).map(y_line))
            .chain((c.x + 1..self.x).map(x_line))
    }
}

impl fmt::Display for Extents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.x, self.y, self.z)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Extents {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> core::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            x: usize,
            y: usize,
            z: usize,
        }
        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.x, raw.y, raw.z).map_err(serde::de::Error::custom)
    }
}

/// Read-only view of a cube's lock state, one bit per cell.
///
/// `true` means locked. The solver drives every cell to `false`.
#[derive(Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    extents: Extents,
    cells: BitRow,
}

impl GridSnapshot {
    /// An all-unlocked snapshot.
    #[must_use]
    pub fn new(extents: Extents) -> Self {
        Self {
            extents,
            cells: BitRow::new(extents.cell_count()),
        }
    }

    /// Builds a snapshot by querying `locked` for every cell.
    pub fn from_fn(extents: Extents, mut locked: impl FnMut(Coord) -> bool) -> Self {
        let mut snap = Self::new(extents);
        for index in 0..extents.cell_count() {
            if locked(extents.coord(index)) {
                snap.cells.set(index);
            }
        }
        snap
    }

    /// Wraps a flat row-major buffer.
    ///
    /// # Errors
    ///
    /// [`SolveError::DimensionMismatch`] if `cells.len()` is not the cell count.
    pub fn from_cells(extents: Extents, cells: &[bool]) -> Result<Self> {
        if cells.len() != extents.cell_count() {
            return Err(SolveError::DimensionMismatch {
                expected: extents.cell_count(),
                found: cells.len(),
                axis: None,
            });
        }
        Ok(Self {
            extents,
            cells: BitRow::from_bools(cells),
        })
    }

    /// Flattens a nested `state[x][y][z]` layout.
    ///
    /// # Errors
    ///
    /// [`SolveError::DimensionMismatch`] if any axis is empty (naming the
    /// axis) or the input is jagged.
    pub fn from_nested(state: &[Vec<Vec<bool>>]) -> Result<Self> {
        let nx = state.len();
        let ny = state.first().map_or(0, Vec::len);
        let nz = state
            .first()
            .and_then(|plane| plane.first())
            .map_or(0, Vec::len);
        let extents = Extents::new(nx, ny, nz)?;

        let mut snap = Self::new(extents);
        for (x, plane) in state.iter().enumerate() {
            if plane.len() != ny {
                return Err(SolveError::DimensionMismatch {
                    expected: ny,
                    found: plane.len(),
                    axis: None,
                });
            }
            for (y, line) in plane.iter().enumerate() {
                if line.len() != nz {
                    return Err(SolveError::DimensionMismatch {
                        expected: nz,
                        found: line.len(),
                        axis: None,
                    });
                }
                for (z, _) in line.iter().enumerate().filter(|&(_, &v)| v) {
                    snap.cells.set(extents.index(Coord { x, y, z }));
                }
            }
        }
        Ok(snap)
    }

    /// Cube dimensions.
    #[inline]
    #[must_use]
    pub fn extents(&self) -> Extents {
        self.extents
    }

    /// The packed cell buffer in row-major order.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &BitRow {
        &self.cells
    }

    /// Lock state of `c`.
    ///
    /// # Panics
    ///
    /// Panics if `c` lies outside the cube.
    #[must_use]
    pub fn get(&self, c: Coord) -> bool {
        assert!(self.extents.contains(c), "{c} outside {} cube", self.extents);
        self.cells.get(self.extents.index(c))
    }

    /// Lock state of `c`.
    ///
    /// # Errors
    ///
    /// [`SolveError::IndexOutOfRange`] if `c` lies outside the cube.
    pub fn checked_get(&self, c: Coord) -> Result<bool> {
        let index = self.extents.checked_index(c)?;
        Ok(self.cells.get(index))
    }

    /// Overwrites the lock state of `c`.
    ///
    /// # Errors
    ///
    /// [`SolveError::IndexOutOfRange`] if `c` lies outside the cube.
    pub fn set(&mut self, c: Coord, locked: bool) -> Result<()> {
        let index = self.extents.checked_index(c)?;
        self.cells.set_to(index, locked);
        Ok(())
    }

    /// Applies the toggle centred on `c`. Applying it twice is a no-op.
    ///
    /// # Errors
    ///
    /// [`SolveError::IndexOutOfRange`] if `c` lies outside the cube.
    pub fn toggle(&mut self, c: Coord) -> Result<()> {
        self.extents.checked_index(c)?;
        for index in self.extents.footprint(c) {
            self.cells.flip(index);
        }
        Ok(())
    }

    /// Number of locked cells.
    #[must_use]
    pub fn locked_count(&self) -> usize {
        self.cells.count_ones()
    }

    /// True when every cell is unlocked.
    #[must_use]
    pub fn is_unlocked(&self) -> bool {
        self.cells.words().iter().all(|&w| w == 0)
    }
}

impl fmt::Debug for GridSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridSnapshot")
            .field("extents", &format_args!("{}", self.extents))
            .field("locked", &self.locked_count())
            .finish()
    }
}
