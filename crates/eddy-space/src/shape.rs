//! Square grid with a one-cell boundary ring.

use crate::error::SpaceError;

/// Geometry of an N×N simulation grid.
///
/// Interior cells have indices `1..=N` on both axes; indices `0` and `N+1`
/// form the boundary ring. Buffers are flat and row-major:
/// `index(i, j) = i + j * (N + 2)`, so `i` is the column and `j` the row.
///
/// # Examples
///
/// ```
/// use eddy_space::GridShape;
///
/// let shape = GridShape::new(4).unwrap();
/// assert_eq!(shape.stride(), 6);
/// assert_eq!(shape.buffer_len(), 36);
/// assert_eq!(shape.index(1, 1), 7);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridShape {
    resolution: u32,
}

impl GridShape {
    /// Largest accepted interior resolution.
    ///
    /// At this size each buffer holds about 67M `f32` values (256 MiB),
    /// and a grid owns six of them.
    pub const MAX_RESOLUTION: u32 = 8190;

    /// Create a shape with `resolution × resolution` interior cells.
    ///
    /// Returns `Err(SpaceError::EmptySpace)` for zero, or
    /// `Err(SpaceError::DimensionTooLarge)` above [`MAX_RESOLUTION`](Self::MAX_RESOLUTION).
    pub fn new(resolution: u32) -> Result<Self, SpaceError> {
        if resolution == 0 {
            return Err(SpaceError::EmptySpace);
        }
        if resolution > Self::MAX_RESOLUTION {
            return Err(SpaceError::DimensionTooLarge {
                name: "resolution",
                value: resolution,
                max: Self::MAX_RESOLUTION,
            });
        }
        Ok(Self { resolution })
    }

    /// Interior cells per axis (N).
    pub fn resolution(&self) -> usize {
        self.resolution as usize
    }

    /// Buffer cells per axis, boundary included (N + 2).
    pub fn stride(&self) -> usize {
        self.resolution as usize + 2
    }

    /// Length of every field buffer, `(N + 2)²`.
    pub fn buffer_len(&self) -> usize {
        self.stride() * self.stride()
    }

    /// Number of interior cells, `N²`.
    pub fn cell_count(&self) -> usize {
        self.resolution() * self.resolution()
    }

    /// Flat buffer index of column `i`, row `j`.
    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        i + j * self.stride()
    }

    /// Whether `(i, j)` lies on the boundary ring.
    pub fn is_boundary(&self, i: usize, j: usize) -> bool {
        let last = self.resolution() + 1;
        i == 0 || j == 0 || i == last || j == last
    }

    /// Buffer index along one axis of the interior cell containing `x`.
    ///
    /// `x` is measured in interior cell units, so `[0, 1)` is the first
    /// interior cell. Values outside `[0, N)` (and NaN) clamp to the
    /// nearest interior cell.
    pub fn cell_containing(&self, x: f32) -> usize {
        let n = self.resolution();
        if !(x >= 0.0) {
            return 1;
        }
        if x >= n as f32 {
            return n;
        }
        (x as usize).min(n - 1) + 1
    }

    /// Flat buffer index of the interior cell containing `(x, y)`, clamped.
    pub fn index_containing(&self, x: f32, y: f32) -> usize {
        self.index(self.cell_containing(x), self.cell_containing(y))
    }

    /// Interior `(i, j)` pairs in sweep order: row by row, low to high.
    pub fn interior(&self) -> impl Iterator<Item = (usize, usize)> {
        let n = self.resolution();
        (1..=n).flat_map(move |j| (1..=n).map(move |i| (i, j)))
    }
}
