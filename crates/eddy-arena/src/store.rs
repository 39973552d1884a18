//! The six buffers of a fluid grid.

use eddy_core::FieldKind;
use eddy_space::GridShape;

use crate::pingpong::FieldPair;

/// Owns one [`FieldPair`] per [`FieldKind`], sized for a [`GridShape`].
///
/// The store has no algorithmic logic. It hands out the pairs, keeps their
/// lengths fixed, and offers the whole-state operations a grid needs
/// (zeroing, finite checks, footprint).
#[derive(Clone, Debug)]
pub struct FieldStore {
    shape: GridShape,
    velocity_x: FieldPair,
    velocity_y: FieldPair,
    density: FieldPair,
}

impl FieldStore {
    /// Allocate all six buffers zero-filled.
    pub fn new(shape: GridShape) -> Self {
        let len = shape.buffer_len();
        Self {
            shape,
            velocity_x: FieldPair::new(len),
            velocity_y: FieldPair::new(len),
            density: FieldPair::new(len),
        }
    }

    /// The geometry every buffer is sized for.
    pub fn shape(&self) -> &GridShape {
        &self.shape
    }

    /// The pair backing `kind`.
    pub fn pair(&self, kind: FieldKind) -> &FieldPair {
        match kind {
            FieldKind::VelocityX => &self.velocity_x,
            FieldKind::VelocityY => &self.velocity_y,
            FieldKind::Density => &self.density,
        }
    }

    /// Mutable access to the pair backing `kind`.
    pub fn pair_mut(&mut self, kind: FieldKind) -> &mut FieldPair {
        match kind {
            FieldKind::VelocityX => &mut self.velocity_x,
            FieldKind::VelocityY => &mut self.velocity_y,
            FieldKind::Density => &mut self.density,
        }
    }

    /// The two velocity pairs, borrowed together.
    pub fn velocity_mut(&mut self) -> (&mut FieldPair, &mut FieldPair) {
        (&mut self.velocity_x, &mut self.velocity_y)
    }

    /// All three pairs, borrowed together as `(vx, vy, density)`.
    pub fn all_mut(&mut self) -> (&mut FieldPair, &mut FieldPair, &mut FieldPair) {
        (&mut self.velocity_x, &mut self.velocity_y, &mut self.density)
    }

    /// The current buffer of `kind`.
    pub fn current(&self, kind: FieldKind) -> &[f32] {
        self.pair(kind).current()
    }

    /// Zero every buffer.
    pub fn clear(&mut self) {
        self.velocity_x.clear();
        self.velocity_y.clear();
        self.density.clear();
    }

    /// The first field holding NaN or an infinity, with its buffer index.
    pub fn first_non_finite(&self) -> Option<(FieldKind, usize)> {
        FieldKind::ALL
            .into_iter()
            .find_map(|kind| self.pair(kind).first_non_finite().map(|idx| (kind, idx)))
    }

    /// Bytes held by all six buffers.
    pub fn memory_bytes(&self) -> usize {
        FieldKind::ALL
            .into_iter()
            .map(|kind| self.pair(kind).memory_bytes())
            .sum()
    }
}
