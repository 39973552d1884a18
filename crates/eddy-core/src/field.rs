//! Field identities and boundary kinds.

use std::fmt;

/// The three simulated quantities a fluid grid owns.
///
/// Each kind is backed by a current/previous buffer pair in the field
/// store, so a grid holds six buffers in total.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldKind {
    /// Horizontal velocity component.
    VelocityX,
    /// Vertical velocity component.
    VelocityY,
    /// Passive scalar carried by the flow (smoke, dye).
    Density,
}

impl FieldKind {
    /// All kinds in storage order.
    pub const ALL: [FieldKind; 3] = [Self::VelocityX, Self::VelocityY, Self::Density];

    /// The boundary rule this field obeys whenever it is written.
    pub fn boundary(self) -> BoundaryKind {
        match self {
            Self::VelocityX => BoundaryKind::VectorX,
            Self::VelocityY => BoundaryKind::VectorY,
            Self::Density => BoundaryKind::Scalar,
        }
    }

    /// Short lowercase name for logs and diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::VelocityX => "velocity_x",
            Self::VelocityY => "velocity_y",
            Self::Density => "density",
        }
    }

    /// Stable numeric code used by the C ABI.
    pub fn code(self) -> u32 {
        match self {
            Self::VelocityX => 0,
            Self::VelocityY => 1,
            Self::Density => 2,
        }
    }

    /// Inverse of [`code`](Self::code).
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::VelocityX),
            1 => Some(Self::VelocityY),
            2 => Some(Self::Density),
            _ => None,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a buffer's boundary ring is rebuilt from its interior.
///
/// The same buffer can play different physical roles during a step (a
/// velocity scratch buffer holds pressure during projection), so the kind
/// travels with each call rather than with the buffer.
///
/// | Kind | Left/right edges | Top/bottom edges |
/// |------|------------------|------------------|
/// | `Scalar` | copy | copy |
/// | `VectorX` | negate | copy |
/// | `VectorY` | copy | negate |
///
/// Corners are always the mean of their two adjacent edge cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoundaryKind {
    /// Density, pressure, divergence: zero-gradient walls.
    Scalar,
    /// Horizontal velocity: reflected at vertical walls.
    VectorX,
    /// Vertical velocity: reflected at horizontal walls.
    VectorY,
}

impl BoundaryKind {
    /// Sign applied to the interior neighbour on the left/right edges.
    pub fn vertical_wall_sign(self) -> f32 {
        match self {
            Self::VectorX => -1.0,
            Self::Scalar | Self::VectorY => 1.0,
        }
    }

    /// Sign applied to the interior neighbour on the top/bottom edges.
    pub fn horizontal_wall_sign(self) -> f32 {
        match self {
            Self::VectorY => -1.0,
            Self::Scalar | Self::VectorX => 1.0,
        }
    }
}
