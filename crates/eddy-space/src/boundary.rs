//! Reflective wall conditions for the boundary ring.
//!
//! Every stage that writes interior values calls [`enforce`] afterwards so
//! the ring always reflects the interior under the buffer's current role.
//! Passing the wrong [`BoundaryKind`] is not detectable here; it silently
//! produces wrong physics, so callers name the kind at every call site.

use eddy_core::BoundaryKind;

use crate::shape::GridShape;

/// Rebuild the boundary ring of `buf` from its interior neighbours.
///
/// Edge cells copy their single interior neighbour, negated on the walls
/// the kind reflects. Corners are set last, to the mean of their two
/// adjacent edge cells.
///
/// # Panics
///
/// Panics if `buf` is shorter than `shape.buffer_len()`.
pub fn enforce(shape: &GridShape, kind: BoundaryKind, buf: &mut [f32]) {
    debug_assert_eq!(buf.len(), shape.buffer_len());
    let n = shape.resolution();
    let s = shape.stride();
    let side = kind.vertical_wall_sign();
    let cap = kind.horizontal_wall_sign();

    for k in 1..=n {
        buf[k * s] = side * buf[1 + k * s];
        buf[(n + 1) + k * s] = side * buf[n + k * s];
        buf[k] = cap * buf[k + s];
        buf[k + (n + 1) * s] = cap * buf[k + n * s];
    }

    let last = n + 1;
    buf[0] = 0.5 * (buf[1] + buf[s]);
    buf[last * s] = 0.5 * (buf[1 + last * s] + buf[n * s]);
    buf[last] = 0.5 * (buf[n] + buf[last + s]);
    buf[last + last * s] = 0.5 * (buf[n + last * s] + buf[last + n * s]);
}
