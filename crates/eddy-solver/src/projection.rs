//! Helmholtz-Hodge projection onto a divergence-free velocity.
//!
//! The velocity is split into a gradient part and a solenoidal part. A
//! pressure-like scalar `p` is found from `∇²p = ∇·v` by relaxation and its
//! gradient is subtracted, leaving a field whose central-difference
//! divergence is small on the interior. Both the divergence and the
//! gradient use half-cell central differences, so walls see a reflected
//! normal component and no mass crosses them.

use eddy_core::BoundaryKind;
use eddy_space::{enforce, GridShape};

use crate::context::SolverContext;
use crate::relax::relax;

/// Write the scaled negative divergence of `(vx, vy)` into `out`.
///
/// For every interior cell
///
/// ```text
/// out = −0.5 · (vx[i+1,j] − vx[i−1,j] + vy[i,j+1] − vy[i,j−1]) / N
/// ```
///
/// which is the right-hand side of the pressure system solved by
/// [`project`]. The boundary ring of `out` is left untouched.
pub fn divergence(shape: &GridShape, vx: &[f32], vy: &[f32], out: &mut [f32]) {
    let n = shape.resolution();
    let s = shape.stride();
    let scale = -0.5 / n as f32;
    for j in 1..=n {
        let row = j * s;
        for i in 1..=n {
            let k = i + row;
            out[k] = scale * ((vx[k + 1] - vx[k - 1]) + (vy[k + s] - vy[k - s]));
        }
    }
}

/// Make `(vx, vy)` approximately divergence-free in place.
///
/// `p` and `div` are scratch buffers of the full buffer length; their
/// previous contents are discarded. On return `div` holds the divergence
/// of the input velocity and `p` the relaxed pressure, both with scalar
/// walls. The velocity leaves with its own wall rules applied: `vx` as
/// [`BoundaryKind::VectorX`], `vy` as [`BoundaryKind::VectorY`].
pub fn project(ctx: &SolverContext, vx: &mut [f32], vy: &mut [f32], p: &mut [f32], div: &mut [f32]) {
    let shape = ctx.shape();
    let n = shape.resolution();
    let s = shape.stride();

    divergence(shape, vx, vy, div);
    p.fill(0.0);
    enforce(shape, BoundaryKind::Scalar, div);
    enforce(shape, BoundaryKind::Scalar, p);

    relax(ctx, BoundaryKind::Scalar, p, div, 1.0, 4.0);

    let half_n = 0.5 * ctx.n();
    for j in 1..=n {
        let row = j * s;
        for i in 1..=n {
            let k = i + row;
            vx[k] -= half_n * (p[k + 1] - p[k - 1]);
            vy[k] -= half_n * (p[k + s] - p[k - s]);
        }
    }
    enforce(shape, BoundaryKind::VectorX, vx);
    enforce(shape, BoundaryKind::VectorY, vy);
}
