//! Gauss-Seidel relaxation for the five-point implicit systems.
//!
//! Diffusion and pressure projection both reduce to
//!
//! ```text
//! c · x[i,j] − a · (x[i−1,j] + x[i+1,j] + x[i,j−1] + x[i,j+1]) = x0[i,j]
//! ```
//!
//! over the interior, with `x` on the boundary ring given by the wall
//! rule. [`relax`] runs a fixed number of in-place sweeps rather than
//! iterating to a tolerance, so the cost of a step is predictable.

use eddy_core::BoundaryKind;
use eddy_space::enforce;

use crate::context::SolverContext;

/// Run `ctx.iterations()` Gauss-Seidel sweeps of the five-point system.
///
/// Each sweep visits interior cells row by row in increasing `j`, and
/// within a row in increasing `i`, updating `x` in place so later cells
/// see values already refreshed this sweep. The boundary ring of `x` is
/// rebuilt with `kind` after every sweep.
///
/// `x` is read as the initial guess. `x0` is only read. `c` must be
/// non-zero.
///
/// # Panics
///
/// Panics if either buffer is shorter than the shape's buffer length.
pub fn relax(ctx: &SolverContext, kind: BoundaryKind, x: &mut [f32], x0: &[f32], a: f32, c: f32) {
    let shape = ctx.shape();
    let n = shape.resolution();
    let s = shape.stride();
    let inv_c = 1.0 / c;

    for _ in 0..ctx.iterations() {
        for j in 1..=n {
            let row = j * s;
            for i in 1..=n {
                let k = i + row;
                x[k] = (x0[k] + a * (x[k - 1] + x[k + 1] + x[k - s] + x[k + s])) * inv_c;
            }
        }
        enforce(shape, kind, x);
    }
}
