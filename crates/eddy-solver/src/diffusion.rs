//! Implicit diffusion.

use eddy_core::BoundaryKind;

use crate::context::SolverContext;
use crate::relax::relax;

/// Diffuse `x0` into `x` at `rate` (diffusion or viscosity coefficient).
///
/// Solves the backward-Euler system `x − dt·rate·N²·∇²x = x0` with
/// `a = dt·rate·N²` and `c = 1 + 4a`. The implicit form stays bounded for
/// any non-negative `a`, so large rates or time steps smooth harder
/// instead of blowing up.
///
/// `x` enters as the initial guess and is overwritten. With `rate = 0`
/// the system is the identity and `x` ends equal to `x0` on the interior.
pub fn diffuse(ctx: &SolverContext, kind: BoundaryKind, x: &mut [f32], x0: &[f32], rate: f32) {
    let n = ctx.n();
    let a = ctx.dt() * rate * n * n;
    relax(ctx, kind, x, x0, a, 1.0 + 4.0 * a);
}
