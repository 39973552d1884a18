//! Semi-Lagrangian advection.
//!
//! Each interior cell traces a particle backwards through the velocity
//! field for one time step and takes the source value found there. The
//! lookup is a bilinear blend of four source cells, so the result is a
//! convex combination of source values: it can never overshoot the
//! source's range, which keeps advection stable for any time step.

use eddy_core::BoundaryKind;
use eddy_space::{enforce, GridShape};

use crate::context::SolverContext;

/// Bilinear sample of `buf` at fractional buffer coordinates `(x, y)`.
///
/// Coordinates are in buffer cells, so `(1.0, 1.0)` is the centre of the
/// first interior cell. They are clamped to `[0.5, N + 0.5]` first, which
/// keeps the four-cell stencil inside the buffer and lets a sample near a
/// wall blend with the boundary ring.
pub fn bilinear(shape: &GridShape, buf: &[f32], x: f32, y: f32) -> f32 {
    let hi = shape.resolution() as f32 + 0.5;
    let x = x.clamp(0.5, hi);
    let y = y.clamp(0.5, hi);

    let i0 = x.floor() as usize;
    let j0 = y.floor() as usize;
    let s1 = x - i0 as f32;
    let s0 = 1.0 - s1;
    let t1 = y - j0 as f32;
    let t0 = 1.0 - t1;

    let k = shape.index(i0, j0);
    let s = shape.stride();
    s0 * (t0 * buf[k] + t1 * buf[k + s]) + s1 * (t0 * buf[k + 1] + t1 * buf[k + 1 + s])
}

/// Carry `d0` along `(vx, vy)` for one step, writing the result into `d`.
///
/// The backtrace for cell `(i, j)` starts at `(i − dt·N·vx, j − dt·N·vy)`,
/// with velocity in interior lengths per unit time. The boundary ring of
/// `d` is rebuilt with `kind` afterwards.
///
/// `d` must not alias `d0`, `vx`, or `vy`; the borrow checker enforces
/// this at every call site.
pub fn advect(
    ctx: &SolverContext,
    kind: BoundaryKind,
    d: &mut [f32],
    d0: &[f32],
    vx: &[f32],
    vy: &[f32],
) {
    let shape = ctx.shape();
    let n = shape.resolution();
    let s = shape.stride();
    let dt0 = ctx.dt() * ctx.n();

    for j in 1..=n {
        let row = j * s;
        for i in 1..=n {
            let k = i + row;
            let x = i as f32 - dt0 * vx[k];
            let y = j as f32 - dt0 * vy[k];
            d[k] = bilinear(shape, d0, x, y);
        }
    }
    enforce(shape, kind, d);
}

#[cfg(test)]
mod tests {
    use super::*;
    use eddy_test_utils::{interior_max, interior_min, random_field};
    use proptest::prelude::*;

    #[test]
    fn bilinear_hits_cell_centres() {
        let shape = GridShape::new(4).unwrap();
        let buf = random_field(&shape, 0.0, 1.0, 1);
        for (i, j) in shape.interior() {
            assert_eq!(bilinear(&shape, &buf, i as f32, j as f32), buf[shape.index(i, j)]);
        }
    }

    #[test]
    fn bilinear_blends_midpoints() {
        let shape = GridShape::new(2).unwrap();
        let mut buf = vec![0.0; shape.buffer_len()];
        buf[shape.index(1, 1)] = 4.0;
        buf[shape.index(2, 1)] = 8.0;
        assert_eq!(bilinear(&shape, &buf, 1.5, 1.0), 6.0);
        assert_eq!(bilinear(&shape, &buf, 1.5, 1.5), 3.0);
    }

    #[test]
    fn bilinear_clamps_far_coordinates() {
        let shape = GridShape::new(3).unwrap();
        let buf = random_field(&shape, 0.0, 1.0, 2);
        assert_eq!(
            bilinear(&shape, &buf, -50.0, 2.0),
            bilinear(&shape, &buf, 0.5, 2.0)
        );
        assert_eq!(
            bilinear(&shape, &buf, 2.0, 1e9),
            bilinear(&shape, &buf, 2.0, 3.5)
        );
    }

    #[test]
    fn zero_velocity_is_identity() {
        let shape = GridShape::new(8).unwrap();
        let ctx = SolverContext::new(shape, 0.3);
        let d0 = random_field(&shape, -2.0, 2.0, 3);
        let zero = vec![0.0; shape.buffer_len()];
        let mut d = vec![0.0; shape.buffer_len()];
        advect(&ctx, BoundaryKind::Scalar, &mut d, &d0, &zero, &zero);
        for (i, j) in shape.interior() {
            let k = shape.index(i, j);
            assert_eq!(d[k], d0[k]);
        }
    }

    #[test]
    fn uniform_flow_shifts_by_whole_cells() {
        // dt·N·vx = 0.25 · 8 · 0.5 = 1 cell to the right.
        let shape = GridShape::new(8).unwrap();
        let ctx = SolverContext::new(shape, 0.25);
        let d0 = random_field(&shape, 0.0, 1.0, 4);
        let vx = vec![0.5; shape.buffer_len()];
        let vy = vec![0.0; shape.buffer_len()];
        let mut d = vec![0.0; shape.buffer_len()];
        advect(&ctx, BoundaryKind::Scalar, &mut d, &d0, &vx, &vy);
        for (i, j) in shape.interior() {
            if i >= 2 {
                assert_eq!(d[shape.index(i, j)], d0[shape.index(i - 1, j)]);
            }
        }
    }

    #[test]
    fn boundary_follows_kind() {
        let shape = GridShape::new(4).unwrap();
        let ctx = SolverContext::new(shape, 0.1);
        let d0 = random_field(&shape, 1.0, 2.0, 5);
        let v = random_field(&shape, -1.0, 1.0, 6);
        let mut d = vec![0.0; shape.buffer_len()];
        advect(&ctx, BoundaryKind::VectorY, &mut d, &d0, &v, &v);
        for i in 1..=4 {
            assert_eq!(d[shape.index(i, 0)], -d[shape.index(i, 1)]);
        }
    }

    proptest! {
        #[test]
        fn result_stays_within_source_range(
            n in 2u32..16,
            dt in 0.0f32..2.0,
            seed in 0u64..1000,
        ) {
            let shape = GridShape::new(n).unwrap();
            let ctx = SolverContext::new(shape, dt);
            let d0 = random_field(&shape, -3.0, 7.0, seed);
            let vx = random_field(&shape, -20.0, 20.0, seed.wrapping_add(1));
            let vy = random_field(&shape, -20.0, 20.0, seed.wrapping_add(2));
            let mut d = vec![0.0; shape.buffer_len()];
            advect(&ctx, BoundaryKind::Scalar, &mut d, &d0, &vx, &vy);

            let lo = d0.iter().copied().fold(f32::INFINITY, f32::min);
            let hi = d0.iter().copied().fold(f32::NEG_INFINITY, f32::max);
            prop_assert!(d.iter().all(|v| v.is_finite()));
            prop_assert!(interior_min(&shape, &d) >= lo - 1e-4);
            prop_assert!(interior_max(&shape, &d) <= hi + 1e-4);
        }
    }
}
