//! Deterministic field fixtures.
//!
//! Every fixture covers the whole buffer, boundary ring included, and is
//! reproducible from its seed via a ChaCha8 RNG.

use std::f32::consts::PI;

use eddy_space::GridShape;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform white noise in `[lo, hi)` over every buffer cell.
pub fn random_field(shape: &GridShape, lo: f32, hi: f32, seed: u64) -> Vec<f32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..shape.buffer_len())
        .map(|_| rng.random_range(lo..hi))
        .collect()
}

/// A smooth scalar that vanishes on the boundary ring.
///
/// Sum of four low-order sine modes `sin(π·mx·i/(N+1))·sin(π·my·j/(N+1))`
/// with `mx, my ∈ 1..=3` and random weights, rescaled so the largest
/// magnitude equals `amplitude`.
fn smooth_mode_field(shape: &GridShape, amplitude: f32, rng: &mut ChaCha8Rng) -> Vec<f32> {
    let modes: Vec<(f32, f32, f32)> = (0..4)
        .map(|_| {
            let weight = rng.random_range(-1.0f32..1.0);
            let mx = rng.random_range(1..=3u32) as f32;
            let my = rng.random_range(1..=3u32) as f32;
            (weight, mx, my)
        })
        .collect();

    let span = (shape.resolution() + 1) as f32;
    let mut buf = vec![0.0f32; shape.buffer_len()];
    for j in 0..shape.stride() {
        for i in 0..shape.stride() {
            buf[shape.index(i, j)] = modes
                .iter()
                .map(|&(w, mx, my)| {
                    w * (PI * mx * i as f32 / span).sin() * (PI * my * j as f32 / span).sin()
                })
                .sum();
        }
    }

    let peak = buf.iter().fold(0.0f32, |m, v| m.max(v.abs()));
    if peak > 0.0 {
        let scale = amplitude / peak;
        for v in &mut buf {
            *v *= scale;
        }
    }
    buf
}

/// A smooth velocity field with no flow through the walls.
///
/// Both components vanish on the boundary ring, so the wall conditions
/// already hold before any projection. Returns `(vx, vy)`.
pub fn smooth_velocity(shape: &GridShape, amplitude: f32, seed: u64) -> (Vec<f32>, Vec<f32>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let vx = smooth_mode_field(shape, amplitude, &mut rng);
    let vy = smooth_mode_field(shape, amplitude, &mut rng);
    (vx, vy)
}

/// Random velocity mirrored about the vertical centre line.
///
/// `vx[i, j] = -vx[N + 1 - i, j]` and `vy[i, j] = vy[N + 1 - i, j]` for
/// every buffer column, which is what reflecting a flow left-to-right
/// does to each component. An odd resolution leaves a centre column with
/// `vx = 0`. Returns `(vx, vy)`.
pub fn mirrored_velocity(shape: &GridShape, amplitude: f32, seed: u64) -> (Vec<f32>, Vec<f32>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let stride = shape.stride();
    let last = stride - 1;
    let mut vx = vec![0.0f32; shape.buffer_len()];
    let mut vy = vec![0.0f32; shape.buffer_len()];
    for j in 0..stride {
        for i in 0..stride / 2 {
            let a = rng.random_range(-amplitude..amplitude);
            let b = rng.random_range(-amplitude..amplitude);
            vx[shape.index(i, j)] = a;
            vx[shape.index(last - i, j)] = -a;
            vy[shape.index(i, j)] = b;
            vy[shape.index(last - i, j)] = b;
        }
        if stride % 2 == 1 {
            vy[shape.index(stride / 2, j)] = rng.random_range(-amplitude..amplitude);
        }
    }
    (vx, vy)
}
