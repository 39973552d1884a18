//! Test fixtures and field measurements for Eddy development.
//!
//! Fixtures ([`fixtures`]) build deterministic full-size buffers from a
//! seed. The functions at the crate root reduce a buffer over its interior
//! cells, optionally skipping a margin of cells next to the walls.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{mirrored_velocity, random_field, smooth_velocity};

use eddy_space::GridShape;

/// Interior values, skipping `margin` cells inside each wall.
///
/// `margin = 0` yields every interior cell; `margin = 1` drops the cells
/// adjacent to the boundary ring.
pub fn interior_values<'a>(
    shape: &'a GridShape,
    buf: &'a [f32],
    margin: usize,
) -> impl Iterator<Item = f32> + 'a {
    let n = shape.resolution();
    let lo = 1 + margin;
    let hi = n.saturating_sub(margin);
    (lo..=hi).flat_map(move |j| (lo..=hi).map(move |i| buf[shape.index(i, j)]))
}

/// Sum over all interior cells, accumulated in `f64`.
pub fn interior_sum(shape: &GridShape, buf: &[f32]) -> f64 {
    interior_values(shape, buf, 0).map(f64::from).sum()
}

/// Smallest interior value.
pub fn interior_min(shape: &GridShape, buf: &[f32]) -> f32 {
    interior_values(shape, buf, 0).fold(f32::INFINITY, f32::min)
}

/// Largest interior value.
pub fn interior_max(shape: &GridShape, buf: &[f32]) -> f32 {
    interior_values(shape, buf, 0).fold(f32::NEG_INFINITY, f32::max)
}

/// Largest absolute interior value inside `margin`.
pub fn max_abs(shape: &GridShape, buf: &[f32], margin: usize) -> f32 {
    interior_values(shape, buf, margin).fold(0.0, |m, v| m.max(v.abs()))
}

/// Root-mean-square of the interior values inside `margin`.
pub fn rms(shape: &GridShape, buf: &[f32], margin: usize) -> f64 {
    let (sum, count) = interior_values(shape, buf, margin)
        .fold((0.0f64, 0usize), |(s, c), v| (s + f64::from(v) * f64::from(v), c + 1));
    if count == 0 {
        0.0
    } else {
        (sum / count as f64).sqrt()
    }
}

/// Largest `|buf[i, j] - buf[N + 1 - i, j]|` over the interior.
///
/// Zero for a field that is mirror-symmetric about the vertical centre line.
pub fn mirror_asymmetry(shape: &GridShape, buf: &[f32]) -> f32 {
    let last = shape.resolution() + 1;
    shape
        .interior()
        .map(|(i, j)| (buf[shape.index(i, j)] - buf[shape.index(last - i, j)]).abs())
        .fold(0.0, f32::max)
}
