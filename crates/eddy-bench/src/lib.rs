//! Benchmark profiles for the Eddy stable-fluids solver.
//!
//! - [`reference_profile`]: 128x128 interior, default solver settings
//! - [`stress_profile`]: 512x512 interior for throughput testing
//! - [`seed_plume`]: deterministic density and velocity sources

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use eddy_engine::{ConfigError, FluidConfig, FluidGrid};

/// 128x128 grid with light diffusion and viscosity, dt=0.1.
pub fn reference_profile() -> FluidConfig {
    FluidConfig::new(128, 0.0001, 0.0001, 0.1)
}

/// 512x512 grid with the same coefficients as [`reference_profile`].
pub fn stress_profile() -> FluidConfig {
    FluidConfig::new(512, 0.0001, 0.0001, 0.1)
}

/// Inject a rising plume: a density blob near the bottom edge pushed
/// upward, with a sideways offset that varies with `seed`.
///
/// The same `seed` always produces the same sources.
pub fn seed_plume(grid: &mut FluidGrid, seed: u64) {
    let n = grid.resolution() as f32;
    let cx = n * 0.5;
    let drift = ((seed % 7) as f32 - 3.0) * 0.5;
    for k in 0..5 {
        let x = cx + k as f32 - 2.0;
        grid.add_density(x, 2.0, 50.0);
        grid.add_velocity(x, 2.0, drift, n * 0.25);
    }
}

/// Build a grid from `config` with a plume already stepped `warmup` times,
/// so benchmarks measure a field with structure rather than zeros.
pub fn warmed_grid(config: FluidConfig, seed: u64, warmup: u32) -> Result<FluidGrid, ConfigError> {
    let mut grid = FluidGrid::from_config(config)?;
    for _ in 0..warmup {
        seed_plume(&mut grid, seed);
        grid.step();
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_validate() {
        assert_eq!(reference_profile().validate().unwrap().resolution(), 128);
        assert_eq!(stress_profile().validate().unwrap().resolution(), 512);
    }

    #[test]
    fn warmed_grid_is_deterministic() {
        let config = FluidConfig::new(32, 0.0001, 0.0001, 0.1);
        let a = warmed_grid(config.clone(), 3, 4).unwrap();
        let b = warmed_grid(config, 3, 4).unwrap();
        assert_eq!(a.density(), b.density());
        assert_eq!(a.velocity_x(), b.velocity_x());
        assert!(a.density().iter().any(|&d| d > 0.0));
    }
}
