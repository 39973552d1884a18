//! Grid configuration, validation, and error types.
//!
//! [`FluidConfig`] is the construction input for a
//! [`FluidGrid`](crate::FluidGrid). [`validate()`](FluidConfig::validate)
//! checks every parameter once, up front; nothing is re-checked per step.

use std::error::Error;
use std::fmt;
use std::num::NonZeroU32;

use eddy_space::{GridShape, SpaceError};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating a [`FluidConfig`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The resolution does not describe a usable grid.
    Space(SpaceError),
    /// `dt` is negative, NaN, or infinite.
    InvalidTimestep {
        /// The rejected value.
        value: f32,
    },
    /// A diffusion-like coefficient is negative, NaN, or infinite.
    InvalidCoefficient {
        /// Which coefficient (`"diffusion"` or `"viscosity"`).
        name: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// `solver_iterations` is zero.
    ZeroIterations,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Space(e) => write!(f, "space: {e}"),
            Self::InvalidTimestep { value } => {
                write!(f, "dt must be finite and non-negative, got {value}")
            }
            Self::InvalidCoefficient { name, value } => {
                write!(f, "{name} must be finite and non-negative, got {value}")
            }
            Self::ZeroIterations => write!(f, "solver_iterations must be at least 1"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Space(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SpaceError> for ConfigError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

// ── FluidConfig ────────────────────────────────────────────────────

/// Complete configuration for constructing a fluid grid.
///
/// All values are fixed for the lifetime of the grid built from them.
#[derive(Clone, Debug, PartialEq)]
pub struct FluidConfig {
    /// Interior cells per axis (N). The grid holds (N+2)² cells per buffer.
    pub resolution: u32,
    /// Density diffusion coefficient. Zero disables density diffusion.
    pub diffusion: f32,
    /// Kinematic viscosity. Zero disables velocity diffusion.
    pub viscosity: f32,
    /// Time step per [`step()`](crate::FluidGrid::step). Zero freezes the
    /// flow while still running every stage.
    pub dt: f32,
    /// Gauss-Seidel sweeps per linear solve. Default: 20.
    pub solver_iterations: u32,
    /// Scan for non-finite values after every k-th step, zeroing the grid
    /// if one is found. Default: `None` (never scan).
    pub health_check_interval: Option<NonZeroU32>,
}

impl FluidConfig {
    /// Default Gauss-Seidel sweeps per linear solve.
    pub const DEFAULT_SOLVER_ITERATIONS: u32 = eddy_solver::DEFAULT_SOLVER_ITERATIONS;

    /// Configuration with default solver effort and no health checks.
    pub fn new(resolution: u32, diffusion: f32, viscosity: f32, dt: f32) -> Self {
        Self {
            resolution,
            diffusion,
            viscosity,
            dt,
            solver_iterations: Self::DEFAULT_SOLVER_ITERATIONS,
            health_check_interval: None,
        }
    }

    /// Validate every parameter and return the grid geometry.
    pub fn validate(&self) -> Result<GridShape, ConfigError> {
        let shape = GridShape::new(self.resolution)?;
        if !self.dt.is_finite() || self.dt < 0.0 {
            return Err(ConfigError::InvalidTimestep { value: self.dt });
        }
        for (name, value) in [("diffusion", self.diffusion), ("viscosity", self.viscosity)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidCoefficient { name, value });
            }
        }
        if self.solver_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        Ok(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> FluidConfig {
        FluidConfig::new(64, 0.0001, 0.0001, 0.1)
    }

    #[test]
    fn new_fills_defaults() {
        let c = valid();
        assert_eq!(c.solver_iterations, 20);
        assert_eq!(c.health_check_interval, None);
        assert_eq!(c.validate().unwrap().resolution(), 64);
    }

    #[test]
    fn zero_resolution_rejected() {
        let mut c = valid();
        c.resolution = 0;
        assert_eq!(c.validate(), Err(ConfigError::Space(SpaceError::EmptySpace)));
    }

    #[test]
    fn oversized_resolution_rejected() {
        let mut c = valid();
        c.resolution = GridShape::MAX_RESOLUTION + 1;
        assert!(matches!(
            c.validate(),
            Err(ConfigError::Space(SpaceError::DimensionTooLarge { .. }))
        ));
    }

    #[test]
    fn bad_timestep_rejected() {
        for dt in [-0.1, f32::NAN, f32::INFINITY] {
            let mut c = valid();
            c.dt = dt;
            assert!(matches!(c.validate(), Err(ConfigError::InvalidTimestep { .. })));
        }
    }

    #[test]
    fn zero_timestep_allowed() {
        let mut c = valid();
        c.dt = 0.0;
        assert!(c.validate().is_ok());
    }

    #[test]
    fn bad_coefficients_rejected() {
        let mut c = valid();
        c.diffusion = -1.0;
        assert_eq!(
            c.validate(),
            Err(ConfigError::InvalidCoefficient {
                name: "diffusion",
                value: -1.0
            })
        );

        let mut c = valid();
        c.viscosity = f32::NEG_INFINITY;
        assert!(matches!(
            c.validate(),
            Err(ConfigError::InvalidCoefficient { name: "viscosity", .. })
        ));
    }

    #[test]
    fn zero_iterations_rejected() {
        let mut c = valid();
        c.solver_iterations = 0;
        assert_eq!(c.validate(), Err(ConfigError::ZeroIterations));
    }

    #[test]
    fn space_error_is_source() {
        let err = ConfigError::from(SpaceError::EmptySpace);
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("space: "));
        assert!(ConfigError::ZeroIterations.source().is_none());
    }
}
