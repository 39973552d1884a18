//! Per-step parameters shared by every kernel.

use eddy_space::GridShape;

/// Gauss-Seidel sweeps per linear solve when none is configured.
pub const DEFAULT_SOLVER_ITERATIONS: u32 = 20;

/// Geometry, time step, and solver effort for one kernel invocation.
///
/// Built by the engine once per step and passed by reference to each
/// stage. Tests construct it directly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverContext {
    shape: GridShape,
    dt: f32,
    iterations: u32,
}

impl SolverContext {
    /// Context with the default iteration count.
    pub fn new(shape: GridShape, dt: f32) -> Self {
        Self::with_iterations(shape, dt, DEFAULT_SOLVER_ITERATIONS)
    }

    /// Context with an explicit number of relaxation sweeps.
    pub fn with_iterations(shape: GridShape, dt: f32, iterations: u32) -> Self {
        Self {
            shape,
            dt,
            iterations,
        }
    }

    /// Grid geometry.
    pub fn shape(&self) -> &GridShape {
        &self.shape
    }

    /// Simulation time step.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Gauss-Seidel sweeps per linear solve.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Interior resolution as `f32`, the `N` in every kernel coefficient.
    pub fn n(&self) -> f32 {
        self.shape.resolution() as f32
    }
}
