//! The user-facing fluid grid.
//!
//! [`FluidGrid`] owns all six field buffers and runs the step pipeline over
//! them. It is the only way to mutate simulation state: callers inject
//! sources with [`add_density`](FluidGrid::add_density) and
//! [`add_velocity`](FluidGrid::add_velocity), advance with
//! [`step`](FluidGrid::step), and read back with the sampling accessors or
//! the read-only field slices.
//!
//! # Ownership model
//!
//! `FluidGrid` is [`Send`] but all mutating methods take `&mut self`, so a
//! step can never overlap a read or another step. Read-only slices returned
//! by [`field`](FluidGrid::field) borrow from the grid and must be dropped
//! before the next mutation.
//!
//! # Coordinates
//!
//! Sources and samples address cells in interior cell units: `(0.0, 0.0)`
//! is the top-left corner of the first interior cell and `(N, N)` the
//! bottom-right corner of the last. Out-of-range and NaN coordinates clamp
//! to the nearest interior cell; they are never an error.

use std::time::Instant;

use eddy_arena::FieldStore;
use eddy_core::{FieldKind, StepError, StepId};
use eddy_solver::SolverContext;
use eddy_space::GridShape;

use crate::config::{ConfigError, FluidConfig};
use crate::health::HealthMonitor;
use crate::metrics::StepMetrics;
use crate::stepper::{run_pipeline, Coefficients, StepPhase};

// Compile-time assertion: FluidGrid is Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<FluidGrid>();
    }
};

/// A 2D stable-fluids simulation on an N×N grid with reflective walls.
///
/// # Example
///
/// ```
/// use eddy_engine::FluidGrid;
///
/// let mut grid = FluidGrid::new(32, 0.0001, 0.0001, 0.1).unwrap();
/// grid.add_density(16.0, 16.0, 100.0);
/// grid.add_velocity(16.0, 16.0, 0.0, -5.0);
/// for _ in 0..10 {
///     grid.step();
/// }
/// let (vx, vy) = grid.sample_velocity(16.0, 12.0);
/// assert!(vx.is_finite() && vy.is_finite());
/// assert!(grid.sample_density(16.0, 16.0) >= 0.0);
/// ```
pub struct FluidGrid {
    config: FluidConfig,
    store: FieldStore,
    ctx: SolverContext,
    phase: StepPhase,
    step_id: StepId,
    health: HealthMonitor,
    last_metrics: StepMetrics,
}

impl FluidGrid {
    /// Create a grid with default solver settings.
    ///
    /// `resolution` is the interior size N; every buffer holds (N+2)²
    /// cells, all zero. `dt` is the time advanced per [`step`](Self::step).
    pub fn new(resolution: u32, diffusion: f32, viscosity: f32, dt: f32) -> Result<Self, ConfigError> {
        Self::from_config(FluidConfig::new(resolution, diffusion, viscosity, dt))
    }

    /// Create a grid from a full configuration.
    ///
    /// Validates the configuration and allocates all six buffers. No
    /// further allocation happens for the lifetime of the grid.
    pub fn from_config(config: FluidConfig) -> Result<Self, ConfigError> {
        let shape = config.validate()?;
        let store = FieldStore::new(shape);
        let ctx = SolverContext::with_iterations(shape, config.dt, config.solver_iterations);
        log::debug!(
            "created {n}x{n} fluid grid: diffusion={} viscosity={} dt={} iterations={} ({} bytes)",
            config.diffusion,
            config.viscosity,
            config.dt,
            config.solver_iterations,
            store.memory_bytes(),
            n = config.resolution,
        );
        Ok(Self {
            health: HealthMonitor::new(config.health_check_interval),
            last_metrics: StepMetrics {
                memory_bytes: store.memory_bytes(),
                ..StepMetrics::default()
            },
            config,
            store,
            ctx,
            phase: StepPhase::Idle,
            step_id: StepId::default(),
        })
    }

    /// Release all buffers. Equivalent to dropping the grid.
    pub fn destroy(self) {
        drop(self);
    }

    // ── Sources ────────────────────────────────────────────────────

    fn mark_sourced(&mut self) {
        if self.phase == StepPhase::Idle {
            self.phase = StepPhase::VelocitySourced;
        }
    }

    /// Add `amount` of density to the cell containing `(x, y)`.
    ///
    /// The impulse lands in the current density buffer and is consumed by
    /// the next [`step`](Self::step). Negative amounts remove density.
    pub fn add_density(&mut self, x: f32, y: f32, amount: f32) {
        let k = self.shape().index_containing(x, y);
        self.store.pair_mut(FieldKind::Density).current_mut()[k] += amount;
        self.mark_sourced();
    }

    /// Add `(dvx, dvy)` to the velocity of the cell containing `(x, y)`.
    pub fn add_velocity(&mut self, x: f32, y: f32, dvx: f32, dvy: f32) {
        let k = self.shape().index_containing(x, y);
        let (vx, vy) = self.store.velocity_mut();
        vx.current_mut()[k] += dvx;
        vy.current_mut()[k] += dvy;
        self.mark_sourced();
    }

    // ── Stepping ───────────────────────────────────────────────────

    /// Advance the simulation by one time step.
    ///
    /// Runs velocity diffusion, projection, self-advection, and a second
    /// projection, then density diffusion and advection. Every stage runs
    /// on every call; a step cannot fail. If a health-check interval is
    /// configured, the grid is scanned afterwards and zeroed when a
    /// non-finite value is found.
    pub fn step(&mut self) {
        let start = Instant::now();
        let coeff = Coefficients {
            diffusion: self.config.diffusion,
            viscosity: self.config.viscosity,
        };
        let stage_us = run_pipeline(&self.ctx, coeff, &mut self.store, &mut self.phase);
        self.step_id = self.step_id.next();
        self.health.after_step(&mut self.store);

        self.last_metrics = StepMetrics {
            total_us: start.elapsed().as_micros() as u64,
            stage_us,
            memory_bytes: self.store.memory_bytes(),
            health_checks: self.health.checks(),
            recoveries: self.health.recoveries(),
        };
        log::trace!("step {} took {}us", self.step_id, self.last_metrics.total_us);
    }

    // ── Reads ──────────────────────────────────────────────────────

    /// Density in the cell containing `(x, y)`.
    pub fn sample_density(&self, x: f32, y: f32) -> f32 {
        let k = self.shape().index_containing(x, y);
        self.store.current(FieldKind::Density)[k]
    }

    /// Velocity `(vx, vy)` in the cell containing `(x, y)`.
    pub fn sample_velocity(&self, x: f32, y: f32) -> (f32, f32) {
        let k = self.shape().index_containing(x, y);
        (
            self.store.current(FieldKind::VelocityX)[k],
            self.store.current(FieldKind::VelocityY)[k],
        )
    }

    /// The full current buffer of `kind`, boundary ring included.
    ///
    /// Indexed by [`GridShape::index`]; length is
    /// [`GridShape::buffer_len`].
    pub fn field(&self, kind: FieldKind) -> &[f32] {
        self.store.current(kind)
    }

    /// Current density buffer.
    pub fn density(&self) -> &[f32] {
        self.field(FieldKind::Density)
    }

    /// Current horizontal velocity buffer.
    pub fn velocity_x(&self) -> &[f32] {
        self.field(FieldKind::VelocityX)
    }

    /// Current vertical velocity buffer.
    pub fn velocity_y(&self) -> &[f32] {
        self.field(FieldKind::VelocityY)
    }

    /// Interior cells per axis.
    pub fn resolution(&self) -> u32 {
        self.config.resolution
    }

    /// Grid geometry.
    pub fn shape(&self) -> &GridShape {
        self.store.shape()
    }

    /// The configuration the grid was built from.
    pub fn config(&self) -> &FluidConfig {
        &self.config
    }

    /// Position relative to the step pipeline.
    pub fn phase(&self) -> StepPhase {
        self.phase
    }

    /// Number of completed steps.
    pub fn step_count(&self) -> StepId {
        self.step_id
    }

    /// Metrics from the most recent step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    // ── Health ─────────────────────────────────────────────────────

    /// Check every buffer for NaN or infinity.
    ///
    /// Scans the previous buffers too, since they feed the next step.
    pub fn check_finite(&self) -> Result<(), StepError> {
        match self.store.first_non_finite() {
            None => Ok(()),
            Some((field, cell_index)) => Err(StepError::NonFinite { field, cell_index }),
        }
    }

    /// Zero every buffer and discard pending sources.
    ///
    /// The step counter and configuration are kept.
    pub fn clear(&mut self) {
        self.store.clear();
        self.phase = StepPhase::Idle;
        self.health.reset_interval();
    }
}

impl Drop for FluidGrid {
    fn drop(&mut self) {
        log::debug!(
            "destroying {n}x{n} fluid grid after {} steps",
            self.step_id,
            n = self.config.resolution,
        );
    }
}

impl std::fmt::Debug for FluidGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FluidGrid")
            .field("resolution", &self.config.resolution)
            .field("dt", &self.config.dt)
            .field("phase", &self.phase)
            .field("step", &self.step_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroU32;

    fn grid(n: u32) -> FluidGrid {
        FluidGrid::new(n, 0.0001, 0.0001, 0.1).unwrap()
    }

    #[test]
    fn create_allocates_zeroed_buffers() {
        let g = grid(32);
        for kind in FieldKind::ALL {
            assert_eq!(g.field(kind).len(), 34 * 34);
            assert!(g.field(kind).iter().all(|&v| v == 0.0));
        }
        assert_eq!(g.phase(), StepPhase::Idle);
        assert_eq!(g.step_count(), StepId(0));
        assert_eq!(g.last_metrics().memory_bytes, 6 * 34 * 34 * 4);
    }

    #[test]
    fn invalid_parameters_rejected() {
        assert!(FluidGrid::new(0, 0.0, 0.0, 0.1).is_err());
        assert!(FluidGrid::new(8, -1.0, 0.0, 0.1).is_err());
        assert!(FluidGrid::new(8, 0.0, 0.0, f32::NAN).is_err());
    }

    #[test]
    fn add_density_targets_containing_cell() {
        let mut g = grid(8);
        g.add_density(2.5, 5.9, 3.0);
        g.add_density(2.0, 5.0, 1.0);
        let k = g.shape().index(3, 6);
        assert_eq!(g.density()[k], 4.0);
        assert_eq!(g.sample_density(2.1, 5.5), 4.0);
        assert_eq!(g.phase(), StepPhase::VelocitySourced);
    }

    #[test]
    fn out_of_range_sources_clamp() {
        let mut g = grid(8);
        g.add_density(-10.0, 100.0, 1.0);
        g.add_velocity(f32::NAN, f32::INFINITY, 2.0, -3.0);
        assert_eq!(g.density()[g.shape().index(1, 8)], 1.0);
        let k = g.shape().index(1, 8);
        assert_eq!((g.velocity_x()[k], g.velocity_y()[k]), (2.0, -3.0));
        assert_eq!(g.sample_velocity(-1.0, 1e9), (2.0, -3.0));
    }

    #[test]
    fn step_returns_to_idle_and_counts() {
        let mut g = grid(16);
        g.add_velocity(8.0, 8.0, 1.0, 0.0);
        g.step();
        g.step();
        assert_eq!(g.phase(), StepPhase::Idle);
        assert_eq!(g.step_count(), StepId(2));
        assert_eq!(g.last_metrics().stage_us.len(), 6);
    }

    #[test]
    fn step_keeps_buffer_lengths() {
        let mut g = grid(12);
        g.add_density(6.0, 6.0, 50.0);
        g.add_velocity(6.0, 6.0, 3.0, 3.0);
        for _ in 0..5 {
            g.step();
        }
        for kind in FieldKind::ALL {
            assert_eq!(g.field(kind).len(), 14 * 14);
        }
    }

    #[test]
    fn check_finite_and_clear() {
        let mut g = grid(8);
        assert_eq!(g.check_finite(), Ok(()));
        g.add_density(1.0, 1.0, f32::NAN);
        assert!(matches!(
            g.check_finite(),
            Err(StepError::NonFinite {
                field: FieldKind::Density,
                ..
            })
        ));
        g.clear();
        assert_eq!(g.check_finite(), Ok(()));
        assert_eq!(g.phase(), StepPhase::Idle);
    }

    #[test]
    fn health_check_recovers_from_nan() {
        let mut config = FluidConfig::new(8, 0.0001, 0.0001, 0.1);
        config.health_check_interval = NonZeroU32::new(1);
        let mut g = FluidGrid::from_config(config).unwrap();
        g.add_velocity(4.0, 4.0, f32::NAN, 0.0);
        g.step();
        assert_eq!(g.check_finite(), Ok(()));
        assert_eq!(g.last_metrics().recoveries, 1);
        assert_eq!(g.last_metrics().health_checks, 1);
    }

    #[test]
    fn debug_is_compact() {
        let s = format!("{:?}", grid(4));
        assert!(s.contains("resolution: 4"));
        assert!(s.contains("Idle"));
    }

    proptest::proptest! {
        #[test]
        fn any_coordinate_hits_exactly_one_interior_cell(
            x in proptest::num::f32::ANY,
            y in proptest::num::f32::ANY,
        ) {
            let mut g = grid(8);
            g.add_density(x, y, 1.0);
            let touched: Vec<usize> = (0..g.density().len())
                .filter(|&k| g.density()[k] != 0.0)
                .collect();
            proptest::prop_assert_eq!(touched.len(), 1);
            proptest::prop_assert!(!g.shape().is_boundary(touched[0] % 10, touched[0] / 10));
            proptest::prop_assert_eq!(g.sample_density(x, y), 1.0);
        }
    }
}
