//! The fixed six-stage step pipeline.
//!
//! A step is a straight line through [`PIPELINE`]: no stage is skipped,
//! repeated, or reordered, and nothing can fail part-way. [`StepPhase`]
//! names the state the grid is in between stages; it is observable through
//! [`FluidGrid::phase`](crate::FluidGrid::phase) and always reads
//! [`StepPhase::Idle`] or [`StepPhase::VelocitySourced`] between calls.
//!
//! # Buffer rotation
//!
//! | Stage | Rotation | Reads | Writes |
//! |-------|----------|-------|--------|
//! | `DiffuseVelocity` | swap vx, vy | previous | current |
//! | `ProjectVelocity` | none | current | current, previous as scratch |
//! | `AdvectVelocity` | swap vx, vy | previous (field and carrier) | current |
//! | `ReprojectVelocity` | none | current | current, previous as scratch |
//! | `DiffuseDensity` | swap density | previous | current |
//! | `AdvectDensity` | swap density | previous, current velocity | current |

use std::fmt;
use std::time::Instant;

use eddy_arena::FieldStore;
use eddy_core::BoundaryKind;
use eddy_solver::{advect, diffuse, project, SolverContext};
use smallvec::SmallVec;

// ── Stage ──────────────────────────────────────────────────────────

/// One transition of the step pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Implicit viscous diffusion of both velocity components.
    DiffuseVelocity,
    /// Remove the divergent part of the diffused velocity.
    ProjectVelocity,
    /// Self-advect velocity along the projected field.
    AdvectVelocity,
    /// Remove divergence introduced by advection.
    ReprojectVelocity,
    /// Implicit diffusion of density.
    DiffuseDensity,
    /// Carry density along the final velocity.
    AdvectDensity,
}

/// Every stage, in execution order.
pub const PIPELINE: [Stage; 6] = [
    Stage::DiffuseVelocity,
    Stage::ProjectVelocity,
    Stage::AdvectVelocity,
    Stage::ReprojectVelocity,
    Stage::DiffuseDensity,
    Stage::AdvectDensity,
];

impl Stage {
    /// Short snake_case name for logs and metrics.
    pub fn name(self) -> &'static str {
        match self {
            Self::DiffuseVelocity => "diffuse_velocity",
            Self::ProjectVelocity => "project_velocity",
            Self::AdvectVelocity => "advect_velocity",
            Self::ReprojectVelocity => "reproject_velocity",
            Self::DiffuseDensity => "diffuse_density",
            Self::AdvectDensity => "advect_density",
        }
    }

    /// The phase the grid is in once this stage has run.
    pub fn completes(self) -> StepPhase {
        match self {
            Self::DiffuseVelocity => StepPhase::VelocityDiffused,
            Self::ProjectVelocity => StepPhase::VelocityProjected,
            Self::AdvectVelocity => StepPhase::VelocityAdvected,
            Self::ReprojectVelocity => StepPhase::VelocityReprojected,
            Self::DiffuseDensity => StepPhase::DensityDiffused,
            Self::AdvectDensity => StepPhase::DensityAdvected,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

// ── StepPhase ──────────────────────────────────────────────────────

/// Where a grid stands relative to the step pipeline.
///
/// ```text
/// Idle ─add_*→ VelocitySourced ─step→ VelocityDiffused → VelocityProjected
///   → VelocityAdvected → VelocityReprojected → DensityDiffused
///   → DensityAdvected → Idle
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StepPhase {
    /// No pending sources; the last step (if any) has completed.
    #[default]
    Idle,
    /// Sources were injected since the last step.
    VelocitySourced,
    /// Velocity diffusion has run.
    VelocityDiffused,
    /// First projection has run.
    VelocityProjected,
    /// Velocity self-advection has run.
    VelocityAdvected,
    /// Second projection has run.
    VelocityReprojected,
    /// Density diffusion has run.
    DensityDiffused,
    /// Density advection has run; the step is about to return.
    DensityAdvected,
}

impl StepPhase {
    /// Whether a caller may inject sources or read fields in this phase.
    pub fn is_between_steps(self) -> bool {
        matches!(self, Self::Idle | Self::VelocitySourced)
    }
}

// ── Execution ──────────────────────────────────────────────────────

/// Physical coefficients consumed by the diffusion stages.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Coefficients {
    pub diffusion: f32,
    pub viscosity: f32,
}

/// Run a single stage against the store, rotating buffers as it requires.
pub(crate) fn run_stage(
    stage: Stage,
    ctx: &SolverContext,
    coeff: Coefficients,
    store: &mut FieldStore,
) {
    match stage {
        Stage::DiffuseVelocity => {
            let (vx, vy) = store.velocity_mut();
            vx.swap();
            vy.swap();
            let (cur, prev) = vx.split_mut();
            diffuse(ctx, BoundaryKind::VectorX, cur, prev, coeff.viscosity);
            let (cur, prev) = vy.split_mut();
            diffuse(ctx, BoundaryKind::VectorY, cur, prev, coeff.viscosity);
        }
        Stage::ProjectVelocity | Stage::ReprojectVelocity => {
            let (vx, vy) = store.velocity_mut();
            let (vx_cur, pressure) = vx.split_mut();
            let (vy_cur, div) = vy.split_mut();
            project(ctx, vx_cur, vy_cur, pressure, div);
        }
        Stage::AdvectVelocity => {
            let (vx, vy) = store.velocity_mut();
            vx.swap();
            vy.swap();
            let (vx_cur, vx_prev) = vx.split_mut();
            let (vy_cur, vy_prev) = vy.split_mut();
            advect(ctx, BoundaryKind::VectorX, vx_cur, vx_prev, vx_prev, vy_prev);
            advect(ctx, BoundaryKind::VectorY, vy_cur, vy_prev, vx_prev, vy_prev);
        }
        Stage::DiffuseDensity => {
            let (_, _, density) = store.all_mut();
            density.swap();
            let (cur, prev) = density.split_mut();
            diffuse(ctx, BoundaryKind::Scalar, cur, prev, coeff.diffusion);
        }
        Stage::AdvectDensity => {
            let (vx, vy, density) = store.all_mut();
            density.swap();
            let (cur, prev) = density.split_mut();
            advect(ctx, BoundaryKind::Scalar, cur, prev, vx.current(), vy.current());
        }
    }
}

/// Run every stage of [`PIPELINE`] in order, advancing `phase` after each.
///
/// Returns the wall-clock microseconds spent in each stage. `phase` is
/// left at [`StepPhase::Idle`].
pub(crate) fn run_pipeline(
    ctx: &SolverContext,
    coeff: Coefficients,
    store: &mut FieldStore,
    phase: &mut StepPhase,
) -> SmallVec<[(Stage, u64); 6]> {
    let mut timings = SmallVec::new();
    for stage in PIPELINE {
        let start = Instant::now();
        run_stage(stage, ctx, coeff, store);
        timings.push((stage, start.elapsed().as_micros() as u64));
        *phase = stage.completes();
    }
    *phase = StepPhase::Idle;
    timings
}

#[cfg(test)]
mod tests {
    use super::*;
    use eddy_core::FieldKind;
    use eddy_space::GridShape;

    fn setup(n: u32, dt: f32) -> (SolverContext, FieldStore) {
        let shape = GridShape::new(n).unwrap();
        (SolverContext::new(shape, dt), FieldStore::new(shape))
    }

    const COEFF: Coefficients = Coefficients {
        diffusion: 0.0001,
        viscosity: 0.0001,
    };

    #[test]
    fn pipeline_order_and_phases() {
        let phases: Vec<StepPhase> = PIPELINE.iter().map(|s| s.completes()).collect();
        assert_eq!(
            phases,
            vec![
                StepPhase::VelocityDiffused,
                StepPhase::VelocityProjected,
                StepPhase::VelocityAdvected,
                StepPhase::VelocityReprojected,
                StepPhase::DensityDiffused,
                StepPhase::DensityAdvected,
            ]
        );
    }

    #[test]
    fn pipeline_returns_to_idle_with_all_timings() {
        let (ctx, mut store) = setup(8, 0.1);
        let mut phase = StepPhase::VelocitySourced;
        let timings = run_pipeline(&ctx, COEFF, &mut store, &mut phase);
        assert_eq!(phase, StepPhase::Idle);
        let stages: Vec<Stage> = timings.iter().map(|&(s, _)| s).collect();
        assert_eq!(stages, PIPELINE.to_vec());
    }

    #[test]
    fn rotation_counts_per_step() {
        let (ctx, mut store) = setup(4, 0.1);
        let mut phase = StepPhase::Idle;
        run_pipeline(&ctx, COEFF, &mut store, &mut phase);
        assert_eq!(store.pair(FieldKind::VelocityX).generation(), 2);
        assert_eq!(store.pair(FieldKind::VelocityY).generation(), 2);
        assert_eq!(store.pair(FieldKind::Density).generation(), 2);
    }

    #[test]
    fn diffuse_velocity_reads_what_was_current() {
        let (ctx, mut store) = setup(4, 0.1);
        let k = store.shape().index(2, 2);
        store.pair_mut(FieldKind::VelocityX).current_mut()[k] = 1.0;
        let zero = Coefficients {
            diffusion: 0.0,
            viscosity: 0.0,
        };
        run_stage(Stage::DiffuseVelocity, &ctx, zero, &mut store);
        assert_eq!(store.current(FieldKind::VelocityX)[k], 1.0);
        assert_eq!(store.pair(FieldKind::VelocityX).previous()[k], 1.0);
    }

    #[test]
    fn density_is_carried_by_current_velocity() {
        // Uniform rightward flow of one cell per step.
        let (ctx, mut store) = setup(8, 0.25);
        let shape = *store.shape();
        store.pair_mut(FieldKind::VelocityX).current_mut().fill(0.5);
        store.pair_mut(FieldKind::Density).current_mut()[shape.index(3, 4)] = 1.0;

        run_stage(Stage::AdvectDensity, &ctx, COEFF, &mut store);

        let d = store.current(FieldKind::Density);
        assert_eq!(d[shape.index(4, 4)], 1.0);
        assert_eq!(d[shape.index(3, 4)], 0.0);
    }

    #[test]
    fn between_steps() {
        assert!(StepPhase::Idle.is_between_steps());
        assert!(StepPhase::VelocitySourced.is_between_steps());
        assert!(!StepPhase::VelocityProjected.is_between_steps());
    }
}
