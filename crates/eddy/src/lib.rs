//! Eddy: a real-time 2D stable-fluids solver.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Eddy sub-crates. For most users, adding `eddy` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use eddy::prelude::*;
//!
//! // 64×64 interior cells, light diffusion and viscosity, dt = 0.1.
//! let mut grid = FluidGrid::new(64, 0.0001, 0.0001, 0.1).unwrap();
//!
//! // Puff of smoke near the bottom, pushed upward.
//! grid.add_density(32.0, 4.0, 100.0);
//! grid.add_velocity(32.0, 4.0, 0.0, 20.0);
//!
//! for _ in 0..10 {
//!     grid.step();
//! }
//!
//! assert!(grid.sample_density(32.0, 8.0) > 0.0);
//! assert_eq!(grid.step_count(), StepId(10));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `eddy-core` | Field kinds, boundary kinds, step IDs, errors |
//! | [`space`] | `eddy-space` | Grid geometry and wall enforcement |
//! | [`arena`] | `eddy-arena` | Double-buffered field storage |
//! | [`solver`] | `eddy-solver` | Relaxation, diffusion, projection, advection |
//! | [`engine`] | `eddy-engine` | `FluidGrid`, configuration, step pipeline |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and errors (`eddy-core`).
pub use eddy_core as types;

/// Grid geometry and boundary enforcement (`eddy-space`).
///
/// [`space::GridShape`] owns the `(N+2)²` indexing; [`space::enforce`]
/// rebuilds the wall ring of a buffer.
pub use eddy_space as space;

/// Double-buffered field storage (`eddy-arena`).
pub use eddy_arena as arena;

/// Numerical kernels (`eddy-solver`).
///
/// Free functions over raw buffers, for callers who want to drive their own
/// pipeline: [`solver::relax`], [`solver::diffuse`], [`solver::project`],
/// and [`solver::advect`].
pub use eddy_solver as solver;

/// Fluid grid and step pipeline (`eddy-engine`).
///
/// [`engine::FluidGrid`] is the main entry point and is also in the
/// [`prelude`].
pub use eddy_engine as engine;

/// Common imports for typical Eddy usage.
///
/// ```rust
/// use eddy::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use eddy_core::{BoundaryKind, FieldKind, StepError, StepId};

    // Geometry
    pub use eddy_space::GridShape;

    // Engine
    pub use eddy_engine::{ConfigError, FluidConfig, FluidGrid, Stage, StepMetrics};
}
