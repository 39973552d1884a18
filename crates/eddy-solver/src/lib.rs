//! Numerical kernels for the Eddy stable-fluids solver.
//!
//! Every kernel works on flat `(N + 2)²` buffers described by a
//! [`GridShape`](eddy_space::GridShape), writes interior cells only, and
//! rebuilds the boundary ring with [`eddy_space::enforce`] before it
//! returns. Kernels never allocate; callers supply destination and scratch
//! buffers.
//!
//! # Kernels
//!
//! - [`relax`]: fixed-iteration Gauss-Seidel for `c·x - a·Σneighbours = x0`.
//! - [`diffuse`]: implicit diffusion built on [`relax`].
//! - [`divergence`] and [`project`]: Helmholtz-Hodge projection onto a
//!   divergence-free velocity.
//! - [`advect`]: semi-Lagrangian backtrace with bilinear sampling.
//!
//! A full time step composes them in the order diffuse, project, advect,
//! project for velocity, then diffuse, advect for density. The engine
//! crate owns that sequencing and the buffer rotation between stages.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod advection;
pub mod context;
pub mod diffusion;
pub mod projection;
pub mod relax;

pub use advection::{advect, bilinear};
pub use context::{SolverContext, DEFAULT_SOLVER_ITERATIONS};
pub use diffusion::diffuse;
pub use projection::{divergence, project};
pub use relax::relax;
