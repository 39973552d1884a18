//! Fluid grid and step pipeline for the Eddy stable-fluids solver.
//!
//! [`FluidGrid`] is the entry point: build one from a resolution and the
//! physical coefficients (or a [`FluidConfig`]), inject sources, call
//! [`step()`](FluidGrid::step), and sample the result. The pipeline it runs
//! is described in [`stepper`]; the numerical kernels live in
//! `eddy-solver`.
//!
//! The crate logs through the [`log`] facade: grid creation and teardown
//! at `debug`, every step at `trace`, and health-check recoveries at
//! `warn`. No logger is installed.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod grid;
mod health;
pub mod metrics;
pub mod stepper;

pub use config::{ConfigError, FluidConfig};
pub use grid::FluidGrid;
pub use metrics::StepMetrics;
pub use stepper::{Stage, StepPhase, PIPELINE};
