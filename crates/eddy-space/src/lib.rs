//! Grid geometry and wall boundary enforcement for the Eddy fluid solver.
//!
//! A [`GridShape`] describes an N×N interior surrounded by a one-cell
//! boundary ring, stored as a flat row-major buffer of `(N+2)²` values.
//! [`boundary::enforce`] rebuilds that ring from the interior according to
//! a [`BoundaryKind`](eddy_core::BoundaryKind).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod error;
pub mod shape;

pub use boundary::enforce;
pub use error::SpaceError;
pub use shape::GridShape;
