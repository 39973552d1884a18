//! Core types and error definitions for the Eddy fluid solver.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every other crate in the workspace: which
//! fields a grid owns, how each field reflects at the walls, the step
//! counter, and the runtime error type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod field;
pub mod id;

pub use error::StepError;
pub use field::{BoundaryKind, FieldKind};
pub use id::StepId;
