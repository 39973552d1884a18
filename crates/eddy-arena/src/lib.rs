//! Double-buffered field storage for the Eddy fluid solver.
//!
//! # Architecture
//!
//! ```text
//! FieldStore
//! ├── velocity_x: FieldPair ── [Vec<f32>; 2] + generation
//! ├── velocity_y: FieldPair ── [Vec<f32>; 2] + generation
//! └── density:    FieldPair ── [Vec<f32>; 2] + generation
//! ```
//!
//! Each pair alternates its two buffers between the "current" and
//! "previous" roles. Stages swap a pair instead of copying it, and the
//! generation counter decides which buffer plays which role, so there is
//! never any doubt about which slice is being read and which is written.
//!
//! All buffers are allocated zero-filled at construction and never
//! resized.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod pingpong;
pub mod store;

pub use pingpong::FieldPair;
pub use store::FieldStore;
