//! C ABI for the Eddy stable-fluids solver.
//!
//! Grids live in a process-wide handle table and are addressed by opaque
//! `u64` handles. Every entry point returns an [`EddyStatus`] code as
//! `i32`, writes results through caller-provided out-pointers, and catches
//! Rust panics before they reach the caller. A header is generated into
//! `include/eddy.h` at build time.
//!
//! This is the only crate in the workspace that contains `unsafe` code;
//! each use is confined to a single out-pointer write or buffer copy.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

/// Run an FFI body, converting a panic into [`EddyStatus::Panicked`].
///
/// The body evaluates to an `i32` status and may `return` early.
macro_rules! ffi_guard {
    ($body:block) => {
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| -> i32 { $body })) {
            Ok(code) => code,
            Err(_) => $crate::status::EddyStatus::Panicked as i32,
        }
    };
}

/// Lock a mutex inside [`ffi_guard!`], returning
/// [`EddyStatus::InternalError`] if a previous panic poisoned it.
macro_rules! ffi_lock {
    ($mutex:expr) => {
        match $mutex.lock() {
            Ok(guard) => guard,
            Err(_) => return $crate::status::EddyStatus::InternalError as i32,
        }
    };
}

pub mod grid;
mod handle;
pub mod metrics;
pub mod status;

pub use grid::*;
pub use metrics::EddyStepMetrics;
pub use status::EddyStatus;
