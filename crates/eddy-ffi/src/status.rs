//! C-compatible status codes.

use eddy_core::StepError;
use eddy_engine::ConfigError;

/// Status code returned by every FFI function.
///
/// `Ok` = 0, all errors are negative. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EddyStatus {
    /// Success.
    Ok = 0,
    /// Handle is invalid or the grid was already destroyed.
    InvalidHandle = -1,
    /// Grid parameters failed validation.
    ConfigError = -2,
    /// A required pointer is null or an argument is out of range.
    InvalidArgument = -3,
    /// Caller-provided buffer is too small.
    BufferTooSmall = -4,
    /// The grid holds NaN or an infinity.
    NonFinite = -5,
    /// Internal error (e.g. poisoned mutex after a prior panic).
    InternalError = -6,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl From<&ConfigError> for EddyStatus {
    fn from(_e: &ConfigError) -> Self {
        EddyStatus::ConfigError
    }
}

impl From<&StepError> for EddyStatus {
    fn from(e: &StepError) -> Self {
        match e {
            StepError::NonFinite { .. } => EddyStatus::NonFinite,
        }
    }
}
