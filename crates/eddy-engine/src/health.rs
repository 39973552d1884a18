//! Periodic non-finite detection and recovery.

use std::num::NonZeroU32;

use eddy_arena::FieldStore;
use eddy_core::StepError;

/// Scans the field store every `interval` steps.
///
/// A NaN or infinity anywhere in the six buffers would otherwise spread
/// to the whole grid within a few steps and never leave. When a scan finds
/// one the store is zeroed and the event is counted.
#[derive(Clone, Debug, Default)]
pub(crate) struct HealthMonitor {
    interval: Option<NonZeroU32>,
    since_check: u32,
    checks: u64,
    recoveries: u64,
}

impl HealthMonitor {
    pub(crate) fn new(interval: Option<NonZeroU32>) -> Self {
        Self {
            interval,
            ..Self::default()
        }
    }

    /// Scans performed so far.
    pub(crate) fn checks(&self) -> u64 {
        self.checks
    }

    /// Scans that found a non-finite value.
    pub(crate) fn recoveries(&self) -> u64 {
        self.recoveries
    }

    /// Count one completed step and scan if the interval has elapsed.
    ///
    /// Returns the fault that triggered a recovery, if any.
    pub(crate) fn after_step(&mut self, store: &mut FieldStore) -> Option<StepError> {
        let interval = self.interval?;
        self.since_check += 1;
        if self.since_check < interval.get() {
            return None;
        }
        self.since_check = 0;
        self.checks += 1;

        let (field, cell_index) = store.first_non_finite()?;
        let fault = StepError::NonFinite { field, cell_index };
        log::warn!("{fault}; zeroing all fields");
        store.clear();
        self.recoveries += 1;
        Some(fault)
    }

    /// Restart the interval count, as after an explicit clear.
    pub(crate) fn reset_interval(&mut self) {
        self.since_check = 0;
    }
}
