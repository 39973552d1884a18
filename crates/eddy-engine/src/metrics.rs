//! Per-step performance metrics.
//!
//! [`StepMetrics`] captures timing and memory data for a single step. The
//! grid overwrites it after each [`step()`](crate::FluidGrid::step);
//! consumers read the most recent one via
//! [`last_metrics()`](crate::FluidGrid::last_metrics).

use smallvec::SmallVec;

use crate::stepper::Stage;

/// Timing and health data collected during a single step.
///
/// All durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepMetrics {
    /// Wall-clock time for the whole step.
    pub total_us: u64,
    /// Per-stage execution times in pipeline order.
    pub stage_us: SmallVec<[(Stage, u64); 6]>,
    /// Bytes held by the grid's six buffers.
    pub memory_bytes: usize,
    /// Cumulative number of non-finite scans performed.
    pub health_checks: u64,
    /// Cumulative number of times a scan found a non-finite value and the
    /// grid was zeroed.
    pub recoveries: u64,
}

impl StepMetrics {
    /// Time recorded for `stage`, if it ran.
    pub fn stage(&self, stage: Stage) -> Option<u64> {
        self.stage_us
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|&(_, us)| us)
    }
}
