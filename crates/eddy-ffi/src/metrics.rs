//! C-compatible step metrics.

use eddy_engine::{StepMetrics, PIPELINE};

/// Metrics written by `eddy_step`.
///
/// `stage_us` follows pipeline order: diffuse velocity, project velocity,
/// advect velocity, reproject velocity, diffuse density, advect density.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EddyStepMetrics {
    /// Wall-clock time for the entire step, in microseconds.
    pub total_us: u64,
    /// Bytes held by the grid's six buffers.
    /// Fixed-width `u64` for ABI portability (not `usize`).
    pub memory_bytes: u64,
    /// Cumulative number of non-finite scans performed.
    pub health_checks: u64,
    /// Cumulative number of scans that zeroed the grid.
    pub recoveries: u64,
    /// Per-stage time in microseconds, in pipeline order.
    pub stage_us: [u64; 6],
}

// Compile-time layout assertions for ABI stability.
// 4×u64 + 6×u64 = 80 bytes, align 8.
const _: () = assert!(std::mem::size_of::<EddyStepMetrics>() == 80);
const _: () = assert!(std::mem::align_of::<EddyStepMetrics>() == 8);

impl EddyStepMetrics {
    pub(crate) fn from_rust(m: &StepMetrics) -> Self {
        let mut stage_us = [0u64; 6];
        for (slot, stage) in stage_us.iter_mut().zip(PIPELINE) {
            *slot = m.stage(stage).unwrap_or(0);
        }
        Self {
            total_us: m.total_us,
            memory_bytes: m.memory_bytes as u64,
            health_checks: m.health_checks,
            recoveries: m.recoveries,
            stage_us,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eddy_engine::Stage;

    #[test]
    fn stages_land_in_pipeline_order() {
        let mut m = StepMetrics {
            total_us: 900,
            memory_bytes: 4096,
            health_checks: 2,
            recoveries: 1,
            ..StepMetrics::default()
        };
        m.stage_us.push((Stage::AdvectDensity, 60));
        m.stage_us.push((Stage::DiffuseVelocity, 10));

        let c = EddyStepMetrics::from_rust(&m);
        assert_eq!(c.total_us, 900);
        assert_eq!(c.memory_bytes, 4096);
        assert_eq!(c.health_checks, 2);
        assert_eq!(c.recoveries, 1);
        assert_eq!(c.stage_us, [10, 0, 0, 0, 0, 60]);
    }
}
