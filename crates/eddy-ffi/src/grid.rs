//! Grid lifecycle FFI: create, sources, step, reads, destroy.
//!
//! Each grid sits behind its own `Arc<Mutex<FluidGrid>>`, so the global
//! `GRIDS` table lock is only held for handle lookup and different grids
//! can be stepped from different threads at the same time.

use std::num::NonZeroU32;
use std::sync::{Arc, Mutex};

use eddy_core::FieldKind;
use eddy_engine::{FluidConfig, FluidGrid};

use crate::handle::HandleTable;
use crate::metrics::EddyStepMetrics;
use crate::status::EddyStatus;

type GridArc = Arc<Mutex<FluidGrid>>;

static GRIDS: Mutex<HandleTable<GridArc>> = Mutex::new(HandleTable::new());

/// Clone the Arc for a grid handle, briefly locking the global table.
///
/// Returns `None` if the handle is invalid or the mutex is poisoned.
fn get_grid(handle: u64) -> Option<GridArc> {
    GRIDS.lock().ok()?.get(handle).cloned()
}

#[allow(unsafe_code)]
fn create(config: FluidConfig, grid_out: *mut u64) -> i32 {
    if grid_out.is_null() {
        return EddyStatus::InvalidArgument as i32;
    }
    let grid = match FluidGrid::from_config(config) {
        Ok(g) => g,
        Err(e) => return EddyStatus::from(&e) as i32,
    };
    let handle = ffi_lock!(GRIDS).insert(Arc::new(Mutex::new(grid)));
    // SAFETY: grid_out is non-null and valid per caller contract.
    unsafe { *grid_out = handle };
    EddyStatus::Ok as i32
}

/// Create a grid with `resolution × resolution` interior cells.
///
/// Uses the default solver iteration count and no health checks. On
/// success writes the new handle to `grid_out` and returns `EDDY_STATUS_OK`.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn eddy_create(
    resolution: u32,
    diffusion: f32,
    viscosity: f32,
    dt: f32,
    grid_out: *mut u64,
) -> i32 {
    ffi_guard!({ create(FluidConfig::new(resolution, diffusion, viscosity, dt), grid_out) })
}

/// Create a grid with explicit solver settings.
///
/// `solver_iterations` is the Gauss-Seidel sweep count per linear solve
/// (must be at least 1). `health_check_interval` scans for non-finite
/// values every that many steps and zeroes the grid when one is found;
/// 0 disables the scan.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn eddy_create_with_iterations(
    resolution: u32,
    diffusion: f32,
    viscosity: f32,
    dt: f32,
    solver_iterations: u32,
    health_check_interval: u32,
    grid_out: *mut u64,
) -> i32 {
    ffi_guard!({
        let config = FluidConfig {
            solver_iterations,
            health_check_interval: NonZeroU32::new(health_check_interval),
            ..FluidConfig::new(resolution, diffusion, viscosity, dt)
        };
        create(config, grid_out)
    })
}

/// Destroy a grid, releasing all its buffers.
///
/// Destroying an already-destroyed handle returns `EDDY_STATUS_INVALID_HANDLE`.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn eddy_destroy(grid_handle: u64) -> i32 {
    ffi_guard!({
        match ffi_lock!(GRIDS).remove(grid_handle) {
            Some(_) => EddyStatus::Ok as i32,
            None => EddyStatus::InvalidHandle as i32,
        }
    })
}

/// Add density to the cell containing `(x, y)` (interior cell units).
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn eddy_add_density(grid_handle: u64, x: f32, y: f32, amount: f32) -> i32 {
    ffi_guard!({
        let grid_arc = match get_grid(grid_handle) {
            Some(arc) => arc,
            None => return EddyStatus::InvalidHandle as i32,
        };
        ffi_lock!(grid_arc).add_density(x, y, amount);
        EddyStatus::Ok as i32
    })
}

/// Add a velocity impulse to the cell containing `(x, y)`.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn eddy_add_velocity(grid_handle: u64, x: f32, y: f32, dvx: f32, dvy: f32) -> i32 {
    ffi_guard!({
        let grid_arc = match get_grid(grid_handle) {
            Some(arc) => arc,
            None => return EddyStatus::InvalidHandle as i32,
        };
        ffi_lock!(grid_arc).add_velocity(x, y, dvx, dvy);
        EddyStatus::Ok as i32
    })
}

/// Advance a grid by one time step.
///
/// `metrics_out` may be null to skip metrics collection.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn eddy_step(grid_handle: u64, metrics_out: *mut EddyStepMetrics) -> i32 {
    ffi_guard!({
        let grid_arc = match get_grid(grid_handle) {
            Some(arc) => arc,
            None => return EddyStatus::InvalidHandle as i32,
        };
        let mut grid = ffi_lock!(grid_arc);
        grid.step();
        if !metrics_out.is_null() {
            let m = EddyStepMetrics::from_rust(grid.last_metrics());
            // SAFETY: metrics_out is valid per caller contract.
            unsafe { *metrics_out = m };
        }
        EddyStatus::Ok as i32
    })
}

/// Density in the cell containing `(x, y)`, written to `out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn eddy_sample_density(grid_handle: u64, x: f32, y: f32, out: *mut f32) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return EddyStatus::InvalidArgument as i32;
        }
        let grid_arc = match get_grid(grid_handle) {
            Some(arc) => arc,
            None => return EddyStatus::InvalidHandle as i32,
        };
        let d = ffi_lock!(grid_arc).sample_density(x, y);
        // SAFETY: out is non-null and valid per caller contract.
        unsafe { *out = d };
        EddyStatus::Ok as i32
    })
}

/// Velocity in the cell containing `(x, y)`, written to `vx_out`/`vy_out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn eddy_sample_velocity(
    grid_handle: u64,
    x: f32,
    y: f32,
    vx_out: *mut f32,
    vy_out: *mut f32,
) -> i32 {
    ffi_guard!({
        if vx_out.is_null() || vy_out.is_null() {
            return EddyStatus::InvalidArgument as i32;
        }
        let grid_arc = match get_grid(grid_handle) {
            Some(arc) => arc,
            None => return EddyStatus::InvalidHandle as i32,
        };
        let (vx, vy) = ffi_lock!(grid_arc).sample_velocity(x, y);
        // SAFETY: both pointers are non-null and valid per caller contract.
        unsafe {
            *vx_out = vx;
            *vy_out = vy;
        }
        EddyStatus::Ok as i32
    })
}

/// Copy a whole field buffer, boundary ring included, into `buf`.
///
/// `field` is 0 (velocity x), 1 (velocity y) or 2 (density). The buffer
/// is row-major with `(N + 2)²` elements; see `eddy_buffer_len`. Returns
/// `EDDY_STATUS_BUFFER_TOO_SMALL` if `buf_len` is shorter than that.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn eddy_read_field(grid_handle: u64, field: u32, buf: *mut f32, buf_len: usize) -> i32 {
    ffi_guard!({
        if buf.is_null() {
            return EddyStatus::InvalidArgument as i32;
        }
        let kind = match FieldKind::from_code(field) {
            Some(k) => k,
            None => return EddyStatus::InvalidArgument as i32,
        };
        let grid_arc = match get_grid(grid_handle) {
            Some(arc) => arc,
            None => return EddyStatus::InvalidHandle as i32,
        };
        let grid = ffi_lock!(grid_arc);
        let data = grid.field(kind);
        if buf_len < data.len() {
            return EddyStatus::BufferTooSmall as i32;
        }
        // SAFETY: buf points to buf_len valid f32 values.
        unsafe {
            std::ptr::copy_nonoverlapping(data.as_ptr(), buf, data.len());
        }
        EddyStatus::Ok as i32
    })
}

/// Zero every buffer of a grid.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn eddy_clear(grid_handle: u64) -> i32 {
    ffi_guard!({
        let grid_arc = match get_grid(grid_handle) {
            Some(arc) => arc,
            None => return EddyStatus::InvalidHandle as i32,
        };
        ffi_lock!(grid_arc).clear();
        EddyStatus::Ok as i32
    })
}

/// Returns `EDDY_STATUS_NON_FINITE` if any buffer holds NaN or infinity.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn eddy_check_finite(grid_handle: u64) -> i32 {
    ffi_guard!({
        let grid_arc = match get_grid(grid_handle) {
            Some(arc) => arc,
            None => return EddyStatus::InvalidHandle as i32,
        };
        let result = ffi_lock!(grid_arc).check_finite();
        match result {
            Ok(()) => EddyStatus::Ok as i32,
            Err(e) => EddyStatus::from(&e) as i32,
        }
    })
}

/// Interior resolution N, written to `out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn eddy_resolution(grid_handle: u64, out: *mut u32) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return EddyStatus::InvalidArgument as i32;
        }
        let grid_arc = match get_grid(grid_handle) {
            Some(arc) => arc,
            None => return EddyStatus::InvalidHandle as i32,
        };
        let n = ffi_lock!(grid_arc).resolution();
        // SAFETY: out is non-null and valid per caller contract.
        unsafe { *out = n };
        EddyStatus::Ok as i32
    })
}

/// Elements per field buffer, `(N + 2)²`, written to `out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn eddy_buffer_len(grid_handle: u64, out: *mut usize) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return EddyStatus::InvalidArgument as i32;
        }
        let grid_arc = match get_grid(grid_handle) {
            Some(arc) => arc,
            None => return EddyStatus::InvalidHandle as i32,
        };
        let len = ffi_lock!(grid_arc).shape().buffer_len();
        // SAFETY: out is non-null and valid per caller contract.
        unsafe { *out = len };
        EddyStatus::Ok as i32
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const OK: i32 = EddyStatus::Ok as i32;

    fn new_grid(n: u32) -> u64 {
        let mut h = 0u64;
        assert_eq!(eddy_create(n, 0.0001, 0.0001, 0.1, &mut h), OK);
        h
    }

    #[test]
    fn create_step_sample_destroy() {
        let h = new_grid(16);
        assert_eq!(eddy_add_density(h, 8.0, 8.0, 10.0), OK);
        assert_eq!(eddy_add_velocity(h, 8.0, 8.0, 1.0, -1.0), OK);

        let mut m = EddyStepMetrics::default();
        assert_eq!(eddy_step(h, &mut m), OK);
        assert_eq!(m.memory_bytes, 6 * 18 * 18 * 4);
        assert_eq!(eddy_step(h, std::ptr::null_mut()), OK);

        let mut d = -1.0f32;
        assert_eq!(eddy_sample_density(h, 8.0, 8.0, &mut d), OK);
        assert!(d > 0.0);
        let (mut vx, mut vy) = (f32::NAN, f32::NAN);
        assert_eq!(eddy_sample_velocity(h, 8.0, 8.0, &mut vx, &mut vy), OK);
        assert!(vx.is_finite() && vy.is_finite());

        assert_eq!(eddy_destroy(h), OK);
    }

    #[test]
    fn invalid_config_reports_config_error() {
        let mut h = 0u64;
        assert_eq!(
            eddy_create(0, 0.0, 0.0, 0.1, &mut h),
            EddyStatus::ConfigError as i32
        );
        assert_eq!(
            eddy_create_with_iterations(8, 0.0, 0.0, 0.1, 0, 0, &mut h),
            EddyStatus::ConfigError as i32
        );
        assert_eq!(h, 0);
    }

    #[test]
    fn null_out_pointers_rejected() {
        let bad = EddyStatus::InvalidArgument as i32;
        assert_eq!(eddy_create(8, 0.0, 0.0, 0.1, std::ptr::null_mut()), bad);
        let h = new_grid(4);
        assert_eq!(eddy_sample_density(h, 0.0, 0.0, std::ptr::null_mut()), bad);
        let mut vx = 0.0;
        assert_eq!(
            eddy_sample_velocity(h, 0.0, 0.0, &mut vx, std::ptr::null_mut()),
            bad
        );
        assert_eq!(eddy_read_field(h, 2, std::ptr::null_mut(), 100), bad);
        assert_eq!(eddy_resolution(h, std::ptr::null_mut()), bad);
        assert_eq!(eddy_destroy(h), OK);
    }

    #[test]
    fn destroyed_handle_is_invalid() {
        let h = new_grid(4);
        assert_eq!(eddy_destroy(h), OK);
        let invalid = EddyStatus::InvalidHandle as i32;
        assert_eq!(eddy_destroy(h), invalid);
        assert_eq!(eddy_step(h, std::ptr::null_mut()), invalid);
        assert_eq!(eddy_add_density(h, 1.0, 1.0, 1.0), invalid);
        assert_eq!(eddy_clear(h), invalid);
        let mut d = 0.0;
        assert_eq!(eddy_sample_density(h, 1.0, 1.0, &mut d), invalid);
    }

    #[test]
    fn read_field_checks_kind_and_length() {
        let h = new_grid(6);
        let mut len = 0usize;
        assert_eq!(eddy_buffer_len(h, &mut len), OK);
        assert_eq!(len, 64);
        let mut n = 0u32;
        assert_eq!(eddy_resolution(h, &mut n), OK);
        assert_eq!(n, 6);

        assert_eq!(eddy_add_density(h, 0.5, 0.5, 3.0), OK);
        let mut buf = vec![0.0f32; len];
        assert_eq!(eddy_read_field(h, 2, buf.as_mut_ptr(), len), OK);
        assert_eq!(buf[9], 3.0);
        assert_eq!(
            eddy_read_field(h, 2, buf.as_mut_ptr(), len - 1),
            EddyStatus::BufferTooSmall as i32
        );
        assert_eq!(
            eddy_read_field(h, 3, buf.as_mut_ptr(), len),
            EddyStatus::InvalidArgument as i32
        );
        assert_eq!(eddy_destroy(h), OK);
    }

    #[test]
    fn non_finite_detected_and_cleared() {
        let h = new_grid(8);
        assert_eq!(eddy_check_finite(h), OK);
        assert_eq!(eddy_add_velocity(h, 4.0, 4.0, f32::INFINITY, 0.0), OK);
        assert_eq!(eddy_check_finite(h), EddyStatus::NonFinite as i32);
        assert_eq!(eddy_clear(h), OK);
        assert_eq!(eddy_check_finite(h), OK);
        assert_eq!(eddy_destroy(h), OK);
    }

    #[test]
    fn health_checked_grid_recovers() {
        let mut h = 0u64;
        assert_eq!(
            eddy_create_with_iterations(8, 0.0001, 0.0001, 0.1, 10, 1, &mut h),
            OK
        );
        assert_eq!(eddy_add_density(h, 4.0, 4.0, f32::NAN), OK);
        let mut m = EddyStepMetrics::default();
        assert_eq!(eddy_step(h, &mut m), OK);
        assert_eq!(m.recoveries, 1);
        assert_eq!(eddy_check_finite(h), OK);
        assert_eq!(eddy_destroy(h), OK);
    }
}
