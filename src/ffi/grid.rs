//! Cell access and stepping.

use tracing::trace;

use super::lifecycle::LifeHandle;
use crate::automaton::Cell;

/// Sets a cell to alive (non-zero) or dead (0).
///
/// # Safety
/// - `ptr` must be a valid pointer to a LifeHandle, or null
///
/// Out-of-bounds coordinates are silently ignored.
#[no_mangle]
pub unsafe extern "C" fn lg_set_cell(ptr: *mut LifeHandle, row: i64, col: i64, alive: u8) {
    if ptr.is_null() {
        return;
    }

    let grid = &mut (*ptr).state.grid;
    if !grid.in_bounds(row, col) {
        return;
    }

    grid.set(row as usize, col as usize, Cell::from_u8(alive));
}

/// Gets the state of a cell (0 = dead, 1 = alive).
///
/// # Safety
/// - `ptr` must be a valid pointer to a LifeHandle, or null
///
/// # Returns
/// 0 if out of bounds, null pointer, or dead; 1 if alive.
#[no_mangle]
pub unsafe extern "C" fn lg_get_cell(ptr: *const LifeHandle, row: i64, col: i64) -> u8 {
    if ptr.is_null() {
        return 0;
    }

    let grid = &(*ptr).state.grid;
    if !grid.in_bounds(row, col) {
        return 0;
    }

    grid.get(row as usize, col as usize) as u8
}

/// Number of alive cells, or 0 for a null pointer.
///
/// # Safety
/// - `ptr` must be a valid pointer to a LifeHandle, or null
#[no_mangle]
pub unsafe extern "C" fn lg_alive_count(ptr: *const LifeHandle) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).state.grid.alive_count() as u64
}

/// Advances the simulation by one time step using B3/S23 rules.
///
/// # Safety
/// - `ptr` must be a valid pointer to a LifeHandle, or null
///
/// # Returns
/// Alive cells after the step, or 0 for a null pointer.
#[no_mangle]
pub unsafe extern "C" fn lg_step(ptr: *mut LifeHandle) -> u64 {
    if ptr.is_null() {
        return 0;
    }

    let handle = &mut *ptr;
    handle.state.advance(handle.mode, false);
    let alive = handle.state.grid.alive_count() as u64;
    trace!(step = handle.state.time, alive, "ffi step");
    alive
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::lifecycle;
    use std::ptr;

    #[test]
    fn test_set_and_get_cell() {
        unsafe {
            let handle = lifecycle::lg_create(8, 8, 0);

            lg_set_cell(handle, 0, 0, 1);
            assert_eq!(lg_get_cell(handle, 0, 0), 1);
            assert_eq!(lg_alive_count(handle), 1);

            lg_set_cell(handle, 0, 0, 0);
            assert_eq!(lg_get_cell(handle, 0, 0), 0);

            lifecycle::lg_destroy(handle);
        }
    }

    #[test]
    fn test_out_of_bounds_access() {
        unsafe {
            let handle = lifecycle::lg_create(4, 4, 0);

            assert_eq!(lg_get_cell(handle, -1, 0), 0);
            assert_eq!(lg_get_cell(handle, 4, 0), 0);

            // Should not crash
            lg_set_cell(handle, -1, 0, 1);
            lg_set_cell(handle, 0, 4, 1);
            assert_eq!(lg_alive_count(handle), 0);

            lifecycle::lg_destroy(handle);
        }
    }

    #[test]
    fn test_step_blinker() {
        unsafe {
            let handle = lifecycle::lg_create(5, 5, 0);

            lg_set_cell(handle, 2, 1, 1);
            lg_set_cell(handle, 2, 2, 1);
            lg_set_cell(handle, 2, 3, 1);

            assert_eq!(lg_step(handle), 3);
            assert_eq!(lifecycle::lg_get_generation(handle), 1);
            assert_eq!(lg_get_cell(handle, 1, 2), 1);
            assert_eq!(lg_get_cell(handle, 3, 2), 1);
            assert_eq!(lg_get_cell(handle, 2, 1), 0);

            lifecycle::lg_destroy(handle);
        }
    }

    #[test]
    fn test_periodic_step_wraps() {
        unsafe {
            // Horizontal blinker straddling the right edge
            let handle = lifecycle::lg_create(5, 5, 1);
            lg_set_cell(handle, 2, 4, 1);
            lg_set_cell(handle, 2, 0, 1);
            lg_set_cell(handle, 2, 1, 1);

            assert_eq!(lg_step(handle), 3);
            assert_eq!(lg_get_cell(handle, 1, 0), 1);
            assert_eq!(lg_get_cell(handle, 2, 0), 1);
            assert_eq!(lg_get_cell(handle, 3, 0), 1);

            lifecycle::lg_destroy(handle);
        }
    }

    #[test]
    fn test_null_pointer_handling() {
        unsafe {
            lg_set_cell(ptr::null_mut(), 0, 0, 1); // Should not crash
            assert_eq!(lg_get_cell(ptr::null(), 0, 0), 0);
            assert_eq!(lg_alive_count(ptr::null()), 0);
            assert_eq!(lg_step(ptr::null_mut()), 0);
        }
    }
}
