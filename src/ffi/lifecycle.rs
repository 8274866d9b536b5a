//! Handle creation, destruction, and generation queries.

use crate::automaton::{BoundaryMode, Grid};
use crate::state::SimulationState;

/// Opaque simulation handle passed across the C boundary.
pub struct LifeHandle {
    pub(crate) state: SimulationState,
    pub(crate) mode: BoundaryMode,
}

/// Creates an all-dead `rows x cols` simulation and returns an opaque pointer.
///
/// `periodic` selects wrap-around boundaries when non-zero.
///
/// # Returns
/// A pointer to a new handle, or null if either dimension is zero.
///
/// # Safety
/// The returned pointer must eventually be freed with `lg_destroy()`.
#[no_mangle]
pub extern "C" fn lg_create(rows: u32, cols: u32, periodic: u8) -> *mut LifeHandle {
    if rows == 0 || cols == 0 {
        return std::ptr::null_mut();
    }

    let handle = Box::new(LifeHandle {
        state: SimulationState::new(Grid::new(rows as usize, cols as usize)),
        mode: BoundaryMode::from_periodic(periodic != 0),
    });
    Box::into_raw(handle)
}

/// Destroys a handle and frees its memory.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `lg_create()`, or null
/// - `ptr` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn lg_destroy(ptr: *mut LifeHandle) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}

/// Gets the current time step of a handle.
///
/// # Safety
/// - `ptr` must be a valid pointer to a LifeHandle, or null
///
/// # Returns
/// The time step, or 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn lg_get_generation(ptr: *const LifeHandle) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).state.time
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn test_create_and_destroy() {
        unsafe {
            let handle = lg_create(4, 4, 1);
            assert!(!handle.is_null());
            assert_eq!((*handle).mode, BoundaryMode::Periodic);

            // Should not crash
            lg_destroy(handle);
        }
    }

    #[test]
    fn test_create_rejects_empty_dimensions() {
        assert!(lg_create(0, 4, 0).is_null());
        assert!(lg_create(4, 0, 0).is_null());
    }

    #[test]
    fn test_initial_generation() {
        unsafe {
            let handle = lg_create(2, 2, 0);
            assert_eq!(lg_get_generation(handle), 0);
            assert_eq!((*handle).mode, BoundaryMode::Fixed);
            lg_destroy(handle);
        }
    }

    #[test]
    fn test_null_handling() {
        unsafe {
            // Should not crash
            lg_destroy(ptr::null_mut());
            assert_eq!(lg_get_generation(ptr::null()), 0);
        }
    }
}
