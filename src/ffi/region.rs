//! Flat-buffer export/import and region FFI functions.

use super::lifecycle::LifeHandle;
use crate::automaton::region::clamp_range;
use crate::automaton::{self, FlatOrder, Grid};

/// Buffer length for `[min, max)` on both axes, clamped to the grid.
/// `None` when the requested extent overflows.
fn region_len(
    grid: &Grid,
    min_row: i64,
    min_col: i64,
    max_row: i64,
    max_col: i64,
) -> Option<usize> {
    let height = u64::try_from(max_row.checked_sub(min_row)?.max(0)).ok()?;
    let width = u64::try_from(max_col.checked_sub(min_col)?.max(0)).ok()?;
    height.checked_mul(width)?;

    let (row_lo, row_hi) = clamp_range(min_row, max_row, grid.rows());
    let (col_lo, col_hi) = clamp_range(min_col, max_col, grid.cols());
    Some(row_hi.saturating_sub(row_lo) * col_hi.saturating_sub(col_lo))
}

fn order_from_flag(column_major: u8) -> FlatOrder {
    if column_major != 0 {
        FlatOrder::ColumnMajor
    } else {
        FlatOrder::RowMajor
    }
}

/// Copies the whole grid into `out_buf` as 0/1 bytes.
///
/// # Layout
/// Column-major (row index fastest) when `column_major` is non-zero, row-major otherwise.
///
/// # Safety
/// - `ptr` must be a valid pointer to a LifeHandle, or null
/// - `out_buf` must point to at least `len` writable bytes
///
/// # Returns
/// Number of bytes written, or 0 on error (null pointers or `len < rows * cols`).
#[no_mangle]
pub unsafe extern "C" fn lg_export_cells(
    ptr: *const LifeHandle,
    out_buf: *mut u8,
    len: u64,
    column_major: u8,
) -> u64 {
    if ptr.is_null() || out_buf.is_null() {
        return 0;
    }

    let grid = &(*ptr).state.grid;
    let flat = automaton::flatten(grid, order_from_flag(column_major));
    if (len as usize) < flat.len() {
        return 0;
    }

    let out_slice = std::slice::from_raw_parts_mut(out_buf, flat.len());
    out_slice.copy_from_slice(&flat);
    flat.len() as u64
}

/// Replaces the whole grid from a flat buffer.
///
/// # Layout
/// Same convention as `lg_export_cells`. Non-zero bytes are alive.
///
/// # Safety
/// - `ptr` must be a valid pointer to a LifeHandle, or null
/// - `in_buf` must point to at least `len` readable bytes
///
/// # Returns
/// Number of bytes read, or 0 on error (null pointers or `len != rows * cols`).
#[no_mangle]
pub unsafe extern "C" fn lg_import_cells(
    ptr: *mut LifeHandle,
    in_buf: *const u8,
    len: u64,
    column_major: u8,
) -> u64 {
    if ptr.is_null() || in_buf.is_null() {
        return 0;
    }

    let grid = &mut (*ptr).state.grid;
    let in_slice = std::slice::from_raw_parts(in_buf, len as usize);
    match automaton::unflatten(grid.rows(), grid.cols(), order_from_flag(column_major), in_slice)
    {
        Ok(imported) => {
            *grid = imported;
            len
        }
        Err(_) => 0,
    }
}

/// Extracts a rectangular region `[min_row, max_row) x [min_col, max_col)` in row-major order.
///
/// # Safety
/// - `ptr` must be a valid pointer to a LifeHandle, or null
/// - `out_buf` must point to a buffer covering the region clamped to the grid
///
/// # Returns
/// Number of bytes written, or 0 on error (including an overflowing extent).
#[no_mangle]
pub unsafe extern "C" fn lg_extract_region(
    ptr: *const LifeHandle,
    out_buf: *mut u8,
    min_row: i64,
    min_col: i64,
    max_row: i64,
    max_col: i64,
) -> u64 {
    if ptr.is_null() || out_buf.is_null() {
        return 0;
    }

    let grid = &(*ptr).state.grid;
    let Some(len) = region_len(grid, min_row, min_col, max_row, max_col) else {
        return 0;
    };
    let buf_slice = std::slice::from_raw_parts_mut(out_buf, len);
    automaton::extract_region(grid, buf_slice, min_row, min_col, max_row, max_col)
}

/// Imports a rectangular region `[min_row, max_row) x [min_col, max_col)` from a
/// row-major buffer. Input values are normalized: 0 = dead, non-zero = alive.
///
/// # Safety
/// - `ptr` must be a valid pointer to a LifeHandle, or null
/// - `in_buf` must point to a buffer covering the region clamped to the grid
///
/// # Returns
/// Number of bytes read, or 0 on error (including an overflowing extent).
#[no_mangle]
pub unsafe extern "C" fn lg_import_region(
    ptr: *mut LifeHandle,
    in_buf: *const u8,
    min_row: i64,
    min_col: i64,
    max_row: i64,
    max_col: i64,
) -> u64 {
    if ptr.is_null() || in_buf.is_null() {
        return 0;
    }

    let grid = &mut (*ptr).state.grid;
    let Some(len) = region_len(grid, min_row, min_col, max_row, max_col) else {
        return 0;
    };
    let buf_slice = std::slice::from_raw_parts(in_buf, len);
    automaton::import_region(grid, buf_slice, min_row, min_col, max_row, max_col)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::{grid, lifecycle};
    use std::ptr;

    #[test]
    fn test_export_column_major() {
        unsafe {
            let handle = lifecycle::lg_create(2, 3, 0);
            grid::lg_set_cell(handle, 0, 1, 1);

            let mut buffer = vec![9u8; 6];
            assert_eq!(lg_export_cells(handle, buffer.as_mut_ptr(), 6, 1), 6);
            assert_eq!(buffer, vec![0, 0, 1, 0, 0, 0]);

            assert_eq!(lg_export_cells(handle, buffer.as_mut_ptr(), 6, 0), 6);
            assert_eq!(buffer, vec![0, 1, 0, 0, 0, 0]);

            lifecycle::lg_destroy(handle);
        }
    }

    #[test]
    fn test_export_rejects_short_buffer() {
        unsafe {
            let handle = lifecycle::lg_create(2, 3, 0);
            let mut buffer = vec![0u8; 4];
            assert_eq!(lg_export_cells(handle, buffer.as_mut_ptr(), 4, 1), 0);
            lifecycle::lg_destroy(handle);
        }
    }

    #[test]
    fn test_import_then_step() {
        unsafe {
            let handle = lifecycle::lg_create(5, 5, 0);

            // Vertical blinker in column 2, column-major: rows 1..=3 of column 2
            let mut cells = vec![0u8; 25];
            for row in 1..=3 {
                cells[2 * 5 + row] = 1;
            }
            assert_eq!(lg_import_cells(handle, cells.as_ptr(), 25, 1), 25);
            assert_eq!(grid::lg_get_cell(handle, 1, 2), 1);
            assert_eq!(grid::lg_alive_count(handle), 3);

            grid::lg_step(handle);
            assert_eq!(grid::lg_get_cell(handle, 2, 1), 1);
            assert_eq!(grid::lg_get_cell(handle, 2, 3), 1);

            // Wrong length leaves the grid alone
            assert_eq!(lg_import_cells(handle, cells.as_ptr(), 24, 1), 0);
            assert_eq!(grid::lg_get_cell(handle, 2, 1), 1);

            lifecycle::lg_destroy(handle);
        }
    }

    #[test]
    fn test_extract_region() {
        unsafe {
            let handle = lifecycle::lg_create(8, 8, 1);
            grid::lg_set_cell(handle, 2, 2, 1);
            grid::lg_set_cell(handle, 2, 3, 1);
            grid::lg_set_cell(handle, 3, 2, 1);

            let mut buffer = vec![0u8; 16];
            let written = lg_extract_region(handle, buffer.as_mut_ptr(), 2, 2, 6, 6);

            assert_eq!(written, 16);
            assert_eq!(buffer[0], 1);
            assert_eq!(buffer[1], 1);
            assert_eq!(buffer[4], 1);

            lifecycle::lg_destroy(handle);
        }
    }

    #[test]
    fn test_import_region_round_trips_through_extract() {
        unsafe {
            let handle = lifecycle::lg_create(6, 6, 0);
            let block = [1u8, 1, 1, 1];

            assert_eq!(lg_import_region(handle, block.as_ptr(), 2, 2, 4, 4), 4);
            assert_eq!(grid::lg_alive_count(handle), 4);

            // A block is a still life
            grid::lg_step(handle);
            let mut out = [0u8; 4];
            assert_eq!(lg_extract_region(handle, out.as_mut_ptr(), 2, 2, 4, 4), 4);
            assert_eq!(out, block);

            lifecycle::lg_destroy(handle);
        }
    }

    #[test]
    fn test_region_len_rejects_overflow() {
        let grid = Grid::new(4, 4);
        assert_eq!(region_len(&grid, 0, 0, 4, 3), Some(12));
        assert_eq!(region_len(&grid, 2, 2, 9, 9), Some(4));
        assert_eq!(region_len(&grid, 5, 5, 2, 9), Some(0));
        assert_eq!(region_len(&grid, i64::MIN, 0, i64::MAX, 1), None);
        assert_eq!(region_len(&grid, 0, 0, i64::MAX, i64::MAX), None);
    }

    #[test]
    fn test_huge_region_returns_zero() {
        unsafe {
            let handle = lifecycle::lg_create(4, 4, 0);
            grid::lg_set_cell(handle, 1, 1, 1);
            let mut buffer = vec![0u8; 16];

            assert_eq!(
                lg_extract_region(handle, buffer.as_mut_ptr(), i64::MIN, 0, i64::MAX, 4),
                0
            );
            assert_eq!(
                lg_import_region(handle, buffer.as_ptr(), 0, 0, i64::MAX, i64::MAX),
                0
            );
            assert_eq!(grid::lg_alive_count(handle), 1);

            lifecycle::lg_destroy(handle);
        }
    }

    #[test]
    fn test_null_checks() {
        unsafe {
            let handle = lifecycle::lg_create(4, 4, 0);
            let mut buffer = vec![0u8; 16];

            assert_eq!(lg_export_cells(ptr::null(), buffer.as_mut_ptr(), 16, 1), 0);
            assert_eq!(lg_export_cells(handle, ptr::null_mut(), 16, 1), 0);
            assert_eq!(lg_import_cells(ptr::null_mut(), buffer.as_ptr(), 16, 1), 0);
            assert_eq!(lg_import_cells(handle, ptr::null(), 16, 1), 0);
            assert_eq!(
                lg_extract_region(ptr::null(), buffer.as_mut_ptr(), 0, 0, 4, 4),
                0
            );
            assert_eq!(lg_extract_region(handle, ptr::null_mut(), 0, 0, 4, 4), 0);
            assert_eq!(
                lg_import_region(ptr::null_mut(), buffer.as_ptr(), 0, 0, 4, 4),
                0
            );
            assert_eq!(lg_import_region(handle, ptr::null(), 0, 0, 4, 4), 0);

            lifecycle::lg_destroy(handle);
        }
    }
}
