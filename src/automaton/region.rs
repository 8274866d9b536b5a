//! Flat buffer layouts: whole-grid flattening and sub-rectangle extract/import.

use serde::{Deserialize, Serialize};

use super::grid::{Cell, Grid};
use crate::error::ConfigError;

/// Convention for laying a grid out as a 1-D buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlatOrder {
    /// Column index changes fastest.
    RowMajor,
    /// Row index changes fastest (Fortran order).
    #[default]
    ColumnMajor,
}

impl FlatOrder {
    /// Position of `(row, col)` in a flat buffer of a `rows x cols` grid.
    #[inline]
    pub fn offset(self, rows: usize, cols: usize, row: usize, col: usize) -> usize {
        match self {
            FlatOrder::RowMajor => row * cols + col,
            FlatOrder::ColumnMajor => col * rows + row,
        }
    }
}

/// Flatten the whole grid into 0/1 bytes using `order`.
pub fn flatten(grid: &Grid, order: FlatOrder) -> Vec<u8> {
    match order {
        FlatOrder::RowMajor => grid.cells().iter().map(|&c| c as u8).collect(),
        FlatOrder::ColumnMajor => {
            let mut out = Vec::with_capacity(grid.cells().len());
            for col in 0..grid.cols() {
                for row in 0..grid.rows() {
                    out.push(grid.get(row, col) as u8);
                }
            }
            out
        }
    }
}

/// Rebuild a grid from a flat buffer laid out in `order`.
///
/// Input values are normalized: 0 = dead, any non-zero = alive.
pub fn unflatten(
    rows: usize,
    cols: usize,
    order: FlatOrder,
    values: &[u8],
) -> Result<Grid, ConfigError> {
    let expected = rows * cols;
    if values.len() != expected {
        return Err(ConfigError::CellCountMismatch {
            expected,
            actual: values.len(),
        });
    }

    let mut grid = Grid::new(rows, cols);
    for row in 0..rows {
        for col in 0..cols {
            let value = values[order.offset(rows, cols, row, col)];
            grid.set(row, col, Cell::from_u8(value));
        }
    }

    Ok(grid)
}

/// Clamp a half-open `[min, max)` range to `[0, size)`.
#[inline]
pub(crate) fn clamp_range(min: i64, max: i64, size: usize) -> (usize, usize) {
    let size = size as i64;
    (min.clamp(0, size) as usize, max.clamp(0, size) as usize)
}

/// Extract a rectangular region from the grid into a flat buffer.
///
/// # Layout
/// The buffer is filled in row-major order (row changes slowest, col changes fastest).
/// This order matches the order used by `import_region` for symmetry.
///
/// # Returns
/// Number of cells written to the buffer, or 0 on error.
pub fn extract_region(
    grid: &Grid,
    out_buf: &mut [u8],
    min_row: i64,
    min_col: i64,
    max_row: i64,
    max_col: i64,
) -> u64 {
    if grid.is_empty() {
        return 0;
    }

    // Clamp coordinates to grid bounds
    let (min_row, max_row) = clamp_range(min_row, max_row, grid.rows());
    let (min_col, max_col) = clamp_range(min_col, max_col, grid.cols());

    // Check for empty region
    if min_row >= max_row || min_col >= max_col {
        return 0;
    }

    let total_size = (max_row - min_row) * (max_col - min_col);
    if out_buf.len() < total_size {
        return 0;
    }

    let mut offset = 0;
    for row in min_row..max_row {
        for col in min_col..max_col {
            out_buf[offset] = grid.get(row, col) as u8;
            offset += 1;
        }
    }

    offset as u64
}

/// Import a rectangular region from a flat buffer into the grid.
///
/// # Layout
/// The buffer is expected to be in row-major order (matching `extract_region`).
/// Input values are normalized: 0 = dead, any non-zero = alive.
///
/// # Returns
/// Number of cells read from the buffer, or 0 on error.
pub fn import_region(
    grid: &mut Grid,
    in_buf: &[u8],
    min_row: i64,
    min_col: i64,
    max_row: i64,
    max_col: i64,
) -> u64 {
    let (min_row, max_row) = clamp_range(min_row, max_row, grid.rows());
    let (min_col, max_col) = clamp_range(min_col, max_col, grid.cols());

    // Handle empty or inverted regions
    if min_row >= max_row || min_col >= max_col {
        return 0;
    }

    let total_size = (max_row - min_row) * (max_col - min_col);
    if in_buf.len() < total_size {
        return 0;
    }

    let mut offset = 0;
    for row in min_row..max_row {
        for col in min_col..max_col {
            grid.set(row, col, Cell::from_u8(in_buf[offset]));
            offset += 1;
        }
    }

    offset as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid {
        // 2x3:
        // 1 0 1
        // 0 1 1
        Grid::with_alive(2, 3, &[(0, 0), (0, 2), (1, 1), (1, 2)])
    }

    #[test]
    fn test_flatten_row_major() {
        assert_eq!(flatten(&sample(), FlatOrder::RowMajor), vec![1, 0, 1, 0, 1, 1]);
    }

    #[test]
    fn test_flatten_column_major() {
        assert_eq!(flatten(&sample(), FlatOrder::ColumnMajor), vec![1, 0, 0, 1, 1, 1]);
    }

    #[test]
    fn test_unflatten_column_major_normalizes() {
        let grid = unflatten(2, 3, FlatOrder::ColumnMajor, &[5, 0, 0, 1, 1, 9]).unwrap();
        assert_eq!(grid, sample());
    }

    #[test]
    fn test_unflatten_rejects_wrong_length() {
        let err = unflatten(2, 3, FlatOrder::RowMajor, &[1, 0, 1]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::CellCountMismatch {
                expected: 6,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_offset() {
        assert_eq!(FlatOrder::RowMajor.offset(4, 5, 1, 2), 7);
        assert_eq!(FlatOrder::ColumnMajor.offset(4, 5, 1, 2), 9);
    }

    #[test]
    fn test_extract_region_basic() {
        let grid = Grid::with_alive(8, 8, &[(2, 2), (2, 3), (3, 2)]);

        let mut buffer = vec![0u8; 16];
        let written = extract_region(&grid, &mut buffer, 2, 2, 6, 6);

        assert_eq!(written, 16);
        assert_eq!(buffer[0], 1); // (2,2)
        assert_eq!(buffer[1], 1); // (2,3)
        assert_eq!(buffer[4], 1); // (3,2)
        assert_eq!(buffer.iter().filter(|&&b| b == 1).count(), 3);
    }

    #[test]
    fn test_extract_region_clamps_and_rejects() {
        let grid = Grid::new(4, 4);
        let mut buffer = vec![0u8; 64];

        assert_eq!(extract_region(&grid, &mut buffer, -2, -2, 10, 10), 16);
        // Inverted region
        assert_eq!(extract_region(&grid, &mut buffer, 3, 3, 1, 1), 0);
        // Buffer too small
        let mut small = vec![0u8; 3];
        assert_eq!(extract_region(&grid, &mut small, 0, 0, 2, 2), 0);
    }

    #[test]
    fn test_import_region() {
        let mut grid = Grid::new(4, 4);
        let data = [1u8, 0, 0, 7];

        let read = import_region(&mut grid, &data, 1, 1, 3, 3);

        assert_eq!(read, 4);
        assert_eq!(grid.get(1, 1), Cell::Alive);
        assert_eq!(grid.get(1, 2), Cell::Dead);
        assert_eq!(grid.get(2, 2), Cell::Alive);
        assert_eq!(grid.alive_count(), 2);
    }
}
