//! Moore-neighborhood counting under periodic or fixed boundaries.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::grid::Grid;

/// Offsets of the 8 Moore neighbors as `(d_row, d_col)`.
#[rustfmt::skip]
const MOORE_OFFSETS: [(i64, i64); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// How neighbor lookups behave at the grid edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Toroidal wrap: opposite edges are adjacent.
    #[default]
    Periodic,
    /// Cells outside the grid are permanently dead.
    Fixed,
}

impl BoundaryMode {
    pub fn from_periodic(periodic: bool) -> Self {
        if periodic {
            BoundaryMode::Periodic
        } else {
            BoundaryMode::Fixed
        }
    }

    pub fn is_periodic(self) -> bool {
        self == BoundaryMode::Periodic
    }
}

/// Per-cell alive-neighbor counts, same shape as the grid they came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NeighborCounts {
    rows: usize,
    cols: usize,
    counts: Vec<u8>,
}

impl NeighborCounts {
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.counts[row * self.cols + col]
    }

    /// Row-major counts.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.counts
    }
}

/// Wrap `index + delta` into `[0, size)`. `size` must be non-zero.
#[inline]
pub fn wrap_index(index: i64, delta: i64, size: usize) -> usize {
    let size = size as i64;
    (((index + delta) % size + size) % size) as usize
}

/// Resolve the neighbor of `(row, col)` at `(d_row, d_col)`.
/// Returns `None` when the position lies outside a fixed boundary.
#[inline]
pub fn neighbor_position(
    grid: &Grid,
    mode: BoundaryMode,
    row: usize,
    col: usize,
    d_row: i64,
    d_col: i64,
) -> Option<(usize, usize)> {
    let (row, col) = (row as i64, col as i64);
    match mode {
        // Both axes wrap on the target cell itself, so diagonals compose correctly
        // even when an axis has size 1 or 2.
        BoundaryMode::Periodic => Some((
            wrap_index(row, d_row, grid.rows()),
            wrap_index(col, d_col, grid.cols()),
        )),
        BoundaryMode::Fixed => {
            let (nr, nc) = (row + d_row, col + d_col);
            if grid.in_bounds(nr, nc) {
                Some((nr as usize, nc as usize))
            } else {
                None
            }
        }
    }
}

/// Count alive neighbors of a single cell.
pub fn count_at(grid: &Grid, mode: BoundaryMode, row: usize, col: usize) -> u8 {
    let mut count = 0;

    for (d_row, d_col) in MOORE_OFFSETS {
        if let Some((nr, nc)) = neighbor_position(grid, mode, row, col, d_row, d_col) {
            count += grid.get(nr, nc) as u8;
        }
    }

    count
}

fn fill_row(grid: &Grid, mode: BoundaryMode, row: usize, out: &mut [u8]) {
    for (col, slot) in out.iter_mut().enumerate() {
        *slot = count_at(grid, mode, row, col);
    }
}

/// Count alive neighbors for every cell.
pub fn count_neighbors(grid: &Grid, mode: BoundaryMode) -> NeighborCounts {
    let (rows, cols) = (grid.rows(), grid.cols());
    let mut counts = vec![0u8; rows * cols];

    if !counts.is_empty() {
        for (row, out) in counts.chunks_mut(cols).enumerate() {
            fill_row(grid, mode, row, out);
        }
    }

    NeighborCounts { rows, cols, counts }
}

/// Row-parallel variant of [`count_neighbors`]. Produces identical counts.
pub fn count_neighbors_par(grid: &Grid, mode: BoundaryMode) -> NeighborCounts {
    let (rows, cols) = (grid.rows(), grid.cols());
    let mut counts = vec![0u8; rows * cols];

    if !counts.is_empty() {
        counts
            .par_chunks_mut(cols)
            .enumerate()
            .for_each(|(row, out)| fill_row(grid, mode, row, out));
    }

    NeighborCounts { rows, cols, counts }
}
