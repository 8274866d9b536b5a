//! Cellular automaton stepping with B3/S23 rules.

use super::grid::{Cell, Grid};
use super::neighbors::{count_neighbors, count_neighbors_par, BoundaryMode, NeighborCounts};

/// Next state of one cell given its alive-neighbor count.
///
/// B3/S23 rules:
/// - Birth: any cell with exactly 3 neighbors is alive next step
/// - Survival: an alive cell with exactly 2 neighbors stays alive
/// - Everything else is dead
#[inline]
pub fn next_state(cell: Cell, neighbors: u8) -> Cell {
    if neighbors == 3 || (cell.is_alive() && neighbors == 2) {
        Cell::Alive
    } else {
        Cell::Dead
    }
}

/// Apply the rule to every cell, producing a new grid of the same shape.
///
/// `counts` must come from `grid`; the input grid is never modified.
pub fn apply_rule(grid: &Grid, counts: &NeighborCounts) -> Grid {
    debug_assert_eq!(grid.rows(), counts.rows());
    debug_assert_eq!(grid.cols(), counts.cols());

    let mut next = Grid::new(grid.rows(), grid.cols());

    for ((out, &cell), &n) in next
        .cells_mut()
        .iter_mut()
        .zip(grid.cells())
        .zip(counts.as_slice())
    {
        *out = next_state(cell, n);
    }

    next
}

/// Step a grid forward by one generation.
pub fn step(grid: &Grid, mode: BoundaryMode) -> Grid {
    apply_rule(grid, &count_neighbors(grid, mode))
}

/// Step using the row-parallel neighbor count.
pub fn step_par(grid: &Grid, mode: BoundaryMode) -> Grid {
    apply_rule(grid, &count_neighbors_par(grid, mode))
}
