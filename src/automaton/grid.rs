//! Grid storage and cell access helpers.

use serde::{Deserialize, Serialize};

/// State of a single cell.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl Cell {
    /// Any non-zero value is alive.
    #[inline]
    pub fn from_u8(value: u8) -> Self {
        if value == 0 {
            Cell::Dead
        } else {
            Cell::Alive
        }
    }

    #[inline]
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }
}

/// A rectangular binary grid, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an all-dead grid with the given dimensions.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Dead; rows * cols],
        }
    }

    /// Build a grid from row-major cells. Returns `None` if the length does not match.
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<Cell>) -> Option<Self> {
        if cells.len() != rows * cols {
            return None;
        }
        Some(Self { rows, cols, cells })
    }

    /// Build a grid with the listed `(row, col)` positions alive.
    /// Out-of-bounds positions are ignored.
    pub fn with_alive(rows: usize, cols: usize, alive: &[(usize, usize)]) -> Self {
        let mut grid = Self::new(rows, cols);
        for &(row, col) in alive {
            if row < rows && col < cols {
                grid.set(row, col, Cell::Alive);
            }
        }
        grid
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row-major cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Calculate the linear index for a coordinate.
    #[inline]
    pub fn index_of(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }

    /// Check if signed coordinates fall inside the grid.
    #[inline]
    pub fn in_bounds(&self, row: i64, col: i64) -> bool {
        row >= 0 && (row as usize) < self.rows && col >= 0 && (col as usize) < self.cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index_of(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        let idx = self.index_of(row, col);
        self.cells[idx] = cell;
    }

    /// Number of alive cells.
    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    pub fn is_extinct(&self) -> bool {
        !self.cells.iter().any(|c| c.is_alive())
    }

    /// Positions of all alive cells in row-major order.
    pub fn alive_positions(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_alive())
            .map(|(i, _)| (i / self.cols, i % self.cols))
            .collect()
    }
}
