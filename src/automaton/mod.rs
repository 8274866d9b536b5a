//! Core automaton logic and grid operations.
//!
//! This module contains the update kernel: neighbor counting, the B3/S23 rule,
//! and the flat buffer layouts used to move grids across boundaries.
//! The driver and the FFI layer in `ffi/` call these functions.

pub mod grid;
pub mod neighbors;
pub mod region;
pub mod stepping;

pub use grid::{Cell, Grid};
pub use neighbors::{count_at, count_neighbors, count_neighbors_par, BoundaryMode, NeighborCounts};
pub use region::{extract_region, flatten, import_region, unflatten, FlatOrder};
pub use stepping::{apply_rule, next_state, step, step_par};
