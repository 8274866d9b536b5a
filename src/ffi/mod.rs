//! C FFI layer for host applications.
//!
//! This module exports C ABI functions around an opaque [`LifeHandle`].
//! All functions are marked with `#[no_mangle]` and use `extern "C"`.
//!
//! The actual logic is in the `automaton` module. These functions are thin wrappers
//! that handle null checks, pointer safety, and C-to-Rust conversions.

pub mod grid;
pub mod lifecycle;
pub mod region;

pub use grid::{lg_alive_count, lg_get_cell, lg_set_cell, lg_step};
pub use lifecycle::{lg_create, lg_destroy, lg_get_generation, LifeHandle};
pub use region::{lg_export_cells, lg_extract_region, lg_import_cells, lg_import_region};
