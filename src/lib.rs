//! Life Grid - Two-dimensional B3/S23 cellular automaton
//!
//! The crate is layered from the update kernel outward:
//! - `automaton`: grid storage, neighbor counting under periodic or fixed
//!   boundaries, the birth/survival rule, and flat buffer layouts
//! - `driver`: steps a grid until a time limit, extinction, or cancellation,
//!   handing every frame to a [`ResultSink`]
//! - `sink` and `config`: reference persistence backends and the JSON run configuration
//! - `ffi`: a C ABI around an opaque handle

pub mod automaton;
pub mod config;
pub mod driver;
pub mod error;
pub mod ffi;
pub mod sink;
pub mod state;


pub use automaton::{BoundaryMode, Cell, FlatOrder, Grid, NeighborCounts};
pub use config::SimulationConfig;
pub use driver::{run, run_with_options, CancelSignal, DriverOptions, NeverCancel, Simulation};
pub use error::{ConfigError, RunError, SinkError};
pub use sink::{Frame, JsonLinesSink, MemorySink, NullSink, ResultSink};
pub use state::{RunPhase, SimulationState, TerminationReason};
