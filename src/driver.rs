//! Simulation driver: repeated stepping, emission, and termination.
//!
//! Per step the driver computes the successor grid, emits it, then checks for
//! extinction and finally polls the cancel signal. The initial grid is emitted
//! once as t=0 before any step runs.

use tracing::info;

use crate::automaton::{BoundaryMode, Grid};
use crate::error::{ConfigError, RunError};
use crate::sink::ResultSink;
use crate::state::{SimulationState, TerminationReason};

/// External signal asked once per step, after emission, whether to stop.
pub trait CancelSignal {
    fn is_cancelled(&mut self) -> bool;
}

impl<F: FnMut() -> bool> CancelSignal for F {
    fn is_cancelled(&mut self) -> bool {
        self()
    }
}

/// A cancel signal that never fires.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeverCancel;

impl CancelSignal for NeverCancel {
    fn is_cancelled(&mut self) -> bool {
        false
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DriverOptions {
    /// Count neighbors with the row-parallel kernel. Results are identical.
    pub parallel: bool,
}

/// Check the inputs a run refuses to start with. Returns `time_end` as a step count.
pub fn validate(grid: &Grid, time_end: i64) -> Result<u64, ConfigError> {
    if time_end < 0 {
        return Err(ConfigError::NegativeTimeEnd(time_end));
    }
    validate_grid(grid)?;
    Ok(time_end as u64)
}

fn validate_grid(grid: &Grid) -> Result<(), ConfigError> {
    if grid.rows() == 0 || grid.cols() == 0 {
        return Err(ConfigError::EmptyGrid {
            rows: grid.rows(),
            cols: grid.cols(),
        });
    }
    Ok(())
}

/// Owns the state of one run and drives it to termination.
pub struct Simulation {
    state: SimulationState,
    mode: BoundaryMode,
    options: DriverOptions,
}

impl Simulation {
    pub fn new(
        initial: Grid,
        mode: BoundaryMode,
        options: DriverOptions,
    ) -> Result<Self, ConfigError> {
        validate_grid(&initial)?;
        Ok(Self {
            state: SimulationState::new(initial),
            mode,
            options,
        })
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.state.grid
    }

    pub fn mode(&self) -> BoundaryMode {
        self.mode
    }

    /// Compute one step without emitting anything. A stopped simulation keeps
    /// its final grid and time.
    pub fn advance(&mut self) -> &Grid {
        if self.state.is_running() {
            self.state.advance(self.mode, self.options.parallel);
        }
        &self.state.grid
    }

    /// Run until `time_end`, extinction, or cancellation.
    ///
    /// The current grid is emitted first with its time stamp, then one frame per
    /// computed step. Calling this on a stopped simulation returns the recorded
    /// reason without emitting.
    pub fn run_with<S, C>(
        &mut self,
        time_end: i64,
        sink: &mut S,
        cancel: &mut C,
    ) -> Result<TerminationReason, RunError>
    where
        S: ResultSink + ?Sized,
        C: CancelSignal + ?Sized,
    {
        let time_end = validate(&self.state.grid, time_end)?;
        if let Some(reason) = self.state.termination() {
            return Ok(reason);
        }

        info!(
            rows = self.state.grid.rows(),
            cols = self.state.grid.cols(),
            periodic = self.mode.is_periodic(),
            time_end,
            "starting simulation"
        );

        let order = sink.flat_order();
        sink.emit_with(order, self.state.time as f64, &self.state.grid)?;

        while self.state.time < time_end {
            self.state.advance(self.mode, self.options.parallel);
            let t = self.state.time;

            sink.emit_with(order, t as f64, &self.state.grid)?;

            let alive = self.state.grid.alive_count();
            info!(step = t, alive, "time step completed");

            if alive == 0 {
                return Ok(self.finish(TerminationReason::AllDead));
            }
            if cancel.is_cancelled() {
                return Ok(self.finish(TerminationReason::Cancelled));
            }
        }

        Ok(self.finish(TerminationReason::TimeLimit))
    }

    fn finish(&mut self, reason: TerminationReason) -> TerminationReason {
        info!(time = self.state.time, %reason, "simulation stopped");
        self.state.stop(reason);
        reason
    }
}

/// Run a simulation from `initial` with the sequential kernel.
pub fn run<S, C>(
    initial: Grid,
    mode: BoundaryMode,
    time_end: i64,
    sink: &mut S,
    cancel: &mut C,
) -> Result<TerminationReason, RunError>
where
    S: ResultSink + ?Sized,
    C: CancelSignal + ?Sized,
{
    run_with_options(initial, mode, time_end, DriverOptions::default(), sink, cancel)
}

pub fn run_with_options<S, C>(
    initial: Grid,
    mode: BoundaryMode,
    time_end: i64,
    options: DriverOptions,
    sink: &mut S,
    cancel: &mut C,
) -> Result<TerminationReason, RunError>
where
    S: ResultSink + ?Sized,
    C: CancelSignal + ?Sized,
{
    validate(&initial, time_end)?;
    let mut simulation = Simulation::new(initial, mode, options)?;
    simulation.run_with(time_end, sink, cancel)
}
