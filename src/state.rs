//! Simulation state: time counter, current grid, and run phase.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::automaton::{step, step_par, BoundaryMode, Grid};

/// Why a run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// Every cell died; the all-dead grid was the last emitted frame.
    AllDead,
    /// The cancel signal fired after a frame was emitted.
    Cancelled,
    /// `time_end` steps completed.
    TimeLimit,
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TerminationReason::AllDead => "all cells are dead",
            TerminationReason::Cancelled => "cancelled",
            TerminationReason::TimeLimit => "time limit reached",
        };
        f.write_str(text)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunPhase {
    Running,
    Stopped(TerminationReason),
}

/// The internal state of a simulation run.
#[derive(Clone, Debug)]
pub struct SimulationState {
    pub time: u64,
    pub grid: Grid,
    pub phase: RunPhase,
}

impl SimulationState {
    pub fn new(grid: Grid) -> Self {
        Self {
            time: 0,
            grid,
            phase: RunPhase::Running,
        }
    }

    /// Replace the grid with its successor and advance the time counter.
    pub fn advance(&mut self, mode: BoundaryMode, parallel: bool) {
        let next = if parallel {
            step_par(&self.grid, mode)
        } else {
            step(&self.grid, mode)
        };
        self.grid = next;
        self.time += 1;
    }

    pub fn stop(&mut self, reason: TerminationReason) {
        self.phase = RunPhase::Stopped(reason);
    }

    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    pub fn termination(&self) -> Option<TerminationReason> {
        match self.phase {
            RunPhase::Running => None,
            RunPhase::Stopped(reason) => Some(reason),
        }
    }
}
