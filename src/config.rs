//! Run configuration, read from a JSON document.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::automaton::{unflatten, BoundaryMode, FlatOrder, Grid};
use crate::driver::{self, DriverOptions};
use crate::error::ConfigError;

/// Everything needed to start a run.
///
/// `cells` holds one 0/1 value per cell laid out according to `layout`
/// (column-major unless stated otherwise).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Last time step to compute. Must be non-negative.
    pub time_end: i64,
    /// Wrap neighbor lookups around the grid edges.
    #[serde(default = "default_periodic")]
    pub periodic: bool,
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<u8>,
    #[serde(default)]
    pub layout: FlatOrder,
    #[serde(default)]
    pub parallel: bool,
}

fn default_periodic() -> bool {
    true
}

impl SimulationConfig {
    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn boundary_mode(&self) -> BoundaryMode {
        BoundaryMode::from_periodic(self.periodic)
    }

    pub fn driver_options(&self) -> DriverOptions {
        DriverOptions {
            parallel: self.parallel,
        }
    }

    /// Decode the initial grid from `cells`.
    pub fn initial_grid(&self) -> Result<Grid, ConfigError> {
        unflatten(self.rows, self.cols, self.layout, &self.cells)
    }

    /// Run the same checks the driver performs, without running anything.
    pub fn validate(&self) -> Result<Grid, ConfigError> {
        let grid = self.initial_grid()?;
        driver::validate(&grid, self.time_end)?;
        Ok(grid)
    }
}
