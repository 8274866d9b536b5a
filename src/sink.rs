//! Result sinks: where each time-stamped grid goes after it is computed.
//!
//! A sink sees one transaction per frame: `begin_step`, `write_time`,
//! `write_cells`, `end_step`. The driver never calls out of that order; the
//! bundled sinks still reject a broken sequence with [`SinkError::Protocol`].

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::automaton::{flatten, unflatten, FlatOrder, Grid};
use crate::error::{ConfigError, SinkError};

/// Write-only persistence interface invoked once for t=0 and once per step.
pub trait ResultSink {
    /// Flattening convention this sink expects. The driver reads it once per run.
    fn flat_order(&self) -> FlatOrder {
        FlatOrder::ColumnMajor
    }

    fn begin_step(&mut self) -> Result<(), SinkError>;
    fn write_time(&mut self, time: f64) -> Result<(), SinkError>;
    fn write_cells(
        &mut self,
        rows: usize,
        cols: usize,
        order: FlatOrder,
        cells: &[u8],
    ) -> Result<(), SinkError>;
    fn end_step(&mut self) -> Result<(), SinkError>;

    /// Run a whole frame transaction for `grid` in the sink's own order.
    fn emit(&mut self, time: f64, grid: &Grid) -> Result<(), SinkError> {
        let order = self.flat_order();
        self.emit_with(order, time, grid)
    }

    /// Run a whole frame transaction for `grid` flattened in `order`.
    fn emit_with(&mut self, order: FlatOrder, time: f64, grid: &Grid) -> Result<(), SinkError> {
        let cells = flatten(grid, order);

        self.begin_step()?;
        self.write_time(time)?;
        self.write_cells(grid.rows(), grid.cols(), order, &cells)?;
        self.end_step()
    }
}

impl<S: ResultSink + ?Sized> ResultSink for &mut S {
    fn flat_order(&self) -> FlatOrder {
        (**self).flat_order()
    }

    fn begin_step(&mut self) -> Result<(), SinkError> {
        (**self).begin_step()
    }

    fn write_time(&mut self, time: f64) -> Result<(), SinkError> {
        (**self).write_time(time)
    }

    fn write_cells(
        &mut self,
        rows: usize,
        cols: usize,
        order: FlatOrder,
        cells: &[u8],
    ) -> Result<(), SinkError> {
        (**self).write_cells(rows, cols, order, cells)
    }

    fn end_step(&mut self) -> Result<(), SinkError> {
        (**self).end_step()
    }
}

impl<S: ResultSink + ?Sized> ResultSink for Box<S> {
    fn flat_order(&self) -> FlatOrder {
        (**self).flat_order()
    }

    fn begin_step(&mut self) -> Result<(), SinkError> {
        (**self).begin_step()
    }

    fn write_time(&mut self, time: f64) -> Result<(), SinkError> {
        (**self).write_time(time)
    }

    fn write_cells(
        &mut self,
        rows: usize,
        cols: usize,
        order: FlatOrder,
        cells: &[u8],
    ) -> Result<(), SinkError> {
        (**self).write_cells(rows, cols, order, cells)
    }

    fn end_step(&mut self) -> Result<(), SinkError> {
        (**self).end_step()
    }
}

/// One committed sink transaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub time: f64,
    pub rows: usize,
    pub cols: usize,
    pub order: FlatOrder,
    pub cells: Vec<u8>,
}

impl Frame {
    /// Rebuild the grid this frame was flattened from.
    pub fn to_grid(&self) -> Result<Grid, ConfigError> {
        unflatten(self.rows, self.cols, self.order, &self.cells)
    }
}

/// Tracks a single open transaction.
#[derive(Debug, Default)]
struct Transaction {
    open: bool,
    time: Option<f64>,
    cells: Option<(usize, usize, FlatOrder, Vec<u8>)>,
}

impl Transaction {
    fn begin(&mut self) -> Result<(), SinkError> {
        if self.open {
            return Err(SinkError::Protocol("begin_step called inside an open step"));
        }
        *self = Transaction {
            open: true,
            ..Transaction::default()
        };
        Ok(())
    }

    fn time(&mut self, time: f64) -> Result<(), SinkError> {
        if !self.open {
            return Err(SinkError::Protocol("write_time called outside a step"));
        }
        self.time = Some(time);
        Ok(())
    }

    fn cells(
        &mut self,
        rows: usize,
        cols: usize,
        order: FlatOrder,
        cells: &[u8],
    ) -> Result<(), SinkError> {
        if !self.open {
            return Err(SinkError::Protocol("write_cells called outside a step"));
        }
        self.cells = Some((rows, cols, order, cells.to_vec()));
        Ok(())
    }

    fn commit(&mut self) -> Result<Frame, SinkError> {
        if !self.open {
            return Err(SinkError::Protocol("end_step called without begin_step"));
        }
        let time = self
            .time
            .take()
            .ok_or(SinkError::Protocol("step ended without a time stamp"))?;
        let (rows, cols, order, cells) = self
            .cells
            .take()
            .ok_or(SinkError::Protocol("step ended without cell data"))?;
        self.open = false;

        Ok(Frame {
            time,
            rows,
            cols,
            order,
            cells,
        })
    }
}

/// Keeps every committed frame in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    order: FlatOrder,
    frames: Vec<Frame>,
    pending: Transaction,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_order(order: FlatOrder) -> Self {
        Self {
            order,
            ..Self::default()
        }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }

    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

impl ResultSink for MemorySink {
    fn flat_order(&self) -> FlatOrder {
        self.order
    }

    fn begin_step(&mut self) -> Result<(), SinkError> {
        self.pending.begin()
    }

    fn write_time(&mut self, time: f64) -> Result<(), SinkError> {
        self.pending.time(time)
    }

    fn write_cells(
        &mut self,
        rows: usize,
        cols: usize,
        order: FlatOrder,
        cells: &[u8],
    ) -> Result<(), SinkError> {
        self.pending.cells(rows, cols, order, cells)
    }

    fn end_step(&mut self) -> Result<(), SinkError> {
        let frame = self.pending.commit()?;
        self.frames.push(frame);
        Ok(())
    }
}

/// Writes one JSON object per committed frame, newline separated.
pub struct JsonLinesSink<W: Write> {
    writer: W,
    order: FlatOrder,
    pending: Transaction,
    written: u64,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self::with_order(writer, FlatOrder::default())
    }

    pub fn with_order(writer: W, order: FlatOrder) -> Self {
        Self {
            writer,
            order,
            pending: Transaction::default(),
            written: 0,
        }
    }

    /// Number of frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ResultSink for JsonLinesSink<W> {
    fn flat_order(&self) -> FlatOrder {
        self.order
    }

    fn begin_step(&mut self) -> Result<(), SinkError> {
        self.pending.begin()
    }

    fn write_time(&mut self, time: f64) -> Result<(), SinkError> {
        self.pending.time(time)
    }

    fn write_cells(
        &mut self,
        rows: usize,
        cols: usize,
        order: FlatOrder,
        cells: &[u8],
    ) -> Result<(), SinkError> {
        self.pending.cells(rows, cols, order, cells)
    }

    fn end_step(&mut self) -> Result<(), SinkError> {
        let frame = self.pending.commit()?;
        serde_json::to_writer(&mut self.writer, &frame)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.written += 1;
        Ok(())
    }
}

/// Discards every frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ResultSink for NullSink {
    fn begin_step(&mut self) -> Result<(), SinkError> {
        Ok(())
    }

    fn write_time(&mut self, _time: f64) -> Result<(), SinkError> {
        Ok(())
    }

    fn write_cells(
        &mut self,
        _rows: usize,
        _cols: usize,
        _order: FlatOrder,
        _cells: &[u8],
    ) -> Result<(), SinkError> {
        Ok(())
    }

    fn end_step(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}
