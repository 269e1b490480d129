//! # Solver diagnostics
//!
//! Progress reporting for the solvers is pushed into a [`DiagnosticSink`] supplied by the
//! caller, so the solvers themselves never perform any I/O. Results never depend on the sink.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use log::{debug, log_enabled, trace, warn, Level};
use ndarray::ArrayView1;

use crate::error::Error;

// -----------------------------------------------------------------------------------------------
// ENUMERATIONS
// -----------------------------------------------------------------------------------------------

/// An event emitted while solving a scanline.
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    /// The forward pass finished a column.
    Column {
        position: usize,
        minimum_cost: ArrayView1<'a, f64>,
        parent: ArrayView1<'a, usize>
    },

    /// Every candidate cost of the column was infinite. The column holds `+inf` and parent `0`.
    NumericAnomaly { position: usize },

    /// The backward pass finished.
    Solved {
        nodes: usize,
        positions: usize,
        total_cost: f64
    }
}

// -----------------------------------------------------------------------------------------------
// TRAITS
// -----------------------------------------------------------------------------------------------

pub trait DiagnosticSink {
    /// Receive a single event.
    fn emit(&mut self, event: Event<'_>);
}

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

/// Forwards events to the `log` facade.
///
/// Columns are logged at `trace`, anomalies at `warn` and the final result at `debug`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl DiagnosticSink for NullSink {
    fn emit(&mut self, _event: Event<'_>) {}
}

impl DiagnosticSink for LogSink {
    fn emit(&mut self, event: Event<'_>) {
        match event {
            Event::Column { position, minimum_cost, parent } => {
                // Formatting whole columns is expensive, skip it unless someone listens
                if log_enabled!(Level::Trace) {
                    trace!(
                        "position {}: minimum cost {}, parent {}",
                        position, minimum_cost, parent
                    );
                }
            },
            Event::NumericAnomaly { position } => {
                warn!("{}", Error::NumericAnomaly { position });
            },
            Event::Solved { nodes, positions, total_cost } => {
                debug!(
                    "solved scanline of {} positions over {} nodes, total cost {}",
                    positions, nodes, total_cost
                );
            }
        }
    }
}

impl<F> DiagnosticSink for F
where
    F: FnMut(Event<'_>)
{
    fn emit(&mut self, event: Event<'_>) {
        self(event)
    }
}
