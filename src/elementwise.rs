//! # Elementwise scanline solver
//!
//! The reference implementation of the scanline dynamic program, written as plain indexed loops
//! over positions, nodes and previous nodes.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use ndarray::Array2;

use crate::cost::CostModel;
use crate::diagnostics::DiagnosticSink;
use crate::error::*;
use crate::solver::{self, ScanlineSolver, Solution, SolveOptions, PARENT_SENTINEL};

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// Elementwise solver, `O(positions * nodes^2)` time.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScanlineDp;

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl ScanlineDp {
    pub fn new() -> Self {
        Self
    }
}

impl ScanlineSolver for ScanlineDp {
    fn solve_with(
        &self,
        costs: &CostModel,
        options: &SolveOptions,
        sink: &mut dyn DiagnosticSink
    ) -> Result<Solution> {
        let unary = costs.unary();
        let pairwise = costs.pairwise();
        let nodes = costs.num_nodes();
        let positions = costs.num_positions();

        let mut minimum_cost = Array2::<f64>::zeros((nodes, positions));
        let mut parent = Array2::<usize>::from_elem((nodes, positions), PARENT_SENTINEL);

        // ---- FORWARD PASS ----

        // First column is just the unary cost, there is nothing to the left of it
        for n in 0..nodes {
            minimum_cost[[n, 0]] = unary[[n, 0]];
        }
        solver::report_column(sink, 0, &minimum_cost, &parent);

        for p in 1..positions {
            for n in 0..nodes {
                // Track the cheapest previous node, strict less-than keeps the lowest index on ties
                let mut best = f64::INFINITY;
                let mut best_prev = 0;

                for k in 0..nodes {
                    let candidate = (minimum_cost[[k, p - 1]] + pairwise[[k, n]]) + unary[[n, p]];

                    if k == 0 || candidate < best {
                        best = candidate;
                        best_prev = k;
                    }
                }

                minimum_cost[[n, p]] = best;
                parent[[n, p]] = best_prev;
            }

            solver::report_column(sink, p, &minimum_cost, &parent);
        }

        // ---- BACKWARD PASS ----

        Ok(solver::finish(costs, minimum_cost, parent, options, sink))
    }
}
