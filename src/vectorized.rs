//! # Vectorized scanline solver
//!
//! Same dynamic program as [`crate::elementwise::ScanlineDp`], but each column of the forward
//! pass is computed as one broadcast sum followed by a column-wise reduction, leaving only the
//! loop over positions.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use ndarray::{Array2, Axis};

use crate::cost::CostModel;
use crate::diagnostics::DiagnosticSink;
use crate::error::*;
use crate::solver::{self, ScanlineSolver, Solution, SolveOptions, PARENT_SENTINEL};

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// Vectorized solver.
///
/// Produces bit-identical paths, costs and tables to the elementwise solver: the candidate
/// matrix is summed in the same order, `(previous + pairwise) + unary`, and reduced with the same
/// lowest-index-wins argmin.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScanlineDpVectorized;

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl ScanlineDpVectorized {
    pub fn new() -> Self {
        Self
    }
}

impl ScanlineSolver for ScanlineDpVectorized {
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

        minimum_cost.column_mut(0).assign(&unary.column(0));
        solver::report_column(sink, 0, &minimum_cost, &parent);

        for p in 1..positions {
            // candidates[[k, n]] = (minimum_cost[[k, p - 1]] + pairwise[[k, n]]) + unary[[n, p]]
            let previous = minimum_cost.column(p - 1).insert_axis(Axis(1));
            let current = unary.column(p).insert_axis(Axis(0));
            let candidates = &previous + &pairwise + &current;

            // Reduce down each column, i.e. over the previous node k
            let best = candidates.map_axis(Axis(0), |lane| solver::argmin(lane.iter().copied()));

            minimum_cost.column_mut(p).assign(&best.mapv(|(_, cost)| cost));
            parent.column_mut(p).assign(&best.mapv(|(prev, _)| prev));

            solver::report_column(sink, p, &minimum_cost, &parent);
        }

        // ---- BACKWARD PASS ----

        Ok(solver::finish(costs, minimum_cost, parent, options, sink))
    }
}
