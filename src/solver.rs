//! # Scanline solvers
//!
//! This module provides the trait shared by the scanline dynamic programming solvers, together
//! with the backward pass and tie-breaking rules both of them use.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use ndarray::{Array2, ArrayView2};

use crate::cost::CostModel;
use crate::diagnostics::{DiagnosticSink, Event, NullSink};
use crate::elementwise::ScanlineDp;
use crate::error::*;

// -----------------------------------------------------------------------------------------------
// CONSTANTS
// -----------------------------------------------------------------------------------------------

/// Value stored in column 0 of the parent matrix. Column 0 has no predecessor so it is never
/// read by the backward pass.
pub const PARENT_SENTINEL: usize = 0;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// Options accepted by [`ScanlineSolver::solve_with`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SolveOptions {
    /// Return the minimum cost and parent matrices alongside the path.
    pub keep_tables: bool
}

/// The internal tables of the forward pass, both `[nodes x positions]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DpTables {
    /// `minimum_cost[[n, p]]` is the cheapest accumulated cost of any labelling ending in label
    /// `n` at position `p`.
    pub minimum_cost: Array2<f64>,

    /// `parent[[n, p]]` is the label at `p - 1` on that cheapest labelling. Column 0 holds
    /// [`PARENT_SENTINEL`].
    pub parent: Array2<usize>
}

/// Result of solving a scanline.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Chosen label for every position.
    pub best_path: Vec<usize>,

    /// Total cost of `best_path`.
    pub total_cost: f64,

    /// Only present if requested with [`SolveOptions::keep_tables`].
    pub tables: Option<DpTables>
}

// -----------------------------------------------------------------------------------------------
// TRAITS
// -----------------------------------------------------------------------------------------------

pub trait ScanlineSolver {
    /// Find the minimum cost labelling of the scanline described by `costs`, reporting progress
    /// to `sink`.
    ///
    /// Ties are always broken towards the smallest label index, so every implementation returns
    /// the same path for the same input.
    fn solve_with(
        &self,
        costs: &CostModel,
        options: &SolveOptions,
        sink: &mut dyn DiagnosticSink
    ) -> Result<Solution>;

    /// Find the minimum cost labelling without diagnostics or tables.
    fn solve(&self, costs: &CostModel) -> Result<Solution> {
        self.solve_with(costs, &SolveOptions::default(), &mut NullSink)
    }
}

// -----------------------------------------------------------------------------------------------
// FUNCTIONS
// -----------------------------------------------------------------------------------------------

/// Validate the given matrices and solve them with the elementwise solver.
///
/// Returns the best path and its total cost.
pub fn solve<'a>(
    unary: ArrayView2<'a, f64>,
    pairwise: ArrayView2<'a, f64>
) -> Result<(Vec<usize>, f64)> {
    let costs = CostModel::new(unary, pairwise)?;
    let solution = ScanlineDp::new().solve(&costs)?;

    Ok((solution.best_path, solution.total_cost))
}

/// Find the index and value of the smallest element.
///
/// Uses a strict `<` under an ascending scan, so the first (smallest index) of several equal
/// minima wins. If nothing is smaller than `+inf` the result is `(0, +inf)`. Inputs are never NaN
/// since the cost model rejects them and `-inf` is rejected as well.
pub(crate) fn argmin<I>(values: I) -> (usize, f64)
where
    I: IntoIterator<Item = f64>
{
    let mut values = values.into_iter();

    let mut best_idx = 0;
    let mut best = match values.next() {
        Some(v) => v,
        None => return (0, f64::INFINITY)
    };

    for (idx, val) in values.enumerate() {
        if val < best {
            best = val;
            best_idx = idx + 1;
        }
    }

    (best_idx, best)
}

/// Walk the parent matrix back from the cheapest node of the last column.
pub(crate) fn backtrack(
    minimum_cost: &Array2<f64>,
    parent: &Array2<usize>
) -> (Vec<usize>, f64) {
    let positions = minimum_cost.ncols();

    let (last, total_cost) = argmin(minimum_cost.column(positions - 1).iter().copied());

    let mut best_path = vec![PARENT_SENTINEL; positions];
    best_path[positions - 1] = last;

    for p in (0..positions - 1).rev() {
        best_path[p] = parent[[best_path[p + 1], p + 1]];
    }

    (best_path, total_cost)
}

/// Report a finished forward-pass column, flagging it if no node in it is reachable.
pub(crate) fn report_column(
    sink: &mut dyn DiagnosticSink,
    position: usize,
    minimum_cost: &Array2<f64>,
    parent: &Array2<usize>
) {
    let minimum_cost = minimum_cost.column(position);

    if !minimum_cost.iter().any(|c| c.is_finite()) {
        sink.emit(Event::NumericAnomaly { position });
    }

    sink.emit(Event::Column {
        position,
        minimum_cost,
        parent: parent.column(position)
    });
}

/// Assemble the solution, reporting it to the sink and dropping the tables unless requested.
pub(crate) fn finish(
    costs: &CostModel,
    minimum_cost: Array2<f64>,
    parent: Array2<usize>,
    options: &SolveOptions,
    sink: &mut dyn DiagnosticSink
) -> Solution {
    let (best_path, total_cost) = backtrack(&minimum_cost, &parent);

    sink.emit(Event::Solved {
        nodes: costs.num_nodes(),
        positions: costs.num_positions(),
        total_cost
    });

    let tables = match options.keep_tables {
        true => Some(DpTables { minimum_cost, parent }),
        false => None
    };

    Solution { best_path, total_cost, tables }
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn argmin_prefers_smallest_index_on_ties() {
        assert_eq!(argmin(vec![3.0, 1.0, 1.0, 2.0]), (1, 1.0));
        assert_eq!(argmin(vec![1.0, 1.0]), (0, 1.0));
    }

    #[test]
    fn argmin_of_all_infinite_is_first_index() {
        assert_eq!(argmin(vec![f64::INFINITY; 4]), (0, f64::INFINITY));
    }

    #[test]
    fn backtrack_follows_parents() {
        let minimum_cost = array![[0.0, 4.0, 9.0], [1.0, 2.0, 3.0]];
        let parent = array![[0, 1, 0], [0, 0, 1]];

        let (path, cost) = backtrack(&minimum_cost, &parent);
        assert_eq!(path, vec![0, 1, 1]);
        assert_eq!(cost, 3.0);
    }

    #[test]
    fn free_solve_accepts_views_of_separately_owned_matrices() {
        let unary = array![[0.0, 10.0, 0.0], [10.0, 0.0, 10.0]];
        let (path, cost) = {
            let pairwise = array![[0.0, 5.0], [5.0, 0.0]];
            solve(unary.view(), pairwise.view()).unwrap()
        };

        assert_eq!(path, vec![0, 0, 0]);
        assert_eq!(cost, 10.0);
    }

    #[test]
    fn backtrack_of_single_column_skips_parents() {
        let minimum_cost = array![[5.0], [2.0], [2.0]];
        let parent = array![[7], [7], [7]];

        let (path, cost) = backtrack(&minimum_cost, &parent);
        assert_eq!(path, vec![1]);
        assert_eq!(cost, 2.0);
    }
}
