//! # Cost model
//!
//! Validated unary and pairwise cost matrices consumed by the scanline solvers.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use ndarray::{Array2, ArrayView2};

use crate::error::*;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// A pair of cost matrices that has passed validation.
///
/// - `unary` is `[nodes x positions]`, `unary[[n, p]]` being the cost of label `n` at position
///   `p`.
/// - `pairwise` is `[nodes x nodes]`, `pairwise[[k, n]]` being the cost of moving from label `k`
///   at position `p - 1` to label `n` at position `p`. It is the same for every pair of
///   neighbouring positions.
///
/// Costs may be finite or `+inf` (a forbidden label or transition). NaN and `-inf` are rejected.
#[derive(Debug, Clone, Copy)]
pub struct CostModel<'a> {
    unary: ArrayView2<'a, f64>,
    pairwise: ArrayView2<'a, f64>
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl<'a> CostModel<'a> {
    /// Validate the given matrices and bundle them into a cost model.
    ///
    /// Dimensions are checked before any values are inspected, so a badly shaped pair is always
    /// reported as a shape error.
    pub fn new(unary: ArrayView2<'a, f64>, pairwise: ArrayView2<'a, f64>) -> Result<Self> {
        let (nodes, positions) = unary.dim();

        if nodes == 0 {
            return Err(InputError::NoNodes.into());
        }
        if positions == 0 {
            return Err(InputError::NoPositions.into());
        }

        let (rows, cols) = pairwise.dim();
        if rows != cols {
            return Err(InputError::PairwiseNotSquare { rows, cols }.into());
        }
        if rows != nodes {
            return Err(InputError::PairwiseMismatch { nodes, side: rows }.into());
        }

        check_values(Matrix::Unary, &unary)?;
        check_values(Matrix::Pairwise, &pairwise)?;

        Ok(Self { unary, pairwise })
    }

    /// Number of labels (disparities) at each position.
    pub fn num_nodes(&self) -> usize {
        self.unary.nrows()
    }

    /// Number of positions (pixels) in the scanline.
    pub fn num_positions(&self) -> usize {
        self.unary.ncols()
    }

    pub fn unary(&self) -> ArrayView2<'a, f64> {
        self.unary
    }

    pub fn pairwise(&self) -> ArrayView2<'a, f64> {
        self.pairwise
    }
}

// -----------------------------------------------------------------------------------------------
// FUNCTIONS
// -----------------------------------------------------------------------------------------------

/// Build a dense matrix out of nested rows, rejecting ragged input.
///
/// An empty slice gives a `0 x 0` matrix, which `CostModel::new` then rejects.
pub fn matrix_from_rows(rows: &[Vec<f64>]) -> Result<Array2<f64>> {
    let ncols = rows.first().map_or(0, |r| r.len());

    let mut flat = Vec::with_capacity(rows.len() * ncols);
    for (row, values) in rows.iter().enumerate() {
        if values.len() != ncols {
            return Err(InputError::RaggedRow {
                row,
                len: values.len(),
                expected: ncols
            }.into());
        }
        flat.extend_from_slice(values);
    }

    Ok(Array2::from_shape_vec((rows.len(), ncols), flat)?)
}

fn check_values(matrix: Matrix, values: &ArrayView2<f64>) -> Result<()> {
    for ((row, col), &value) in values.indexed_iter() {
        if value.is_nan() || value == f64::NEG_INFINITY {
            return Err(InputError::NonFinite { matrix, row, col, value }.into());
        }
    }

    Ok(())
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------
