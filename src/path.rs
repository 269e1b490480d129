//! # Path evaluation
//!
//! Total cost of an explicit labelling, used to compare a solver's output against hand built
//! candidate paths.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use crate::cost::CostModel;
use crate::error::*;

// -----------------------------------------------------------------------------------------------
// FUNCTIONS
// -----------------------------------------------------------------------------------------------

/// Sum of the unary cost of every chosen label plus the pairwise cost of every transition.
///
/// Terms are accumulated in the same order as the forward pass, so the cost of a solver's best
/// path equals its reported total cost exactly.
pub fn path_cost(costs: &CostModel, path: &[usize]) -> Result<f64> {
    let nodes = costs.num_nodes();
    let positions = costs.num_positions();

    if path.len() != positions {
        return Err(InputError::PathLength { len: path.len(), positions }.into());
    }

    if let Some((position, &label)) = path.iter().enumerate().find(|&(_, &l)| l >= nodes) {
        return Err(InputError::LabelOutOfRange { position, label, nodes }.into());
    }

    let unary = costs.unary();
    let pairwise = costs.pairwise();

    let mut total = unary[[path[0], 0]];
    for p in 1..positions {
        total = (total + pairwise[[path[p - 1], path[p]]]) + unary[[path[p], p]];
    }

    Ok(total)
}

/// Constant labelling, the simplest candidate to compare against.
pub fn constant_path(label: usize, positions: usize) -> Vec<usize> {
    vec![label; positions]
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------
