//! Property tests: both solvers agree, and the reported cost is the cost of the reported path.

use cv_scanline::{path::path_cost, prelude::*};
use ndarray::Array2;
use proptest::prelude::*;

/// Costs drawn from a handful of small integers, so ties are common.
fn tie_heavy_costs(nodes: usize, positions: usize) -> impl Strategy<Value = (Array2<f64>, Array2<f64>)> {
    let unary = prop::collection::vec(0u8..4, nodes * positions);
    let pairwise = prop::collection::vec(0u8..3, nodes * nodes);

    (unary, pairwise).prop_map(move |(u, p)| {
        let u = Array2::from_shape_vec((nodes, positions), u.into_iter().map(f64::from).collect())
            .unwrap();
        let p = Array2::from_shape_vec((nodes, nodes), p.into_iter().map(f64::from).collect())
            .unwrap();
        (u, p)
    })
}

/// Arbitrary finite costs with occasional forbidden entries.
fn real_costs(nodes: usize, positions: usize) -> impl Strategy<Value = (Array2<f64>, Array2<f64>)> {
    let value = prop_oneof![
        9 => -1.0e3f64..1.0e3,
        1 => Just(f64::INFINITY)
    ];
    let unary = prop::collection::vec(value.clone(), nodes * positions);
    let pairwise = prop::collection::vec(value, nodes * nodes);

    (unary, pairwise).prop_map(move |(u, p)| {
        (
            Array2::from_shape_vec((nodes, positions), u).unwrap(),
            Array2::from_shape_vec((nodes, nodes), p).unwrap()
        )
    })
}

fn dims() -> impl Strategy<Value = (usize, usize)> {
    (1usize..7, 1usize..16)
}

fn check_parity(unary: &Array2<f64>, pairwise: &Array2<f64>) -> Result<(), TestCaseError> {
    let costs = CostModel::new(unary.view(), pairwise.view()).unwrap();
    let options = SolveOptions { keep_tables: true };

    let reference = ScanlineDp::new().solve_with(&costs, &options, &mut NullSink).unwrap();
    let vectorized = ScanlineDpVectorized::new().solve_with(&costs, &options, &mut NullSink).unwrap();

    prop_assert_eq!(&reference.best_path, &vectorized.best_path);
    prop_assert_eq!(reference.total_cost.to_bits(), vectorized.total_cost.to_bits());
    prop_assert_eq!(&reference.tables, &vectorized.tables);

    prop_assert_eq!(reference.best_path.len(), costs.num_positions());
    prop_assert!(reference.best_path.iter().all(|&l| l < costs.num_nodes()));

    // Infinite totals can be reached by many paths, the exact path only matters when finite
    if reference.total_cost.is_finite() {
        prop_assert_eq!(path_cost(&costs, &reference.best_path).unwrap(), reference.total_cost);
    }

    for label in 0..costs.num_nodes() {
        let constant = cv_scanline::path::constant_path(label, costs.num_positions());
        prop_assert!(reference.total_cost <= path_cost(&costs, &constant).unwrap());
    }

    Ok(())
}

proptest! {
    #[test]
    fn solvers_agree_with_many_ties(
        (unary, pairwise) in dims().prop_flat_map(|(n, p)| tie_heavy_costs(n, p))
    ) {
        check_parity(&unary, &pairwise)?;
    }

    #[test]
    fn solvers_agree_on_real_costs(
        (unary, pairwise) in dims().prop_flat_map(|(n, p)| real_costs(n, p))
    ) {
        check_parity(&unary, &pairwise)?;
    }
}
