use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use cv_scanline::{prelude::*, stereo::truncated_linear};
use ndarray::Array2;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn scanline_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("scanline");
    let mut rng = StdRng::seed_from_u64(44);

    // A 640 pixel scanline at a few disparity ranges
    for &nodes in &[16usize, 64, 128] {
        let unary = Array2::from_shape_fn((nodes, 640), |_| rng.gen_range(0.0..255.0));
        let pairwise = truncated_linear(nodes, 20.0, 200.0);
        let costs = CostModel::new(unary.view(), pairwise.view()).unwrap();

        group.bench_with_input(BenchmarkId::new("elementwise", nodes), &costs, |b, costs| {
            b.iter(|| ScanlineDp::new().solve(black_box(costs)))
        });
        group.bench_with_input(BenchmarkId::new("vectorized", nodes), &costs, |b, costs| {
            b.iter(|| ScanlineDpVectorized::new().solve(black_box(costs)))
        });
    }

    group.finish();
}

criterion_group!(benches, scanline_bench);
criterion_main!(benches);
