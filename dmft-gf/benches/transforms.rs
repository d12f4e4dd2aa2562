use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use utilities::{random_matrix, random_matsubara_gf, random_resolvent};

pub fn bench_from_l_g_r(c: &mut Criterion) {
    let mut group = c.benchmark_group("from_l_g_r");

    for dim in [2, 4, 8, 16].iter() {
        let g = random_matsubara_gf(10., 256, *dim);
        let mut target = g.copy();
        let left = random_matrix(*dim, *dim);
        let right = random_matrix(*dim, *dim);
        group.bench_with_input(BenchmarkId::from_parameter(*dim), dim, |b, _| {
            b.iter(|| {
                target
                    .from_l_g_r(black_box(left.view()), black_box(&g), black_box(right.view()))
                    .unwrap()
            })
        });
    }
}

pub fn bench_inverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("inverse");

    for n_points in [64, 256, 1024].iter() {
        let (g, _) = random_resolvent(10., *n_points, 4);
        group.bench_with_input(
            BenchmarkId::from_parameter(*n_points),
            n_points,
            |b, _| b.iter(|| black_box(&g).inverse().unwrap()),
        );
    }
}

criterion_group!(benches, bench_from_l_g_r, bench_inverse);
criterion_main!(benches);
