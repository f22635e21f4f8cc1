use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndalg_linalg::{batch, lu_in_place, svd_into, SvdConfig};
use ndalg_view::BufferND;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_matrix(rng: &mut StdRng, shape: &[usize]) -> BufferND<f64> {
    let n = shape[shape.len() - 1] as f64;
    let rank = shape.len();
    BufferND::from_fn(shape, |idx| {
        let noise: f64 = rng.gen_range(-1.0..1.0);
        if idx[rank - 1] == idx[rank - 2] {
            noise + n
        } else {
            noise
        }
    })
}

/// Matrix with well separated singular values, so power iteration converges quickly.
fn graded_matrix(rng: &mut StdRng, n: usize) -> BufferND<f64> {
    BufferND::from_fn(&[n, n], |idx| {
        let noise: f64 = rng.gen_range(-0.1..0.1);
        if idx[0] == idx[1] {
            noise + 2.0 * (idx[0] + 1) as f64
        } else {
            noise
        }
    })
}

fn bench_lu(c: &mut Criterion) {
    let mut group = c.benchmark_group("lu_in_place");
    let mut rng = StdRng::seed_from_u64(0);
    for n in [16usize, 64, 128] {
        let a = random_matrix(&mut rng, &[n, n]);
        group.bench_with_input(BenchmarkId::from_parameter(n), &a, |bench, a| {
            bench.iter(|| {
                let mut lu = a.clone();
                black_box(lu_in_place(&mut lu.view_mut()).unwrap());
            })
        });
    }
    group.finish();
}

fn bench_batched_det(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let stack = random_matrix(&mut rng, &[256, 8, 8]);
    c.bench_function("batch_det_256x8x8", |bench| {
        bench.iter(|| black_box(batch::det(&stack).unwrap()))
    });
}

fn bench_svd(c: &mut Criterion) {
    let mut group = c.benchmark_group("svd_into");
    let mut rng = StdRng::seed_from_u64(2);
    let config = SvdConfig::default();
    for n in [8usize, 32] {
        let a = graded_matrix(&mut rng, n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &a, |bench, a| {
            bench.iter(|| {
                let mut u = BufferND::filled(&[n, n], 0.0);
                let mut s = BufferND::filled(&[n], 0.0);
                let mut v = BufferND::filled(&[n, n], 0.0);
                svd_into(&a.view(), &mut u.view_mut(), &mut s.view_mut(), &mut v.view_mut(), &config)
                    .unwrap();
                black_box(s)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_lu, bench_batched_det, bench_svd);
criterion_main!(benches);
