use criterion::{Criterion, black_box, criterion_group, criterion_main};
use iso_core::ScalarGrid;
use iso_march::{ExtractConfig, extract_contours};

fn synthetic_field(width: usize, height: usize) -> ScalarGrid {
    ScalarGrid::from_fn(width, height, |x, y| {
        let fx = x as f64 * 0.05;
        let fy = y as f64 * 0.04;
        fx.sin() * fy.cos() + 0.3 * (fx * 2.7).cos()
    })
}

fn bench_extract(c: &mut Criterion) {
    let grid = synthetic_field(1024, 768).with_boundary_padding();
    let cfg = ExtractConfig::default();

    c.bench_function("iso_march_extract_1024x768", |b| {
        b.iter(|| {
            let cs = extract_contours(black_box(&grid), black_box(0.2), &cfg);
            black_box(cs.len());
        });
    });

    c.bench_function("iso_march_extract_1024x768_five_levels", |b| {
        b.iter(|| {
            let mut total = 0_usize;
            for z in [-0.8, -0.4, 0.0, 0.4, 0.8] {
                total += extract_contours(black_box(&grid), black_box(z), &cfg).len();
            }
            black_box(total);
        });
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
