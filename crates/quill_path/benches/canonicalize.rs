use criterion::{black_box, criterion_group, criterion_main, Criterion};
use quill_core::Point;
use quill_path::{ArcOptions, Path};

const PETALS: usize = 64;

/// A closed flower outline mixing every curve kind
fn flower() -> Path {
    let mut path = Path::new((100.0, 0.0)).unwrap();
    let step = 360.0 / PETALS as f64;
    for i in 0..PETALS {
        let angle = step * i as f64;
        let tip = Point::polar(140.0, angle + step / 2.0);
        let next = Point::polar(100.0, angle + step);
        match i % 3 {
            0 => {
                path.arc_to(next, 25.0, 12.0, ArcOptions::new().with_rotation(angle))
                    .unwrap();
            }
            1 => {
                path.quadratic_curve_to([tip, next]).unwrap();
            }
            _ => {
                path.curve_to([tip, tip, next]).unwrap();
            }
        }
    }
    path.close_path();
    path
}

fn canonicalize(c: &mut Criterion) {
    let mut g = c.benchmark_group("canonicalize");
    let path = flower();

    g.bench_function("flower", |b| b.iter(|| black_box(&path).canonicalize()));
    g.bench_function("flower_bounds", |b| b.iter(|| black_box(&path).bounds()));
    g.finish();
}

criterion_group!(benches, canonicalize);
criterion_main!(benches);
