use criterion::{Criterion, black_box, criterion_group, criterion_main};
use detection::{BoundingBox, Detection, suppress};

fn dense_grid(n: usize) -> Vec<Detection> {
    // Overlapping grid: every box overlaps its neighbors, worst case for the
    // greedy scan.
    (0..n)
        .map(|i| {
            let x = (i % 16) as f32 * 8.0;
            let y = (i / 16) as f32 * 8.0;
            Detection {
                label: "room".to_string(),
                confidence: 1.0 - (i as f32 / n as f32),
                bbox: BoundingBox::new(x, y, x + 12.0, y + 12.0),
            }
        })
        .collect()
}

fn bench_suppress(c: &mut Criterion) {
    let boxes = dense_grid(256);
    c.bench_function("nms_256_overlapping", |b| {
        b.iter(|| suppress(black_box(&boxes), 0.5))
    });
}

criterion_group!(benches, bench_suppress);
criterion_main!(benches);
