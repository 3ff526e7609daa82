use annotate::Annotator;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use detection::{BoundingBox, Detection};
use image::RgbImage;

fn detections(n: usize) -> Vec<Detection> {
    (0..n)
        .map(|i| {
            let x = (i % 8) as f32 * 70.0;
            let y = (i / 8) as f32 * 110.0;
            Detection {
                label: "room".to_string(),
                confidence: 0.9,
                bbox: BoundingBox::new(x, y, x + 60.0, y + 100.0),
            }
        })
        .collect()
}

fn bench_render(c: &mut Criterion) {
    let source = RgbImage::from_pixel(640, 480, image::Rgb([240, 240, 240]));
    let dets = detections(24);
    let annotator = Annotator::new();
    c.bench_function("render_640x480_24_boxes", |b| {
        b.iter(|| annotator.render(black_box(&source), black_box(&dets)))
    });
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
