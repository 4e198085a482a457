// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the scan post-processing pipeline. Runs the full
// normalize/resize/encode/assemble path over a small synthetic capture.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, Rgb, RgbImage};

use scanwerk_core::types::{PageOrientation, ScanRequest};
use scanwerk_pipeline::{CapturedPage, ScanResultProcessor};

/// Synthetic page: gradient fill so JPEG encoding has real work to do.
fn synthetic_page(w: u32, h: u32, orientation: PageOrientation) -> CapturedPage {
    let img = RgbImage::from_fn(w, h, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    CapturedPage::new(DynamicImage::ImageRgb8(img), orientation)
}

/// Benchmark the full pipeline on a three-page capture with one rotated page
/// and a downscale bound, which is the realistic mobile-capture hot path.
fn bench_full_pipeline(c: &mut Criterion) {
    let request = ScanRequest {
        max_dimension: Some(400.0),
        ..Default::default()
    };
    let processor = ScanResultProcessor::default();

    c.bench_function("scan_pipeline (3 pages, 640x480)", |b| {
        b.iter(|| {
            let pages = vec![
                synthetic_page(640, 480, PageOrientation::Up),
                synthetic_page(480, 640, PageOrientation::Right),
                synthetic_page(640, 480, PageOrientation::Up),
            ];
            let result = processor.process(black_box(&request), pages);
            black_box(result);
        });
    });
}

criterion_group!(benches, bench_full_pipeline);
criterion_main!(benches);
