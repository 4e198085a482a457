// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page artifacts flowing through the pipeline.

use image::DynamicImage;
use scanwerk_core::types::PageOrientation;

/// One raw page image plus its orientation metadata, as produced by the
/// capture interface. Immutable once received; capture order is preserved
/// through every pipeline stage.
#[derive(Debug, Clone)]
pub struct CapturedPage {
    /// The raw bitmap as delivered by the capture UI.
    pub image: DynamicImage,
    /// Orientation tag attached at capture time.
    pub orientation: PageOrientation,
}

impl CapturedPage {
    pub fn new(image: DynamicImage, orientation: PageOrientation) -> Self {
        Self { image, orientation }
    }

    /// A page that is already upright.
    pub fn upright(image: DynamicImage) -> Self {
        Self::new(image, PageOrientation::Up)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// JPEG bytes for a single page, paired with the capture index it came from.
///
/// The index survives the per-page encode stage so that a skipped (failed)
/// page never disturbs the ordering of its neighbours.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    /// Zero-based capture index of the source page.
    pub page_index: usize,
    /// JPEG-encoded bytes.
    pub bytes: Vec<u8>,
}
