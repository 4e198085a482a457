// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page processor — orientation normalization, aspect-preserving downscale,
// and JPEG encoding for a single captured page. Operates on in-memory images
// using the `image` crate.

use image::DynamicImage;
use scanwerk_core::error::ScanwerkError;
use scanwerk_core::types::PageOrientation;
use tracing::{debug, instrument};

/// Per-page processing pipeline operating on a single in-memory image.
///
/// All operations are non-destructive: each method consumes `self` and returns
/// a new `PageProcessor` wrapping the transformed image, enabling method
/// chaining.
///
/// ```ignore
/// let jpeg = PageProcessor::from_page(page)
///     .normalize()
///     .resize_max(Some(2000.0))
///     .to_jpeg_bytes(0.9)?;
/// ```
pub struct PageProcessor {
    /// The current working image.
    image: DynamicImage,
    /// Orientation still pending application. `Up` once normalized.
    orientation: PageOrientation,
}

impl PageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Wrap a captured page, keeping its orientation tag pending.
    pub fn from_page(page: crate::page::CapturedPage) -> Self {
        Self {
            image: page.image,
            orientation: page.orientation,
        }
    }

    /// Wrap an already-upright `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self {
            image,
            orientation: PageOrientation::Up,
        }
    }

    // -- Accessors ------------------------------------------------------------

    /// Current image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Consume the processor and return the underlying `DynamicImage`.
    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    // -- Transformations (consume self, return new Self) -----------------------

    /// Redraw the image so its orientation is the identity.
    ///
    /// Applies the rotation/flip named by the page's orientation tag. Pages
    /// that are already upright pass through untouched. Normalization is
    /// best-effort by construction: every transform here is total, so a page
    /// can never be lost at this stage.
    #[instrument(skip(self), fields(orientation = ?self.orientation))]
    pub fn normalize(self) -> Self {
        if self.orientation.is_identity() {
            return self;
        }

        debug!("normalizing page orientation");

        // `rotate90` is clockwise; `Left` pages need the counter-clockwise
        // correction, hence rotate270.
        let upright = match self.orientation {
            PageOrientation::Up => self.image,
            PageOrientation::Down => self.image.rotate180(),
            PageOrientation::Left => self.image.rotate270(),
            PageOrientation::Right => self.image.rotate90(),
            PageOrientation::UpMirrored => self.image.fliph(),
            PageOrientation::DownMirrored => self.image.fliph().rotate180(),
            PageOrientation::LeftMirrored => self.image.fliph().rotate270(),
            PageOrientation::RightMirrored => self.image.fliph().rotate90(),
        };

        Self {
            image: upright,
            orientation: PageOrientation::Up,
        }
    }

    /// Downscale so the larger side does not exceed `max_dimension`,
    /// preserving aspect ratio with round-to-nearest pixel dimensions.
    ///
    /// Returns the input unchanged when the bound is absent or the image is
    /// already within it — the stage never upscales. Uses Lanczos3 filtering
    /// for high-quality downscaling.
    #[instrument(skip(self), fields(w = self.image.width(), h = self.image.height()))]
    pub fn resize_max(self, max_dimension: Option<f32>) -> Self {
        let Some(max_dim) = max_dimension else {
            return self;
        };

        let (w, h) = (self.image.width(), self.image.height());
        let larger = w.max(h) as f32;
        if larger <= max_dim {
            return self;
        }

        let scale = max_dim / larger;
        let new_w = ((w as f32 * scale).round() as u32).max(1);
        let new_h = ((h as f32 * scale).round() as u32).max(1);

        debug!(new_w, new_h, "downscaling page");

        let resized =
            self.image
                .resize_exact(new_w, new_h, image::imageops::FilterType::Lanczos3);
        Self {
            image: resized,
            orientation: self.orientation,
        }
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as JPEG bytes.
    ///
    /// `quality` is in [0, 1] (out-of-range values are clamped) and maps onto
    /// the encoder's 1-100 scale.
    pub fn to_jpeg_bytes(&self, quality: f32) -> Result<Vec<u8>, ScanwerkError> {
        encode_jpeg(&self.image, quality)
    }
}

/// Encode a `DynamicImage` as JPEG bytes at the given [0, 1] quality.
pub fn encode_jpeg(image: &DynamicImage, quality: f32) -> Result<Vec<u8>, ScanwerkError> {
    let q = (quality.clamp(0.0, 1.0) * 100.0).round().clamp(1.0, 100.0) as u8;

    let mut buffer = Vec::new();
    let rgb = image.to_rgb8();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, q);
    rgb.write_with_encoder(encoder)
        .map_err(|err| ScanwerkError::ImageError(format!("JPEG encoding failed: {}", err)))?;
    Ok(buffer)
}
