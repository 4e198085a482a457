// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF assembler — lays out an ordered sequence of page images into one
// multi-page PDF using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use image::DynamicImage;
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use scanwerk_core::error::ScanwerkError;
use tracing::{debug, info, instrument};

const PT_PER_INCH: f32 = 72.0;
const MM_PER_PT: f32 = 25.4 / 72.0;

/// An aspect-fit placement rectangle, in PDF points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl FitRect {
    /// Scale `(img_w, img_h)` uniformly so it fits entirely within
    /// `(page_w, page_h)` without cropping, centered in the remaining space.
    pub fn aspect_fit(img_w: f32, img_h: f32, page_w: f32, page_h: f32) -> Self {
        let scale = (page_w / img_w).min(page_h / img_h);
        let width = img_w * scale;
        let height = img_h * scale;
        Self {
            x: (page_w - width) / 2.0,
            y: (page_h - height) / 2.0,
            width,
            height,
        }
    }
}

/// Assembles processed page images into a single multi-page PDF.
///
/// The page rectangle is fixed for the whole document and taken from the
/// first image's pixel dimensions at the configured DPI; every image is drawn
/// aspect-fit centered within it. Page count equals input count, in input
/// order.
pub struct PdfAssembler {
    /// DPI assumed when mapping pixel dimensions to page points.
    dpi: f32,
    /// Title metadata embedded in the PDF /Info dictionary.
    title: Option<String>,
}

impl PdfAssembler {
    /// Create a new assembler mapping pixels to points at the given DPI.
    pub fn new(dpi: f32) -> Self {
        Self { dpi, title: None }
    }

    /// Set a title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Native size of an image on the page, in points, at this assembler's DPI.
    fn native_size_pt(&self, image: &DynamicImage) -> (f32, f32) {
        (
            image.width() as f32 / self.dpi * PT_PER_INCH,
            image.height() as f32 / self.dpi * PT_PER_INCH,
        )
    }

    /// Assemble the given images into a single PDF, one page per image.
    ///
    /// The caller guarantees a non-empty sequence; an empty one is reported
    /// as an assembly failure rather than producing a zero-page document.
    /// Failure here never corrupts artifacts produced by earlier stages —
    /// the assembler only reads its inputs.
    #[instrument(skip_all, fields(pages = images.len()))]
    pub fn assemble(&self, images: &[DynamicImage]) -> Result<Vec<u8>, ScanwerkError> {
        let first = images.first().ok_or_else(|| {
            ScanwerkError::PdfError("cannot assemble an empty page sequence".into())
        })?;

        let (page_w_pt, page_h_pt) = self.native_size_pt(first);
        let page_w = Mm(page_w_pt * MM_PER_PT);
        let page_h = Mm(page_h_pt * MM_PER_PT);

        info!(
            page_w_pt,
            page_h_pt,
            dpi = self.dpi,
            "assembling scan PDF sized to first page"
        );

        let title = self.title.as_deref().unwrap_or("Scanned Document");
        let mut doc = PdfDocument::new(title);
        let mut pages: Vec<PdfPage> = Vec::with_capacity(images.len());

        for image in images {
            // Convert to RGB8 for printpdf.
            let rgb = image.to_rgb8();
            let raw = RawImage {
                pixels: RawImageData::U8(rgb.into_raw()),
                width: image.width() as usize,
                height: image.height() as usize,
                data_format: RawImageFormat::RGB8,
                tag: Vec::new(),
            };
            let xobject_id = doc.add_image(&raw);

            let (img_w_pt, img_h_pt) = self.native_size_pt(image);
            let fit = FitRect::aspect_fit(img_w_pt, img_h_pt, page_w_pt, page_h_pt);
            let scale = fit.width / img_w_pt;

            let ops = vec![Op::UseXobject {
                id: xobject_id,
                transform: XObjectTransform {
                    translate_x: Some(Pt(fit.x)),
                    translate_y: Some(Pt(fit.y)),
                    scale_x: Some(scale),
                    scale_y: Some(scale),
                    dpi: Some(self.dpi),
                    rotate: None,
                },
            }];

            debug!(
                img_w_pt,
                img_h_pt,
                fit_x = fit.x,
                fit_y = fit.y,
                scale,
                "page placed"
            );

            pages.push(PdfPage::new(page_w, page_h, ops));
        }

        doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);

        debug!(bytes = output.len(), warnings = warnings.len(), "PDF serialised");

        Ok(output)
    }
}

impl Default for PdfAssembler {
    fn default() -> Self {
        Self::new(150.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage};

    fn test_image(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb([200, 200, 200])))
    }

    /// Helper: parse assembled bytes and count pages.
    fn page_count(bytes: &[u8]) -> usize {
        let doc = lopdf::Document::load_mem(bytes).expect("parse assembled PDF");
        doc.get_pages().len()
    }

    #[test]
    fn first_image_fills_its_page_exactly() {
        let fit = FitRect::aspect_fit(600.0, 400.0, 600.0, 400.0);
        assert_eq!(fit, FitRect { x: 0.0, y: 0.0, width: 600.0, height: 400.0 });
    }

    #[test]
    fn fit_rect_is_contained_and_centered() {
        let (page_w, page_h) = (600.0, 400.0);
        for (w, h) in [(300.0, 400.0), (1200.0, 300.0), (50.0, 900.0), (601.0, 401.0)] {
            let fit = FitRect::aspect_fit(w, h, page_w, page_h);
            assert!(fit.x >= -1e-3 && fit.y >= -1e-3, "{w}x{h} origin outside page");
            assert!(
                fit.x + fit.width <= page_w + 1e-3 && fit.y + fit.height <= page_h + 1e-3,
                "{w}x{h} extends past page"
            );
            // Centered: equal slack on both sides.
            assert!((2.0 * fit.x + fit.width - page_w).abs() < 1e-3);
            assert!((2.0 * fit.y + fit.height - page_h).abs() < 1e-3);
            // Uniform scaling preserves the aspect ratio.
            assert!((fit.width / fit.height - w / h).abs() < 1e-3);
        }
    }

    #[test]
    fn one_page_per_input_image() {
        let images = vec![test_image(60, 40), test_image(30, 80), test_image(60, 40)];
        let bytes = PdfAssembler::default().assemble(&images).expect("assemble");
        assert_eq!(page_count(&bytes), 3);
    }

    #[test]
    fn single_image_yields_single_page() {
        let bytes = PdfAssembler::default()
            .assemble(&[test_image(60, 40)])
            .expect("assemble");
        assert_eq!(page_count(&bytes), 1);
    }

    #[test]
    fn empty_sequence_is_an_assembly_failure() {
        let result = PdfAssembler::default().assemble(&[]);
        assert!(matches!(result, Err(ScanwerkError::PdfError(_))));
    }
}
