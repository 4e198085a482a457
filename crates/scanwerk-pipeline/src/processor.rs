// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan-result processor — sequences the per-page stage (normalize, resize,
// encode) and the PDF barrier stage over all captured pages and builds the
// response payload.

use image::DynamicImage;
use rayon::prelude::*;
use scanwerk_core::ScannerConfig;
use scanwerk_core::types::{ScanRequest, ScanResult};
use tracing::{debug, instrument, warn};

use crate::image::{PageProcessor, encode_jpeg};
use crate::page::{CapturedPage, EncodedImage};
use crate::payload::ResultPayloadBuilder;
use crate::pdf::PdfAssembler;

/// Runs the post-processing pipeline over one completed capture.
///
/// Per-page normalization, resizing, and encoding are mutually independent
/// and run in parallel; capture order is preserved in every output sequence
/// regardless of execution order. PDF assembly runs only after the per-page
/// stage has finished for all pages.
pub struct ScanResultProcessor {
    config: ScannerConfig,
}

impl ScanResultProcessor {
    pub fn new(config: ScannerConfig) -> Self {
        Self { config }
    }

    /// Process an ordered set of captured pages into the requested artifacts.
    ///
    /// Never fails: per-page encode failures skip the page, PDF-assembly
    /// failure drops only the PDF, and an empty capture yields an empty
    /// result. One bad page must not discard an otherwise successful scan.
    #[instrument(skip(self, pages), fields(pages = pages.len(), format = ?request.result_formats))]
    pub fn process(&self, request: &ScanRequest, pages: Vec<CapturedPage>) -> ScanResult {
        if pages.is_empty() {
            debug!("capture completed with no pages");
            return ScanResult::default();
        }

        let max_dimension = request.effective_max_dimension();
        let quality = request.effective_quality();
        let format = request.result_formats;

        // Per-page stage. `collect` on an indexed parallel iterator keeps
        // capture order.
        let prepared: Vec<DynamicImage> = pages
            .into_par_iter()
            .map(|page| {
                PageProcessor::from_page(page)
                    .normalize()
                    .resize_max(max_dimension)
                    .into_dynamic()
            })
            .collect();

        let encoded: Vec<EncodedImage> = if format.wants_images() {
            prepared
                .par_iter()
                .enumerate()
                .map(|(page_index, image)| match encode_jpeg(image, quality) {
                    Ok(bytes) => Some(EncodedImage { page_index, bytes }),
                    Err(err) => {
                        warn!(page_index, %err, "page skipped: encode failed");
                        None
                    }
                })
                .collect::<Vec<_>>()
                .into_iter()
                .flatten()
                .collect()
        } else {
            Vec::new()
        };

        // Barrier: assembly starts only once every page has been prepared.
        let pdf = if format.wants_pdf() {
            let assembler = PdfAssembler::new(self.config.pdf_dpi);
            match assembler.assemble(&prepared) {
                Ok(bytes) => Some(bytes),
                Err(err) => {
                    warn!(%err, "PDF assembly failed, degrading to images-only");
                    None
                }
            }
        } else {
            None
        };

        ResultPayloadBuilder::new(format)
            .images(encoded)
            .pdf(pdf)
            .build()
    }
}

impl Default for ScanResultProcessor {
    fn default() -> Self {
        Self::new(ScannerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use image::{Rgb, RgbImage};
    use scanwerk_core::types::{PageOrientation, ResultFormat};

    fn page(w: u32, h: u32) -> CapturedPage {
        CapturedPage::upright(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            w,
            h,
            Rgb([90, 90, 90]),
        )))
    }

    fn decode_image(b64: &str) -> DynamicImage {
        let bytes = BASE64.decode(b64).expect("base64");
        image::load_from_memory(&bytes).expect("decode jpeg")
    }

    fn pdf_page_count(b64: &str) -> usize {
        let bytes = BASE64.decode(b64).expect("base64");
        let doc = lopdf::Document::load_mem(&bytes).expect("parse pdf");
        doc.get_pages().len()
    }

    #[test]
    fn jpeg_pdf_two_pages_yields_both_artifacts() {
        let request = ScanRequest::default();
        let result = ScanResultProcessor::default()
            .process(&request, vec![page(60, 40), page(50, 70)]);

        let images = result.images_base64.expect("images present");
        assert_eq!(images.len(), 2);
        assert_eq!(pdf_page_count(&result.pdf_base64.expect("pdf present")), 2);
    }

    #[test]
    fn empty_capture_yields_empty_result() {
        let request = ScanRequest {
            result_formats: ResultFormat::Jpeg,
            ..Default::default()
        };
        let result = ScanResultProcessor::default().process(&request, Vec::new());
        assert!(result.is_empty());
    }

    #[test]
    fn pdf_only_request_omits_images() {
        let request = ScanRequest {
            result_formats: ResultFormat::Pdf,
            ..Default::default()
        };
        let result = ScanResultProcessor::default()
            .process(&request, vec![page(60, 40), page(60, 40), page(60, 40)]);

        assert!(result.images_base64.is_none());
        assert_eq!(pdf_page_count(&result.pdf_base64.expect("pdf present")), 3);
    }

    #[test]
    fn max_dimension_downscales_pages() {
        let request = ScanRequest {
            result_formats: ResultFormat::Jpeg,
            max_dimension: Some(500.0),
            ..Default::default()
        };
        let result = ScanResultProcessor::default().process(&request, vec![page(2000, 1000)]);

        let images = result.images_base64.expect("images present");
        let decoded = decode_image(&images[0]);
        assert_eq!((decoded.width(), decoded.height()), (500, 250));
    }

    #[test]
    fn capture_order_survives_parallel_encoding() {
        // Distinct dimensions per page so order is observable after decode.
        let pages = vec![page(100, 50), page(80, 40), page(60, 30), page(40, 20)];
        let request = ScanRequest {
            result_formats: ResultFormat::Jpeg,
            ..Default::default()
        };
        let result = ScanResultProcessor::default().process(&request, pages);

        let widths: Vec<u32> = result
            .images_base64
            .expect("images present")
            .iter()
            .map(|b64| decode_image(b64).width())
            .collect();
        assert_eq!(widths, vec![100, 80, 60, 40]);
    }

    #[test]
    fn rotated_pages_are_normalized_before_encoding() {
        let raw = DynamicImage::ImageRgb8(RgbImage::from_pixel(30, 40, Rgb([90, 90, 90])));
        let pages = vec![CapturedPage::new(raw, PageOrientation::Right)];
        let request = ScanRequest {
            result_formats: ResultFormat::Jpeg,
            ..Default::default()
        };
        let result = ScanResultProcessor::default().process(&request, pages);

        let decoded = decode_image(&result.images_base64.expect("images present")[0]);
        assert_eq!((decoded.width(), decoded.height()), (40, 30));
    }
}
