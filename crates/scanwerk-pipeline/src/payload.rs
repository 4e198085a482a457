// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Response-payload construction — selects which artifacts belong in the
// final result, per requested format, and base64-wraps them.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use scanwerk_core::types::{ResultFormat, ScanResult};
use tracing::debug;

use crate::page::EncodedImage;

/// Builds the final `ScanResult` from whatever artifacts the pipeline managed
/// to produce.
///
/// Field-presence contract:
/// - `images_base64` is present iff images were requested and at least one
///   page encoded successfully.
/// - `pdf_base64` is present iff a PDF was requested and assembly succeeded.
///
/// A PDF-assembly failure therefore degrades the response to images-only;
/// a PDF-only request whose assembly failed yields an empty result.
pub struct ResultPayloadBuilder {
    format: ResultFormat,
    images: Vec<EncodedImage>,
    pdf: Option<Vec<u8>>,
}

impl ResultPayloadBuilder {
    pub fn new(format: ResultFormat) -> Self {
        Self {
            format,
            images: Vec::new(),
            pdf: None,
        }
    }

    /// Supply the successfully encoded page images, in capture order.
    pub fn images(mut self, images: Vec<EncodedImage>) -> Self {
        self.images = images;
        self
    }

    /// Supply the assembled PDF bytes, if assembly succeeded.
    pub fn pdf(mut self, pdf: Option<Vec<u8>>) -> Self {
        self.pdf = pdf;
        self
    }

    /// Apply the presence contract and produce the response payload.
    ///
    /// Images are emitted ordered by their capture index, so suppliers may
    /// hand them over in any order.
    pub fn build(self) -> ScanResult {
        let mut images = self.images;
        images.sort_by_key(|img| img.page_index);

        let images_base64 = (self.format.wants_images() && !images.is_empty()).then(|| {
            images
                .iter()
                .map(|img| BASE64.encode(&img.bytes))
                .collect::<Vec<_>>()
        });

        let pdf_base64 = if self.format.wants_pdf() {
            self.pdf.as_deref().map(|bytes| BASE64.encode(bytes))
        } else {
            None
        };

        debug!(
            images = images_base64.as_ref().map_or(0, Vec::len),
            has_pdf = pdf_base64.is_some(),
            "payload built"
        );

        ScanResult {
            images_base64,
            pdf_base64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(n: usize) -> Vec<EncodedImage> {
        (0..n)
            .map(|i| EncodedImage {
                page_index: i,
                bytes: vec![0xFF, 0xD8, i as u8],
            })
            .collect()
    }

    #[test]
    fn jpeg_pdf_includes_both_when_available() {
        let result = ResultPayloadBuilder::new(ResultFormat::JpegPdf)
            .images(encoded(2))
            .pdf(Some(vec![b'%', b'P', b'D', b'F']))
            .build();
        assert_eq!(result.images_base64.as_ref().map(Vec::len), Some(2));
        assert!(result.pdf_base64.is_some());
    }

    #[test]
    fn jpeg_only_omits_pdf_even_when_assembled() {
        let result = ResultPayloadBuilder::new(ResultFormat::Jpeg)
            .images(encoded(1))
            .pdf(Some(vec![1, 2, 3]))
            .build();
        assert!(result.images_base64.is_some());
        assert!(result.pdf_base64.is_none());
    }

    #[test]
    fn pdf_only_omits_images_even_when_encoded() {
        let result = ResultPayloadBuilder::new(ResultFormat::Pdf)
            .images(encoded(3))
            .pdf(Some(vec![1, 2, 3]))
            .build();
        assert!(result.images_base64.is_none());
        assert!(result.pdf_base64.is_some());
    }

    #[test]
    fn assembly_failure_degrades_to_images_only() {
        let result = ResultPayloadBuilder::new(ResultFormat::JpegPdf)
            .images(encoded(2))
            .pdf(None)
            .build();
        assert!(result.images_base64.is_some());
        assert!(result.pdf_base64.is_none());
    }

    #[test]
    fn pdf_only_with_failed_assembly_is_empty() {
        let result = ResultPayloadBuilder::new(ResultFormat::Pdf)
            .images(encoded(2))
            .pdf(None)
            .build();
        assert!(result.is_empty());
    }

    #[test]
    fn no_encoded_pages_means_no_images_field() {
        let result = ResultPayloadBuilder::new(ResultFormat::JpegPdf)
            .images(Vec::new())
            .pdf(None)
            .build();
        assert!(result.is_empty());
    }

    #[test]
    fn images_are_ordered_by_capture_index() {
        let result = ResultPayloadBuilder::new(ResultFormat::Jpeg)
            .images(vec![
                EncodedImage {
                    page_index: 1,
                    bytes: b"B".to_vec(),
                },
                EncodedImage {
                    page_index: 0,
                    bytes: b"A".to_vec(),
                },
            ])
            .build();
        // "A" then "B", regardless of supply order.
        assert_eq!(
            result.images_base64.unwrap(),
            vec!["QQ==".to_string(), "Qg==".to_string()]
        );
    }

    #[test]
    fn images_are_standard_base64() {
        let result = ResultPayloadBuilder::new(ResultFormat::Jpeg)
            .images(vec![EncodedImage {
                page_index: 0,
                bytes: b"ABC".to_vec(),
            }])
            .build();
        assert_eq!(result.images_base64.unwrap()[0], "QUJD");
    }
}
