// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// scanwerk-pipeline — Scan-result post-processing for the Scanwerk engine.
//
// Turns an ordered set of captured page images into the requested artifacts:
// orientation normalization, optional downscaling, JPEG encoding, multi-page
// PDF assembly with aspect-fit layout, and response-payload construction.

pub mod image;
pub mod page;
pub mod payload;
pub mod pdf;
pub mod processor;

// Re-export the primary structs so callers can use `scanwerk_pipeline::PdfAssembler` etc.
pub use image::processor::PageProcessor;
pub use page::{CapturedPage, EncodedImage};
pub use payload::ResultPayloadBuilder;
pub use pdf::assembler::PdfAssembler;
pub use processor::ScanResultProcessor;
