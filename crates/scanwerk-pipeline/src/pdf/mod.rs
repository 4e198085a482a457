// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF assembly — multi-page aspect-fit layout of processed page images.

pub mod assembler;

pub use assembler::{FitRect, PdfAssembler};
