// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-page image stage — orientation normalization, downscaling, JPEG encoding.

pub mod processor;

pub use processor::{PageProcessor, encode_jpeg};
