// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanner configuration.

use serde::{Deserialize, Serialize};

/// Persistent scanner settings.
///
/// Request-level defaults (result formats, JPEG quality) are fixed by the
/// operation contract and live on `ScanRequest::default`; this struct holds
/// only the knobs the engine itself consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// DPI assumed when mapping pixel dimensions to PDF page points.
    pub pdf_dpi: f32,
    /// Page cap passed to the alternate-platform scanner module.
    pub page_limit: u32,
    /// Whether the alternate-platform scanner may import from the gallery.
    pub gallery_import_allowed: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            pdf_dpi: 150.0,
            page_limit: 5,
            gallery_import_allowed: true,
        }
    }
}
