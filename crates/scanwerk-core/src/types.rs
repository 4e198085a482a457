// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Scanwerk document-capture engine.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a capture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which artifacts the caller wants back from a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultFormat {
    #[serde(rename = "JPEG")]
    Jpeg,
    #[serde(rename = "PDF")]
    Pdf,
    #[serde(rename = "JPEG_PDF")]
    JpegPdf,
}

impl ResultFormat {
    /// Whether per-page JPEG artifacts belong in the response.
    pub fn wants_images(&self) -> bool {
        matches!(self, Self::Jpeg | Self::JpegPdf)
    }

    /// Whether an assembled PDF belongs in the response.
    pub fn wants_pdf(&self) -> bool {
        matches!(self, Self::Pdf | Self::JpegPdf)
    }
}

impl Default for ResultFormat {
    fn default() -> Self {
        Self::JpegPdf
    }
}

/// Orientation tag attached to a captured page, describing the transform
/// that must be applied to render the raw pixels upright.
///
/// Mirrors the eight-way orientation model of the capture interfaces this
/// engine consumes (EXIF / UIImage orientation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PageOrientation {
    /// Already upright — the identity orientation.
    Up,
    /// Rotated 180 degrees.
    Down,
    /// Rotated 90 degrees counter-clockwise.
    Left,
    /// Rotated 90 degrees clockwise.
    Right,
    UpMirrored,
    DownMirrored,
    LeftMirrored,
    RightMirrored,
}

impl PageOrientation {
    /// True when no transform is required.
    pub fn is_identity(&self) -> bool {
        matches!(self, Self::Up)
    }
}

impl Default for PageOrientation {
    fn default() -> Self {
        Self::Up
    }
}

/// Options for one scan operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanRequest {
    /// Which artifacts to return.
    pub result_formats: ResultFormat,
    /// JPEG quality in [0, 1]. Out-of-range values are clamped.
    pub jpeg_quality: f32,
    /// Optional bound on the larger image side, in pixels. Non-positive
    /// values are treated as absent.
    pub max_dimension: Option<f32>,
}

impl Default for ScanRequest {
    fn default() -> Self {
        Self {
            result_formats: ResultFormat::default(),
            jpeg_quality: 0.9,
            max_dimension: None,
        }
    }
}

impl ScanRequest {
    /// JPEG quality clamped into [0, 1].
    pub fn effective_quality(&self) -> f32 {
        self.jpeg_quality.clamp(0.0, 1.0)
    }

    /// The resize bound, filtered to strictly positive values.
    pub fn effective_max_dimension(&self) -> Option<f32> {
        self.max_dimension.filter(|d| *d > 0.0)
    }
}

/// Final artifacts of a completed scan.
///
/// Fields are independently absent: a field that has no content is omitted
/// from the serialized payload entirely, never emitted as null or empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    /// Base64-encoded JPEG bytes, one entry per page, in capture order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images_base64: Option<Vec<String>>,
    /// Base64-encoded assembled PDF.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_base64: Option<String>,
}

impl ScanResult {
    /// True when neither artifact is present.
    pub fn is_empty(&self) -> bool {
        self.images_base64.is_none() && self.pdf_base64.is_none()
    }
}
