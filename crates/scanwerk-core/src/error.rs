// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Scanwerk.

use thiserror::Error;

/// Top-level error type for all Scanwerk operations.
#[derive(Debug, Error)]
pub enum ScanwerkError {
    // -- Terminal session rejections --
    #[error("document capture unavailable: {0}")]
    Unavailable(String),

    #[error("scan cancelled by user")]
    Cancelled,

    #[error("scan failed: {0}")]
    ScanFailed(String),

    #[error("a scan session is already in progress")]
    Busy,

    // -- Pipeline errors --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("PDF assembly failed: {0}")]
    PdfError(String),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,

    // -- Ambient --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ScanwerkError {
    /// Wire-level signal name surfaced to the plugin caller.
    ///
    /// Only the terminal session rejections carry a named signal; pipeline
    /// errors are absorbed before they reach the caller.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) | Self::PlatformUnavailable => "UNAVAILABLE",
            Self::Cancelled => "CANCELLED",
            Self::ScanFailed(_) => "SCAN_FAILED",
            Self::Busy => "BUSY",
            _ => "INTERNAL",
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ScanwerkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_rejections_carry_wire_codes() {
        assert_eq!(ScanwerkError::Unavailable("no camera".into()).code(), "UNAVAILABLE");
        assert_eq!(ScanwerkError::Cancelled.code(), "CANCELLED");
        assert_eq!(ScanwerkError::ScanFailed("boom".into()).code(), "SCAN_FAILED");
        assert_eq!(ScanwerkError::Busy.code(), "BUSY");
    }

    #[test]
    fn pipeline_errors_are_internal() {
        assert_eq!(ScanwerkError::PdfError("render".into()).code(), "INTERNAL");
        assert_eq!(ScanwerkError::ImageError("decode".into()).code(), "INTERNAL");
    }
}
