// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub collaborators for desktop/CI builds where native capture APIs are
// unavailable. Real implementations are registered by the host application.

use scanwerk_core::error::{Result, ScanwerkError};

use crate::traits::{
    AlternateScanOptions, AlternateScanOutcome, AlternateScannerModule, CaptureOutcome,
    DocumentCamera,
};

/// No-op document camera returned on platforms without a capture UI.
pub struct StubCamera;

impl DocumentCamera for StubCamera {
    fn is_supported(&self) -> bool {
        false
    }

    fn capture(&self) -> Result<CaptureOutcome> {
        tracing::warn!("DocumentCamera::capture called on stub camera");
        Err(ScanwerkError::PlatformUnavailable)
    }
}

/// No-op alternate scanner module.
pub struct StubScannerModule;

impl AlternateScannerModule for StubScannerModule {
    fn is_module_available(&self) -> Result<bool> {
        Ok(false)
    }

    fn install_module(&self) -> Result<()> {
        tracing::warn!("AlternateScannerModule::install_module called on stub module");
        Err(ScanwerkError::PlatformUnavailable)
    }

    fn scan_document(&self, _options: &AlternateScanOptions) -> Result<AlternateScanOutcome> {
        tracing::warn!("AlternateScannerModule::scan_document called on stub module");
        Err(ScanwerkError::PlatformUnavailable)
    }
}
