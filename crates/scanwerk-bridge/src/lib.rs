// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// scanwerk-bridge — Capture-UI collaborator abstractions and session
// orchestration.
//
// The bridge defines the traits through which the engine consumes the
// OS-provided document camera and the alternate-platform scanner module,
// plus the capture-session state machine that drives one scan request from
// presentation through post-processing to exactly one terminal outcome.
// Native implementations are supplied by the host application; the stub
// serves desktop/CI builds.

pub mod session;
pub mod stub;
pub mod traits;

use std::sync::Arc;

pub use session::{ScanSessionManager, SessionState};
pub use traits::{AlternateScannerModule, CaptureOutcome, DocumentCamera};

/// The document camera for builds without a native capture UI.
///
/// Host applications targeting mobile platforms register their own
/// `DocumentCamera` implementation instead.
pub fn default_camera() -> Arc<dyn DocumentCamera> {
    Arc::new(stub::StubCamera)
}

/// The alternate scanner module for builds without a native module, for use
/// with [`ScanSessionManager::with_alternate_module`].
pub fn default_scanner_module() -> Arc<dyn AlternateScannerModule> {
    Arc::new(stub::StubScannerModule)
}
