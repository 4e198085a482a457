// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the capture collaborators.
//
// The capture UI and the alternate-platform scanner module are external
// systems: their interfaces are consumed here, never reimplemented. Platforms
// that lack a collaborator return `ScanwerkError::PlatformUnavailable` from
// the stub implementation.

use scanwerk_core::error::Result;
use scanwerk_core::types::ResultFormat;
use scanwerk_pipeline::CapturedPage;

/// What the capture UI reported when it was dismissed.
///
/// A presented capture UI emits exactly one of these.
#[derive(Debug, Clone)]
pub enum CaptureOutcome {
    /// The user dismissed the capture UI. Any pages already captured are
    /// discarded by the caller.
    Cancelled,
    /// The capture UI hit an internal failure.
    Failed(String),
    /// Capture completed with the given pages, in capture order.
    Completed(Vec<CapturedPage>),
}

/// The OS-provided document capture interface.
///
/// Presented modally; `capture` blocks the calling thread until the user
/// finishes, cancels, or the UI fails. Callers drive it from a blocking
/// task, never from an async executor thread.
pub trait DocumentCamera: Send + Sync {
    /// Capability gate: whether the capture UI can be presented at all on
    /// this device/OS version.
    fn is_supported(&self) -> bool;

    /// Present the capture UI and wait for its single outcome.
    ///
    /// An `Err` here means the bridge itself broke (not a user action); the
    /// session treats it the same as a capture failure.
    fn capture(&self) -> Result<CaptureOutcome>;
}

/// Scanner flavour requested from the alternate-platform module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannerMode {
    Base,
    BaseWithFilter,
    Full,
}

/// Options passed through to the alternate-platform scanner module.
///
/// Built by the session orchestrator from `ScannerConfig` and the request;
/// the module never sees engine-internal defaults.
#[derive(Debug, Clone)]
pub struct AlternateScanOptions {
    /// Whether the module may import pages from the photo gallery.
    pub gallery_import_allowed: bool,
    /// Maximum number of pages the module will capture.
    pub page_limit: u32,
    /// Which artifacts the module should return.
    pub result_formats: ResultFormat,
    /// Scanner flavour.
    pub scanner_mode: ScannerMode,
}

/// Artifacts returned by the alternate-platform scanner module.
#[derive(Debug, Clone)]
pub struct AlternateScanOutcome {
    /// Encoded page images, in capture order.
    pub scanned_images: Vec<Vec<u8>>,
    /// Assembled PDF, when the module produced one.
    pub pdf: Option<Vec<u8>>,
}

/// Separate scanner subsystem used where the primary capture path is
/// unavailable. Has its own install lifecycle and is treated as a black box:
/// its output is passed through, not post-processed.
pub trait AlternateScannerModule: Send + Sync {
    /// Whether the module is installed and ready.
    fn is_module_available(&self) -> Result<bool>;

    /// Kick off module installation; completion is reported by the platform.
    fn install_module(&self) -> Result<()>;

    /// Run the module's own scan flow.
    fn scan_document(&self, options: &AlternateScanOptions) -> Result<AlternateScanOutcome>;
}
