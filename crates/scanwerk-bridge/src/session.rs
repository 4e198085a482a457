// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Capture-session state machine.
//
// One scan request is outstanding at a time, represented by a single pending
// session context. Exactly one terminal transition occurs per session:
// Idle -> Presenting -> Processing -> Resolved, or a rejection with one of
// the named signals (UNAVAILABLE, CANCELLED, SCAN_FAILED). A second request
// arriving while one is pending is rejected with BUSY rather than silently
// orphaning the first caller. Where the primary capture path is unsupported,
// the session dispatches to the alternate-platform scanner module when one
// is registered.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use scanwerk_core::ScannerConfig;
use scanwerk_core::error::{Result, ScanwerkError};
use scanwerk_core::types::{ScanRequest, ScanResult, SessionId};
use scanwerk_pipeline::{EncodedImage, ResultPayloadBuilder, ScanResultProcessor};

use crate::traits::{
    AlternateScanOptions, AlternateScannerModule, CaptureOutcome, DocumentCamera, ScannerMode,
};

/// Lifecycle states of a capture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Session created, capability not yet checked.
    Idle,
    /// Capture UI (or the alternate scanner module) is on screen.
    Presenting,
    /// Capture finished, post-processing pipeline running.
    Processing,
    /// Terminal: payload delivered.
    Resolved,
    /// Terminal: rejected with one of the named signals.
    Rejected,
}

/// Per-session bookkeeping held in the pending slot.
#[derive(Debug, Clone)]
struct SessionContext {
    id: SessionId,
    state: SessionState,
    started_at: DateTime<Utc>,
}

type PendingSlot = Arc<Mutex<Option<SessionContext>>>;

/// The slot is only ever held for short, await-free critical sections, so a
/// poisoned lock still carries a coherent value.
fn lock_slot(pending: &Mutex<Option<SessionContext>>) -> MutexGuard<'_, Option<SessionContext>> {
    pending.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears the pending slot if the owning `scan` future is dropped before its
/// terminal transition (e.g. cancelled by a caller-side timeout). Without
/// this, an abandoned session would answer every later request with BUSY.
struct SlotGuard {
    pending: PendingSlot,
    armed: bool,
}

impl SlotGuard {
    fn new(pending: PendingSlot) -> Self {
        Self {
            pending,
            armed: true,
        }
    }

    /// Disarm and hand the context back for terminal-transition logging.
    fn release(mut self) -> Option<SessionContext> {
        self.armed = false;
        lock_slot(&self.pending).take()
    }
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Some(ctx) = lock_slot(&self.pending).take() {
            warn!(session = %ctx.id, state = ?ctx.state, "scan future dropped, pending slot cleared");
        }
    }
}

/// Owns the pending-session slot and drives one scan request from capability
/// check through capture to the post-processing pipeline.
///
/// The slot is the only shared mutable resource: written once per session and
/// cleared on the terminal transition. Exactly-once resolution is structural —
/// each session is one `scan` call with one return.
#[derive(Clone)]
pub struct ScanSessionManager {
    camera: Arc<dyn DocumentCamera>,
    alternate: Option<Arc<dyn AlternateScannerModule>>,
    processor: Arc<ScanResultProcessor>,
    config: ScannerConfig,
    pending: PendingSlot,
}

impl ScanSessionManager {
    pub fn new(camera: Arc<dyn DocumentCamera>, config: ScannerConfig) -> Self {
        Self {
            camera,
            alternate: None,
            processor: Arc::new(ScanResultProcessor::new(config.clone())),
            config,
            pending: Arc::new(Mutex::new(None)),
        }
    }

    /// Register the alternate-platform scanner module used when the primary
    /// capture path is unsupported.
    pub fn with_alternate_module(mut self, module: Arc<dyn AlternateScannerModule>) -> Self {
        self.alternate = Some(module);
        self
    }

    /// Whether a session is currently pending.
    pub fn is_busy(&self) -> bool {
        lock_slot(&self.pending).is_some()
    }

    /// State of the pending session, if any.
    pub fn current_state(&self) -> Option<SessionState> {
        lock_slot(&self.pending).as_ref().map(|ctx| ctx.state)
    }

    /// Run one scan session to its single terminal outcome.
    ///
    /// On success the payload reflects best-effort pipeline results; on
    /// rejection no partial payload is ever returned.
    #[instrument(skip(self, request), fields(format = ?request.result_formats))]
    pub async fn scan(&self, request: ScanRequest) -> Result<ScanResult> {
        let id = SessionId::new();
        {
            let mut slot = lock_slot(&self.pending);
            if let Some(pending) = slot.as_ref() {
                warn!(pending = %pending.id, "scan request while session pending, rejecting");
                return Err(ScanwerkError::Busy);
            }
            *slot = Some(SessionContext {
                id,
                state: SessionState::Idle,
                started_at: Utc::now(),
            });
        }
        debug!(session = %id, "session opened");

        let guard = SlotGuard::new(Arc::clone(&self.pending));
        let outcome = self.run(id, request).await;

        // Terminal transition: the slot is cleared whatever the outcome.
        if let Some(ctx) = guard.release() {
            let terminal = match &outcome {
                Ok(_) => SessionState::Resolved,
                Err(_) => SessionState::Rejected,
            };
            let elapsed_ms = (Utc::now() - ctx.started_at).num_milliseconds();
            match &outcome {
                Ok(result) => info!(
                    session = %ctx.id,
                    state = ?terminal,
                    elapsed_ms,
                    empty = result.is_empty(),
                    "session terminal"
                ),
                Err(err) => info!(
                    session = %ctx.id,
                    state = ?terminal,
                    elapsed_ms,
                    signal = err.code(),
                    "session terminal"
                ),
            }
        }
        outcome
    }

    async fn run(&self, id: SessionId, request: ScanRequest) -> Result<ScanResult> {
        if !self.camera.is_supported() {
            if let Some(module) = self.alternate.clone() {
                debug!(session = %id, "primary capture unsupported, using alternate module");
                return self.run_alternate(id, request, module).await;
            }
            return Err(ScanwerkError::Unavailable(
                "document camera not supported on this device".into(),
            ));
        }

        self.set_state(id, SessionState::Presenting);
        let camera = Arc::clone(&self.camera);
        let outcome = tokio::task::spawn_blocking(move || camera.capture())
            .await
            .map_err(|err| ScanwerkError::ScanFailed(format!("capture task panicked: {err}")))?;

        // Cancellation and failure discard any pages already captured.
        let pages = match outcome {
            Ok(CaptureOutcome::Completed(pages)) => pages,
            Ok(CaptureOutcome::Cancelled) => return Err(ScanwerkError::Cancelled),
            Ok(CaptureOutcome::Failed(message)) => return Err(ScanwerkError::ScanFailed(message)),
            Err(ScanwerkError::PlatformUnavailable) => {
                return Err(ScanwerkError::Unavailable(
                    "no capture path on this platform".into(),
                ));
            }
            Err(err) => return Err(ScanwerkError::ScanFailed(err.to_string())),
        };

        self.set_state(id, SessionState::Processing);
        let processor = Arc::clone(&self.processor);
        let result = tokio::task::spawn_blocking(move || processor.process(&request, pages))
            .await
            .map_err(|err| {
                ScanwerkError::ScanFailed(format!("processing task panicked: {err}"))
            })?;

        Ok(result)
    }

    /// Drive the alternate-platform scanner module through the same session
    /// states. The module is a black box: its artifacts are passed through
    /// the payload contract untouched, never re-processed.
    async fn run_alternate(
        &self,
        id: SessionId,
        request: ScanRequest,
        module: Arc<dyn AlternateScannerModule>,
    ) -> Result<ScanResult> {
        let probe = Arc::clone(&module);
        let available = tokio::task::spawn_blocking(move || probe.is_module_available())
            .await
            .map_err(|err| ScanwerkError::ScanFailed(format!("module probe panicked: {err}")))??;

        if !available {
            // Kick off installation; completion is reported by the platform
            // out of band, so this session still rejects.
            module.install_module()?;
            return Err(ScanwerkError::Unavailable(
                "scanner module not installed; installation started".into(),
            ));
        }

        self.set_state(id, SessionState::Presenting);
        let options = AlternateScanOptions {
            gallery_import_allowed: self.config.gallery_import_allowed,
            page_limit: self.config.page_limit,
            result_formats: request.result_formats,
            scanner_mode: ScannerMode::Base,
        };
        let outcome = tokio::task::spawn_blocking(move || module.scan_document(&options))
            .await
            .map_err(|err| ScanwerkError::ScanFailed(format!("module scan panicked: {err}")))?;

        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(err @ ScanwerkError::Cancelled) => return Err(err),
            Err(ScanwerkError::PlatformUnavailable) => {
                return Err(ScanwerkError::Unavailable(
                    "no capture path on this platform".into(),
                ));
            }
            Err(err) => return Err(ScanwerkError::ScanFailed(err.to_string())),
        };

        self.set_state(id, SessionState::Processing);
        let images = outcome
            .scanned_images
            .into_iter()
            .enumerate()
            .map(|(page_index, bytes)| EncodedImage { page_index, bytes })
            .collect();

        Ok(ResultPayloadBuilder::new(request.result_formats)
            .images(images)
            .pdf(outcome.pdf)
            .build())
    }

    fn set_state(&self, id: SessionId, state: SessionState) {
        let mut slot = lock_slot(&self.pending);
        if let Some(ctx) = slot.as_mut() {
            debug!(session = %id, from = ?ctx.state, to = ?state, "session transition");
            ctx.state = state;
        }
    }
}
