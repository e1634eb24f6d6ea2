//! Diagnostic logging capability.
//!
//! Digestion never fails a batch and never raises: anything noteworthy goes
//! to a diagnostic sink, fire-and-forget. The sink is passed explicitly into
//! the assembler so tests can capture diagnostics without process-wide state.

use std::sync::Mutex;

/// A fire-and-forget sink for digestion diagnostics.
///
/// Implementations must never affect control flow: a diagnostic is
/// informational, and a sink that fails must swallow the failure.
pub trait DiagnosticSink: Sync {
    /// Record one diagnostic. `is_error` marks anomalies (bad field values,
    /// over-separated links) as opposed to routine skip notices.
    fn log(&self, message: &str, is_error: bool);
}

/// Default sink: forwards diagnostics to the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn log(&self, message: &str, is_error: bool) {
        if is_error {
            tracing::error!("{message}");
        } else {
            tracing::info!("{message}");
        }
    }
}

/// One recorded diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub is_error: bool,
}

/// Sink that records diagnostics in memory, for tests.
#[derive(Debug, Default)]
pub struct CapturingSink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl CapturingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    #[must_use]
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Whether any recorded message contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.entries()
            .iter()
            .any(|entry| entry.message.contains(needle))
    }
}

impl DiagnosticSink for CapturingSink {
    fn log(&self, message: &str, is_error: bool) {
        // A poisoned lock just drops the diagnostic; logging never fails.
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(Diagnostic {
                message: message.to_string(),
                is_error,
            });
        }
    }
}
