//! Port for reporting completed requests to the learning collaborator.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port hands each finished
//! [`ChatOutcome`] to a consumer that scores routes and providers over time.

use chorus_domain::ChatOutcome;

/// Receives every completed chat outcome.
///
/// The `record` method is synchronous and non-fallible so a recording
/// failure never affects the answer already produced.
pub trait OutcomeRecorder: Send + Sync {
    fn record(&self, outcome: &ChatOutcome);
}

/// No-op implementation for tests and when recording is disabled.
pub struct NoOutcomeRecorder;

impl OutcomeRecorder for NoOutcomeRecorder {
    fn record(&self, _outcome: &ChatOutcome) {}
}
