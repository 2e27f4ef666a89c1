//! Progress notification port
//!
//! Defines the interface for reporting pipeline progress to an optional
//! observer.

use chorus_domain::Stage;
use std::sync::atomic::{AtomicU8, Ordering};

/// Callback for progress updates during a chat request
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, web UI, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called when a stage is entered, with its progress percentage
    fn on_stage(&self, stage: Stage, percent: u8);

    /// Called once before candidate generation with the matrix size
    fn on_generation_start(&self, _total_candidates: usize) {}

    /// Called as each (provider, temperature) call finishes
    fn on_candidate_complete(&self, _provider: &str, _temperature: f64, _success: bool) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_stage(&self, _stage: Stage, _percent: u8) {}
}

/// Forwards stage changes only when the percentage strictly increases.
///
/// Shared by the orchestrator and the consensus pipeline so observers see a
/// single monotonically increasing progress value for the whole request.
pub struct StageTracker<'a> {
    inner: &'a dyn ProgressNotifier,
    last: AtomicU8,
    started: std::sync::atomic::AtomicBool,
}

impl<'a> StageTracker<'a> {
    pub fn new(inner: &'a dyn ProgressNotifier) -> Self {
        Self {
            inner,
            last: AtomicU8::new(0),
            started: std::sync::atomic::AtomicBool::new(false),
        }
    }

    /// Enter a stage; returns whether the observer was notified.
    pub fn advance(&self, stage: Stage) -> bool {
        let percent = stage.progress();
        let first = !self.started.swap(true, Ordering::SeqCst);
        let previous = self.last.fetch_max(percent, Ordering::SeqCst);

        if first || percent > previous {
            self.inner.on_stage(stage, percent);
            true
        } else {
            false
        }
    }

    pub fn notifier(&self) -> &dyn ProgressNotifier {
        self.inner
    }
}
