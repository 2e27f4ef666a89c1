//! Progress reporting for chat requests

use chorus_application::ports::progress::ProgressNotifier;
use chorus_domain::Stage;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Reports pipeline progress with a single percentage bar on stderr
pub struct ProgressReporter {
    bar: ProgressBar,
    total: AtomicUsize,
    done: AtomicUsize,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self::with_bar(ProgressBar::new(100))
    }

    fn with_bar(bar: ProgressBar) -> Self {
        bar.set_style(Self::stage_style());
        Self {
            bar,
            total: AtomicUsize::new(0),
            done: AtomicUsize::new(0),
        }
    }

    fn stage_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos:>3}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    /// Current bar position (percent)
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Current bar message
    pub fn message(&self) -> String {
        self.bar.message()
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_stage(&self, stage: Stage, percent: u8) {
        self.bar.set_position(u64::from(percent));
        match stage {
            Stage::Done | Stage::CacheHit => self.bar.finish_and_clear(),
            _ => self.bar.set_message(stage.display_name().to_string()),
        }
    }

    fn on_generation_start(&self, total_candidates: usize) {
        self.total.store(total_candidates, Ordering::SeqCst);
        self.done.store(0, Ordering::SeqCst);
        self.bar.enable_steady_tick(std::time::Duration::from_millis(120));
    }

    fn on_candidate_complete(&self, provider: &str, temperature: f64, success: bool) {
        let done = self.done.fetch_add(1, Ordering::SeqCst) + 1;
        let total = self.total.load(Ordering::SeqCst);
        let mark = if success { "v".green() } else { "x".red() };
        self.bar.set_message(format!(
            "{} {}/{} {} {} (t={})",
            Stage::Generating.display_name(),
            done,
            total,
            mark,
            provider,
            temperature
        ));
    }
}

/// Simple line-based progress on stderr (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_stage(&self, stage: Stage, percent: u8) {
        eprintln!("{} {:>3}% {}", "->".cyan(), percent, stage.display_name().bold());
    }

    fn on_candidate_complete(&self, provider: &str, temperature: f64, success: bool) {
        if success {
            eprintln!("  {} {} (t={})", "v".green(), provider, temperature);
        } else {
            eprintln!("  {} {} (t={}) failed", "x".red(), provider, temperature);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reporter() -> ProgressReporter {
        ProgressReporter::with_bar(ProgressBar::hidden())
    }

    #[test]
    fn test_stage_sets_position_and_message() {
        let reporter = reporter();
        reporter.on_stage(Stage::Scoring, Stage::Scoring.progress());
        assert_eq!(reporter.position(), 60);
        assert_eq!(reporter.message(), "Scoring agreement");
    }

    #[test]
    fn test_candidate_counter() {
        let reporter = reporter();
        reporter.on_generation_start(6);
        reporter.on_candidate_complete("groq", 0.2, true);
        reporter.on_candidate_complete("gemini", 0.3, false);
        let message = reporter.message();
        assert!(message.contains("2/6"));
        assert!(message.contains("gemini"));
    }

    #[test]
    fn test_done_finishes_at_100() {
        let reporter = reporter();
        reporter.on_stage(Stage::Done, 100);
        assert_eq!(reporter.position(), 100);
        assert!(reporter.bar.is_finished());
    }
}
