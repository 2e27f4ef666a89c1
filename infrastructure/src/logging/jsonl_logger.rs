//! JSONL file writer for chat outcomes.
//!
//! Each completed [`ChatOutcome`] is serialized as a single JSON line with a
//! `type` field and `timestamp`, appended to the file via a buffered writer.
//! The file accumulates across runs so route and provider statistics can be
//! computed over time.

use chorus_application::ports::outcome_recorder::OutcomeRecorder;
use chorus_domain::ChatOutcome;
use serde_json::{Value, json};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL outcome logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlOutcomeLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlOutcomeLogger {
    /// Create a logger appending to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create outcome log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open outcome log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// The fields the learning collaborator scores on; answers and candidate
/// texts are left out.
fn outcome_record(outcome: &ChatOutcome, timestamp: String) -> Value {
    let consensus = outcome.consensus.as_ref();
    json!({
        "type": "chat_outcome",
        "timestamp": timestamp,
        "route": outcome.route.as_str(),
        "task_type": outcome.task.task_type,
        "complexity": outcome.task.complexity,
        "from_cache": outcome.from_cache,
        "elapsed_ms": outcome.elapsed_ms,
        "provider": outcome.provider,
        "fallback_reason": outcome.fallback_reason,
        "confidence": consensus.map(|c| c.confidence),
        "agreement_score": consensus.map(|c| c.agreement_score),
        "candidates": consensus.map(|c| c.candidates.len()),
        "providers": consensus.map(|c| c.providers()),
        "answer_chars": outcome.answer.chars().count(),
    })
}

impl OutcomeRecorder for JsonlOutcomeLogger {
    fn record(&self, outcome: &ChatOutcome) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let Ok(line) = serde_json::to_string(&outcome_record(outcome, timestamp)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlOutcomeLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chorus_domain::{
        CandidateResponse, ConfidenceBand, ConsensusResult, ResponseRoute, TaskRouter,
    };
    use std::io::Read;

    fn consensus_outcome() -> ChatOutcome {
        let now = chrono::Utc::now();
        ChatOutcome {
            answer: "Canberra".to_string(),
            route: ResponseRoute::Consensus,
            task: TaskRouter::new().analyze("Explain in detail why Canberra is the capital."),
            consensus: Some(ConsensusResult {
                final_answer: "Canberra".to_string(),
                confidence: ConfidenceBand::High,
                candidates: vec![
                    CandidateResponse::new("openai", "gpt", 0.2, "Canberra", now),
                    CandidateResponse::new("gemini", "flash", 0.2, "Canberra", now),
                ],
                synthesis: Some("Canberra".to_string()),
                verification: Some("OK".to_string()),
                reasoning: "verified".to_string(),
                agreement_score: 1.0,
            }),
            provider: None,
            fallback_reason: None,
            from_cache: false,
            elapsed_ms: 1234,
        }
    }

    fn read_lines(path: &Path) -> Vec<Value> {
        let mut content = String::new();
        File::open(path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_line_per_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outcomes.jsonl");
        let logger = JsonlOutcomeLogger::new(&path).unwrap();

        logger.record(&consensus_outcome());
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 1);
        let first = &lines[0];
        assert_eq!(first["type"], "chat_outcome");
        assert!(first.get("timestamp").is_some());
        assert_eq!(first["route"], "consensus");
        assert_eq!(first["confidence"], "HIGH");
        assert_eq!(first["agreement_score"], 1.0);
        assert_eq!(first["candidates"], 2);
        assert_eq!(first["providers"], json!(["openai", "gemini"]));
        assert_eq!(first["elapsed_ms"], 1234);
        assert!(first.get("answer").is_none());
    }

    #[test]
    fn test_appends_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("outcomes.jsonl");

        for _ in 0..2 {
            let logger = JsonlOutcomeLogger::new(&path).unwrap();
            logger.record(&consensus_outcome());
        }

        assert_eq!(read_lines(&path).len(), 2);
    }

    #[test]
    fn test_single_model_outcome_has_null_consensus_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outcomes.jsonl");
        let logger = JsonlOutcomeLogger::new(&path).unwrap();

        let mut outcome = consensus_outcome();
        outcome.route = ResponseRoute::FallbackSingleModel;
        outcome.consensus = None;
        outcome.provider = Some("groq".to_string());
        outcome.fallback_reason = Some("All providers failed".to_string());
        logger.record(&outcome);
        drop(logger);

        let line = &read_lines(&path)[0];
        assert_eq!(line["route"], "fallback_single_model");
        assert_eq!(line["provider"], "groq");
        assert!(line["confidence"].is_null());
        assert_eq!(line["fallback_reason"], "All providers failed");
    }
}
