//! Logging infrastructure - structured outcome logging.
//!
//! Provides [`JsonlOutcomeLogger`], a JSONL file writer that implements
//! the [`OutcomeRecorder`](chorus_application::OutcomeRecorder) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlOutcomeLogger;
