//! Task routing: decide whether a request warrants the consensus pipeline.
//!
//! - [`router::TaskRouter`] - keyword classifier
//! - [`task::TaskAnalysis`] - type, complexity, token estimate

pub mod router;
pub mod task;

pub use router::TaskRouter;
pub use task::{Complexity, TaskAnalysis, TaskType};
