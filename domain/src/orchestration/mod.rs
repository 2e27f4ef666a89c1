//! Orchestration domain.
//!
//! - [`entities::Stage`] - pipeline stages and their progress values
//! - [`mode::RoutingMode`] - auto / always / never consensus
//! - [`value_objects::ChatOutcome`] - what the caller receives

pub mod entities;
pub mod mode;
pub mod value_objects;
