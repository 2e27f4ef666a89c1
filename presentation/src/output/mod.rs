//! Output formatting and streaming

pub mod console;
pub mod formatter;
pub mod sink;
