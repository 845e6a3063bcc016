//! File edges: CSV sources, bar sinks and timestamp parsing.

pub mod sink;
pub mod source;
pub mod time;
