//! Metrics for the prompt
//!
//! Recorded through the `metrics` facade. Nothing is exported unless the
//! embedding process installs a recorder.

pub mod counters;
pub mod histograms;
pub mod labels;
