//! Incremental trial logging: one durable delimiter-separated row per
//! completed trial, header derived from the first record written.

pub mod logger;

pub use logger::{LogConfig, TrialLogger};
