//! Microbenchmark timing for experiment code paths, plus summary
//! statistics over duration samples.

pub mod bench;
pub mod stats;

pub use bench::{BenchReport, Benchmark};
pub use stats::SampleStats;
