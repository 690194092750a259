use std::fmt;
use std::hint::black_box;
use std::time::{Duration, Instant};

/// Fewest runs a benchmark will do, even for very slow closures.
const MIN_RUNS: usize = 10;
/// Most runs a benchmark will do, even for near-instant closures.
const MAX_RUNS: usize = 1_000_000;
/// Total measurement time the calibration aims for.
const TARGET_TOTAL: Duration = Duration::from_secs(1);

/// Microbenchmark for a code snippet.
///
/// Unless a run count is given explicitly, three probe runs size the
/// measurement so the total takes about a second, clamped to between ten
/// and a million runs. The loop overhead is measured separately
/// and subtracted, so the report approximates the cost of the closure
/// body alone.
///
/// ```
/// use trialkit_timing::Benchmark;
///
/// let report = Benchmark::new().runs(1000).run(|| {
///     std::hint::black_box(2u64.pow(16));
/// });
/// println!("{report}");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Benchmark {
    runs: Option<usize>,
}

impl Benchmark {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the run count instead of calibrating it.
    #[must_use]
    pub fn runs(mut self, runs: usize) -> Self {
        self.runs = Some(runs.clamp(1, MAX_RUNS));
        self
    }

    /// Time `f`, returning the per-run report.
    pub fn run<F: FnMut()>(&self, mut f: F) -> BenchReport {
        let runs = match self.runs {
            Some(runs) => runs,
            None => calibrate_runs(&mut f),
        };

        let baseline = time_runs(&mut || black_box(()), runs);
        let total = time_runs(&mut f, runs);
        let mean = total.saturating_sub(baseline) / runs as u32;

        BenchReport {
            mean,
            runs,
            total,
            baseline,
        }
    }
}

/// Size the run count from three probe runs, targeting roughly
/// `TARGET_TOTAL` of measurement.
fn calibrate_runs<F: FnMut()>(f: &mut F) -> usize {
    let probe = time_runs(f, 3);
    if probe.is_zero() {
        return MAX_RUNS;
    }
    let runs = (TARGET_TOTAL.as_secs_f64() / probe.as_secs_f64() * 3.0) as usize;
    runs.clamp(MIN_RUNS, MAX_RUNS)
}

fn time_runs<F: FnMut()>(f: &mut F, runs: usize) -> Duration {
    let start = Instant::now();
    for _ in 0..runs {
        f();
    }
    start.elapsed()
}

/// Result of a [`Benchmark`] measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchReport {
    /// Baseline-subtracted average duration of one run.
    pub mean: Duration,
    /// Number of measured runs.
    pub runs: usize,
    /// Wall time of the measured runs, baseline included.
    pub total: Duration,
    /// Wall time of the same number of empty runs.
    pub baseline: Duration,
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = self.mean.as_nanos();
        let (scaled, unit) = if ns >= 1_000_000_000 {
            (ns as f64 / 1e9, "s")
        } else if ns >= 1_000_000 {
            (ns as f64 / 1e6, "ms")
        } else if ns >= 1_000 {
            (ns as f64 / 1e3, "us")
        } else {
            (ns as f64, "ns")
        };
        write!(f, "average {scaled:.3} {unit} from {} runs", self.runs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_run_count_is_respected() {
        let mut calls = 0usize;
        let report = Benchmark::new().runs(25).run(|| calls += 1);
        assert_eq!(report.runs, 25);
        assert_eq!(calls, 25);
    }

    #[test]
    fn calibrated_run_count_is_clamped() {
        let report = Benchmark::new().run(|| {
            black_box(1u64 + 1);
        });
        assert!(report.runs >= MIN_RUNS);
        assert!(report.runs <= MAX_RUNS);
    }

    #[test]
    fn mean_never_exceeds_total() {
        let report = Benchmark::new().runs(50).run(|| {
            black_box([0u8; 64]);
        });
        assert!(report.mean <= report.total);
    }

    #[test]
    fn slow_closure_reports_sensible_mean() {
        let report = Benchmark::new().runs(10).run(|| {
            std::thread::sleep(Duration::from_millis(2));
        });
        assert!(report.mean >= Duration::from_millis(1));
        assert!(report.mean < Duration::from_millis(50));
    }

    #[test]
    fn display_picks_unit_from_mean() {
        let report = |mean| BenchReport {
            mean,
            runs: 100,
            total: Duration::ZERO,
            baseline: Duration::ZERO,
        };
        let rendered = report(Duration::from_nanos(120)).to_string();
        assert!(rendered.contains("ns"), "{rendered}");
        let rendered = report(Duration::from_micros(12)).to_string();
        assert!(rendered.contains("us"), "{rendered}");
        let rendered = report(Duration::from_millis(12)).to_string();
        assert!(rendered.contains("ms"), "{rendered}");
        let rendered = report(Duration::from_secs(2)).to_string();
        assert!(rendered.contains(" s "), "{rendered}");
    }
}
