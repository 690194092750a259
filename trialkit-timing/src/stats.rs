use std::time::Duration;

/// Summary statistics over a set of duration samples, e.g. measured frame
/// intervals or per-run benchmark times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleStats {
    pub mean: Duration,
    /// Population standard deviation of the samples.
    pub jitter: Duration,
    pub min: Duration,
    pub max: Duration,
    /// Samples per second implied by the mean.
    pub rate_hz: f64,
}

impl SampleStats {
    /// Compute statistics over `samples`. Returns `None` for an empty set.
    pub fn from_durations(samples: &[Duration]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let secs: Vec<f64> = samples.iter().map(Duration::as_secs_f64).collect();
        let mean = secs.iter().sum::<f64>() / secs.len() as f64;
        let variance = secs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / secs.len() as f64;

        Some(Self {
            mean: Duration::from_secs_f64(mean),
            jitter: Duration::from_secs_f64(variance.sqrt()),
            min: *samples.iter().min()?,
            max: *samples.iter().max()?,
            rate_hz: if mean > 0.0 { 1.0 / mean } else { 0.0 },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_samples_give_no_stats() {
        assert_eq!(SampleStats::from_durations(&[]), None);
    }

    #[test]
    fn stats_match_hand_computed_values() {
        let samples = [
            Duration::from_millis(10),
            Duration::from_millis(20),
            Duration::from_millis(30),
        ];
        let stats = SampleStats::from_durations(&samples).unwrap();
        assert_eq!(stats.mean, Duration::from_millis(20));
        assert_eq!(stats.min, Duration::from_millis(10));
        assert_eq!(stats.max, Duration::from_millis(30));
        // Population SD of {10, 20, 30} ms is ~8.165 ms.
        let sd_ms = stats.jitter.as_secs_f64() * 1000.0;
        assert!((sd_ms - 8.165).abs() < 0.01);
        assert!((stats.rate_hz - 50.0).abs() < 1e-9);
    }

    #[test]
    fn uniform_samples_have_zero_jitter() {
        let samples = [Duration::from_millis(16); 8];
        let stats = SampleStats::from_durations(&samples).unwrap();
        assert_eq!(stats.jitter, Duration::ZERO);
        assert!((stats.rate_hz - 62.5).abs() < 1e-9);
    }
}
