//! Latency summary over a finished run.

use std::fmt;
use std::time::Duration;

use hdrhistogram::Histogram;

use crate::sample::TimingSample;

/// Aggregated view of a run: success/failure counts, throughput, and
/// latency percentiles (successful requests only).
pub struct LatencySummary {
    total: u64,
    failed: u64,
    wall_time: Duration,
    histogram: Histogram<u64>,
}

impl LatencySummary {
    pub fn from_samples(samples: &[TimingSample], wall_time: Duration) -> Self {
        // Microsecond resolution, up to one minute per request.
        let mut histogram =
            Histogram::<u64>::new_with_bounds(1, 60_000_000, 3).expect("histogram bounds are static");
        let mut failed = 0u64;
        for sample in samples {
            if sample.is_failure() {
                failed += 1;
            } else {
                let micros = (sample.seconds() * 1_000_000.0) as u64;
                let _ = histogram.record(micros.max(1));
            }
        }
        Self {
            total: samples.len() as u64,
            failed,
            wall_time,
            histogram,
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn succeeded(&self) -> u64 {
        self.total - self.failed
    }

    pub fn failed(&self) -> u64 {
        self.failed
    }

    pub fn requests_per_second(&self) -> f64 {
        let secs = self.wall_time.as_secs_f64();
        if secs > 0.0 {
            self.succeeded() as f64 / secs
        } else {
            0.0
        }
    }

    pub fn mean_ms(&self) -> f64 {
        self.histogram.mean() / 1000.0
    }

    pub fn min_ms(&self) -> f64 {
        self.histogram.min() as f64 / 1000.0
    }

    pub fn max_ms(&self) -> f64 {
        self.histogram.max() as f64 / 1000.0
    }

    pub fn percentile_ms(&self, percentile: f64) -> f64 {
        self.histogram.value_at_percentile(percentile) as f64 / 1000.0
    }
}

impl fmt::Display for LatencySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} requests ({} ok, {} failed) in {:.2}s, {:.2} req/s",
            self.total,
            self.succeeded(),
            self.failed,
            self.wall_time.as_secs_f64(),
            self.requests_per_second(),
        )?;
        write!(
            f,
            "latency: {:.2}ms min, {:.2}ms avg, {:.2}ms max, {:.2}ms p50, {:.2}ms p90, {:.2}ms p99",
            self.min_ms(),
            self.mean_ms(),
            self.max_ms(),
            self.percentile_ms(50.0),
            self.percentile_ms(90.0),
            self.percentile_ms(99.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_failures_separately() {
        let samples = [
            TimingSample::from_success(Duration::from_millis(10)),
            TimingSample::FAILED,
            TimingSample::from_success(Duration::from_millis(30)),
        ];
        let summary = LatencySummary::from_samples(&samples, Duration::from_secs(1));
        assert_eq!(summary.total(), 3);
        assert_eq!(summary.succeeded(), 2);
        assert_eq!(summary.failed(), 1);
        assert!((summary.requests_per_second() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn percentiles_track_recorded_latencies() {
        let samples: Vec<TimingSample> = (1..=100)
            .map(|i| TimingSample::from_success(Duration::from_millis(i)))
            .collect();
        let summary = LatencySummary::from_samples(&samples, Duration::from_secs(1));
        let p50 = summary.percentile_ms(50.0);
        assert!((45.0..=55.0).contains(&p50), "p50 was {p50}");
        let p99 = summary.percentile_ms(99.0);
        assert!(p99 >= 95.0, "p99 was {p99}");
        assert!((0.5..=1.5).contains(&summary.min_ms()), "min was {}", summary.min_ms());
        assert!((95.0..=105.0).contains(&summary.max_ms()), "max was {}", summary.max_ms());
    }
}
