use std::time::Duration;

/// Wall-clock duration of one request in seconds, or NaN when the server
/// answered with a non-2xx status.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingSample(f64);

impl TimingSample {
    pub const FAILED: TimingSample = TimingSample(f64::NAN);

    pub fn from_success(elapsed: Duration) -> Self {
        Self(elapsed.as_secs_f64())
    }

    pub fn seconds(&self) -> f64 {
        self.0
    }

    pub fn is_failure(&self) -> bool {
        self.0.is_nan()
    }
}
