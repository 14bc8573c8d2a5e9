use std::sync::Mutex;

/// Session-wide counters for image submissions.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub submitted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub batches: usize,
}

#[derive(Default)]
struct Metrics {
    submitted: usize,
    succeeded: usize,
    failed: usize,
    batches: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn record_batch(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.batches += 1;
        }
    }

    pub fn record_success(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.submitted += 1;
            metrics.succeeded += 1;
        }
    }

    pub fn record_failure(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.submitted += 1;
            metrics.failed += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        if let Ok(metrics) = self.inner.lock() {
            MetricsSnapshot {
                submitted: metrics.submitted,
                succeeded: metrics.succeeded,
                failed: metrics.failed,
                batches: metrics.batches,
            }
        } else {
            MetricsSnapshot::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
