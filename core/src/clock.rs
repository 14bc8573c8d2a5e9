use chrono::Local;

/// Source of the display timestamps attached to results and reports.
pub trait Clock {
    fn timestamp(&self) -> String;
}

/// Wall clock in the local timezone, formatted like `10/16/2026, 3:04:05 PM`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn timestamp(&self) -> String {
        Local::now().format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedClock(pub String);

impl FixedClock {
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self(timestamp.into())
    }
}

impl Clock for FixedClock {
    fn timestamp(&self) -> String {
        self.0.clone()
    }
}
