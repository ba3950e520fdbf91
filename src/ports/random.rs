//! Randomness and time ports.
//!
//! Scoring draws noise and stamps a prediction time. Both are injected so that
//! a pinned seed and a fixed clock make an assessment fully reproducible.

use chrono::{DateTime, Utc};

/// Source of uniform draws used for scoring noise.
pub trait RandomSource: Send {
    /// Draw a value uniformly from `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Draw a value uniformly from `[low, high)`.
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_unit()
    }
}

/// Wall clock used to stamp assessments.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
