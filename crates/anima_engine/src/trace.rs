//! Linear emotional memory: the cleanest possible readout of the mood signal.
//!
//! Tracks the last mood, its delta, whether the jump counted as a spike, and
//! a smoothed rolling average. No drift, no band analysis.

use anima_core::snapshot::TraceSnapshot;

const SMOOTHING: f64 = 0.10;
const SPIKE_THRESHOLD: f64 = 0.12;

#[derive(Debug, Clone, PartialEq)]
pub struct EmotionTrace {
    pub last: f64,
    pub delta: f64,
    pub spike: bool,
    pub rolling_avg: f64,
}

impl Default for EmotionTrace {
    fn default() -> Self {
        Self {
            last: 0.5,
            delta: 0.0,
            spike: false,
            rolling_avg: 0.5,
        }
    }
}

impl EmotionTrace {
    /// Fold the current mood into the trace.
    pub fn update(&mut self, mood: f64) {
        let mood = if mood.is_finite() { mood.clamp(0.0, 1.0) } else { 0.5 };

        self.delta = mood - self.last;
        self.spike = self.delta.abs() >= SPIKE_THRESHOLD;
        self.rolling_avg += SMOOTHING * (mood - self.rolling_avg);
        self.last = mood;
    }

    pub fn to_snapshot(&self) -> TraceSnapshot {
        TraceSnapshot {
            last: self.last,
            delta: self.delta,
            spike: self.spike,
            rolling_avg: self.rolling_avg,
        }
    }

    pub fn restore(snap: &TraceSnapshot) -> Self {
        let mut t = Self {
            last: snap.last,
            delta: snap.delta,
            spike: snap.spike,
            rolling_avg: snap.rolling_avg,
        };
        if !t.last.is_finite() {
            t.last = 0.5;
        }
        if !t.rolling_avg.is_finite() {
            t.rolling_avg = 0.5;
        }
        if !t.delta.is_finite() {
            t.delta = 0.0;
        }
        t
    }
}
