//! Per-cycle drift and goal gravity on the affect vector, plus the scalar
//! mood blend.
//!
//! The decay engine is the only writer of the affect vector and the scalar
//! mood. It reads the regulator's clamp parameters but never mutates them.

use anima_core::affect::{AffectVector, Dimension, GoalState, StimulusDeltas};
use anima_core::config::DriftConfig;
use anima_core::params::ClampParameters;
use anima_core::rng::JitterSource;

/// Drives the affect vector once per cycle: stimulus or jitter, then gravity.
pub struct DecayEngine {
    drift: DriftConfig,
    jitter: Box<dyn JitterSource>,
}

impl DecayEngine {
    pub fn new(drift: DriftConfig, jitter: Box<dyn JitterSource>) -> Self {
        Self { drift, jitter }
    }

    /// Add bounded deltas to the vector, then clamp every dimension.
    /// Dimensions without a delta are untouched. Never fails: the vector is
    /// repaired before any arithmetic.
    pub fn apply_stimulus(&mut self, vector: &mut AffectVector, deltas: &StimulusDeltas) {
        vector.normalize();
        for dim in Dimension::ALL {
            if let Some(delta) = deltas.get(dim) {
                if delta.is_finite() {
                    vector.set(dim, vector.get(dim) + delta);
                }
            }
        }
        vector.normalize();
    }

    /// Drift the vector slightly: explicit per-dimension deltas when given,
    /// otherwise independent jitter per dimension. Clamp last.
    pub fn drift(&mut self, vector: &mut AffectVector, explicit: Option<&StimulusDeltas>) {
        vector.normalize();
        let amp = self.drift.jitter;
        for dim in Dimension::ALL {
            let delta = match explicit.and_then(|d| d.get(dim)) {
                Some(d) if d.is_finite() => d,
                _ => self.jitter.jitter(-amp, amp),
            };
            vector.set(dim, vector.get(dim) + delta);
        }
        vector.normalize();
    }

    /// Softly pull the vector toward the goal targets. When a dimension is
    /// already inside the wobble band, a tiny random wobble keeps it from
    /// freezing exactly on target. `strength <= 0` is a no-op.
    pub fn goal_gravity(&mut self, vector: &mut AffectVector, goal: &GoalState) {
        if goal.strength <= 0.0 || !goal.strength.is_finite() {
            return;
        }
        vector.normalize();
        for dim in Dimension::ALL {
            let Some(target) = goal.target(dim) else {
                continue;
            };
            let current = vector.get(dim);
            let mut delta = target - current;
            if delta.abs() < self.drift.wobble_band {
                delta += self.jitter.jitter(-self.drift.wobble, self.drift.wobble);
            }
            vector.set(dim, current + delta * goal.strength);
        }
        vector.normalize();
    }

    /// Blend a scalar stimulus into the mood under the current clamp
    /// parameters: inertia times the old mood plus reaction times the new
    /// stimulus, clamped to [0, 1].
    pub fn update_mood(&self, mood: f64, stimulus: f64, params: &ClampParameters) -> f64 {
        let mood = if mood.is_finite() { mood } else { 0.5 };
        let stimulus = if stimulus.is_finite() { stimulus } else { 0.5 };
        (mood * params.memory_factor + stimulus * params.reaction_strength).clamp(0.0, 1.0)
    }
}
