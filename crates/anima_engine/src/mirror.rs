//! The mirror regulator: adaptive feedback over the recent mood trajectory.
//!
//! Watches a rolling window of scalar mood samples, scores how stable the
//! trajectory is, and re-tunes the clamp parameters it owns. A stable
//! ("mirrored") trajectory loosens the clamps toward inertia; a fractured
//! one tightens them toward reactivity. On top of either branch, an
//! unconditional fatigue adjustment runs every evaluation that has enough
//! history, so the regulator can never settle into a static configuration.

use anima_core::params::ClampParameters;
use anima_core::config::MirrorConfig;
use anima_core::snapshot::MirrorSnapshot;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Per-evaluation fatigue: reaction creeps up, memory bleeds down.
const FATIGUE_STEP: f64 = 0.05;

/// One mirror reading: a stability coefficient in [0, 1] and its summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MirrorReading {
    pub summary: String,
    pub coefficient: f64,
}

impl MirrorReading {
    fn insufficient() -> Self {
        Self {
            summary: "insufficient data".to_string(),
            coefficient: 0.0,
        }
    }
}

/// Rolling mood-sample window with FIFO eviction.
#[derive(Debug, Clone)]
pub struct MirrorSignature {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl MirrorSignature {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, sample: f64) {
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample.clamp(0.0, 1.0));
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn as_vec(&self) -> Vec<f64> {
        self.samples.iter().copied().collect()
    }

    /// Absolute drift between the mean of the older half and the newer half.
    fn halves_drift(&self) -> f64 {
        let history: Vec<f64> = self.samples.iter().copied().collect();
        let mid = history.len() / 2;
        let (older, newer) = history.split_at(mid);
        let avg = |xs: &[f64]| xs.iter().sum::<f64>() / xs.len() as f64;
        (avg(newer) - avg(older)).abs()
    }
}

/// Owns the clamp parameters; nothing else writes them.
pub struct MirrorRegulator {
    signature: MirrorSignature,
    params: ClampParameters,
    min_samples: usize,
    last: MirrorReading,
}

impl MirrorRegulator {
    pub fn new(config: &MirrorConfig, mut params: ClampParameters) -> Self {
        params.normalize();
        Self {
            signature: MirrorSignature::new(config.window),
            params,
            min_samples: config.min_samples,
            last: MirrorReading::insufficient(),
        }
    }

    /// Record the latest scalar mood for pattern tracking.
    pub fn record_sample(&mut self, mood: f64) {
        self.signature.push(mood);
    }

    /// Analyze the window and re-tune the clamp parameters.
    ///
    /// Too little history returns a zero-coefficient reading and changes
    /// nothing. Otherwise the stability coefficient picks a branch, and the
    /// fatigue adjustment runs afterwards regardless of which branch fired.
    pub fn evaluate(&mut self) -> MirrorReading {
        if self.signature.len() < self.min_samples {
            self.last = MirrorReading::insufficient();
            return self.last.clone();
        }

        let drift = self.signature.halves_drift();
        // High drift -> low coefficient; low drift -> high coefficient.
        let coefficient = (1.0 - drift * 5.0).clamp(0.0, 1.0);

        let tolerance = self.params.clamp_tolerance;
        let sensitivity = self.params.clamp_sensitivity;
        let mut mem = self.params.memory_factor;
        let mut react = self.params.reaction_strength;

        let summary = if coefficient > 0.75 {
            // Stable patterns: allow more memory, soften reactions.
            let adjust = tolerance * sensitivity;
            mem = (mem + adjust).min(0.90);
            react = (react - adjust).max(0.10);
            format!("mirror resonance {coefficient:.2} — clamps loosen")
        } else if coefficient < 0.35 {
            // Unstable patterns: reduce memory, sharpen reactions.
            let adjust = tolerance * (1.0 - sensitivity);
            mem = (mem - adjust).max(0.60);
            react = (react + adjust).min(0.40);
            format!("mirror fracture {coefficient:.2} — clamps tighten")
        } else {
            format!("mirror neutral {coefficient:.2} — clamps hold")
        };

        // Regulatory fatigue, applied after the branch on every evaluation
        // that had enough history.
        react = (react + FATIGUE_STEP).min(1.0);
        mem = (mem - FATIGUE_STEP).max(0.0);

        self.params.memory_factor = mem;
        self.params.reaction_strength = react;

        tracing::debug!(
            mem = self.params.memory_factor,
            react = self.params.reaction_strength,
            tol = tolerance,
            sens = sensitivity,
            mirror = coefficient,
            "clamp control"
        );

        self.last = MirrorReading {
            summary,
            coefficient,
        };
        self.last.clone()
    }

    /// Read-only view of the clamp parameters.
    pub fn params(&self) -> &ClampParameters {
        &self.params
    }

    pub fn last_reading(&self) -> &MirrorReading {
        &self.last
    }

    pub fn window_len(&self) -> usize {
        self.signature.len()
    }

    pub fn to_snapshot(&self) -> MirrorSnapshot {
        MirrorSnapshot {
            window: self.signature.as_vec(),
            coefficient: self.last.coefficient,
            summary: self.last.summary.clone(),
        }
    }

    /// Rebuild from a snapshot, re-clamping everything that crosses back in.
    pub fn restore(config: &MirrorConfig, params: ClampParameters, snap: &MirrorSnapshot) -> Self {
        let mut regulator = Self::new(config, params);
        for s in snap.window.iter().rev().take(config.window).rev() {
            regulator.signature.push(*s);
        }
        regulator.last = MirrorReading {
            summary: snap.summary.clone(),
            coefficient: snap.coefficient.clamp(0.0, 1.0),
        };
        regulator
    }
}
