//! The four-dimensional affect vector and its goal subsystem.
//!
//! Instead of discrete emotion labels, the agent's mood is a continuous point
//! in a 4D unit cube: Awareness × Emotion × Balance × Depth. Every dimension
//! is held in [0.0, 1.0] at all times; writes saturate via clamping rather
//! than rejecting out-of-range input.

use serde::{Deserialize, Serialize};

/// Neutral repair value for a dimension that arrives malformed.
pub const NEUTRAL_DIM: f64 = 0.5;

/// Guard against NaN and Infinity in state values.
/// If the value is not finite, replace with the provided fallback.
#[inline]
pub(crate) fn sanitize_f64(v: f64, fallback: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        tracing::warn!("non-finite value in state, resetting to {}", fallback);
        fallback
    }
}

/// The agent's 4D mood state.
///
/// Defaults are deliberately asymmetric: a fresh agent starts attentive
/// (awareness 0.7) but emotionally quiet (emotion 0.3).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffectVector {
    /// Cognitive attentiveness (0.0 - 1.0)
    pub awareness: f64,
    /// Emotional intensity (0.0 - 1.0)
    pub emotion: f64,
    /// Optimistic/pessimistic lean (0.0 - 1.0, 0.5 = even)
    pub balance: f64,
    /// Depth of processing (0.0 - 1.0): surface vs deep thought
    pub depth: f64,
}

impl Default for AffectVector {
    fn default() -> Self {
        Self {
            awareness: 0.7,
            emotion: 0.3,
            balance: 0.5,
            depth: 0.5,
        }
    }
}

impl AffectVector {
    pub fn new(awareness: f64, emotion: f64, balance: f64, depth: f64) -> Self {
        let mut v = Self {
            awareness,
            emotion,
            balance,
            depth,
        };
        v.normalize();
        v
    }

    /// Repair and clamp every dimension. Non-finite values reset to the
    /// neutral 0.5 before clamping, so arithmetic downstream never sees
    /// NaN/Inf.
    pub fn normalize(&mut self) {
        self.awareness = sanitize_f64(self.awareness, NEUTRAL_DIM).clamp(0.0, 1.0);
        self.emotion = sanitize_f64(self.emotion, NEUTRAL_DIM).clamp(0.0, 1.0);
        self.balance = sanitize_f64(self.balance, NEUTRAL_DIM).clamp(0.0, 1.0);
        self.depth = sanitize_f64(self.depth, NEUTRAL_DIM).clamp(0.0, 1.0);
    }

    /// Iterate dimensions in fixed order (for snapshot export and tests).
    pub fn dims(&self) -> [(Dimension, f64); 4] {
        [
            (Dimension::Awareness, self.awareness),
            (Dimension::Emotion, self.emotion),
            (Dimension::Balance, self.balance),
            (Dimension::Depth, self.depth),
        ]
    }

    pub fn get(&self, dim: Dimension) -> f64 {
        match dim {
            Dimension::Awareness => self.awareness,
            Dimension::Emotion => self.emotion,
            Dimension::Balance => self.balance,
            Dimension::Depth => self.depth,
        }
    }

    pub fn set(&mut self, dim: Dimension, value: f64) {
        let v = sanitize_f64(value, NEUTRAL_DIM).clamp(0.0, 1.0);
        match dim {
            Dimension::Awareness => self.awareness = v,
            Dimension::Emotion => self.emotion = v,
            Dimension::Balance => self.balance = v,
            Dimension::Depth => self.depth = v,
        }
    }

    /// Readable one-line description of the current mood.
    pub fn describe(&self) -> String {
        let tone = if self.emotion > 0.7 {
            "energized"
        } else if self.emotion < 0.3 {
            "reflective"
        } else {
            "neutral"
        };

        let lean = if self.balance > 0.7 {
            "optimistic"
        } else if self.balance < 0.3 {
            "pessimistic"
        } else {
            "balanced"
        };

        let layer = if self.depth < 0.4 {
            "surface"
        } else if self.depth > 0.7 {
            "deep thought"
        } else {
            "mid-layer"
        };

        format!(
            "A={:.2} E={:.2} B={:.2} D={:.2} -> {}, {}, {}",
            self.awareness, self.emotion, self.balance, self.depth, tone, lean, layer
        )
    }
}

/// Named affect dimensions, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dimension {
    Awareness,
    Emotion,
    Balance,
    Depth,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Awareness,
        Dimension::Emotion,
        Dimension::Balance,
        Dimension::Depth,
    ];
}

/// Per-dimension deltas for a stimulus or an explicit drift.
/// `None` leaves that dimension to the caller's fallback (jitter for drift,
/// no-op for stimulus).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StimulusDeltas {
    pub awareness: Option<f64>,
    pub emotion: Option<f64>,
    pub balance: Option<f64>,
    pub depth: Option<f64>,
}

impl StimulusDeltas {
    pub fn get(&self, dim: Dimension) -> Option<f64> {
        match dim {
            Dimension::Awareness => self.awareness,
            Dimension::Emotion => self.emotion,
            Dimension::Balance => self.balance,
            Dimension::Depth => self.depth,
        }
    }

    pub fn uniform(delta: f64) -> Self {
        Self {
            awareness: Some(delta),
            emotion: Some(delta),
            balance: Some(delta),
            depth: Some(delta),
        }
    }
}

/// The internal target mood and how strongly it pulls each cycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GoalState {
    /// Desired resting point per dimension. `None` disables gravity there.
    pub awareness: Option<f64>,
    pub emotion: Option<f64>,
    pub balance: Option<f64>,
    pub depth: Option<f64>,
    /// Pull strength per cycle; <= 0 disables gravity entirely.
    pub strength: f64,
}

impl Default for GoalState {
    fn default() -> Self {
        Self {
            awareness: Some(0.5),
            emotion: Some(0.5),
            balance: Some(0.5),
            depth: Some(0.5),
            strength: 0.08,
        }
    }
}

impl GoalState {
    pub fn target(&self, dim: Dimension) -> Option<f64> {
        match dim {
            Dimension::Awareness => self.awareness,
            Dimension::Emotion => self.emotion,
            Dimension::Balance => self.balance,
            Dimension::Depth => self.depth,
        }
    }
}
