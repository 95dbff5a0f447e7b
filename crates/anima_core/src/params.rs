//! Regulator-owned tuning knobs.
//!
//! These four parameters shape how hard stimuli move the scalar mood and how
//! far the mirror regulator may re-tune itself per cycle. They are owned and
//! mutated exclusively by the regulator; everything else reads them.

use crate::affect::sanitize_f64;
use serde::{Deserialize, Serialize};

/// Normal clamp tolerance for a fresh agent.
pub const BASE_CLAMP_TOL: f64 = 0.10;
/// Never tighter than this.
pub const MIN_CLAMP_TOL: f64 = 0.03;
/// Never looser than this.
pub const MAX_CLAMP_TOL: f64 = 0.25;

/// Emotional-inertia and reaction tuning, bounded at every observable point:
/// `memory_factor` and `reaction_strength` and `clamp_sensitivity` in [0, 1],
/// `clamp_tolerance` in [0.03, 0.25].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClampParameters {
    /// Emotional inertia: how much of the previous mood survives a stimulus.
    pub memory_factor: f64,
    /// How much a new stimulus shifts the mood.
    pub reaction_strength: f64,
    /// How far the regulator may adjust parameters per cycle.
    pub clamp_tolerance: f64,
    /// How strongly the regulator reacts to resonance vs divergence.
    pub clamp_sensitivity: f64,
}

impl Default for ClampParameters {
    fn default() -> Self {
        Self {
            memory_factor: 0.75,
            reaction_strength: 0.25,
            clamp_tolerance: BASE_CLAMP_TOL,
            clamp_sensitivity: 0.5,
        }
    }
}

impl ClampParameters {
    /// Repair and clamp every parameter into its documented range.
    pub fn normalize(&mut self) {
        self.memory_factor = sanitize_f64(self.memory_factor, 0.75).clamp(0.0, 1.0);
        self.reaction_strength = sanitize_f64(self.reaction_strength, 0.25).clamp(0.0, 1.0);
        self.clamp_tolerance =
            sanitize_f64(self.clamp_tolerance, BASE_CLAMP_TOL).clamp(MIN_CLAMP_TOL, MAX_CLAMP_TOL);
        self.clamp_sensitivity = sanitize_f64(self.clamp_sensitivity, 0.5).clamp(0.0, 1.0);
    }

    /// True when every parameter sits inside its documented range.
    pub fn in_bounds(&self) -> bool {
        (0.0..=1.0).contains(&self.memory_factor)
            && (0.0..=1.0).contains(&self.reaction_strength)
            && (MIN_CLAMP_TOL..=MAX_CLAMP_TOL).contains(&self.clamp_tolerance)
            && (0.0..=1.0).contains(&self.clamp_sensitivity)
    }
}
