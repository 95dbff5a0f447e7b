//! Primitive-only state export.
//!
//! `EngineSnapshot` is the full state container handed across the boundary:
//! a deep, alias-free copy made of scalars, strings and plain collections.
//! No internal representation type is observable through it. The persistence
//! collaborator serializes exactly this.

use crate::affect::AffectVector;
use crate::params::ClampParameters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete engine state at one observable point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    /// Cycles advanced since creation.
    pub cycles: u64,
    /// Scalar mood in [0, 1].
    pub mood: f64,
    /// The 4D affect vector.
    pub affect: AffectVector,
    /// Regulator-owned tuning knobs.
    pub clamp: ClampParameters,
    /// Mirror window and last reading.
    pub mirror: MirrorSnapshot,
    /// Threat accumulator and per-actor counts.
    pub threat: ThreatSnapshot,
    /// Belief tension scalar and contradiction counter.
    pub tension: TensionSnapshot,
    /// Linear emotional-memory readout.
    pub emotion_trace: TraceSnapshot,
    /// Last strategy the host reported, if any.
    pub last_strategy: Option<String>,
    /// Unix timestamp of the export.
    pub last_updated: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MirrorSnapshot {
    /// Rolling mood samples, oldest first (at most the window capacity).
    pub window: Vec<f64>,
    /// Latest stability coefficient in [0, 1].
    pub coefficient: f64,
    /// Latest textual reading.
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreatSnapshot {
    pub threat_level: f64,
    pub last_intent: Option<String>,
    /// actor id -> exact threat event count
    pub actors: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TensionSnapshot {
    pub belief_tension: f64,
    pub contradictions: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceSnapshot {
    pub last: f64,
    pub delta: f64,
    pub spike: bool,
    pub rolling_avg: f64,
}

impl Default for EngineSnapshot {
    fn default() -> Self {
        Self {
            cycles: 0,
            mood: 0.5,
            affect: AffectVector::default(),
            clamp: ClampParameters::default(),
            mirror: MirrorSnapshot {
                window: Vec::new(),
                coefficient: 0.0,
                summary: String::new(),
            },
            threat: ThreatSnapshot {
                threat_level: 0.0,
                last_intent: None,
                actors: BTreeMap::new(),
            },
            tension: TensionSnapshot {
                belief_tension: 0.0,
                contradictions: 0,
            },
            emotion_trace: TraceSnapshot {
                last: 0.5,
                delta: 0.0,
                spike: false,
                rolling_avg: 0.5,
            },
            last_strategy: None,
            last_updated: chrono::Utc::now().timestamp(),
        }
    }
}

impl EngineSnapshot {
    /// Repair every bounded field into its documented range. Called when a
    /// snapshot re-enters the engine (restore, or load from disk) so a
    /// hand-edited or corrupted container cannot violate the invariants.
    pub fn normalize(&mut self) {
        self.affect.normalize();
        self.clamp.normalize();
        self.mood = crate::affect::sanitize_f64(self.mood, 0.5).clamp(0.0, 1.0);
        self.tension.belief_tension =
            crate::affect::sanitize_f64(self.tension.belief_tension, 0.0).clamp(0.0, 1.0);
        self.threat.threat_level =
            crate::affect::sanitize_f64(self.threat.threat_level, 0.0).max(0.0);
        self.mirror.coefficient =
            crate::affect::sanitize_f64(self.mirror.coefficient, 0.0).clamp(0.0, 1.0);
        for s in &mut self.mirror.window {
            *s = crate::affect::sanitize_f64(*s, 0.5).clamp(0.0, 1.0);
        }
    }
}
