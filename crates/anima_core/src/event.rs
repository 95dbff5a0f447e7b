//! Boundary types: raw event payloads, validated threat events, cycle input.
//!
//! External drivers hand the engine loosely-typed JSON payloads. Validation
//! and defaulting happen exactly once, here — downstream code only ever sees
//! the validated forms.

use serde::{Deserialize, Serialize};

/// Source tag that marks an event as coming from the NPC engine.
pub const NPC_SOURCE: &str = "npc_engine";
/// Intent tag that marks an event as a threat.
pub const THREAT_INTENT: &str = "threat";
/// Actor label used when the payload names nobody.
pub const UNKNOWN_ACTOR: &str = "unknown";

/// A raw, duck-typed event payload as delivered by an external driver.
///
/// Only `source == "npc_engine"` with `intent == "threat"` means anything to
/// the engine; everything else is silently ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEvent {
    pub source: String,
    pub intent: String,
    #[serde(default)]
    pub actor: Option<String>,
    #[serde(default)]
    pub intensity: Option<f64>,
}

impl RawEvent {
    pub fn threat(actor: &str, intensity: f64) -> Self {
        Self {
            source: NPC_SOURCE.to_string(),
            intent: THREAT_INTENT.to_string(),
            actor: Some(actor.to_string()),
            intensity: Some(intensity),
        }
    }
}

/// A validated threat event. Missing fields were defaulted at the boundary:
/// actor -> "unknown", intensity -> 0.0 (non-finite or negative repaired to 0.0).
#[derive(Debug, Clone, PartialEq)]
pub struct ThreatEvent {
    pub actor: String,
    pub intensity: f64,
}

impl ThreatEvent {
    /// Validate a raw payload. Returns `None` for anything that is not an
    /// NPC-engine threat; never fails on malformed fields.
    pub fn from_raw(raw: &RawEvent) -> Option<Self> {
        if raw.source != NPC_SOURCE || raw.intent != THREAT_INTENT {
            tracing::trace!(
                source = %raw.source,
                intent = %raw.intent,
                "ignoring non-threat event"
            );
            return None;
        }

        let actor = raw
            .actor
            .as_deref()
            .filter(|a| !a.is_empty())
            .unwrap_or(UNKNOWN_ACTOR)
            .to_string();

        let intensity = match raw.intensity {
            Some(i) if i.is_finite() && i >= 0.0 => i,
            _ => 0.0,
        };

        Some(Self { actor, intensity })
    }
}

/// The zero-or-one stimulus an external driver supplies per cycle.
#[derive(Debug, Clone)]
pub enum CycleInput {
    /// A structured event payload (threat accumulation path).
    Event(RawEvent),
    /// Free text (belief tension + sentiment-derived mood stimulus).
    Text(String),
    /// A raw scalar stimulus in [0, 1], fed straight into the mood blend
    /// (probe and test drivers).
    Stimulus(f64),
}

/// Validated strategy labels, replacing the original free-form strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Reflect,
    Idle,
    Stabilize,
    Explore,
    Express,
}

impl Strategy {
    /// The passive set: repeating one of these across consecutive cycles
    /// counts as stagnation for the pressure controller.
    pub fn is_passive(&self) -> bool {
        matches!(self, Strategy::Reflect | Strategy::Idle | Strategy::Stabilize)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Reflect => "reflect",
            Strategy::Idle => "idle",
            Strategy::Stabilize => "stabilize",
            Strategy::Explore => "explore",
            Strategy::Express => "express",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "reflect" => Some(Strategy::Reflect),
            "idle" => Some(Strategy::Idle),
            "stabilize" => Some(Strategy::Stabilize),
            "explore" => Some(Strategy::Explore),
            "express" => Some(Strategy::Express),
            _ => None,
        }
    }
}
