//! Event-driven threat accumulation with exact per-actor memory.
//!
//! The threat level is a non-negative, unbounded-above accumulator. Each
//! validated threat event raises it by `intensity * (0.5 + mood)` and bumps
//! the acting actor's counter by exactly one. Event-free cycles decay the
//! level by a fixed rate, floored at zero. Within a cycle exactly one of
//! {accumulate, decay} runs.

use anima_core::event::{ThreatEvent, THREAT_INTENT};
use anima_core::snapshot::ThreatSnapshot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-actor threat memory. Entries are created lazily and never deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorThreat {
    pub threat_count: u64,
}

/// The exported threat state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThreatState {
    pub threat_level: f64,
    pub last_intent: Option<String>,
    pub actors: BTreeMap<String, ActorThreat>,
}

/// Owns and exclusively writes the threat state.
pub struct ThreatMemory {
    state: ThreatState,
    decay_rate: f64,
}

impl ThreatMemory {
    pub fn new(decay_rate: f64) -> Self {
        Self {
            state: ThreatState::default(),
            decay_rate,
        }
    }

    /// Accumulate a validated threat event. The actor's count rises by
    /// exactly one; the level rises by `intensity * (0.5 + mood)`, where a
    /// malformed mood falls back to the neutral 0.5 (multiplier 1.0).
    pub fn record_event(&mut self, event: &ThreatEvent, mood: f64) {
        let mood = if mood.is_finite() { mood.clamp(0.0, 1.0) } else { 0.5 };

        let bucket = self.state.actors.entry(event.actor.clone()).or_default();
        bucket.threat_count += 1;

        let gain = event.intensity * (0.5 + mood);
        self.state.threat_level += gain;
        self.state.last_intent = Some(THREAT_INTENT.to_string());

        tracing::debug!(
            actor = %event.actor,
            intensity = event.intensity,
            gain,
            level = self.state.threat_level,
            "threat accumulated"
        );
    }

    /// Decay tick for a cycle that saw no threat event.
    pub fn advance_without_event(&mut self) {
        self.state.threat_level = (self.state.threat_level - self.decay_rate).max(0.0);
    }

    pub fn state(&self) -> &ThreatState {
        &self.state
    }

    pub fn threat_level(&self) -> f64 {
        self.state.threat_level
    }

    /// Reset the accumulator, keeping per-actor history.
    pub fn reset_level(&mut self) {
        self.state.threat_level = 0.0;
        self.state.last_intent = None;
    }

    /// Forget all per-actor history as well.
    pub fn reset_actors(&mut self) {
        self.state.actors.clear();
    }

    pub fn to_snapshot(&self) -> ThreatSnapshot {
        ThreatSnapshot {
            threat_level: self.state.threat_level,
            last_intent: self.state.last_intent.clone(),
            actors: self
                .state
                .actors
                .iter()
                .map(|(k, v)| (k.clone(), v.threat_count))
                .collect(),
        }
    }

    pub fn restore(decay_rate: f64, snap: &ThreatSnapshot) -> Self {
        Self {
            state: ThreatState {
                threat_level: snap.threat_level.max(0.0),
                last_intent: snap.last_intent.clone(),
                actors: snap
                    .actors
                    .iter()
                    .map(|(k, v)| (k.clone(), ActorThreat { threat_count: *v }))
                    .collect(),
            },
            decay_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn threat(actor: &str, intensity: f64) -> ThreatEvent {
        ThreatEvent {
            actor: actor.to_string(),
            intensity,
        }
    }

    #[test]
    fn test_accumulation_with_neutral_mood() {
        let mut mem = ThreatMemory::new(0.15);
        mem.record_event(&threat("p1", 1.0), 0.5);
        // multiplier 0.5 + 0.5 = 1.0
        assert!((mem.threat_level() - 1.0).abs() < 1e-9);
        assert_eq!(mem.state().actors["p1"].threat_count, 1);
        assert_eq!(mem.state().last_intent.as_deref(), Some("threat"));
    }

    #[test]
    fn test_mood_modulates_gain() {
        let mut low = ThreatMemory::new(0.15);
        let mut high = ThreatMemory::new(0.15);
        low.record_event(&threat("p1", 1.0), 0.0);
        high.record_event(&threat("p1", 1.0), 1.0);
        assert!((low.threat_level() - 0.5).abs() < 1e-9);
        assert!((high.threat_level() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_mood_defaults_to_neutral() {
        let mut mem = ThreatMemory::new(0.15);
        mem.record_event(&threat("p1", 2.0), f64::NAN);
        assert!((mem.threat_level() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_decay_floors_at_zero() {
        let mut mem = ThreatMemory::new(0.15);
        mem.record_event(&threat("p1", 0.2), 0.5);
        for _ in 0..10 {
            mem.advance_without_event();
            assert!(mem.threat_level() >= 0.0);
        }
        assert_eq!(mem.threat_level(), 0.0);
    }

    #[test]
    fn test_per_actor_counts_are_independent() {
        let mut mem = ThreatMemory::new(0.15);
        mem.record_event(&threat("p1", 1.0), 0.5);
        mem.record_event(&threat("p2", 1.0), 0.5);
        mem.record_event(&threat("p1", 1.0), 0.5);
        assert_eq!(mem.state().actors["p1"].threat_count, 2);
        assert_eq!(mem.state().actors["p2"].threat_count, 1);
    }

    #[test]
    fn test_reset_level_keeps_actors() {
        let mut mem = ThreatMemory::new(0.15);
        mem.record_event(&threat("p1", 1.0), 0.5);
        mem.reset_level();
        assert_eq!(mem.threat_level(), 0.0);
        assert!(mem.state().last_intent.is_none());
        assert_eq!(mem.state().actors["p1"].threat_count, 1);
    }

    #[test]
    fn test_snapshot_restore_roundtrip() {
        let mut mem = ThreatMemory::new(0.15);
        mem.record_event(&threat("p1", 1.5), 0.5);
        mem.record_event(&threat("p2", 0.5), 0.5);
        let snap = mem.to_snapshot();
        let restored = ThreatMemory::restore(0.15, &snap);
        assert_eq!(restored.to_snapshot(), snap);
    }
}
