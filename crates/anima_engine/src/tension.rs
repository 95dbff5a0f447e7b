//! Lexical belief-tension tracking.
//!
//! A contradiction in the input text spikes the tension scalar; anything
//! else cools it toward zero. `evaluate` is a pure function of its three
//! inputs — all state lives with the caller.

use anima_core::sentiment::{tokenize, BRIDGES, NEGATIVE, POSITIVE};
use anima_core::snapshot::TensionSnapshot;

/// How fast tension rises when triggered.
pub const TENSION_SPIKE: f64 = 0.18;
/// How fast tension cools back toward zero.
pub const TENSION_DECAY: f64 = 0.04;

/// Detect a contradictory line: mixed positive/negative sentiment bridged by
/// a contrast word, or one of the fixed phrase patterns.
pub fn detect_contradiction(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }

    let lower = text.to_lowercase();
    let tokens = tokenize(&lower);

    let has_bridge = tokens.iter().any(|t| BRIDGES.contains(&t.as_str()));
    let has_pos = tokens.iter().any(|t| POSITIVE.contains(&t.as_str()));
    let has_neg = tokens.iter().any(|t| NEGATIVE.contains(&t.as_str()));

    if has_bridge && has_pos && has_neg {
        return true;
    }

    // Explicit phrase patterns that must hit.
    if lower.contains("yes but") && lower.contains("no") {
        return true;
    }
    if lower.contains("but also no") {
        return true;
    }
    if lower.contains("i want") && (lower.contains("can't") || lower.contains("cannot")) {
        return true;
    }

    false
}

/// Stateless tracker: spike on contradiction, decay otherwise.
pub struct BeliefTensionTracker;

impl BeliefTensionTracker {
    /// Returns `(tension, contradiction_count)` for this line of input.
    pub fn evaluate(text: &str, prev_tension: f64, prev_count: u64) -> (f64, u64) {
        let prev_tension = if prev_tension.is_finite() {
            prev_tension.clamp(0.0, 1.0)
        } else {
            0.0
        };

        if detect_contradiction(text) {
            ((prev_tension + TENSION_SPIKE).min(1.0), prev_count + 1)
        } else {
            ((prev_tension - TENSION_DECAY).max(0.0), prev_count)
        }
    }

    pub fn to_snapshot(tension: f64, count: u64) -> TensionSnapshot {
        TensionSnapshot {
            belief_tension: tension,
            contradictions: count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bridged_sentiment_fires() {
        assert!(detect_contradiction("I like it but I hate it"));
        assert!(detect_contradiction("good, however it is bad"));
    }

    #[test]
    fn test_phrase_patterns_fire() {
        assert!(detect_contradiction("yes but also no"));
        assert!(detect_contradiction("I want to stop but I can't"));
        assert!(detect_contradiction("i want this and yet i cannot have it"));
    }

    #[test]
    fn test_plain_text_does_not_fire() {
        assert!(!detect_contradiction("hello world"));
        assert!(!detect_contradiction(""));
        assert!(!detect_contradiction("the weather turned grey today"));
    }

    #[test]
    fn test_spike_and_count() {
        let (t, c) = BeliefTensionTracker::evaluate("I want to stop but I can't", 0.0, 0);
        assert!((t - 0.18).abs() < 1e-9);
        assert_eq!(c, 1);
    }

    #[test]
    fn test_decay_leaves_count() {
        let (t, c) = BeliefTensionTracker::evaluate("hello world", 0.18, 1);
        assert!((t - 0.14).abs() < 1e-9);
        assert_eq!(c, 1);
    }

    #[test]
    fn test_tension_saturates_at_one() {
        let (t, _) = BeliefTensionTracker::evaluate("yes but also no", 0.95, 7);
        assert_eq!(t, 1.0);
    }

    #[test]
    fn test_tension_floors_at_zero() {
        let (t, c) = BeliefTensionTracker::evaluate("quiet line", 0.02, 3);
        assert_eq!(t, 0.0);
        assert_eq!(c, 3);
    }

    #[test]
    fn test_malformed_prev_tension_repaired() {
        let (t, _) = BeliefTensionTracker::evaluate("quiet line", f64::NAN, 0);
        assert_eq!(t, 0.0);
    }
}
