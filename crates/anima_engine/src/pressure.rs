//! Advisory pressure signals against stagnation and passive convergence.
//!
//! The controller compares the current cycle's view of the state against a
//! retained previous-cycle value copy and emits additive, non-persisted
//! signals. It never mutates the state it observes.

use anima_core::event::Strategy;
use serde::{Deserialize, Serialize};

/// What the controller observes each cycle. A plain value type: the retained
/// baseline is a true copy, never a reference into live state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureView {
    pub mood: f64,
    pub last_strategy: Option<Strategy>,
    pub memory_factor: f64,
    pub belief_tension: f64,
}

/// Advisory output, recomputed fresh on every call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PressureSignal {
    pub goal_pressure: f64,
    pub exploration_pressure: f64,
    /// 1.0 = allow output, 0.0 = suppress. Binary, no partial values.
    pub output_gate: f64,
}

impl Default for PressureSignal {
    fn default() -> Self {
        Self {
            goal_pressure: 0.0,
            exploration_pressure: 0.0,
            output_gate: 1.0,
        }
    }
}

/// Stagnation/exploration/gating heuristics with one retained baseline.
#[derive(Debug, Default)]
pub struct PressureController {
    last_view: Option<PressureView>,
}

impl PressureController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the pressure signals for this cycle.
    ///
    /// The first-ever call has no baseline to compare against: it records
    /// one and returns the neutral signal.
    pub fn compute(&mut self, view: &PressureView) -> PressureSignal {
        let mut signal = PressureSignal::default();

        let Some(prev) = self.last_view else {
            self.last_view = Some(*view);
            return signal;
        };

        // Stuck far from center: mood is displaced but barely moving.
        let mood_delta = (view.mood - prev.mood).abs();
        if (view.mood - 0.5).abs() > 0.2 && mood_delta < 0.05 {
            signal.goal_pressure += 0.4;
            tracing::debug!(mood = view.mood, "pressure: goal stagnation");
        }

        // Passive strategy repeated across consecutive cycles.
        if let (Some(current), Some(previous)) = (view.last_strategy, prev.last_strategy) {
            if current == previous && current.is_passive() {
                signal.goal_pressure += 0.25;
                tracing::debug!(strategy = current.as_str(), "pressure: strategy repetition");
            }
        }

        // Sinking low: mood falling while already near the floor.
        if view.mood < prev.mood && view.mood < 0.2 {
            signal.goal_pressure += 0.2;
            tracing::debug!(mood = view.mood, "pressure: negative drift");
        }

        // Exploration vs exploitation.
        if view.memory_factor < 0.3 {
            signal.exploration_pressure += 0.3;
        }

        // Output gating.
        if view.belief_tension > 0.8 {
            signal.output_gate = 0.0;
        }

        self.last_view = Some(*view);
        signal
    }
}
