//! Property-based tests for the state-evolution core.
//!
//! Verifies the invariants that hold at every observable point: threat level
//! never negative and exact per-actor counts, monotone decay, bounded clamp
//! parameters under any mirror call sequence, bounded tension, and a
//! primitive-only snapshot export.

use anima_core::config::EngineConfig;
use anima_core::event::{CycleInput, RawEvent, Strategy};
use anima_core::params::{ClampParameters, MAX_CLAMP_TOL, MIN_CLAMP_TOL};
use anima_core::snapshot::EngineSnapshot;
use anima_engine::pressure::{PressureController, PressureView};
use anima_engine::{BeliefTensionTracker, Engine, MirrorRegulator, ThreatMemory};
use proptest::prelude::*;
use proptest::strategy::Strategy as _;
use std::collections::BTreeMap;

// ============================================================================
// Strategies
// ============================================================================

/// An arbitrary driver input: threat events (including malformed ones),
/// unrelated events, text lines, or nothing.
fn arb_input() -> impl proptest::strategy::Strategy<Value = Option<CycleInput>> {
    prop_oneof![
        2 => Just(None),
        3 => (arb_actor(), 0.0f64..=5.0).prop_map(|(actor, intensity)| {
            Some(CycleInput::Event(RawEvent::threat(&actor, intensity)))
        }),
        1 => arb_actor().prop_map(|actor| {
            Some(CycleInput::Event(RawEvent {
                source: "chat".to_string(),
                intent: "greeting".to_string(),
                actor: Some(actor),
                intensity: None,
            }))
        }),
        2 => arb_text().prop_map(|t| Some(CycleInput::Text(t))),
    ]
}

fn arb_actor() -> impl proptest::strategy::Strategy<Value = String> {
    prop_oneof![
        Just("p1".to_string()),
        Just("p2".to_string()),
        Just("watcher".to_string()),
        "[a-z]{1,8}",
    ]
}

fn arb_text() -> impl proptest::strategy::Strategy<Value = String> {
    prop_oneof![
        Just("hello world".to_string()),
        Just("I want to stop but I can't".to_string()),
        Just("yes but also no".to_string()),
        Just("a good day".to_string()),
        Just("a bad day".to_string()),
        "[a-z ]{0,40}",
    ]
}

fn arb_clamp() -> impl proptest::strategy::Strategy<Value = ClampParameters> {
    (
        0.0f64..=1.0,
        0.0f64..=1.0,
        MIN_CLAMP_TOL..=MAX_CLAMP_TOL,
        0.0f64..=1.0,
    )
        .prop_map(|(memory_factor, reaction_strength, clamp_tolerance, clamp_sensitivity)| {
            ClampParameters {
                memory_factor,
                reaction_strength,
                clamp_tolerance,
                clamp_sensitivity,
            }
        })
}

fn seeded_config(seed: u64) -> EngineConfig {
    let mut config = EngineConfig::default();
    config.seed = Some(seed);
    config
}

// ============================================================================
// Threat properties
// ============================================================================

proptest! {
    /// **Core invariant**: threat level is never negative, for any event
    /// sequence, at every cycle.
    #[test]
    fn threat_level_never_negative(
        seed in 0u64..1000,
        inputs in proptest::collection::vec(arb_input(), 0..60),
    ) {
        let mut engine = Engine::new(seeded_config(seed));
        for input in inputs {
            let out = engine.step(input);
            prop_assert!(out.threat_level >= 0.0,
                "threat level went negative: {}", out.threat_level);
        }
    }

    /// Per-actor counts are exact and independent of interleaved events for
    /// other actors.
    #[test]
    fn actor_counts_are_exact(
        seed in 0u64..1000,
        inputs in proptest::collection::vec(arb_input(), 0..60),
    ) {
        let mut engine = Engine::new(seeded_config(seed));
        let mut expected: BTreeMap<String, u64> = BTreeMap::new();

        for input in inputs {
            if let Some(CycleInput::Event(raw)) = &input {
                if raw.source == "npc_engine" && raw.intent == "threat" {
                    let actor = raw.actor.clone().unwrap_or_else(|| "unknown".to_string());
                    *expected.entry(actor).or_default() += 1;
                }
            }
            engine.step(input);
        }

        let snap = engine.snapshot();
        prop_assert_eq!(&snap.threat.actors, &expected);
    }

    /// Across decay-only cycles the threat level is non-increasing.
    #[test]
    fn decay_is_monotonic(
        initial_events in proptest::collection::vec(0.0f64..=3.0, 1..10),
        decay_cycles in 1usize..40,
    ) {
        let mut engine = Engine::new(seeded_config(7));
        for intensity in initial_events {
            engine.step(Some(CycleInput::Event(RawEvent::threat("p1", intensity))));
        }

        let mut level = engine.snapshot().threat.threat_level;
        for _ in 0..decay_cycles {
            let out = engine.step(None);
            prop_assert!(out.threat_level <= level + 1e-12,
                "threat level rose on a decay cycle: {} -> {}", level, out.threat_level);
            level = out.threat_level;
        }
    }

    /// For otherwise-identical single-event histories, a higher intensity
    /// never yields a lower threat level.
    #[test]
    fn threat_monotone_in_intensity(
        low in 0.0f64..=5.0,
        high in 5.0f64..=10.0,
    ) {
        let mut engine_low = ThreatMemory::new(0.15);
        let mut engine_high = ThreatMemory::new(0.15);

        let ev_low = anima_core::event::ThreatEvent { actor: "p1".to_string(), intensity: low };
        let ev_high = anima_core::event::ThreatEvent { actor: "p1".to_string(), intensity: high };

        engine_low.record_event(&ev_low, 0.5);
        engine_high.record_event(&ev_high, 0.5);

        prop_assert!(engine_high.threat_level() >= engine_low.threat_level());
    }
}

// ============================================================================
// Mirror properties
// ============================================================================

proptest! {
    /// With fewer than 6 recorded samples, evaluate() always returns a zero
    /// coefficient and changes nothing.
    #[test]
    fn mirror_insufficient_data_is_inert(
        params in arb_clamp(),
        samples in proptest::collection::vec(0.0f64..=1.0, 0..6),
    ) {
        let config = anima_core::config::MirrorConfig::default();
        let mut regulator = MirrorRegulator::new(&config, params);
        let before = *regulator.params();

        for s in samples {
            regulator.record_sample(s);
            let reading = regulator.evaluate();
            prop_assert_eq!(reading.coefficient, 0.0);
            prop_assert_eq!(reading.summary.as_str(), "insufficient data");
        }
        prop_assert_eq!(*regulator.params(), before);
    }

    /// For any sequence of record/evaluate calls starting from any valid
    /// parameters, all four clamp parameters stay within documented bounds
    /// and the coefficient stays in [0, 1].
    #[test]
    fn mirror_params_always_in_bounds(
        params in arb_clamp(),
        samples in proptest::collection::vec(0.0f64..=1.0, 0..120),
    ) {
        let config = anima_core::config::MirrorConfig::default();
        let mut regulator = MirrorRegulator::new(&config, params);

        for s in samples {
            regulator.record_sample(s);
            let reading = regulator.evaluate();
            prop_assert!(reading.coefficient >= 0.0 && reading.coefficient <= 1.0);
            prop_assert!(regulator.params().in_bounds(),
                "params escaped bounds: {:?}", regulator.params());
        }
    }

    /// Tolerance and sensitivity are never mutated by evaluation.
    #[test]
    fn mirror_never_touches_tolerance(
        params in arb_clamp(),
        samples in proptest::collection::vec(0.0f64..=1.0, 0..60),
    ) {
        let config = anima_core::config::MirrorConfig::default();
        let mut regulator = MirrorRegulator::new(&config, params);
        let tol = regulator.params().clamp_tolerance;
        let sens = regulator.params().clamp_sensitivity;

        for s in samples {
            regulator.record_sample(s);
            regulator.evaluate();
        }
        prop_assert_eq!(regulator.params().clamp_tolerance, tol);
        prop_assert_eq!(regulator.params().clamp_sensitivity, sens);
    }
}

// ============================================================================
// Tension properties
// ============================================================================

proptest! {
    /// Tension stays in [0, 1] and the contradiction counter never decreases
    /// for any text sequence.
    #[test]
    fn tension_bounded_and_count_monotone(
        texts in proptest::collection::vec(arb_text(), 0..60),
    ) {
        let mut tension = 0.0;
        let mut count = 0u64;
        for text in texts {
            let (t, c) = BeliefTensionTracker::evaluate(&text, tension, count);
            prop_assert!((0.0..=1.0).contains(&t), "tension out of range: {}", t);
            prop_assert!(c >= count, "contradiction counter decreased");
            tension = t;
            count = c;
        }
    }
}

// ============================================================================
// Pressure properties
// ============================================================================

proptest! {
    /// Pressure signals are bounded and the gate is strictly binary; the
    /// first call never fails and is neutral.
    #[test]
    fn pressure_signals_bounded(
        moods in proptest::collection::vec(0.0f64..=1.0, 1..40),
        memory_factor in 0.0f64..=1.0,
        tension in 0.0f64..=1.0,
        strategy in proptest::option::of(prop_oneof![
            Just(Strategy::Reflect),
            Just(Strategy::Idle),
            Just(Strategy::Stabilize),
            Just(Strategy::Explore),
            Just(Strategy::Express),
        ]),
    ) {
        let mut controller = PressureController::new();
        let mut first = true;
        for mood in moods {
            let view = PressureView {
                mood,
                last_strategy: strategy,
                memory_factor,
                belief_tension: tension,
            };
            let signal = controller.compute(&view);
            if first {
                prop_assert_eq!(signal.goal_pressure, 0.0);
                prop_assert_eq!(signal.exploration_pressure, 0.0);
                prop_assert_eq!(signal.output_gate, 1.0);
                first = false;
            }
            prop_assert!((0.0..=0.85).contains(&signal.goal_pressure));
            prop_assert!(signal.exploration_pressure == 0.0 || signal.exploration_pressure == 0.3);
            prop_assert!(signal.output_gate == 0.0 || signal.output_gate == 1.0);
        }
    }
}

// ============================================================================
// Snapshot properties
// ============================================================================

proptest! {
    /// The exported state is primitive-only: it survives a JSON round-trip
    /// losslessly and every bounded field is in range, whatever the engine
    /// went through.
    #[test]
    fn snapshot_is_primitive_and_bounded(
        seed in 0u64..1000,
        inputs in proptest::collection::vec(arb_input(), 0..60),
    ) {
        let mut engine = Engine::new(seeded_config(seed));
        for input in inputs {
            engine.step(input);
        }

        let snap = engine.snapshot();
        let json = serde_json::to_value(&snap).unwrap();
        let back: EngineSnapshot = serde_json::from_value(json.clone()).unwrap();
        prop_assert_eq!(&snap, &back);

        // Every leaf of the export is a JSON primitive, array or object —
        // nothing opaque survives serialization, so this is structural.
        prop_assert!(json.is_object());

        prop_assert!((0.0..=1.0).contains(&snap.mood));
        for (_, v) in snap.affect.dims() {
            prop_assert!((0.0..=1.0).contains(&v));
        }
        prop_assert!(snap.clamp.in_bounds());
        prop_assert!(snap.threat.threat_level >= 0.0);
        prop_assert!((0.0..=1.0).contains(&snap.tension.belief_tension));
        prop_assert!(snap.mirror.window.len() <= 20);
    }

    /// Restoring a snapshot and re-exporting preserves the observable state.
    #[test]
    fn snapshot_restore_is_lossless(
        seed in 0u64..1000,
        inputs in proptest::collection::vec(arb_input(), 0..40),
    ) {
        let config = seeded_config(seed);
        let mut engine = Engine::new(config.clone());
        for input in inputs {
            engine.step(input);
        }

        let snap = engine.snapshot();
        let restored = Engine::restore(config, snap.clone()).unwrap();
        let snap2 = restored.snapshot();

        prop_assert_eq!(snap.mood, snap2.mood);
        prop_assert_eq!(snap.affect, snap2.affect);
        prop_assert_eq!(snap.clamp, snap2.clamp);
        prop_assert_eq!(snap.mirror, snap2.mirror);
        prop_assert_eq!(snap.threat, snap2.threat);
        prop_assert_eq!(snap.tension, snap2.tension);
        prop_assert_eq!(snap.cycles, snap2.cycles);
    }
}

// ============================================================================
// Determinism
// ============================================================================

proptest! {
    /// Two engines with the same seed and the same inputs are identical at
    /// every observable point.
    #[test]
    fn seeded_engines_agree(
        seed in 0u64..1000,
        inputs in proptest::collection::vec(arb_input(), 0..40),
    ) {
        let mut a = Engine::new(seeded_config(seed));
        let mut b = Engine::new(seeded_config(seed));

        for input in inputs {
            let oa = a.step(input.clone());
            let ob = b.step(input);
            prop_assert_eq!(oa, ob);
        }
    }
}
