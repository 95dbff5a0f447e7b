//! The cycle driver.
//!
//! One `Engine` value owns every subsystem and advances all of them exactly
//! once per `step`. The in-cycle order is fixed: consume the stimulus, decay
//! or accumulate threat, drift the affect vector, fold the mood into the
//! trace, sample and evaluate the mirror regulator, then compute pressure —
//! each later subsystem observes the post-decay value.
//!
//! The engine is single-threaded and synchronous. A host embedding it in a
//! concurrent context must serialize access externally (one exclusive lock
//! per agent instance).

use crate::decay::DecayEngine;
use crate::mirror::{MirrorReading, MirrorRegulator};
use crate::pressure::{PressureController, PressureSignal, PressureView};
use crate::tension::BeliefTensionTracker;
use crate::threat::ThreatMemory;
use crate::trace::EmotionTrace;
use anima_core::affect::{AffectVector, GoalState, StimulusDeltas};
use anima_core::config::EngineConfig;
use anima_core::event::{CycleInput, Strategy, ThreatEvent};
use anima_core::rng::{JitterSource, SeededJitter};
use anima_core::sentiment;
use anima_core::snapshot::EngineSnapshot;
use anima_core::CoreError;

/// Report returned by each cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleOutcome {
    pub cycle: u64,
    pub mood: f64,
    pub mirror: MirrorReading,
    pub pressure: PressureSignal,
    pub threat_level: f64,
    pub belief_tension: f64,
}

/// The single explicitly-owned state handle for one agent.
pub struct Engine {
    config: EngineConfig,
    cycles: u64,
    mood: f64,
    affect: AffectVector,
    goal: GoalState,
    decay: DecayEngine,
    mirror: MirrorRegulator,
    threat: ThreatMemory,
    pressure: PressureController,
    trace: EmotionTrace,
    belief_tension: f64,
    contradictions: u64,
    last_strategy: Option<Strategy>,
}

impl Engine {
    /// Build a fresh engine from configuration. The jitter source is seeded
    /// from the config, or from OS entropy when no seed is set.
    pub fn new(config: EngineConfig) -> Self {
        let jitter: Box<dyn JitterSource> = match config.seed {
            Some(seed) => Box::new(SeededJitter::from_seed(seed)),
            None => Box::new(SeededJitter::from_entropy()),
        };
        Self::with_jitter(config, jitter)
    }

    /// Build with an explicit jitter source (tests inject `ZeroJitter`).
    pub fn with_jitter(config: EngineConfig, jitter: Box<dyn JitterSource>) -> Self {
        let affect = AffectVector::new(
            config.affect.awareness,
            config.affect.emotion,
            config.affect.balance,
            config.affect.depth,
        );
        Self {
            mood: config.affect.mood.clamp(0.0, 1.0),
            affect,
            goal: config.goal,
            decay: DecayEngine::new(config.drift.clone(), jitter),
            mirror: MirrorRegulator::new(&config.mirror, config.clamp),
            threat: ThreatMemory::new(config.threat.decay_rate),
            pressure: PressureController::new(),
            trace: EmotionTrace::default(),
            belief_tension: 0.0,
            contradictions: 0,
            last_strategy: None,
            cycles: 0,
            config,
        }
    }

    /// Advance every subsystem exactly once.
    pub fn step(&mut self, input: Option<CycleInput>) -> CycleOutcome {
        self.cycles += 1;

        // --- consume the stimulus ---
        let mut received_threat = false;
        let mut mood_stimulus: Option<f64> = None;

        match input {
            Some(CycleInput::Event(raw)) => {
                if let Some(event) = ThreatEvent::from_raw(&raw) {
                    self.threat.record_event(&event, self.mood);
                    received_threat = true;
                }
            }
            Some(CycleInput::Text(text)) => {
                let (tension, count) =
                    BeliefTensionTracker::evaluate(&text, self.belief_tension, self.contradictions);
                self.belief_tension = tension;
                self.contradictions = count;
                mood_stimulus = Some(sentiment::mood_stimulus(&text));
            }
            Some(CycleInput::Stimulus(s)) => {
                let s = if s.is_finite() { s.clamp(0.0, 1.0) } else { 0.5 };
                mood_stimulus = Some(s);
            }
            None => {}
        }

        // --- threat decays only on event-free cycles ---
        if !received_threat {
            self.threat.advance_without_event();
        }

        // --- decay: drift the vector, then goal gravity ---
        self.decay.drift(&mut self.affect, None);
        self.decay.goal_gravity(&mut self.affect, &self.goal);

        if let Some(stimulus) = mood_stimulus {
            self.mood = self
                .decay
                .update_mood(self.mood, stimulus, self.mirror.params());
        }

        self.trace.update(self.mood);

        // --- mirror: sample the post-decay mood, then evaluate ---
        self.mirror.record_sample(self.mood);
        let mirror = self.mirror.evaluate();

        // --- pressure: advisory signals off the post-cycle view ---
        let view = PressureView {
            mood: self.mood,
            last_strategy: self.last_strategy,
            memory_factor: self.mirror.params().memory_factor,
            belief_tension: self.belief_tension,
        };
        let pressure = self.pressure.compute(&view);

        CycleOutcome {
            cycle: self.cycles,
            mood: self.mood,
            mirror,
            pressure,
            threat_level: self.threat.threat_level(),
            belief_tension: self.belief_tension,
        }
    }

    /// Apply an explicit per-dimension stimulus to the affect vector,
    /// outside the per-cycle drift. Saturates; never fails.
    pub fn apply_stimulus(&mut self, deltas: &StimulusDeltas) {
        self.decay.apply_stimulus(&mut self.affect, deltas);
    }

    /// Record the strategy the host selected for this cycle. The pressure
    /// controller compares consecutive values.
    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.last_strategy = Some(strategy);
    }

    // --- reset operations (command-collaborator contract) ---

    /// Vector and scalar mood back to configured defaults.
    pub fn reset_affect(&mut self) {
        self.affect = AffectVector::new(
            self.config.affect.awareness,
            self.config.affect.emotion,
            self.config.affect.balance,
            self.config.affect.depth,
        );
        self.mood = self.config.affect.mood.clamp(0.0, 1.0);
    }

    /// Threat level to zero; per-actor counts survive.
    pub fn reset_threat(&mut self) {
        self.threat.reset_level();
    }

    /// Forget per-actor history too.
    pub fn reset_threat_actors(&mut self) {
        self.threat.reset_actors();
    }

    /// The one external reset the contradiction counter allows.
    pub fn reset_tension(&mut self) {
        self.belief_tension = 0.0;
        self.contradictions = 0;
    }

    // --- accessors ---

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn mood(&self) -> f64 {
        self.mood
    }

    pub fn affect(&self) -> &AffectVector {
        &self.affect
    }

    pub fn clamp_params(&self) -> &anima_core::ClampParameters {
        self.mirror.params()
    }

    pub fn threat_state(&self) -> &crate::threat::ThreatState {
        self.threat.state()
    }

    pub fn belief_tension(&self) -> f64 {
        self.belief_tension
    }

    pub fn contradictions(&self) -> u64 {
        self.contradictions
    }

    pub fn emotion_trace(&self) -> &EmotionTrace {
        &self.trace
    }

    /// Export a deep, alias-free, primitive-only copy of the full state.
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            cycles: self.cycles,
            mood: self.mood,
            affect: self.affect,
            clamp: *self.mirror.params(),
            mirror: self.mirror.to_snapshot(),
            threat: self.threat.to_snapshot(),
            tension: BeliefTensionTracker::to_snapshot(self.belief_tension, self.contradictions),
            emotion_trace: self.trace.to_snapshot(),
            last_strategy: self.last_strategy.map(|s| s.as_str().to_string()),
            last_updated: chrono::Utc::now().timestamp(),
        }
    }

    /// Rebuild a live engine from an exported snapshot, re-validating every
    /// bounded field. The pressure baseline intentionally starts empty: the
    /// first post-restore compute is neutral.
    pub fn restore(config: EngineConfig, mut snap: EngineSnapshot) -> Result<Self, CoreError> {
        snap.normalize();

        if snap.mirror.window.len() > config.mirror.window.max(64) {
            return Err(CoreError::InvalidSnapshot(format!(
                "mirror window of {} exceeds capacity {}",
                snap.mirror.window.len(),
                config.mirror.window
            )));
        }

        let jitter: Box<dyn JitterSource> = match config.seed {
            Some(seed) => Box::new(SeededJitter::from_seed(seed)),
            None => Box::new(SeededJitter::from_entropy()),
        };

        let mut engine = Self::with_jitter(config, jitter);
        engine.cycles = snap.cycles;
        engine.mood = snap.mood;
        engine.affect = snap.affect;
        engine.mirror =
            MirrorRegulator::restore(&engine.config.mirror, snap.clamp, &snap.mirror);
        engine.threat = ThreatMemory::restore(engine.config.threat.decay_rate, &snap.threat);
        engine.belief_tension = snap.tension.belief_tension;
        engine.contradictions = snap.tension.contradictions;
        engine.trace = EmotionTrace::restore(&snap.emotion_trace);
        engine.last_strategy = snap.last_strategy.as_deref().and_then(Strategy::parse);
        Ok(engine)
    }

    /// Reflection line combining the mood tone with the latest mirror
    /// reading, for display collaborators.
    pub fn reflection(&self) -> String {
        let tone = if self.mood > 0.7 {
            "bright and responsive"
        } else if self.mood > 0.55 {
            "steady and calm"
        } else if self.mood > 0.4 {
            "reserved but focused"
        } else {
            "dull and withdrawn"
        };

        let reading = self.mirror.last_reading();
        let meta = if reading.coefficient > 0.75 {
            "Its internal rhythm feels synchronized."
        } else if reading.coefficient < 0.35 {
            "It senses internal drift and adapts carefully."
        } else {
            "Its feedback loops remain neutral."
        };

        format!("The agent feels {tone}. {meta} {}", reading.summary)
    }
}
