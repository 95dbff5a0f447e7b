//! # Anima Engine
//!
//! The deterministic state-evolution core: a clamped 4D affect vector under
//! per-cycle drift and goal gravity, a scalar mood with regulator-tuned
//! inertia, per-actor threat memory, lexical belief tension, and advisory
//! pressure signals.
//!
//! ## Cycle order
//!
//! One `Engine::step` advances every subsystem exactly once:
//! 1. Consume the stimulus (threat event or text)
//! 2. Threat decay, unless a threat event arrived this cycle
//! 3. Drift + goal gravity on the affect vector; mood blend on text cycles
//! 4. Emotional-memory trace update
//! 5. Mirror sample + evaluation (re-tunes the clamp parameters)
//! 6. Pressure computation over the post-cycle view
//!
//! Single-threaded and synchronous; every operation is O(1) or O(window).

pub mod decay;
pub mod engine;
pub mod mirror;
pub mod pressure;
pub mod tension;
pub mod threat;
pub mod trace;

pub use decay::DecayEngine;
pub use engine::{CycleOutcome, Engine};
pub use mirror::{MirrorReading, MirrorRegulator, MirrorSignature};
pub use pressure::{PressureController, PressureSignal, PressureView};
pub use tension::{detect_contradiction, BeliefTensionTracker};
pub use threat::{ActorThreat, ThreatMemory, ThreatState};
pub use trace::EmotionTrace;
