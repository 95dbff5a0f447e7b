//! # Anima Core
//!
//! The leaf state model of the affective engine: clamped vectors, regulator
//! parameters, validated event boundaries, a primitive-only snapshot
//! container, configuration, and the injectable jitter source.
//!
//! Nothing here evolves state — the subsystems in `anima_engine` do that.
//! This crate guarantees the shapes: every bounded field carries a
//! `normalize()` that repairs non-finite values and clamps into the
//! documented range.

pub mod affect;
pub mod config;
pub mod error;
pub mod event;
pub mod params;
pub mod rng;
pub mod sentiment;
pub mod snapshot;

pub use affect::{AffectVector, Dimension, GoalState, StimulusDeltas};
pub use config::EngineConfig;
pub use error::CoreError;
pub use event::{CycleInput, RawEvent, Strategy, ThreatEvent};
pub use params::ClampParameters;
pub use rng::{JitterSource, SeededJitter, ZeroJitter};
pub use snapshot::{
    EngineSnapshot, MirrorSnapshot, TensionSnapshot, ThreatSnapshot, TraceSnapshot,
};
