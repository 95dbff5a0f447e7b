use crate::affect::GoalState;
use crate::params::ClampParameters;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub affect: AffectDefaults,
    pub clamp: ClampParameters,
    pub goal: GoalState,
    pub threat: ThreatConfig,
    pub mirror: MirrorConfig,
    pub drift: DriftConfig,
    /// Seed for the jitter source; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl EngineConfig {
    /// Load config from a TOML file, falling back to defaults for missing
    /// fields. After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("failed to read config file: {}", path.as_ref().display()))?;
        let mut config: EngineConfig =
            toml::from_str(&content).with_context(|| "failed to parse TOML config")?;
        config.apply_env_overrides();
        config.normalize();
        Ok(config)
    }

    /// Try to load from path; if the file is missing or invalid, return
    /// defaults with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("config file not found or invalid ({e}), using defaults");
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg.normalize();
                cfg
            }
        }
    }

    /// Apply environment variable overrides on top of file-based config.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("ANIMA_SEED") {
            if let Ok(n) = v.parse() {
                self.seed = Some(n);
            }
        }
        if let Ok(v) = std::env::var("ANIMA_GOAL_STRENGTH") {
            if let Ok(n) = v.parse() {
                self.goal.strength = n;
            }
        }
        if let Ok(v) = std::env::var("ANIMA_THREAT_DECAY") {
            if let Ok(n) = v.parse() {
                self.threat.decay_rate = n;
            }
        }
    }

    /// Clamp every configured value into its documented range.
    fn normalize(&mut self) {
        self.clamp.normalize();
        self.affect.normalize();
        if !self.threat.decay_rate.is_finite() || self.threat.decay_rate < 0.0 {
            self.threat.decay_rate = ThreatConfig::default().decay_rate;
        }
        if self.mirror.window == 0 {
            self.mirror.window = MirrorConfig::default().window;
        }
        if self.mirror.min_samples == 0 {
            self.mirror.min_samples = MirrorConfig::default().min_samples;
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

/// Starting point of the affect vector and scalar mood.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AffectDefaults {
    pub awareness: f64,
    pub emotion: f64,
    pub balance: f64,
    pub depth: f64,
    pub mood: f64,
}

impl Default for AffectDefaults {
    fn default() -> Self {
        Self {
            awareness: 0.7,
            emotion: 0.3,
            balance: 0.5,
            depth: 0.5,
            mood: 0.5,
        }
    }
}

impl AffectDefaults {
    fn normalize(&mut self) {
        for v in [
            &mut self.awareness,
            &mut self.emotion,
            &mut self.balance,
            &mut self.depth,
            &mut self.mood,
        ] {
            if !v.is_finite() {
                *v = 0.5;
            }
            *v = v.clamp(0.0, 1.0);
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThreatConfig {
    /// Subtracted from the threat level on every event-free cycle.
    pub decay_rate: f64,
}

impl Default for ThreatConfig {
    fn default() -> Self {
        Self { decay_rate: 0.15 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MirrorConfig {
    /// Rolling window capacity.
    pub window: usize,
    /// Samples required before a reading is meaningful.
    pub min_samples: usize,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            window: 20,
            min_samples: 6,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    /// Per-dimension jitter amplitude on an input-free cycle.
    pub jitter: f64,
    /// Wobble amplitude near a goal target.
    pub wobble: f64,
    /// Distance under which the wobble kicks in.
    pub wobble_band: f64,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            jitter: 0.02,
            wobble: 0.01,
            wobble_band: 0.015,
        }
    }
}
