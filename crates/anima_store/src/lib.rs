//! # Anima Store
//!
//! One-file JSON persistence for the engine snapshot.
//!
//! Two contracts, nothing more:
//! - `load_or_default` always hands back a usable snapshot — a missing or
//!   corrupt file degrades to defaults with a warning, never an error.
//! - `save` reports failure upward without retrying; the caller's in-memory
//!   state is untouched either way.

use anima_core::snapshot::EngineSnapshot;
use anyhow::{Context, Result};
use std::path::Path;

/// Load a snapshot from `path`. Always returns a valid, range-repaired
/// snapshot: missing file, unreadable file and unparseable contents all
/// degrade to the default.
pub fn load_or_default<P: AsRef<Path>>(path: P) -> EngineSnapshot {
    let path = path.as_ref();

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::info!("no state at {} ({e}), starting fresh", path.display());
            return EngineSnapshot::default();
        }
    };

    match serde_json::from_str::<EngineSnapshot>(&content) {
        Ok(mut snap) => {
            snap.normalize();
            snap
        }
        Err(e) => {
            tracing::warn!(
                "state file {} is corrupt ({e}), starting fresh",
                path.display()
            );
            EngineSnapshot::default()
        }
    }
}

/// Save a snapshot to `path` as pretty JSON. Writes to a temp file in the
/// same directory and renames it into place, so a failed save never leaves
/// a truncated state file behind.
pub fn save<P: AsRef<Path>>(path: P, snapshot: &EngineSnapshot) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create state dir {}", parent.display()))?;
        }
    }

    let json = serde_json::to_string_pretty(snapshot).context("failed to serialize snapshot")?;

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json)
        .with_context(|| format!("failed to write state file {}", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("failed to move state file into {}", path.display()))?;

    tracing::debug!("state saved to {}", path.display());
    Ok(())
}
