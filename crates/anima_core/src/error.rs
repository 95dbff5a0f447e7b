//! Typed errors for the few paths that can actually fail.
//!
//! The cycle path never fails: malformed input is repaired to neutral
//! defaults and the cycle proceeds. What remains is structural.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A snapshot re-entering the engine was structurally unusable even
    /// after range repair (e.g. a mirror window far beyond capacity).
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}
