//! Rendering configuration.

use serde::{Deserialize, Serialize};

/// Rendering configuration supplied by the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// Apply the addition and removal colors to changed lines.
    pub color: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self { color: true }
    }
}
