//! Configuration types.

use serde::{Deserialize, Serialize};

use crate::tail::DEFAULT_LINES;

/// Defaults loaded from a TOML file. Command-line flags override them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TailConfig {
    /// Number of lines shown when `-n` is not given.
    pub lines: usize,
    /// Suppress headers when tailing several files.
    pub quiet: bool,
}

impl Default for TailConfig {
    fn default() -> Self {
        Self {
            lines: DEFAULT_LINES,
            quiet: false,
        }
    }
}
