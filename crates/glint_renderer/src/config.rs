//! Trace configuration.

use crate::Color;
use serde::{Deserialize, Serialize};

/// Default budget for reflection and refraction bounces.
pub const MAX_RECURSION_DEPTH: u32 = 5;

/// Trace configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Maximum reflection/refraction recursion depth
    pub max_depth: u32,
    /// Color returned when a ray hits nothing
    pub background: Color,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_RECURSION_DEPTH,
            background: Color::ZERO,
        }
    }
}
