use serde::{Deserialize, Serialize};

use crate::engine::histogram::DEFAULT_HISTOGRAM_BUCKETS;
use crate::engine::sweep::DEFAULT_SWEEP_BUCKETS;

/// Resolution of the derived views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Buckets per threshold sweep curve.
    pub sweep_buckets: usize,
    /// Buckets per marginal density histogram.
    pub histogram_buckets: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sweep_buckets: DEFAULT_SWEEP_BUCKETS,
            histogram_buckets: DEFAULT_HISTOGRAM_BUCKETS,
        }
    }
}

impl EngineConfig {
    /// Read a (possibly partial) JSON object; missing keys keep their defaults.
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}
