//! Streamline integration settings.

use serde::{Deserialize, Serialize};

use super::error::ConfigLoadError;

/// Step size and iteration budget for the streamline integrator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamlineConfig {
    /// Integration step length in slice units (microns).
    /// Smaller steps follow curved boundaries more closely at higher cost.
    /// Default: 1.0
    pub step_size: f64,

    /// Maximum steps per streamline before giving up.
    /// Bounds the work per point and catches unreachable targets.
    /// Default: 1000
    pub max_iter: usize,
}

impl Default for StreamlineConfig {
    fn default() -> Self {
        Self {
            step_size: 1.0,
            max_iter: 1000,
        }
    }
}

impl StreamlineConfig {
    /// Create a config with explicit values.
    pub fn new(step_size: f64, max_iter: usize) -> Self {
        Self {
            step_size,
            max_iter,
        }
    }

    /// Longest path a single streamline can trace.
    #[inline]
    pub fn max_distance(&self) -> f64 {
        self.step_size * self.max_iter as f64
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(ConfigLoadError::Invalid(format!(
                "step_size must be finite and > 0, got {}",
                self.step_size
            )));
        }
        if self.max_iter == 0 {
            return Err(ConfigLoadError::Invalid(
                "max_iter must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
