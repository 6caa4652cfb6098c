//! Top-level DepthConfig and its loaders.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ConfigLoadError;
use super::streamline::StreamlineConfig;
use crate::layers::ReferenceTables;

/// Default config file location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "configs/config.yaml";

/// Input interpretation settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSection {
    /// Slice units per pixel, used when a slice file gives none.
    /// Default: 1.0
    pub resolution: f64,
}

impl Default for InputSection {
    fn default() -> Self {
        Self { resolution: 1.0 }
    }
}

/// Full laminar depth configuration loaded from YAML.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DepthConfig {
    /// Streamline integration settings
    #[serde(default)]
    pub streamline: StreamlineConfig,

    /// Input settings
    #[serde(default)]
    pub input: InputSection,

    /// Reference layer tables per species
    #[serde(default)]
    pub reference: ReferenceTables,
}

impl DepthConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from the default config path, or defaults if it is absent
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        serde_yaml::to_string(self).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        self.streamline.validate()?;
        if !(self.input.resolution.is_finite() && self.input.resolution > 0.0) {
            return Err(ConfigLoadError::Invalid(format!(
                "input.resolution must be finite and > 0, got {}",
                self.input.resolution
            )));
        }
        self.reference.validate().map_err(ConfigLoadError::Invalid)
    }
}
