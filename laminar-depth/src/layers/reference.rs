//! Species reference layer depth tables.
//!
//! Each table lists the canonical layers of a species from pia to white
//! matter with the expected depth of their pia and wm sides. The tables are
//! only consulted for layers missing from a reconstructed column.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DepthError, Result};

/// Prefix used by segmentation layer names (`Layer2/3` → `2/3`).
pub const LAYER_PREFIX: &str = "Layer";

/// Canonical label of a segmentation layer name.
///
/// ```
/// use laminar_depth::layers::canonical_label;
/// assert_eq!(canonical_label("Layer2/3"), "2/3");
/// assert_eq!(canonical_label("6a"), "6a");
/// ```
pub fn canonical_label(layer_name: &str) -> &str {
    layer_name.strip_prefix(LAYER_PREFIX).unwrap_or(layer_name)
}

/// Species with a built-in reference table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    /// Human middle temporal gyrus
    Human,
    /// Mouse visual cortex
    Mouse,
}

impl Species {
    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Human => "human",
            Species::Mouse => "mouse",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Species {
    type Err = DepthError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(Species::Human),
            "mouse" => Ok(Species::Mouse),
            _ => Err(DepthError::UnknownSpecies(s.to_string())),
        }
    }
}

/// Expected depth range of one canonical layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLayer {
    /// Canonical label (`1`, `2/3`, `6a`, ...)
    pub layer: String,
    /// Depth of the pia-facing side (microns from pia)
    pub pia_side: f64,
    /// Depth of the wm-facing side (microns from pia)
    pub wm_side: f64,
}

impl ReferenceLayer {
    /// Create a reference entry.
    pub fn new(layer: impl Into<String>, pia_side: f64, wm_side: f64) -> Self {
        Self {
            layer: layer.into(),
            pia_side,
            wm_side,
        }
    }

    /// Expected thickness.
    #[inline]
    pub fn thickness(&self) -> f64 {
        self.wm_side - self.pia_side
    }
}

/// Ordered (pia → wm) reference table for one species.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceLayerDepths {
    layers: Vec<ReferenceLayer>,
}

impl ReferenceLayerDepths {
    /// Create a table from entries already in pia → wm order.
    pub fn new(layers: Vec<ReferenceLayer>) -> Self {
        Self { layers }
    }

    /// Built-in mouse visual cortex table.
    pub fn mouse() -> Self {
        Self::new(vec![
            ReferenceLayer::new("1", 0.0, 115.1112491335),
            ReferenceLayer::new("2/3", 115.1112491335, 333.4658190171),
            ReferenceLayer::new("4", 333.4658190171, 453.6227158132),
            ReferenceLayer::new("5", 453.6227158132, 687.6482650269),
            ReferenceLayer::new("6a", 687.6482650269, 883.1308910545),
            ReferenceLayer::new("6b", 883.1308910545, 922.5861720311),
        ])
    }

    /// Built-in human middle temporal gyrus table.
    pub fn human_mtg() -> Self {
        Self::new(vec![
            ReferenceLayer::new("1", 0.0, 250.0),
            ReferenceLayer::new("2", 250.0, 440.0),
            ReferenceLayer::new("3", 440.0, 1300.0),
            ReferenceLayer::new("4", 1300.0, 1550.0),
            ReferenceLayer::new("5", 1550.0, 2180.0),
            ReferenceLayer::new("6", 2180.0, 2910.0),
        ])
    }

    /// Entries in pia → wm order.
    pub fn layers(&self) -> &[ReferenceLayer] {
        &self.layers
    }

    /// Position of a canonical label in the table.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.layer == label)
    }

    /// Summed thickness of the entries in `range`.
    pub fn thickness_of(&self, range: std::ops::Range<usize>) -> f64 {
        self.layers[range].iter().map(ReferenceLayer::thickness).sum()
    }

    /// Check that thicknesses are finite and non-negative and labels unique.
    pub fn validate(&self) -> std::result::Result<(), String> {
        for (i, layer) in self.layers.iter().enumerate() {
            let thickness = layer.thickness();
            if !(thickness.is_finite() && thickness >= 0.0) {
                return Err(format!(
                    "layer {} has invalid thickness {}",
                    layer.layer, thickness
                ));
            }
            if self.layers[..i].iter().any(|l| l.layer == layer.layer) {
                return Err(format!("layer {} listed twice", layer.layer));
            }
        }
        Ok(())
    }
}

/// Reference tables for every supported species.
///
/// Loaded once as configuration and passed by reference to the corrector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReferenceTables {
    /// Human table
    #[serde(default = "ReferenceLayerDepths::human_mtg")]
    pub human: ReferenceLayerDepths,
    /// Mouse table
    #[serde(default = "ReferenceLayerDepths::mouse")]
    pub mouse: ReferenceLayerDepths,
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self {
            human: ReferenceLayerDepths::human_mtg(),
            mouse: ReferenceLayerDepths::mouse(),
        }
    }
}

impl ReferenceTables {
    /// Table for a species.
    pub fn get(&self, species: Species) -> &ReferenceLayerDepths {
        match species {
            Species::Human => &self.human,
            Species::Mouse => &self.mouse,
        }
    }

    /// Validate every table.
    pub fn validate(&self) -> std::result::Result<(), String> {
        self.human.validate().map_err(|e| format!("human: {}", e))?;
        self.mouse.validate().map_err(|e| format!("mouse: {}", e))
    }
}
