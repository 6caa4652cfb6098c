//! Slice input file.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::IoError;
use crate::core::Point2D;
use crate::field::GridFieldData;
use crate::layers::{SegmentationOutput, Species};

/// Everything needed to compute depths for one slice image.
///
/// Segmentation paths and cell positions are raw pixel coordinates; the
/// field grid is already in slice units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SliceInput {
    /// Species, selecting the reference table
    pub species: Species,

    /// Slice units per pixel (falls back to the configured resolution)
    #[serde(default)]
    pub resolution: Option<f64>,

    /// Layer polygons and surfaces
    pub segmentation: SegmentationOutput,

    /// Cell id to raw `[x, y]` position
    #[serde(default)]
    pub cells: BTreeMap<String, [f64; 2]>,

    /// Depth field sampled by the field builder
    pub field: GridFieldData,
}

impl SliceInput {
    /// Load from a `.json` file, or YAML for any other extension.
    pub fn load(path: &Path) -> Result<Self, IoError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| IoError::Io(format!("{}: {}", path.display(), e)))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&contents)
        } else {
            Self::from_yaml(&contents)
        }
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, IoError> {
        serde_yaml::from_str(yaml).map_err(|e| IoError::Parse(e.to_string()))
    }

    /// Parse from JSON string
    pub fn from_json(json: &str) -> Result<Self, IoError> {
        serde_json::from_str(json).map_err(|e| IoError::Parse(e.to_string()))
    }

    /// Save as YAML
    pub fn save_yaml(&self, path: &Path) -> Result<(), IoError> {
        let yaml = serde_yaml::to_string(self).map_err(|e| IoError::Parse(e.to_string()))?;
        std::fs::write(path, yaml).map_err(|e| IoError::Io(e.to_string()))
    }

    /// Cell positions scaled to slice units.
    pub fn scaled_cells(&self, resolution: f64) -> impl Iterator<Item = (String, Point2D)> + '_ {
        self.cells
            .iter()
            .map(move |(id, &p)| (id.clone(), Point2D::from(p).scaled(resolution)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLICE_YAML: &str = r#"
species: mouse
resolution: 0.5
segmentation:
  polygons:
    - name: Layer1
      path: [[0, 0], [10, 0], [10, 10], [0, 10]]
  surfaces:
    - name: Layer1_pia
      path: [[0, 0], [10, 0]]
cells:
  c2: [4, 6]
  c1: [2, 3]
field:
  origin: [0.0, 0.0]
  spacing: 1.0
  width: 2
  height: 1
  dx: [0.0, null]
  dy: [-1.0, null]
"#;

    #[test]
    fn test_parse_yaml() {
        let input = SliceInput::from_yaml(SLICE_YAML).unwrap();
        assert_eq!(input.species, Species::Mouse);
        assert_eq!(input.resolution, Some(0.5));
        assert_eq!(input.segmentation.polygons.len(), 1);
        assert_eq!(input.field.dx, vec![Some(0.0), None]);
        assert!(input.field.depth.is_none());

        let cells: Vec<_> = input.scaled_cells(0.5).collect();
        assert_eq!(cells[0], ("c1".to_string(), Point2D::new(1.0, 1.5)));
        assert_eq!(cells[1], ("c2".to_string(), Point2D::new(2.0, 3.0)));
    }

    #[test]
    fn test_parse_json_matches_yaml() {
        let input = SliceInput::from_yaml(SLICE_YAML).unwrap();
        let json = serde_json::to_string(&input).unwrap();
        assert_eq!(SliceInput::from_json(&json).unwrap(), input);
    }

    #[test]
    fn test_unknown_species_rejected() {
        let yaml = SLICE_YAML.replace("species: mouse", "species: rat");
        assert!(matches!(SliceInput::from_yaml(&yaml), Err(IoError::Parse(_))));
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let input = SliceInput::from_yaml(SLICE_YAML).unwrap();

        let json_path = dir.path().join("slice.json");
        std::fs::write(&json_path, serde_json::to_string_pretty(&input).unwrap()).unwrap();
        assert_eq!(SliceInput::load(&json_path).unwrap(), input);

        let yaml_path = dir.path().join("slice.yml");
        input.save_yaml(&yaml_path).unwrap();
        assert_eq!(SliceInput::load(&yaml_path).unwrap(), input);

        assert!(matches!(
            SliceInput::load(&dir.path().join("missing.yaml")),
            Err(IoError::Io(_))
        ));
    }
}
