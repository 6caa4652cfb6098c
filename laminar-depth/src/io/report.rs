//! JSON depth report.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{IoError, SliceInput};
use crate::batch::SliceDepths;
use crate::depth::DepthResult;
use crate::layers::Species;

/// Depth results for one slice, as written to disk.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SliceReport {
    /// Species of the slice
    pub species: Species,
    /// Slice units per pixel used for scaling
    pub resolution: f64,
    /// Cells in the input
    pub cell_count: usize,
    /// Cells with a result
    pub success_count: usize,
    /// Cells that failed
    pub error_count: usize,
    /// Results keyed by cell id
    pub results: BTreeMap<String, DepthResult>,
    /// Failure messages in processing order
    pub errors: Vec<String>,
}

impl SliceReport {
    /// Build a report from batch output.
    pub fn new(input: &SliceInput, resolution: f64, depths: SliceDepths) -> Self {
        Self {
            species: input.species,
            resolution,
            cell_count: input.cells.len(),
            success_count: depths.results.len(),
            error_count: depths.errors.len(),
            results: depths.results,
            errors: depths.errors,
        }
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String, IoError> {
        serde_json::to_string_pretty(self).map_err(|e| IoError::Parse(e.to_string()))
    }

    /// Write as JSON
    pub fn save(&self, path: &Path) -> Result<(), IoError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| IoError::Io(format!("{}: {}", path.display(), e)))
    }

    /// Read a saved report
    pub fn load(path: &Path) -> Result<Self, IoError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| IoError::Io(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&contents).map_err(|e| IoError::Parse(e.to_string()))
    }
}
