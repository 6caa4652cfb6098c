//! Whole-slice pipeline: segmentation and cells in, depths out.

use log::{debug, info};

use crate::batch::{SliceDepths, compute_depths};
use crate::config::DepthConfig;
use crate::depth::DepthCalculator;
use crate::error::{DepthError, Result};
use crate::field::GridField;
use crate::io::SliceInput;
use crate::layers::{ReferenceTables, assemble_layers, missing_layer_correction};

/// Resolution used for a slice: its own, or the configured fallback.
pub fn slice_resolution(input: &SliceInput, config: &DepthConfig) -> Result<f64> {
    let resolution = input.resolution.unwrap_or(config.input.resolution);
    if !(resolution.is_finite() && resolution > 0.0) {
        return Err(DepthError::InvalidInput(format!(
            "resolution must be finite and > 0, got {}",
            resolution
        )));
    }
    Ok(resolution)
}

/// Compute depths for every cell of a slice.
///
/// Assembles the layer geometry, derives the column correction, builds the
/// sampled field, then runs the batch. Malformed segmentation or field data
/// fails the whole slice; per-cell failures end up in the error list.
pub fn depths_for_slice(
    input: &SliceInput,
    config: &DepthConfig,
    tables: &ReferenceTables,
) -> Result<SliceDepths> {
    let resolution = slice_resolution(input, config)?;

    let geometry = assemble_layers(&input.segmentation, resolution)?;
    let correction = missing_layer_correction(&geometry, input.species, tables)?;
    let field = GridField::from_data(&input.field)?;
    debug!("Depth field: {:?}", field);

    let mut calculator = DepthCalculator::new(&geometry, &correction, &field, config.streamline);
    if field.has_depth() {
        calculator = calculator.with_depth_field(&field);
    }

    let depths = compute_depths(&calculator, input.scaled_cells(resolution))?;
    info!(
        "Slice ({}, {} layers): {} cells, {} succeeded, {} failed",
        input.species,
        geometry.len(),
        depths.total(),
        depths.results.len(),
        depths.errors.len()
    );
    Ok(depths)
}
