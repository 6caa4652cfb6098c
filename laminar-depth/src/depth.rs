//! Per-point laminar depth computation.
//!
//! For one point the calculator:
//! 1. finds the single layer whose footprint contains it,
//! 2. traces four streamlines: to the layer's pia and wm surfaces, and to
//!    the column's top and bottom paths,
//! 3. adds the missing-layer corrections to the column distances,
//! 4. normalizes within the layer and within the column.
//!
//! ```text
//!   top_path ───────────────────────────  ┐
//!                  │ column_pia            │ + pia_extra = absolute_depth
//!   layer pia ─────┼─────────────────────  │
//!                  │ layer_pia             ┘
//!                  ● point
//!                  │ layer_wm
//!   layer wm ──────┼─────────────────────
//!                  │ column_wm  + wm_extra = wm_distance
//!   bottom_path ───┴─────────────────────
//! ```

use serde::{Deserialize, Serialize};

use crate::config::StreamlineConfig;
use crate::core::Point2D;
use crate::error::{DepthError, Result};
use crate::field::{ScalarDepthField, VectorField};
use crate::layers::{ColumnCorrection, Layer, LayerGeometry};
use crate::streamline::{Boundary, Heading, StreamlineIntegrator};

/// Outcome of looking up the layer containing a point.
#[derive(Clone, Debug, PartialEq)]
pub enum LayerLookup<'a> {
    /// Exactly one layer contains the point
    Found(&'a Layer),
    /// No layer contains the point
    NotFound,
    /// Several layers contain the point (overlapping segmentation)
    Ambiguous(Vec<&'a str>),
}

impl<'a> LayerLookup<'a> {
    /// The unique layer, or the matching error.
    pub fn into_result(self) -> Result<&'a Layer> {
        match self {
            LayerLookup::Found(layer) => Ok(layer),
            LayerLookup::NotFound => Err(DepthError::PointNotInLayer),
            LayerLookup::Ambiguous(names) => Err(DepthError::OverlappingLayers(
                names.into_iter().map(str::to_string).collect(),
            )),
        }
    }
}

/// Find the layer containing `point` (boundary included).
///
/// Every layer is tested; overlap is reported rather than resolved.
pub fn locate_layer(geometry: &LayerGeometry, point: Point2D) -> LayerLookup<'_> {
    let mut matches: Vec<&Layer> = geometry
        .layers
        .values()
        .filter(|layer| layer.bounds.contains(point))
        .collect();

    match matches.len() {
        0 => LayerLookup::NotFound,
        1 => LayerLookup::Found(matches.remove(0)),
        _ => LayerLookup::Ambiguous(matches.iter().map(|l| l.name.as_str()).collect()),
    }
}

/// Laminar depth metrics for one point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DepthResult {
    /// Point the metrics were computed for (slice units)
    pub position: Point2D,
    /// Name of the containing layer
    pub layer: String,
    /// Streamline distance to the layer's pia surface
    pub layer_depth: f64,
    /// Layer pia-to-wm streamline length through the point
    pub layer_thickness: f64,
    /// `layer_depth / layer_thickness`
    pub normalized_layer_depth: f64,
    /// Distance to the column pia, including missing layers above
    pub absolute_depth: f64,
    /// `absolute_depth + wm_distance`
    pub cortex_thickness: f64,
    /// `absolute_depth / cortex_thickness`
    pub normalized_depth: f64,
    /// Distance to the column wm, including missing layers below
    pub wm_distance: f64,
    /// Unit vector towards the pia at the point
    pub pia_direction: Point2D,
    /// Depth potential at the point, for diagnostics only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_depth: Option<f64>,
}

/// Computes [`DepthResult`]s against shared, read-only slice geometry.
pub struct DepthCalculator<'a> {
    geometry: &'a LayerGeometry,
    correction: &'a ColumnCorrection,
    vector_field: &'a dyn VectorField,
    depth_field: Option<&'a dyn ScalarDepthField>,
    integrator: StreamlineIntegrator,
}

impl<'a> DepthCalculator<'a> {
    /// Create a calculator for one slice.
    pub fn new(
        geometry: &'a LayerGeometry,
        correction: &'a ColumnCorrection,
        vector_field: &'a dyn VectorField,
        config: StreamlineConfig,
    ) -> Self {
        Self {
            geometry,
            correction,
            vector_field,
            depth_field: None,
            integrator: StreamlineIntegrator::new(config),
        }
    }

    /// Builder: report the depth potential alongside each result.
    pub fn with_depth_field(mut self, depth_field: &'a dyn ScalarDepthField) -> Self {
        self.depth_field = Some(depth_field);
        self
    }

    /// Slice geometry in use.
    pub fn geometry(&self) -> &LayerGeometry {
        self.geometry
    }

    /// Compute all depth metrics for a point.
    ///
    /// # Errors
    /// - `PointNotInLayer` / `OverlappingLayers` from the layer lookup
    /// - `MissingSurfaces` if the containing layer is incomplete
    /// - `IntegrationExhausted` / `DegenerateField` from any streamline
    /// - `ZeroThickness` / `NonFiniteValue` for degenerate results
    pub fn compute(&self, point: Point2D) -> Result<DepthResult> {
        if !point.is_finite() {
            return Err(DepthError::NonFiniteValue("position"));
        }

        let layer = locate_layer(self.geometry, point).into_result()?;
        let (layer_pia, layer_wm) = layer.surfaces()?;

        let pia_name = format!("{} pia surface", layer.name);
        let wm_name = format!("{} wm surface", layer.name);
        let field = self.vector_field;

        let layer_pia_distance = self
            .integrator
            .trace(point, field, Boundary::new(&pia_name, layer_pia), Heading::Pia)?
            .distance;
        let layer_wm_distance = self
            .integrator
            .trace(point, field, Boundary::new(&wm_name, layer_wm), Heading::Wm)?
            .distance;
        let column_pia_distance = self
            .integrator
            .trace(
                point,
                field,
                Boundary::new("column top path", &self.correction.top_path),
                Heading::Pia,
            )?
            .distance;
        let column_wm_distance = self
            .integrator
            .trace(
                point,
                field,
                Boundary::new("column bottom path", &self.correction.bottom_path),
                Heading::Wm,
            )?
            .distance;

        let absolute_depth = column_pia_distance + self.correction.pia_extra_distance;
        let wm_distance = column_wm_distance + self.correction.wm_extra_distance;

        let layer_thickness = layer_pia_distance + layer_wm_distance;
        let cortex_thickness = absolute_depth + wm_distance;
        let normalized_layer_depth = normalize(layer_pia_distance, layer_thickness, "layer")?;
        let normalized_depth = normalize(absolute_depth, cortex_thickness, "cortex")?;

        let pia_direction = field
            .vector(point)
            .normalized()
            .ok_or(DepthError::DegenerateField {
                x: point.x,
                y: point.y,
            })?;

        let field_depth = self
            .depth_field
            .map(|f| f.depth(point))
            .filter(|d| d.is_finite());

        Ok(DepthResult {
            position: point,
            layer: layer.name.clone(),
            layer_depth: layer_pia_distance,
            layer_thickness,
            normalized_layer_depth,
            absolute_depth,
            cortex_thickness,
            normalized_depth,
            wm_distance,
            pia_direction,
            field_depth,
        })
    }
}

/// `part / whole`, refusing zero or non-finite denominators.
fn normalize(part: f64, whole: f64, what: &'static str) -> Result<f64> {
    if !(part.is_finite() && whole.is_finite()) {
        return Err(DepthError::NonFiniteValue(what));
    }
    if whole <= 0.0 {
        return Err(DepthError::ZeroThickness(what));
    }
    Ok(part / whole)
}
