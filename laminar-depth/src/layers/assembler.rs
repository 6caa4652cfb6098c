//! Layer geometry assembly from segmentation output.
//!
//! Segmentation hands us named polygons (one per layer) and named surfaces.
//! Surfaces are either the column boundaries `pia` / `wm`, or per-layer
//! boundaries named `<layer>_pia` / `<layer>_wm`. Everything arrives in raw
//! pixel coordinates and is scaled here.

use std::collections::BTreeMap;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::{Point2D, Polygon, Polyline};
use crate::error::{DepthError, Result};

/// Name of the column pia surface.
pub const PIA_SURFACE: &str = "pia";
/// Name of the column white matter surface.
pub const WM_SURFACE: &str = "wm";

/// A named path in raw (pixel) coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NamedPath {
    /// Polygon or surface name
    pub name: String,
    /// Vertices as `[x, y]` pairs
    pub path: Vec<[f64; 2]>,
}

impl NamedPath {
    /// Create a named path.
    pub fn new(name: impl Into<String>, path: Vec<[f64; 2]>) -> Self {
        Self {
            name: name.into(),
            path,
        }
    }

    fn scaled_points(&self, scale: f64) -> Vec<Point2D> {
        self.path
            .iter()
            .map(|&p| Point2D::from(p).scaled(scale))
            .collect()
    }
}

/// Segmentation record for one slice image.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentationOutput {
    /// Layer footprints
    #[serde(default)]
    pub polygons: Vec<NamedPath>,
    /// Layer and column boundary surfaces
    #[serde(default)]
    pub surfaces: Vec<NamedPath>,
}

/// Which side of a layer a surface bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceSide {
    /// Side facing the pia
    Pia,
    /// Side facing white matter
    Wm,
}

impl FromStr for SurfaceSide {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pia" => Ok(SurfaceSide::Pia),
            "wm" => Ok(SurfaceSide::Wm),
            _ => Err(()),
        }
    }
}

/// Split a per-layer surface name into layer and side.
///
/// The side is taken after the last underscore, so layer names may not
/// themselves be followed by `_pia` or `_wm`.
pub fn parse_surface_name(name: &str) -> Result<(&str, SurfaceSide)> {
    let (layer, side) = name
        .rsplit_once('_')
        .ok_or_else(|| DepthError::MalformedSurfaceName(name.to_string()))?;
    let side = side
        .parse::<SurfaceSide>()
        .map_err(|_| DepthError::MalformedSurfaceName(name.to_string()))?;
    if layer.is_empty() {
        return Err(DepthError::MalformedSurfaceName(name.to_string()));
    }
    Ok((layer, side))
}

/// A named cortical layer.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    /// Layer name as given by segmentation (e.g. `Layer2/3`)
    pub name: String,
    /// Layer footprint
    pub bounds: Polygon,
    /// Boundary facing the pia, if segmented
    pub pia_surface: Option<Polyline>,
    /// Boundary facing white matter, if segmented
    pub wm_surface: Option<Polyline>,
}

impl Layer {
    /// Create a layer with no surfaces.
    pub fn new(name: impl Into<String>, bounds: Polygon) -> Self {
        Self {
            name: name.into(),
            bounds,
            pia_surface: None,
            wm_surface: None,
        }
    }

    /// Builder: set the pia-facing surface.
    pub fn with_pia_surface(mut self, surface: Polyline) -> Self {
        self.pia_surface = Some(surface);
        self
    }

    /// Builder: set the wm-facing surface.
    pub fn with_wm_surface(mut self, surface: Polyline) -> Self {
        self.wm_surface = Some(surface);
        self
    }

    /// Both surfaces are present, so depth can be computed within this layer.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.pia_surface.is_some() && self.wm_surface.is_some()
    }

    /// Both surfaces, or `MissingSurfaces`.
    pub fn surfaces(&self) -> Result<(&Polyline, &Polyline)> {
        match (&self.pia_surface, &self.wm_surface) {
            (Some(pia), Some(wm)) => Ok((pia, wm)),
            _ => Err(DepthError::MissingSurfaces(self.name.clone())),
        }
    }

    fn surface_mut(&mut self, side: SurfaceSide) -> &mut Option<Polyline> {
        match side {
            SurfaceSide::Pia => &mut self.pia_surface,
            SurfaceSide::Wm => &mut self.wm_surface,
        }
    }
}

/// Assembled layers plus the column boundaries for one slice.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayerGeometry {
    /// Layers keyed by name
    pub layers: BTreeMap<String, Layer>,
    /// Column pia boundary, if segmented.
    ///
    /// Not read by depth calculation, which always traces to
    /// `ColumnCorrection::top_path` and `bottom_path`.
    pub pia_path: Option<Polyline>,
    /// Column white matter boundary, if segmented. Not read by depth
    /// calculation, see `pia_path`.
    pub wm_path: Option<Polyline>,
}

impl LayerGeometry {
    /// Build geometry from layers that are already in slice units.
    pub fn from_layers(layers: impl IntoIterator<Item = Layer>) -> Self {
        Self {
            layers: layers.into_iter().map(|l| (l.name.clone(), l)).collect(),
            pia_path: None,
            wm_path: None,
        }
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// No layers at all.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layers with both surfaces.
    pub fn complete_layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.values().filter(|l| l.is_complete())
    }
}

/// Turn a segmentation record into scaled layer geometry.
///
/// Every polygon becomes exactly one layer. Duplicate names, surfaces with
/// malformed names, and surfaces referring to layers without a polygon are
/// all fatal: they indicate a broken segmentation that cannot be defaulted.
pub fn assemble_layers(output: &SegmentationOutput, scale: f64) -> Result<LayerGeometry> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(DepthError::InvalidInput(format!(
            "scale factor must be finite and > 0, got {}",
            scale
        )));
    }

    let mut geometry = LayerGeometry::default();

    for polygon in &output.polygons {
        let bounds = Polygon::new(&polygon.name, polygon.scaled_points(scale))?;
        if geometry.layers.contains_key(&polygon.name) {
            return Err(DepthError::InvalidPolygon {
                name: polygon.name.clone(),
                reason: "duplicate layer polygon".to_string(),
            });
        }
        geometry
            .layers
            .insert(polygon.name.clone(), Layer::new(polygon.name.clone(), bounds));
    }

    for surface in &output.surfaces {
        let path = Polyline::named(&surface.name, surface.scaled_points(scale))?;
        let name = surface.name.as_str();

        let slot = match name {
            PIA_SURFACE => &mut geometry.pia_path,
            WM_SURFACE => &mut geometry.wm_path,
            _ => {
                let (layer_name, side) = parse_surface_name(name)?;
                let layer = geometry.layers.get_mut(layer_name).ok_or_else(|| {
                    DepthError::UnknownSurfaceLayer {
                        surface: name.to_string(),
                        layer: layer_name.to_string(),
                    }
                })?;
                layer.surface_mut(side)
            }
        };

        if slot.is_some() {
            return Err(DepthError::InvalidPolyline {
                name: name.to_string(),
                reason: "duplicate surface".to_string(),
            });
        }
        *slot = Some(path);
    }

    debug!(
        "Assembled {} layers ({} complete), pia path: {}, wm path: {}",
        geometry.len(),
        geometry.complete_layers().count(),
        geometry.pia_path.is_some(),
        geometry.wm_path.is_some()
    );

    Ok(geometry)
}
