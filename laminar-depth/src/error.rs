//! Error types for laminar depth computation.
//!
//! Errors fall into four kinds (see [`ErrorKind`]). Geometry input errors are
//! fatal for a whole slice; every other kind is scoped to a single point and
//! is recovered by the batch orchestrator.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, DepthError>;

/// Broad classification of a [`DepthError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or inconsistent segmentation input. Fatal for the slice.
    GeometryInput,
    /// Point-level layer lookup failure.
    LayerDepth,
    /// Streamline did not reach its target boundary.
    Integration,
    /// Zero thickness, zero gradient or non-finite value at a point.
    DegenerateGeometry,
}

/// Laminar depth error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DepthError {
    /// Surface name is not `<layer>_<pia|wm>`.
    #[error("Malformed surface name '{0}': expected '<layer>_pia' or '<layer>_wm'")]
    MalformedSurfaceName(String),

    /// Surface refers to a layer with no polygon.
    #[error("Surface '{surface}' refers to unknown layer '{layer}'")]
    UnknownSurfaceLayer {
        /// Full surface name
        surface: String,
        /// Layer part of the name
        layer: String,
    },

    /// Polygon cannot be used for containment tests.
    #[error("Invalid polygon '{name}': {reason}")]
    InvalidPolygon {
        /// Polygon name
        name: String,
        /// What is wrong with it
        reason: String,
    },

    /// Polyline has too few vertices or non-finite coordinates.
    #[error("Invalid polyline '{name}': {reason}")]
    InvalidPolyline {
        /// Polyline name
        name: String,
        /// What is wrong with it
        reason: String,
    },

    /// No layer carries both a pia and a wm surface.
    #[error("No layer has both pia and wm surfaces")]
    NoCompleteLayers,

    /// Complete layer has no entry in the species reference table.
    #[error("Layer '{layer}' is not in the {species} reference table")]
    UnknownReferenceLayer {
        /// Layer name
        layer: String,
        /// Species name
        species: String,
    },

    /// Species has no reference table.
    #[error("Unknown species '{0}'")]
    UnknownSpecies(String),

    /// Other malformed input (field grids, scale factors).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Point lies in no layer polygon.
    #[error("Point not found in any layer")]
    PointNotInLayer,

    /// Point lies in more than one layer polygon.
    #[error("Overlapping layers: {0:?}")]
    OverlappingLayers(Vec<String>),

    /// Containing layer lacks a pia or wm surface.
    #[error("Can't run streamlines for layer '{0}' with missing edges")]
    MissingSurfaces(String),

    /// Streamline exhausted its iteration budget.
    #[error("Streamline did not reach {target} within {max_iter} steps")]
    IntegrationExhausted {
        /// Boundary being traced to
        target: String,
        /// Iteration budget that was used up
        max_iter: usize,
    },

    /// Field vector is zero-length or non-finite at a point.
    #[error("Degenerate field at ({x:.3}, {y:.3})")]
    DegenerateField {
        /// X coordinate of the evaluation point
        x: f64,
        /// Y coordinate of the evaluation point
        y: f64,
    },

    /// Layer or cortex thickness came out as zero.
    #[error("Zero {0} thickness")]
    ZeroThickness(&'static str),

    /// NaN or infinite value where a finite number is required.
    #[error("Non-finite value for {0}")]
    NonFiniteValue(&'static str),
}

impl DepthError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedSurfaceName(_)
            | Self::UnknownSurfaceLayer { .. }
            | Self::InvalidPolygon { .. }
            | Self::InvalidPolyline { .. }
            | Self::NoCompleteLayers
            | Self::UnknownReferenceLayer { .. }
            | Self::UnknownSpecies(_)
            | Self::InvalidInput(_) => ErrorKind::GeometryInput,
            Self::PointNotInLayer | Self::OverlappingLayers(_) | Self::MissingSurfaces(_) => {
                ErrorKind::LayerDepth
            }
            Self::IntegrationExhausted { .. } => ErrorKind::Integration,
            Self::DegenerateField { .. } | Self::ZeroThickness(_) | Self::NonFiniteValue(_) => {
                ErrorKind::DegenerateGeometry
            }
        }
    }

    /// Get a short error code for logging.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedSurfaceName(_) => "MALFORMED_SURFACE_NAME",
            Self::UnknownSurfaceLayer { .. } => "UNKNOWN_SURFACE_LAYER",
            Self::InvalidPolygon { .. } => "INVALID_POLYGON",
            Self::InvalidPolyline { .. } => "INVALID_POLYLINE",
            Self::NoCompleteLayers => "NO_COMPLETE_LAYERS",
            Self::UnknownReferenceLayer { .. } => "UNKNOWN_REFERENCE_LAYER",
            Self::UnknownSpecies(_) => "UNKNOWN_SPECIES",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::PointNotInLayer => "NOT_IN_LAYER",
            Self::OverlappingLayers(_) => "OVERLAPPING_LAYERS",
            Self::MissingSurfaces(_) => "MISSING_SURFACES",
            Self::IntegrationExhausted { .. } => "INTEGRATION_EXHAUSTED",
            Self::DegenerateField { .. } => "DEGENERATE_FIELD",
            Self::ZeroThickness(_) => "ZERO_THICKNESS",
            Self::NonFiniteValue(_) => "NON_FINITE",
        }
    }

    /// Check if this error only affects one point (the batch can continue).
    pub fn is_recoverable(&self) -> bool {
        self.kind() != ErrorKind::GeometryInput
    }
}
