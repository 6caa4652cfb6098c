//! # laminar-depth
//!
//! Streamline-based laminar depth of cells in segmented cortical slices.
//!
//! ## Overview
//!
//! Cortex is organised in layers running parallel to the pial surface, but
//! slices are curved and often only partially reconstructed. Instead of
//! straight-line distances, depth is measured along streamlines of a depth
//! field that runs from white matter to pia:
//!
//! - **Layer depth**: streamline distance to the containing layer's pia
//!   surface, normalized by the layer thickness through the point
//! - **Cortical depth**: streamline distance to the column's top boundary
//!   plus the reference thickness of any layers missing above it,
//!   normalized by the corrected cortex thickness
//!
//! ## Pipeline
//!
//! ```text
//!   SegmentationOutput ──► assemble_layers ──► LayerGeometry
//!                                                  │
//!   ReferenceTables ──► missing_layer_correction ◄─┘
//!                                 │
//!                          ColumnCorrection
//!                                 │
//!   VectorField ──► DepthCalculator ──► compute_depths ──► SliceDepths
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use laminar_depth::{DepthConfig, SliceInput, depths_for_slice};
//! use std::path::Path;
//!
//! let config = DepthConfig::load_default()?;
//! let input = SliceInput::load(Path::new("slice.yaml"))?;
//! let depths = depths_for_slice(&input, &config, &config.reference)?;
//!
//! for (cell, result) in &depths.results {
//!     println!("{}: {} at {:.3}", cell, result.layer, result.normalized_depth);
//! }
//! ```
//!
//! ## Coordinate System
//!
//! Segmentation and cell positions arrive in image pixels and are scaled by
//! the slice resolution into slice units (microns). The depth field is
//! already in slice units.

#![warn(missing_docs)]

// Geometry primitives
pub mod core;

// Unified configuration
pub mod config;

pub mod error;

// Layer assembly and column correction
pub mod layers;

// Depth field contracts and implementations
pub mod field;

pub mod streamline;

pub mod depth;

pub mod batch;

// Slice files and reports
pub mod io;

pub mod pipeline;

// Re-export commonly used types
pub use self::core::{Bounds, Point2D, Polygon, Polyline, Segment2D};

pub use config::{ConfigLoadError, DepthConfig, InputSection, StreamlineConfig};

pub use error::{DepthError, ErrorKind, Result};

pub use layers::{
    ColumnCorrection, Layer, LayerGeometry, NamedPath, ReferenceLayer, ReferenceLayerDepths,
    ReferenceTables, SegmentationOutput, Species, assemble_layers, missing_layer_correction,
};

pub use field::{FnField, GridField, GridFieldData, ScalarDepthField, UniformField, VectorField};

pub use streamline::{Boundary, Heading, StreamlineHit, StreamlineIntegrator};

pub use depth::{DepthCalculator, DepthResult, LayerLookup, locate_layer};

pub use batch::{SliceDepths, compute_depths};

pub use io::{IoError, SliceInput, SliceReport};

pub use pipeline::{depths_for_slice, slice_resolution};
