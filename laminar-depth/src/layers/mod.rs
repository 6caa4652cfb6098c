//! Layer geometry: assembly, reference tables and missing-layer correction.
//!
//! - [`assembler`]: segmentation output → [`LayerGeometry`]
//! - [`reference`]: per-species [`ReferenceLayerDepths`]
//! - [`correction`]: [`ColumnCorrection`] for partially reconstructed columns

pub mod assembler;
pub mod correction;
pub mod reference;

pub use assembler::{
    Layer, LayerGeometry, NamedPath, SegmentationOutput, SurfaceSide, assemble_layers,
    parse_surface_name,
};
pub use correction::{ColumnCorrection, missing_layer_correction};
pub use reference::{
    ReferenceLayer, ReferenceLayerDepths, ReferenceTables, Species, canonical_label,
};
