//! Missing-layer correction for partially reconstructed columns.
//!
//! A section often contains only some of the cortical layers with usable
//! surfaces. Column depth is then traced to the pia side of the topmost
//! complete layer and the wm side of the bottommost one, and the reference
//! thickness of every canonical layer beyond those is added back on.
//!
//! ```text
//!   canonical:  1   2/3   4   5   6a   6b
//!   complete:        ■    ■   ■
//!                   ▲            ▲
//!              top_path      bottom_path
//!   pia_extra = |1|       wm_extra = |6a| + |6b|
//! ```

use log::debug;

use super::assembler::LayerGeometry;
use super::reference::{ReferenceTables, Species, canonical_label};
use crate::core::Polyline;
use crate::error::{DepthError, Result};

/// Column boundaries and extra distances for one slice.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnCorrection {
    /// Pia surface of the topmost complete layer
    pub top_path: Polyline,
    /// Wm surface of the bottommost complete layer
    pub bottom_path: Polyline,
    /// Reference thickness of canonical layers above the top layer
    pub pia_extra_distance: f64,
    /// Reference thickness of canonical layers below the bottom layer
    pub wm_extra_distance: f64,
    /// Name of the topmost complete layer
    pub top_layer: String,
    /// Name of the bottommost complete layer
    pub bottom_layer: String,
}

/// Compute column boundaries and missing-layer distances.
///
/// Fails with `NoCompleteLayers` if no layer has both surfaces, and with
/// `UnknownReferenceLayer` if a complete layer is not in the species table.
pub fn missing_layer_correction(
    geometry: &LayerGeometry,
    species: Species,
    tables: &ReferenceTables,
) -> Result<ColumnCorrection> {
    let table = tables.get(species);

    let mut complete = geometry
        .complete_layers()
        .map(|layer| {
            table
                .index_of(canonical_label(&layer.name))
                .map(|idx| (idx, layer))
                .ok_or_else(|| DepthError::UnknownReferenceLayer {
                    layer: layer.name.clone(),
                    species: species.to_string(),
                })
        })
        .collect::<Result<Vec<_>>>()?;
    complete.sort_by_key(|(idx, _)| *idx);

    let (Some(&(top_idx, top)), Some(&(bottom_idx, bottom))) = (complete.first(), complete.last())
    else {
        return Err(DepthError::NoCompleteLayers);
    };

    let (top_path, _) = top.surfaces()?;
    let (_, bottom_path) = bottom.surfaces()?;

    let pia_extra_distance = table.thickness_of(0..top_idx);
    let wm_extra_distance = table.thickness_of(bottom_idx + 1..table.layers().len());

    debug!(
        "Column spans {}..{} ({} complete layers), extra pia {:.1}, extra wm {:.1}",
        top.name,
        bottom.name,
        complete.len(),
        pia_extra_distance,
        wm_extra_distance
    );

    Ok(ColumnCorrection {
        top_path: top_path.clone(),
        bottom_path: bottom_path.clone(),
        pia_extra_distance,
        wm_extra_distance,
        top_layer: top.name.clone(),
        bottom_layer: bottom.name.clone(),
    })
}
