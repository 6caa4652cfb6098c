//! Shared fixtures for laminar depth integration tests.
//!
//! Two synthetic columns:
//! - rectangular: straight horizontal layers stacked along +y, pia at the
//!   smallest y, paired with a uniform field pointing towards -y
//! - curved: concentric annular sectors around the origin, pia on the
//!   outermost arc, paired with a radial field pointing outwards

#![allow(dead_code)]

use laminar_depth::{
    FnField, GridField, GridFieldData, NamedPath, Point2D, ReferenceLayer, ReferenceLayerDepths,
    ReferenceTables, SegmentationOutput, UniformField,
};

/// Width of the rectangular column.
pub const COLUMN_WIDTH: f64 = 100.0;

/// Initialize logging once for a test binary.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn rect_path(x0: f64, x1: f64, y0: f64, y1: f64) -> Vec<[f64; 2]> {
    vec![[x0, y0], [x1, y0], [x1, y1], [x0, y1]]
}

/// Rectangular column from `(name, top_y, bottom_y)` triples.
///
/// Every layer gets both surfaces unless its name is in `incomplete`, in
/// which case only the pia surface is segmented.
pub fn rectangular_column(layers: &[(&str, f64, f64)], incomplete: &[&str]) -> SegmentationOutput {
    let mut output = SegmentationOutput::default();
    for &(name, y0, y1) in layers {
        output
            .polygons
            .push(NamedPath::new(name, rect_path(0.0, COLUMN_WIDTH, y0, y1)));
        output.surfaces.push(NamedPath::new(
            format!("{}_pia", name),
            vec![[0.0, y0], [COLUMN_WIDTH, y0]],
        ));
        if !incomplete.contains(&name) {
            output.surfaces.push(NamedPath::new(
                format!("{}_wm", name),
                vec![[0.0, y1], [COLUMN_WIDTH, y1]],
            ));
        }
    }
    output
}

fn arc(radius: f64, from_deg: f64, to_deg: f64, segments: usize) -> Vec<[f64; 2]> {
    (0..=segments)
        .map(|i| {
            let a = (from_deg + (to_deg - from_deg) * i as f64 / segments as f64).to_radians();
            [radius * a.cos(), radius * a.sin()]
        })
        .collect()
}

/// Angular span of the curved column, in degrees.
pub const ARC_FROM_DEG: f64 = 45.0;
/// Angular span of the curved column, in degrees.
pub const ARC_TO_DEG: f64 = 135.0;

/// Curved column from `(name, outer_radius, inner_radius)` triples.
///
/// Layers are annular sectors; the pia surface is the outer arc and the wm
/// surface the inner arc, both sampled every half degree.
pub fn curved_column(layers: &[(&str, f64, f64)]) -> SegmentationOutput {
    let segments = ((ARC_TO_DEG - ARC_FROM_DEG) * 2.0) as usize;
    let mut output = SegmentationOutput::default();
    for &(name, outer, inner) in layers {
        let mut ring = arc(outer, ARC_FROM_DEG, ARC_TO_DEG, segments);
        ring.extend(arc(inner, ARC_TO_DEG, ARC_FROM_DEG, segments));
        output.polygons.push(NamedPath::new(name, ring));
        output.surfaces.push(NamedPath::new(
            format!("{}_pia", name),
            arc(outer, ARC_FROM_DEG, ARC_TO_DEG, segments),
        ));
        output.surfaces.push(NamedPath::new(
            format!("{}_wm", name),
            arc(inner, ARC_FROM_DEG, ARC_TO_DEG, segments),
        ));
    }
    output
}

/// Field pointing towards -y (pia at small y).
pub fn uniform_field() -> UniformField {
    UniformField::new(Point2D::new(0.0, -1.0))
}

/// Field pointing away from the origin (pia at large radius).
pub fn radial_field() -> FnField<impl Fn(Point2D) -> Point2D + Copy> {
    FnField(|p: Point2D| p)
}

/// Sampled version of the uniform field, with potential equal to -y.
pub fn uniform_grid(width: usize, height: usize, spacing: f64) -> GridFieldData {
    let size = width * height;
    GridFieldData {
        origin: [0.0, 0.0],
        spacing,
        width,
        height,
        dx: vec![Some(0.0); size],
        dy: vec![Some(-1.0); size],
        depth: Some(
            (0..size)
                .map(|i| Some(-((i / width) as f64) * spacing))
                .collect(),
        ),
    }
}

/// Sampled radial field over the curved column's bounding box.
pub fn radial_grid(extent: f64, spacing: f64) -> GridField {
    let n = (2.0 * extent / spacing) as usize + 1;
    GridField::from_fn(Point2D::new(-extent, -extent), spacing, n, n, |p| {
        let r = p.length();
        (r > 0.0).then(|| (p, r))
    })
    .unwrap()
}

/// Reference tables with a simple two-layer table for both species:
/// `A` (0-40) and `B` (40-100).
pub fn two_layer_tables() -> ReferenceTables {
    let table = ReferenceLayerDepths::new(vec![
        ReferenceLayer::new("A", 0.0, 40.0),
        ReferenceLayer::new("B", 40.0, 100.0),
    ]);
    ReferenceTables {
        human: table.clone(),
        mouse: table,
    }
}
