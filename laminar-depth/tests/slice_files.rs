//! Slice file, config file and report round trips.

mod common;

use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use laminar_depth::{
    ConfigLoadError, DepthConfig, DepthError, IoError, SliceInput, SliceReport, Species,
    depths_for_slice, slice_resolution,
};

fn sample_slice_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data/sample_slice.yaml")
}

fn two_layer_slice() -> SliceInput {
    SliceInput {
        species: Species::Human,
        resolution: Some(1.0),
        segmentation: common::rectangular_column(
            &[("LayerA", 0.0, 40.0), ("LayerB", 40.0, 100.0)],
            &[],
        ),
        cells: [
            ("mid_a".to_string(), [50.0, 20.0]),
            ("mid_b".to_string(), [50.0, 70.0]),
            ("outside".to_string(), [150.0, 70.0]),
        ]
        .into_iter()
        .collect(),
        field: common::uniform_grid(11, 11, 10.0),
    }
}

#[test]
fn test_sample_slice() {
    common::init_logging();
    let input = SliceInput::load(&sample_slice_path()).unwrap();
    assert_eq!(input.species, Species::Mouse);
    assert_eq!(input.cells.len(), 6);

    let config = DepthConfig::default();
    let depths = depths_for_slice(&input, &config, &config.reference).unwrap();
    assert_eq!(depths.results.len(), 5);
    assert_eq!(depths.errors.len(), 1);
    assert!(depths.errors[0].contains("cell_006"));

    let mouse = config.reference.get(Species::Mouse);
    let r = &depths.results["cell_001"];
    assert_eq!(r.layer, "Layer2/3");
    assert_relative_eq!(r.layer_depth, 60.0, epsilon = 1e-9);
    assert_relative_eq!(r.layer_thickness, 220.0, epsilon = 1e-9);
    assert_relative_eq!(r.absolute_depth, 60.0 + mouse.thickness_of(0..1), epsilon = 1e-9);
    assert_relative_eq!(r.wm_distance, 510.0 + mouse.thickness_of(4..6), epsilon = 1e-9);
    assert_relative_eq!(r.field_depth.unwrap(), -60.0);

    for r in depths.results.values() {
        assert!((0.0..=1.0).contains(&r.normalized_layer_depth));
        assert!((0.0..=1.0).contains(&r.normalized_depth));
    }
}

#[test]
fn test_yaml_and_json_inputs_agree() {
    let dir = tempfile::tempdir().unwrap();
    let input = two_layer_slice();

    let yaml_path = dir.path().join("slice.yaml");
    input.save_yaml(&yaml_path).unwrap();
    let json_path = dir.path().join("slice.json");
    std::fs::write(&json_path, serde_json::to_string(&input).unwrap()).unwrap();

    let from_yaml = SliceInput::load(&yaml_path).unwrap();
    let from_json = SliceInput::load(&json_path).unwrap();
    assert_eq!(from_yaml, from_json);

    let tables = common::two_layer_tables();
    let config = DepthConfig::default();
    let a = depths_for_slice(&from_yaml, &config, &tables).unwrap();
    let b = depths_for_slice(&from_json, &config, &tables).unwrap();
    assert_eq!(a, b);

    assert_relative_eq!(a.results["mid_a"].normalized_layer_depth, 0.5, epsilon = 1e-9);
    assert_relative_eq!(a.results["mid_b"].normalized_layer_depth, 0.5, epsilon = 1e-9);
    assert_relative_eq!(a.results["mid_b"].normalized_depth, 0.7, epsilon = 1e-9);
    assert_eq!(
        a.errors,
        vec!["Failure getting depth info for cell outside: Point not found in any layer"]
    );
}

#[test]
fn test_report_round_trip() {
    let input = two_layer_slice();
    let config = DepthConfig::default();
    let depths = depths_for_slice(&input, &config, &common::two_layer_tables()).unwrap();
    let resolution = slice_resolution(&input, &config).unwrap();

    let report = SliceReport::new(&input, resolution, depths);
    assert_eq!(report.cell_count, 3);
    assert_eq!(report.success_count, 2);
    assert_eq!(report.error_count, 1);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    report.save(&path).unwrap();
    assert_eq!(SliceReport::load(&path).unwrap(), report);
}

#[test]
fn test_slice_level_failures() {
    let config = DepthConfig::default();

    // Layer names not in the species table
    let input = two_layer_slice();
    let err = depths_for_slice(&input, &config, &config.reference).unwrap_err();
    assert!(matches!(err, DepthError::UnknownReferenceLayer { .. }));
    assert!(!err.is_recoverable());

    // No layer has both surfaces
    let mut input = two_layer_slice();
    input.segmentation.surfaces.retain(|s| !s.name.ends_with("_wm"));
    let err = depths_for_slice(&input, &config, &common::two_layer_tables()).unwrap_err();
    assert_eq!(err, DepthError::NoCompleteLayers);

    // Malformed surface name
    let mut input = two_layer_slice();
    input.segmentation.surfaces[0].name = "LayerA-pia".into();
    let err = depths_for_slice(&input, &config, &common::two_layer_tables()).unwrap_err();
    assert_eq!(err, DepthError::MalformedSurfaceName("LayerA-pia".into()));

    // Field grid with mismatched channels
    let mut input = two_layer_slice();
    input.field.dx.pop();
    let err = depths_for_slice(&input, &config, &common::two_layer_tables()).unwrap_err();
    assert!(matches!(err, DepthError::InvalidInput(_)));
}

#[test]
fn test_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(
        &path,
        "streamline:\n  step_size: 0.5\n  max_iter: 400\ninput:\n  resolution: 0.25\n",
    )
    .unwrap();

    let config = DepthConfig::load(&path).unwrap();
    assert_eq!(config.streamline.step_size, 0.5);
    assert_eq!(config.streamline.max_iter, 400);

    let mut input = two_layer_slice();
    input.resolution = None;
    assert_eq!(slice_resolution(&input, &config).unwrap(), 0.25);

    std::fs::write(&path, "streamline:\n  max_iter: 0\n").unwrap();
    assert!(matches!(
        DepthConfig::load(&path),
        Err(ConfigLoadError::Invalid(_))
    ));
}

#[test]
fn test_shipped_config_parses() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("configs/config.yaml");
    let config = DepthConfig::load(&path).unwrap();
    assert_eq!(config, DepthConfig::default());
}

#[test]
fn test_missing_slice_file() {
    let err = SliceInput::load(Path::new("/nonexistent/slice.yaml")).unwrap_err();
    assert!(matches!(err, IoError::Io(_)));
}
