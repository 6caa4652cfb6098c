//! Batch depth computation for every cell of a slice.
//!
//! Each cell is computed independently against the same read-only geometry.
//! Per-point failures are logged and collected; they never abort the batch
//! and never produce a partial result.

use std::collections::BTreeMap;

use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::core::Point2D;
use crate::depth::{DepthCalculator, DepthResult};
use crate::error::Result;

/// Results and failures for one slice.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SliceDepths {
    /// Successful results keyed by cell id
    pub results: BTreeMap<String, DepthResult>,
    /// One message per failed cell, in processing order
    pub errors: Vec<String>,
}

impl SliceDepths {
    /// Number of cells processed.
    pub fn total(&self) -> usize {
        self.results.len() + self.errors.len()
    }

    /// Whether every cell succeeded.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Compute depths for every `(id, point)` pair.
///
/// Recoverable per-point errors become entries in
/// [`SliceDepths::errors`]. A non-recoverable error (bad integrator
/// settings, malformed input) means every cell would fail the same way,
/// so it is returned instead.
pub fn compute_depths<I, K>(calculator: &DepthCalculator<'_>, cells: I) -> Result<SliceDepths>
where
    I: IntoIterator<Item = (K, Point2D)>,
    K: Into<String>,
{
    let mut depths = SliceDepths::default();

    for (id, point) in cells {
        let id = id.into();
        match calculator.compute(point) {
            Ok(result) => {
                depths.results.insert(id, result);
            }
            Err(err) if err.is_recoverable() => {
                let message = format!("Failure getting depth info for cell {}: {}", id, err);
                error!("{}", message);
                depths.errors.push(message);
            }
            Err(err) => return Err(err),
        }
    }

    debug!(
        "Computed depths for {} of {} cells",
        depths.results.len(),
        depths.total()
    );
    Ok(depths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StreamlineConfig;
    use crate::core::{Polygon, Polyline};
    use crate::error::DepthError;
    use crate::field::UniformField;
    use crate::layers::{ColumnCorrection, Layer, LayerGeometry};
    use approx::assert_relative_eq;

    fn hline(y: f64) -> Polyline {
        Polyline::new(vec![Point2D::new(0.0, y), Point2D::new(100.0, y)]).unwrap()
    }

    fn single_layer() -> (LayerGeometry, ColumnCorrection) {
        let bounds = Polygon::new(
            "Layer4",
            vec![
                Point2D::new(0.0, 0.0),
                Point2D::new(100.0, 0.0),
                Point2D::new(100.0, 50.0),
                Point2D::new(0.0, 50.0),
            ],
        )
        .unwrap();
        let layer = Layer::new("Layer4", bounds)
            .with_pia_surface(hline(0.0))
            .with_wm_surface(hline(50.0));
        let correction = ColumnCorrection {
            top_path: hline(0.0),
            bottom_path: hline(50.0),
            pia_extra_distance: 10.0,
            wm_extra_distance: 10.0,
            top_layer: "Layer4".into(),
            bottom_layer: "Layer4".into(),
        };
        (LayerGeometry::from_layers([layer]), correction)
    }

    #[test]
    fn test_failures_are_isolated() {
        let (geometry, correction) = single_layer();
        let field = UniformField::new(Point2D::new(0.0, -1.0));
        let calc = DepthCalculator::new(&geometry, &correction, &field, StreamlineConfig::default());

        let cells = vec![
            ("a", Point2D::new(10.0, 25.0)),
            ("outside", Point2D::new(10.0, 80.0)),
            ("b", Point2D::new(90.0, 10.0)),
        ];
        let depths = compute_depths(&calc, cells).unwrap();

        assert_eq!(depths.results.len(), 2);
        assert_eq!(depths.total(), 3);
        assert!(!depths.is_clean());
        assert_relative_eq!(depths.results["a"].normalized_layer_depth, 0.5, epsilon = 1e-9);
        assert_relative_eq!(depths.results["b"].absolute_depth, 20.0, epsilon = 1e-9);
        assert_eq!(
            depths.errors,
            vec!["Failure getting depth info for cell outside: Point not found in any layer"]
        );
    }

    #[test]
    fn test_empty_batch() {
        let (geometry, correction) = single_layer();
        let field = UniformField::new(Point2D::new(0.0, -1.0));
        let calc = DepthCalculator::new(&geometry, &correction, &field, StreamlineConfig::default());

        let depths = compute_depths(&calc, Vec::<(String, Point2D)>::new()).unwrap();
        assert!(depths.is_clean());
        assert_eq!(depths.total(), 0);
    }

    #[test]
    fn test_unrecoverable_error_aborts() {
        let (geometry, correction) = single_layer();
        let field = UniformField::new(Point2D::new(0.0, -1.0));
        let calc = DepthCalculator::new(&geometry, &correction, &field, StreamlineConfig::new(0.0, 10));

        let err = compute_depths(&calc, [("a", Point2D::new(10.0, 25.0))]).unwrap_err();
        assert!(matches!(err, DepthError::InvalidInput(_)));
    }
}
