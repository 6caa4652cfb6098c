//! Open polyline used for boundary surfaces.

use serde::{Deserialize, Serialize};

use super::bounds::Bounds;
use super::point::Point2D;
use super::segment::Segment2D;
use crate::error::{DepthError, Result};

/// Ordered sequence of points forming an open curve.
///
/// Layer surfaces and the column pia/wm boundaries are polylines. The only
/// geometric query the integrator needs is [`Polyline::first_crossing`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point2D>", into = "Vec<Point2D>")]
pub struct Polyline {
    points: Vec<Point2D>,
    bounds: Bounds,
}

impl Polyline {
    /// Create a polyline, checking it has at least two finite vertices.
    pub fn new(points: Vec<Point2D>) -> Result<Self> {
        Self::named("polyline", points)
    }

    /// Create a polyline, naming it in any validation error.
    pub fn named(name: &str, points: Vec<Point2D>) -> Result<Self> {
        if points.len() < 2 {
            return Err(DepthError::InvalidPolyline {
                name: name.to_string(),
                reason: format!("needs at least 2 points, got {}", points.len()),
            });
        }
        if !points.iter().all(Point2D::is_finite) {
            return Err(DepthError::InvalidPolyline {
                name: name.to_string(),
                reason: "non-finite coordinate".to_string(),
            });
        }

        let bounds = Bounds::from_points(&points);
        Ok(Self { points, bounds })
    }

    /// Vertices in order.
    #[inline]
    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a constructed polyline; provided for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bounding box of all vertices.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Iterate over consecutive segments.
    pub fn segments(&self) -> impl Iterator<Item = Segment2D> + '_ {
        self.points
            .windows(2)
            .map(|w| Segment2D::new(w[0], w[1]))
    }

    /// Total arc length.
    pub fn length(&self) -> f64 {
        self.segments().map(|s| s.length()).sum()
    }

    /// Earliest parameter along `step` at which it touches this polyline.
    ///
    /// Returns `None` if the step does not reach the curve.
    pub fn first_crossing(&self, step: &Segment2D) -> Option<f64> {
        let step_bounds = Bounds::from_points(&[step.start, step.end]);
        if !step_bounds.intersects(&self.bounds) {
            return None;
        }

        self.segments()
            .filter_map(|edge| step.crossing(&edge))
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Shortest distance from a point to the curve.
    pub fn distance_to_point(&self, point: Point2D) -> f64 {
        self.segments()
            .map(|s| s.distance_to_point(point))
            .fold(f64::INFINITY, f64::min)
    }
}

impl TryFrom<Vec<Point2D>> for Polyline {
    type Error = DepthError;

    fn try_from(points: Vec<Point2D>) -> Result<Self> {
        Self::new(points)
    }
}

impl From<Polyline> for Vec<Point2D> {
    fn from(line: Polyline) -> Self {
        line.points
    }
}
