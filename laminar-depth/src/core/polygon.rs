//! Closed polygon used for layer footprints.

use super::bounds::Bounds;
use super::point::Point2D;
use super::segment::Segment2D;
use crate::error::{DepthError, Result};

/// Distance within which a point counts as lying on a polygon edge.
const BOUNDARY_EPSILON: f64 = 1e-9;

/// Closed boundary ring.
///
/// The ring is stored without a repeated closing vertex. Containment is
/// boundary-inclusive: points on an edge or vertex are inside.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    ring: Vec<Point2D>,
    bounds: Bounds,
}

impl Polygon {
    /// Create a polygon from its vertices, validating the ring.
    ///
    /// Repeated consecutive vertices, including a closing vertex equal to
    /// the first, are dropped. The ring must have at least three distinct
    /// finite vertices and must not self-intersect.
    pub fn new(name: &str, mut ring: Vec<Point2D>) -> Result<Self> {
        ring.dedup();
        while ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }

        let invalid = |reason: String| DepthError::InvalidPolygon {
            name: name.to_string(),
            reason,
        };

        if ring.len() < 3 {
            return Err(invalid(format!(
                "needs at least 3 vertices, got {}",
                ring.len()
            )));
        }
        if !ring.iter().all(Point2D::is_finite) {
            return Err(invalid("non-finite coordinate".to_string()));
        }

        let polygon = Self {
            bounds: Bounds::from_points(&ring),
            ring,
        };

        if polygon.signed_area() == 0.0 {
            return Err(invalid("zero area".to_string()));
        }
        if let Some((i, j)) = polygon.self_intersection() {
            return Err(invalid(format!("edges {} and {} intersect", i, j)));
        }

        Ok(polygon)
    }

    /// Vertices in order (no closing duplicate).
    #[inline]
    pub fn vertices(&self) -> &[Point2D] {
        &self.ring
    }

    /// Bounding box of the ring.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Iterate over edges, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = Segment2D> + '_ {
        let n = self.ring.len();
        (0..n).map(move |i| Segment2D::new(self.ring[i], self.ring[(i + 1) % n]))
    }

    /// Shoelace signed area (positive for counter-clockwise rings).
    pub fn signed_area(&self) -> f64 {
        self.edges().map(|e| e.start.cross(&e.end)).sum::<f64>() * 0.5
    }

    /// Check if a point is inside or on the boundary.
    pub fn contains(&self, point: Point2D) -> bool {
        if !self.bounds.expand(BOUNDARY_EPSILON).contains(point) {
            return false;
        }
        if self.on_boundary(point) {
            return true;
        }

        // Even-odd crossing test with a ray towards +x
        let mut inside = false;
        for edge in self.edges() {
            let (a, b) = (edge.start, edge.end);
            if (a.y > point.y) != (b.y > point.y) {
                let x_at = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if point.x < x_at {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Check if a point lies on an edge (within tolerance).
    pub fn on_boundary(&self, point: Point2D) -> bool {
        self.edges()
            .any(|e| e.distance_to_point(point) <= BOUNDARY_EPSILON)
    }

    /// First pair of non-adjacent edges that touch, if any.
    fn self_intersection(&self) -> Option<(usize, usize)> {
        let n = self.ring.len();
        let edges: Vec<Segment2D> = self.edges().collect();

        for i in 0..n {
            for j in (i + 1)..n {
                let adjacent = j == i + 1 || (i == 0 && j == n - 1);
                if adjacent {
                    continue;
                }
                if edges[i].crossing(&edges[j]).is_some() {
                    return Some((i, j));
                }
            }
        }
        None
    }
}
