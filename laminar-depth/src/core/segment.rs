//! Line segment type using endpoint representation.
//!
//! Segments are the building block for both polylines (boundary surfaces)
//! and polygon edges, and every streamline step is tested as a segment.

use super::point::Point2D;

/// Tolerance on segment parameters so that touching counts as crossing.
const PARAM_EPSILON: f64 = 1e-9;

/// Relative tolerance below which two directions are treated as parallel.
const PARALLEL_EPSILON: f64 = 1e-12;

/// A 2D line segment defined by its endpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment2D {
    /// Start point of the segment.
    pub start: Point2D,
    /// End point of the segment.
    pub end: Point2D,
}

impl Segment2D {
    /// Create a new segment from two points.
    #[inline]
    pub fn new(start: Point2D, end: Point2D) -> Self {
        Self { start, end }
    }

    /// Direction vector from start to end (not normalized).
    #[inline]
    pub fn direction(&self) -> Point2D {
        self.end - self.start
    }

    /// Length of the segment.
    #[inline]
    pub fn length(&self) -> f64 {
        self.direction().length()
    }

    /// Get a point along the segment at parameter t.
    ///
    /// - `t = 0`: returns start point
    /// - `t = 1`: returns end point
    #[inline]
    pub fn point_at(&self, t: f64) -> Point2D {
        self.start.lerp(&self.end, t)
    }

    /// Project a point onto the infinite line, returning parameter t.
    #[inline]
    pub fn project_point(&self, point: Point2D) -> f64 {
        let dir = self.direction();
        let len_sq = dir.dot(&dir);

        if len_sq == 0.0 {
            return 0.0;
        }

        (point - self.start).dot(&dir) / len_sq
    }

    /// Distance from a point to the segment (not the infinite line).
    #[inline]
    pub fn distance_to_point(&self, point: Point2D) -> f64 {
        let t = self.project_point(point).clamp(0.0, 1.0);
        point.distance(&self.point_at(t))
    }

    /// Parameter along `self` where it first touches `other`.
    ///
    /// Endpoint contacts count. For collinear overlapping segments the
    /// first overlapping parameter is returned.
    pub fn crossing(&self, other: &Segment2D) -> Option<f64> {
        let d1 = self.direction();
        let d2 = other.direction();
        let origin_diff = other.start - self.start;

        let len1 = d1.length();
        let len2 = d2.length();
        if len1 == 0.0 {
            // Degenerate step: touching only if the point lies on `other`
            return (other.distance_to_point(self.start) <= PARAM_EPSILON * len2.max(1.0))
                .then_some(0.0);
        }

        let cross = d1.cross(&d2);
        if cross.abs() <= PARALLEL_EPSILON * len1 * len2.max(f64::MIN_POSITIVE) {
            return self.collinear_overlap(other, origin_diff, len1);
        }

        let t = origin_diff.cross(&d2) / cross;
        let s = origin_diff.cross(&d1) / cross;

        let in_range = |v: f64| (-PARAM_EPSILON..=1.0 + PARAM_EPSILON).contains(&v);
        if in_range(t) && in_range(s) {
            Some(t.clamp(0.0, 1.0))
        } else {
            None
        }
    }

    /// Find the intersection point with another segment.
    pub fn intersection(&self, other: &Segment2D) -> Option<Point2D> {
        self.crossing(other).map(|t| self.point_at(t))
    }

    fn collinear_overlap(&self, other: &Segment2D, origin_diff: Point2D, len1: f64) -> Option<f64> {
        let d1 = self.direction();
        // Off the carrying line means parallel but disjoint
        if (origin_diff.cross(&d1) / len1).abs() > PARAM_EPSILON * len1.max(1.0) {
            return None;
        }

        let t0 = self.project_point(other.start);
        let t1 = self.project_point(other.end);
        let lo = t0.min(t1).max(0.0);
        let hi = t0.max(t1).min(1.0);

        (lo <= hi + PARAM_EPSILON).then_some(lo.min(1.0))
    }
}
