//! Axis-aligned extents of curves and grids.
//!
//! Polygons and polylines cache their [`Bounds`] so containment and crossing
//! queries can reject a point or step before walking the edges.

use super::point::Point2D;

/// Closed axis-aligned box `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Lower-left corner.
    pub min: Point2D,
    /// Upper-right corner.
    pub max: Point2D,
}

impl Bounds {
    /// Box spanning `min` to `max`.
    #[inline]
    pub const fn new(min: Point2D, max: Point2D) -> Self {
        Self { min, max }
    }

    /// Tightest box around `points`.
    ///
    /// An empty slice yields an inverted box that contains nothing.
    pub fn from_points(points: &[Point2D]) -> Self {
        let (lo, hi) = points.iter().fold(
            ([f64::INFINITY; 2], [f64::NEG_INFINITY; 2]),
            |(lo, hi), p| {
                (
                    [lo[0].min(p.x), lo[1].min(p.y)],
                    [hi[0].max(p.x), hi[1].max(p.y)],
                )
            },
        );
        Self::new(Point2D::from(lo), Point2D::from(hi))
    }

    /// True if `point` lies inside or on the edge.
    #[inline]
    pub fn contains(&self, point: Point2D) -> bool {
        (self.min.x..=self.max.x).contains(&point.x) && (self.min.y..=self.max.y).contains(&point.y)
    }

    /// True if the boxes share at least one point.
    #[inline]
    pub fn intersects(&self, other: &Bounds) -> bool {
        other.min.x <= self.max.x
            && self.min.x <= other.max.x
            && other.min.y <= self.max.y
            && self.min.y <= other.max.y
    }

    /// Box grown by `margin` on every side.
    #[inline]
    pub fn expand(&self, margin: f64) -> Self {
        let m = Point2D::new(margin, margin);
        Self::new(self.min - m, self.max + m)
    }
}
