//! Depth fields queried by the streamline integrator.
//!
//! The field builder that solves for a depth potential between two
//! boundaries lives outside this crate. What reaches us is a pair of
//! query contracts:
//!
//! - [`VectorField`]: direction of the depth gradient at a point. The vector
//!   points towards the pia; following it moves pia-ward, opposing it moves
//!   towards white matter.
//! - [`ScalarDepthField`]: the depth potential itself. Only reported as a
//!   diagnostic, never used for normalized depth.
//!
//! Implementations here: [`UniformField`] (straight parallel boundaries),
//! [`FnField`] (any closure), and [`GridField`] (sampled builder output
//! with nearest-valid-sample lookup).

mod grid;

pub use grid::{GridField, GridFieldData};

use serde::{Deserialize, Serialize};

use crate::core::Point2D;

/// Gradient direction of the depth potential (towards pia).
///
/// The returned vector need not be unit length; callers normalize it.
pub trait VectorField {
    /// Field vector at `point`.
    fn vector(&self, point: Point2D) -> Point2D;
}

/// Scalar depth potential.
pub trait ScalarDepthField {
    /// Potential at `point`.
    fn depth(&self, point: Point2D) -> f64;
}

impl<T: VectorField + ?Sized> VectorField for &T {
    #[inline]
    fn vector(&self, point: Point2D) -> Point2D {
        (**self).vector(point)
    }
}

impl<T: ScalarDepthField + ?Sized> ScalarDepthField for &T {
    #[inline]
    fn depth(&self, point: Point2D) -> f64 {
        (**self).depth(point)
    }
}

/// Constant direction with a linear potential.
///
/// Models a column whose pia and wm are straight and parallel: the potential
/// is the signed distance from `origin` along `direction`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UniformField {
    /// Direction towards the pia
    pub direction: Point2D,
    /// Point where the potential is zero
    pub origin: Point2D,
}

impl UniformField {
    /// Field pointing along `direction` with zero potential at the origin.
    pub fn new(direction: Point2D) -> Self {
        Self {
            direction,
            origin: Point2D::ZERO,
        }
    }

    /// Builder: move the zero of the potential.
    pub fn with_origin(mut self, origin: Point2D) -> Self {
        self.origin = origin;
        self
    }
}

impl VectorField for UniformField {
    #[inline]
    fn vector(&self, _point: Point2D) -> Point2D {
        self.direction
    }
}

impl ScalarDepthField for UniformField {
    #[inline]
    fn depth(&self, point: Point2D) -> f64 {
        match self.direction.normalized() {
            Some(unit) => (point - self.origin).dot(&unit),
            None => f64::NAN,
        }
    }
}

/// Vector field backed by a closure.
#[derive(Clone, Copy)]
pub struct FnField<F>(pub F);

impl<F> VectorField for FnField<F>
where
    F: Fn(Point2D) -> Point2D,
{
    #[inline]
    fn vector(&self, point: Point2D) -> Point2D {
        (self.0)(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_uniform_field() {
        let field = UniformField::new(Point2D::new(0.0, -2.0)).with_origin(Point2D::new(0.0, 50.0));
        assert_eq!(field.vector(Point2D::new(3.0, 4.0)), Point2D::new(0.0, -2.0));
        // Potential grows towards the pia (decreasing y here)
        assert_relative_eq!(field.depth(Point2D::new(7.0, 40.0)), 10.0);
        assert_relative_eq!(field.depth(Point2D::new(7.0, 60.0)), -10.0);
    }

    #[test]
    fn test_degenerate_uniform_depth() {
        let field = UniformField::new(Point2D::ZERO);
        assert!(field.depth(Point2D::new(1.0, 1.0)).is_nan());
    }

    #[test]
    fn test_fn_field() {
        // Radial field pointing towards the origin
        let field = FnField(|p: Point2D| -p);
        assert_eq!(field.vector(Point2D::new(2.0, -1.0)), Point2D::new(-2.0, 1.0));

        let by_ref: &dyn VectorField = &field;
        assert_eq!(by_ref.vector(Point2D::new(1.0, 0.0)), Point2D::new(-1.0, 0.0));
    }
}
