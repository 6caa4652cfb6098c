//! Core geometry types for laminar depth computation.
//!
//! This module provides the fundamental types used throughout the library:
//! - [`Point2D`]: slice coordinate and 2-D vector
//! - [`Bounds`]: axis-aligned bounding box
//! - [`Segment2D`]: line segment with inclusive crossing tests
//! - [`Polyline`]: open boundary curve (layer surfaces, pia, wm)
//! - [`Polygon`]: closed layer footprint with boundary-inclusive containment

mod bounds;
mod point;
mod polygon;
mod polyline;
mod segment;

pub use bounds::Bounds;
pub use point::Point2D;
pub use polygon::Polygon;
pub use polyline::Polyline;
pub use segment::Segment2D;
