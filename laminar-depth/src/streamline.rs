//! Streamline tracing from a point to a boundary curve.
//!
//! Explicit Euler integration with a fixed step: at each step the field
//! vector is normalized, scaled by the step size (negated when heading
//! towards white matter), and the step segment is tested against the
//! target polyline. The exact crossing is interpolated along that segment.
//!
//! ```text
//!   target ──────────────●──────────────
//!                       ╱ ← crossing at t along the last step
//!                      ●
//!                     ╱   step_size
//!                    ●
//!                    │
//!                    ● start
//! ```
//!
//! Accuracy is governed by the step size relative to boundary curvature.

use log::trace;

use crate::config::StreamlineConfig;
use crate::core::{Point2D, Polyline, Segment2D};
use crate::error::{DepthError, Result};
use crate::field::VectorField;

/// Direction of travel relative to the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    /// Follow the field (towards the pia)
    Pia,
    /// Oppose the field (towards white matter)
    Wm,
}

impl Heading {
    /// Step multiplier: +1 for pia-ward, -1 for wm-ward.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            Heading::Pia => 1.0,
            Heading::Wm => -1.0,
        }
    }
}

/// A target curve and the name used in error messages.
#[derive(Clone, Copy, Debug)]
pub struct Boundary<'a> {
    /// Human-readable name (e.g. "Layer4 pia surface")
    pub name: &'a str,
    /// The curve to reach
    pub path: &'a Polyline,
}

impl<'a> Boundary<'a> {
    /// Name a target curve.
    pub fn new(name: &'a str, path: &'a Polyline) -> Self {
        Self { name, path }
    }
}

/// Where a streamline met its target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StreamlineHit {
    /// Crossing point on the target
    pub point: Point2D,
    /// Path length from the start to the crossing
    pub distance: f64,
    /// Steps taken, including the one that crossed
    pub steps: usize,
}

/// Fixed-step streamline integrator.
#[derive(Clone, Copy, Debug, Default)]
pub struct StreamlineIntegrator {
    config: StreamlineConfig,
}

impl StreamlineIntegrator {
    /// Create an integrator with the given step settings.
    pub fn new(config: StreamlineConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &StreamlineConfig {
        &self.config
    }

    /// Trace from `start` until the path crosses `target`.
    ///
    /// # Errors
    /// - `IntegrationExhausted` after `max_iter` steps without a crossing
    /// - `DegenerateField` if the field is zero or non-finite along the path
    /// - `InvalidInput` for a non-positive step size
    pub fn trace<F>(
        &self,
        start: Point2D,
        field: &F,
        target: Boundary<'_>,
        heading: Heading,
    ) -> Result<StreamlineHit>
    where
        F: VectorField + ?Sized,
    {
        let step_size = self.config.step_size;
        if !(step_size.is_finite() && step_size > 0.0) {
            return Err(DepthError::InvalidInput(format!(
                "step_size must be finite and > 0, got {}",
                step_size
            )));
        }
        if !start.is_finite() {
            return Err(DepthError::NonFiniteValue("streamline start"));
        }

        let step_length = heading.sign() * step_size;
        let mut current = start;
        let mut distance = 0.0;

        for step in 1..=self.config.max_iter {
            let direction = field
                .vector(current)
                .normalized()
                .ok_or(DepthError::DegenerateField {
                    x: current.x,
                    y: current.y,
                })?;

            let next = current + direction * step_length;
            let segment = Segment2D::new(current, next);

            if let Some(t) = target.path.first_crossing(&segment) {
                let hit = StreamlineHit {
                    point: segment.point_at(t),
                    distance: distance + t * step_size,
                    steps: step,
                };
                trace!(
                    "Streamline to {} crossed after {} steps ({:.3})",
                    target.name, step, hit.distance
                );
                return Ok(hit);
            }

            distance += step_size;
            current = next;
        }

        trace!(
            "Streamline to {} exhausted {} steps at ({:.3}, {:.3})",
            target.name, self.config.max_iter, current.x, current.y
        );
        Err(DepthError::IntegrationExhausted {
            target: target.name.to_string(),
            max_iter: self.config.max_iter,
        })
    }
}
