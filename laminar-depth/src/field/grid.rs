//! Sampled depth field with nearest-valid-sample lookup.
//!
//! The field builder produces the gradient and potential on a regular grid
//! covering the column. Samples outside the column are missing. Queries
//! snap to the nearest sample that is valid for the requested channel, so
//! points on or slightly beyond a boundary still get a value.
//!
//! ```text
//!   row
//!    2 │  ·   ·   ●   ●        ● valid sample
//!    1 │  ·   ●   ●   ●        · missing (outside column)
//!    0 │  ●   ●   ●   ·
//!      └────────────────  col
//!   sample (col, row) sits at origin + (col, row) * spacing
//! ```

use rstar::RTree;
use rstar::primitives::GeomWithData;
use serde::{Deserialize, Serialize};

use super::{ScalarDepthField, VectorField};
use crate::core::{Bounds, Point2D};
use crate::error::{DepthError, Result};

type IndexedSample = GeomWithData<[f64; 2], usize>;

/// Serialized grid as produced by the field builder.
///
/// Channels are row-major (`index = row * width + col`); `null` marks a
/// missing sample.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridFieldData {
    /// World position of sample (0, 0)
    pub origin: [f64; 2],
    /// Distance between adjacent samples
    pub spacing: f64,
    /// Samples per row
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Gradient x component
    pub dx: Vec<Option<f64>>,
    /// Gradient y component
    pub dy: Vec<Option<f64>>,
    /// Depth potential (optional channel)
    #[serde(default)]
    pub depth: Option<Vec<Option<f64>>>,
}

fn sample_count(width: usize, height: usize) -> Result<usize> {
    width.checked_mul(height).ok_or_else(|| {
        DepthError::InvalidInput(format!("grid dimensions {}x{} overflow", width, height))
    })
}

/// Regular-grid depth field.
#[derive(Clone)]
pub struct GridField {
    origin: Point2D,
    spacing: f64,
    width: usize,
    height: usize,
    dx: Vec<f64>,
    dy: Vec<f64>,
    depth: Option<Vec<f64>>,
    vector_index: RTree<IndexedSample>,
    depth_index: Option<RTree<IndexedSample>>,
}

impl GridField {
    /// Build a field from raw channels (NaN marks a missing sample).
    pub fn new(
        origin: Point2D,
        spacing: f64,
        width: usize,
        height: usize,
        dx: Vec<f64>,
        dy: Vec<f64>,
        depth: Option<Vec<f64>>,
    ) -> Result<Self> {
        if !(spacing.is_finite() && spacing > 0.0) {
            return Err(DepthError::InvalidInput(format!(
                "grid spacing must be finite and > 0, got {}",
                spacing
            )));
        }
        if !origin.is_finite() {
            return Err(DepthError::InvalidInput(
                "grid origin must be finite".to_string(),
            ));
        }

        let size = sample_count(width, height)?;
        let check_len = |name: &str, len: usize| {
            if len == size {
                Ok(())
            } else {
                Err(DepthError::InvalidInput(format!(
                    "grid channel {} has {} samples, expected {}x{} = {}",
                    name, len, width, height, size
                )))
            }
        };
        check_len("dx", dx.len())?;
        check_len("dy", dy.len())?;
        if let Some(ref d) = depth {
            check_len("depth", d.len())?;
        }

        let mut field = Self {
            origin,
            spacing,
            width,
            height,
            dx,
            dy,
            depth,
            vector_index: RTree::new(),
            depth_index: None,
        };

        let vector_samples: Vec<IndexedSample> = (0..size)
            .filter(|&i| field.vector_valid(i))
            .map(|i| GeomWithData::new(field.sample_position(i).into(), i))
            .collect();
        if vector_samples.is_empty() {
            return Err(DepthError::InvalidInput(
                "grid has no valid gradient samples".to_string(),
            ));
        }
        field.vector_index = RTree::bulk_load(vector_samples);

        field.depth_index = field.depth.as_ref().map(|depth| {
            let samples = (0..size)
                .filter(|&i| depth[i].is_finite())
                .map(|i| GeomWithData::new(field.sample_position(i).into(), i))
                .collect();
            RTree::bulk_load(samples)
        });

        Ok(field)
    }

    /// Build a field from its serialized form.
    pub fn from_data(data: &GridFieldData) -> Result<Self> {
        let unpack = |channel: &[Option<f64>]| -> Vec<f64> {
            channel.iter().map(|v| v.unwrap_or(f64::NAN)).collect()
        };
        Self::new(
            Point2D::from(data.origin),
            data.spacing,
            data.width,
            data.height,
            unpack(&data.dx),
            unpack(&data.dy),
            data.depth.as_deref().map(unpack),
        )
    }

    /// Sample a field over a grid.
    ///
    /// `sampler` returns `None` for positions outside the field's domain.
    pub fn from_fn<F>(
        origin: Point2D,
        spacing: f64,
        width: usize,
        height: usize,
        sampler: F,
    ) -> Result<Self>
    where
        F: Fn(Point2D) -> Option<(Point2D, f64)>,
    {
        let size = sample_count(width, height)?;
        let mut dx = Vec::with_capacity(size);
        let mut dy = Vec::with_capacity(size);
        let mut depth = Vec::with_capacity(size);

        for row in 0..height {
            for col in 0..width {
                let p = origin + Point2D::new(col as f64, row as f64) * spacing;
                let (v, d) = sampler(p).unwrap_or((Point2D::new(f64::NAN, f64::NAN), f64::NAN));
                dx.push(v.x);
                dy.push(v.y);
                depth.push(d);
            }
        }

        Self::new(origin, spacing, width, height, dx, dy, Some(depth))
    }

    /// Grid dimensions (width, height) in samples.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Distance between adjacent samples.
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Extent covered by sample positions.
    pub fn bounds(&self) -> Bounds {
        let far = Point2D::new(
            self.width.saturating_sub(1) as f64,
            self.height.saturating_sub(1) as f64,
        );
        Bounds::new(self.origin, self.origin + far * self.spacing)
    }

    /// Whether a depth potential channel is present.
    pub fn has_depth(&self) -> bool {
        self.depth.is_some()
    }

    /// Number of valid gradient samples.
    pub fn valid_vector_samples(&self) -> usize {
        self.vector_index.size()
    }

    #[inline]
    fn sample_position(&self, index: usize) -> Point2D {
        let col = index % self.width;
        let row = index / self.width;
        self.origin + Point2D::new(col as f64, row as f64) * self.spacing
    }

    #[inline]
    fn vector_valid(&self, index: usize) -> bool {
        self.dx[index].is_finite() && self.dy[index].is_finite()
    }

    /// Index of the grid sample closest to `point`, if inside the grid.
    #[inline]
    fn nearest_cell(&self, point: Point2D) -> Option<usize> {
        let col = ((point.x - self.origin.x) / self.spacing).round();
        let row = ((point.y - self.origin.y) / self.spacing).round();
        if col < 0.0 || row < 0.0 || col >= self.width as f64 || row >= self.height as f64 {
            return None;
        }
        Some(row as usize * self.width + col as usize)
    }

    fn nearest_in(&self, index: &RTree<IndexedSample>, point: Point2D) -> Option<usize> {
        index.nearest_neighbor(&[point.x, point.y]).map(|s| s.data)
    }
}

impl std::fmt::Debug for GridField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridField")
            .field("origin", &self.origin)
            .field("spacing", &self.spacing)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("valid_vector_samples", &self.vector_index.size())
            .field("has_depth", &self.depth.is_some())
            .finish()
    }
}

impl VectorField for GridField {
    fn vector(&self, point: Point2D) -> Point2D {
        if !point.is_finite() {
            return Point2D::new(f64::NAN, f64::NAN);
        }
        let index = self
            .nearest_cell(point)
            .filter(|&i| self.vector_valid(i))
            .or_else(|| self.nearest_in(&self.vector_index, point));

        match index {
            Some(i) => Point2D::new(self.dx[i], self.dy[i]),
            None => Point2D::new(f64::NAN, f64::NAN),
        }
    }
}

impl ScalarDepthField for GridField {
    fn depth(&self, point: Point2D) -> f64 {
        let (Some(depth), Some(index)) = (&self.depth, &self.depth_index) else {
            return f64::NAN;
        };
        if !point.is_finite() {
            return f64::NAN;
        }

        self.nearest_cell(point)
            .filter(|&i| depth[i].is_finite())
            .or_else(|| self.nearest_in(index, point))
            .map_or(f64::NAN, |i| depth[i])
    }
}
