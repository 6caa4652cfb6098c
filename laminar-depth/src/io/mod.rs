//! Slice files in, depth reports out.
//!
//! - **Slice input** (YAML or JSON): species, pixel resolution, segmentation
//!   polygons and surfaces, cell positions, and the sampled depth field.
//! - **Report** (JSON): per-cell results, the error list and summary counts.
//!
//! ```rust,ignore
//! use laminar_depth::io::{SliceInput, SliceReport};
//!
//! let input = SliceInput::load(Path::new("slice.yaml"))?;
//! let depths = depths_for_slice(&input, &config, &config.reference)?;
//! SliceReport::new(&input, resolution, depths).save(Path::new("report.json"))?;
//! ```

mod report;
mod slice;

use thiserror::Error;

pub use report::SliceReport;
pub use slice::SliceInput;

/// Error reading or writing slice files.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IoError {
    /// File could not be read or written
    #[error("I/O error: {0}")]
    Io(String),

    /// Contents could not be parsed or serialized
    #[error("Parse error: {0}")]
    Parse(String),
}
