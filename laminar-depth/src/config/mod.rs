//! Unified configuration loading.
//!
//! All settings live in a single YAML file; every section and field is
//! optional and falls back to its default.
//!
//! ```yaml
//! streamline:
//!   step_size: 1.0
//!   max_iter: 1000
//! input:
//!   resolution: 1.0
//! reference:
//!   mouse:
//!     - { layer: "1", pia_side: 0.0, wm_side: 115.1 }
//! ```

mod error;
mod settings;
mod streamline;

pub use error::ConfigLoadError;
pub use settings::{DepthConfig, InputSection};
pub use streamline::StreamlineConfig;
