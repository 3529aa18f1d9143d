//! gridcrop - Grid border detection for stitch-chart pages
//!
//! Finds the outer border of the stitch grid on a rendered chart page
//! and crops the page to it. Detection is robust to page clutter
//! (titles, axis numbers, footer rules) and falls back to fixed page
//! margins when no convincing grid is found.
//!
//! # Example
//!
//! ```no_run
//! use gridcrop::{DetectionConfig, crop_file, io::ImageFormat};
//!
//! let config = DetectionConfig::default();
//! let grid = crop_file("chart.png", &config).unwrap();
//! gridcrop::io::write_image(&grid, "grid.png", ImageFormat::Png).unwrap();
//! ```

mod error;

pub use error::{Error, Result};

// Re-export core types (primary data structures used everywhere)
pub use gridcrop_core::{Color, GridBounds, Pix, PixMut, PixView, PixelSource, crop};

// Re-export domain crates as modules to avoid name conflicts
pub use gridcrop_detect as detect;
pub use gridcrop_io as io;

pub use gridcrop_detect::{
    BoundaryDetector, DetectionConfig, detect_and_crop, detect_grid_bounds,
    detect_grid_bounds_traced,
};

use std::path::Path;

/// Decode the page at `path` and detect its grid rectangle
pub fn detect_file<P: AsRef<Path>>(path: P, config: &DetectionConfig) -> Result<GridBounds> {
    let pix = gridcrop_io::read_image(path)?;
    Ok(detect_grid_bounds(&pix, config)?)
}

/// Decode the page at `path` and crop it to its grid rectangle
pub fn crop_file<P: AsRef<Path>>(path: P, config: &DetectionConfig) -> Result<Pix> {
    let pix = gridcrop_io::read_image(path)?;
    let (_, cropped) = detect_and_crop(&pix, config)?;
    Ok(cropped)
}
