//! gridcrop-test - Regression test framework for gridcrop
//!
//! Provides [`RegParams`], which accumulates the outcome of many checks
//! in one test function and reports them together, and [`synth`], which
//! draws the synthetic pages the detection tests run on.
//!
//! # Usage
//!
//! ```ignore
//! use gridcrop_test::{RegParams, synth};
//!
//! let mut rp = RegParams::new("detect");
//! let pix = synth::blank_page(400, 400)?;
//! rp.compare_values(400.0, pix.width() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" (default) or "display". Display
//!   mode additionally writes images passed to
//!   [`RegParams::write_pix`] into `tests/regout/`.

mod error;
mod params;
pub mod synth;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Load an image from disk
pub fn load_image(path: &str) -> TestResult<gridcrop_core::Pix> {
    gridcrop_io::read_image(path).map_err(|e| TestError::ImageLoad {
        path: path.to_string(),
        message: e.to_string(),
    })
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // gridcrop-test is at crates/gridcrop-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
