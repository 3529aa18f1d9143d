//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::regout_dir;
use gridcrop_core::{GridBounds, Pix};
use gridcrop_io::ImageFormat;
use std::fs;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare computed values with expectations (default)
    #[default]
    Compare,
    /// Compare, and also write intermediate images for visual inspection
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, the running check index and every failure,
/// so a single test function can run many checks and report them all
/// at the end via [`cleanup`](RegParams::cleanup).
pub struct RegParams {
    /// Name of the test (e.g., "detect")
    pub test_name: String,
    /// Current check index (incremented before each check)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    success: bool,
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current check index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// # Returns
    ///
    /// `true` if values match within `delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            self.fail(format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            ));
            false
        } else {
            true
        }
    }

    /// Compare two rectangles field by field
    ///
    /// Each of x, y, width and height may differ by at most `delta` pixels.
    pub fn compare_bounds(&mut self, expected: &GridBounds, actual: &GridBounds, delta: u32) -> bool {
        self.index += 1;
        let within = |a: u32, b: u32| a.abs_diff(b) <= delta;

        if within(expected.x, actual.x)
            && within(expected.y, actual.y)
            && within(expected.width, actual.width)
            && within(expected.height, actual.height)
        {
            true
        } else {
            self.fail(format!(
                "Failure in {}_reg: bounds comparison for index {}\n\
                 expected = {}, actual = {}, allowed delta = {}",
                self.test_name, self.index, expected, actual, delta
            ));
            false
        }
    }

    /// Compare two images for exact equality of size, samples and RGB values
    pub fn compare_pix(&mut self, pix1: &Pix, pix2: &Pix) -> bool {
        self.index += 1;

        if !pix1.sizes_equal(pix2) {
            self.fail(format!(
                "Failure in {}_reg: pix comparison for index {} - dimension mismatch \
                 ({}x{} vs {}x{})",
                self.test_name,
                self.index,
                pix1.width(),
                pix1.height(),
                pix2.width(),
                pix2.height()
            ));
            return false;
        }

        for y in 0..pix1.height() {
            for x in 0..pix1.width() {
                if pix1.get_rgb(x, y) != pix2.get_rgb(x, y) {
                    self.fail(format!(
                        "Failure in {}_reg: pix comparison for index {} - pixel mismatch at ({}, {})",
                        self.test_name, self.index, x, y
                    ));
                    return false;
                }
            }
        }

        true
    }

    /// Write an image to the regout directory in display mode
    ///
    /// Does nothing in compare mode. The file is named
    /// `<test>.<index>.<ext>`.
    pub fn write_pix(&mut self, pix: &Pix, format: ImageFormat) -> TestResult<()> {
        self.index += 1;
        if !self.display() {
            return Ok(());
        }

        let outdir = regout_dir();
        fs::create_dir_all(&outdir)?;
        let path = format!(
            "{}/{}.{:02}.{}",
            outdir,
            self.test_name,
            self.index,
            format.extension()
        );
        gridcrop_io::write_image(pix, &path, format).map_err(|e| TestError::ImageWrite {
            path: path.clone(),
            message: e.to_string(),
        })?;
        eprintln!("Wrote: {}", path);
        Ok(())
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all checks passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_values_within_delta() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
    }

    #[test]
    fn test_compare_values_failure() {
        let mut rp = RegParams::new("test");
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert_eq!(rp.failures().len(), 1);
    }

    #[test]
    fn test_compare_bounds() {
        let mut rp = RegParams::new("test");
        let a = GridBounds::new(40, 40, 320, 320);
        assert!(rp.compare_bounds(&a, &GridBounds::new(41, 39, 318, 322), 2));
        assert!(rp.is_success());
        assert!(!rp.compare_bounds(&a, &GridBounds::new(44, 40, 320, 320), 2));
        assert!(!rp.is_success());
        assert_eq!(rp.index(), 2);
    }

    #[test]
    fn test_compare_pix_dimension_mismatch() {
        let mut rp = RegParams::new("test");
        let a = Pix::new(4, 4, 3).unwrap();
        let b = Pix::new(4, 5, 3).unwrap();
        assert!(!rp.compare_pix(&a, &b));
        assert!(rp.compare_pix(&a, &a.deep_clone()));
    }
}
