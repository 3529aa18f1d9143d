//! gridcrop Core - Basic data structures for grid boundary detection
//!
//! This crate provides the fundamental data structures shared by the
//! gridcrop crates:
//!
//! - [`Pix`] / [`PixMut`] - Owned page image (immutable / mutable)
//! - [`PixView`] - Borrowed view over a caller's decoded buffer
//! - [`PixelSource`] - The read-only pixel capability detection runs on
//! - [`GridBounds`] - The detected grid rectangle
//! - [`crop`] - Sub-image extraction

pub mod bounds;
pub mod error;
pub mod pix;

pub use bounds::GridBounds;
pub use error::{Error, Result};
pub use pix::{Color, Pix, PixMut, PixView, PixelSource, crop};
