//! gridcrop-io - Page image I/O
//!
//! Decodes rendered pages into [`Pix`] and encodes crops back out.
//!
//! # Supported Formats
//!
//! | Format | Read | Write | Feature |
//! |--------|------|-------|---------|
//! | PNG    | yes  | yes   | `png-format` |
//! | JPEG   | yes  | yes   | `jpeg` |
//! | PNM    | P5/P6 | P6   | `pnm` |
//!
//! All decoded images come back as 8-bit RGB or RGBA.

mod error;
pub mod format;

#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use gridcrop_core::Pix;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Read an image from a file, detecting its format from the content
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let data = std::fs::read(path)?;
    read_image_mem(&data)
}

/// Read an image from memory, detecting its format from the content
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(data, format)
}

/// Read an image from memory with a known format
pub fn read_image_format(data: &[u8], format: ImageFormat) -> IoResult<Pix> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => crate::png::read_png(std::io::Cursor::new(data)),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => crate::jpeg::read_jpeg(data),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => crate::pnm::read_pnm(data),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support not enabled",
            other
        ))),
    }
}

/// Write an image to a file
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_image_format(pix, &mut writer, format)?;
    std::io::Write::flush(&mut writer)?;
    Ok(())
}

/// Encode an image into a byte vector
pub fn write_image_mem(pix: &Pix, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_image_format(pix, &mut buffer, format)?;
    Ok(buffer)
}

fn write_image_format<W: std::io::Write>(
    pix: &Pix,
    writer: W,
    format: ImageFormat,
) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => crate::png::write_png(pix, writer),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => crate::jpeg::write_jpeg(pix, writer, crate::jpeg::DEFAULT_QUALITY),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => crate::pnm::write_pnm(pix, writer),
        #[allow(unreachable_patterns)]
        other => {
            let _ = (pix, writer);
            Err(IoError::UnsupportedFormat(format!(
                "{:?} support not enabled",
                other
            )))
        }
    }
}
