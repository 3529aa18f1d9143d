//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate and writes them with
//! `jpeg-encoder`. Grayscale and CMYK inputs are converted to RGB on
//! read, since rendered pages reach us in all three flavors.

use crate::{IoError, IoResult};
use gridcrop_core::Pix;
use jpeg_decoder::PixelFormat;
use std::io::{Read, Write};

/// Default quality used by [`write_jpeg`] callers that have no preference
pub const DEFAULT_QUALITY: u8 = 90;

/// Read a JPEG image from a reader.
///
/// # Arguments
/// * `reader` - A reader positioned at the JPEG SOI marker (`FF D8`)
///
/// # Returns
/// A 3-sample RGB `Pix`.
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Pix> {
    let mut decoder = jpeg_decoder::Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;
    let npix = width as usize * height as usize;

    let rgb = match info.pixel_format {
        PixelFormat::RGB24 => pixels,
        PixelFormat::L8 => {
            let mut out = Vec::with_capacity(npix * 3);
            for &g in &pixels {
                out.extend_from_slice(&[g, g, g]);
            }
            out
        }
        PixelFormat::CMYK32 => {
            let mut out = Vec::with_capacity(npix * 3);
            for px in pixels.chunks_exact(4) {
                let k = px[3] as u32;
                let channel = |c: u8| ((255 - c as u32) * (255 - k) / 255) as u8;
                out.extend_from_slice(&[channel(px[0]), channel(px[1]), channel(px[2])]);
            }
            out
        }
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported JPEG pixel format: {:?}",
                other
            )));
        }
    };

    Ok(Pix::from_raw(width, height, 3, rgb)?)
}

/// Write a `Pix` as a baseline JPEG.
///
/// Alpha is dropped; JPEG has no transparency.
///
/// # Arguments
/// * `pix`     - The image to encode
/// * `writer`  - Destination writer
/// * `quality` - Encoder quality, 1-100
pub fn write_jpeg<W: Write>(pix: &Pix, writer: W, quality: u8) -> IoResult<()> {
    let width = u16::try_from(pix.width()).map_err(|_| {
        IoError::EncodeError(format!("width {} exceeds JPEG limit", pix.width()))
    })?;
    let height = u16::try_from(pix.height()).map_err(|_| {
        IoError::EncodeError(format!("height {} exceeds JPEG limit", pix.height()))
    })?;

    let color_type = if pix.spp() == 4 {
        jpeg_encoder::ColorType::Rgba
    } else {
        jpeg_encoder::ColorType::Rgb
    };

    let encoder = jpeg_encoder::Encoder::new(writer, quality.clamp(1, 100));
    encoder
        .encode(pix.data(), width, height, color_type)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))
}
