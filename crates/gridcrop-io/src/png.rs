//! PNG image format support
//!
//! Every PNG flavor (palette, 1-16 bit gray, gray+alpha, RGB, RGBA) is
//! normalized to 8-bit samples on read and stored as a 3- or 4-sample
//! `Pix`. Gray inputs are replicated into R, G and B.

use crate::{IoError, IoResult};
use ::png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use gridcrop_core::Pix;
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG output depth: {:?}",
            bit_depth
        )));
    }

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width;
    let height = output_info.height;
    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    let (in_samples, spp) = match color_type {
        ColorType::Grayscale => (1, 3),
        ColorType::GrayscaleAlpha => (2, 4),
        ColorType::Rgb => (3, 3),
        ColorType::Rgba => (4, 4),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG color type after expansion: {:?}",
                other
            )));
        }
    };

    let mut out = Vec::with_capacity(width as usize * height as usize * spp);
    for y in 0..height as usize {
        let row = &data[y * bytes_per_row..y * bytes_per_row + width as usize * in_samples];
        match color_type {
            ColorType::Grayscale => {
                for &g in row {
                    out.extend_from_slice(&[g, g, g]);
                }
            }
            ColorType::GrayscaleAlpha => {
                for px in row.chunks_exact(2) {
                    out.extend_from_slice(&[px[0], px[0], px[0], px[1]]);
                }
            }
            _ => out.extend_from_slice(row),
        }
    }

    Ok(Pix::from_raw(width, height, spp as u32, out)?)
}

/// Write a PNG image
///
/// 3-sample images are written as 8-bit RGB, 4-sample images as
/// 8-bit RGBA.
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let color_type = if pix.spp() == 4 {
        ColorType::Rgba
    } else {
        ColorType::Rgb
    };

    let mut encoder = Encoder::new(writer, pix.width(), pix.height());
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    writer
        .write_image_data(pix.data())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridcrop_core::Color;
    use std::io::Cursor;

    #[test]
    fn test_png_roundtrip_rgb() {
        let mut pm = Pix::new_filled(5, 4, 3, Color::WHITE).unwrap().to_mut();
        pm.set_rgb(0, 0, 255, 0, 0).unwrap();
        pm.set_rgb(1, 1, 0, 255, 0).unwrap();
        pm.set_rgb(4, 3, 0, 0, 255).unwrap();
        let pix: Pix = pm.into();

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();
        let pix2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!((pix2.width(), pix2.height(), pix2.spp()), (5, 4, 3));
        assert_eq!(pix2.data(), pix.data());
    }

    #[test]
    fn test_png_roundtrip_rgba() {
        let mut pm = Pix::new(3, 3, 4).unwrap().to_mut();
        pm.set_rgba(2, 1, 10, 20, 30, 40).unwrap();
        let pix: Pix = pm.into();

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();
        let pix2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(pix2.spp(), 4);
        assert_eq!(pix2.get_rgba(2, 1), Some((10, 20, 30, 40)));
    }

    #[test]
    fn test_png_grayscale_expands_to_rgb() {
        let mut buffer = Vec::new();
        {
            let mut encoder = Encoder::new(&mut buffer, 2, 1);
            encoder.set_color(ColorType::Grayscale);
            encoder.set_depth(BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0, 200]).unwrap();
        }
        let pix = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(pix.spp(), 3);
        assert_eq!(pix.get_rgb(0, 0), Some((0, 0, 0)));
        assert_eq!(pix.get_rgb(1, 0), Some((200, 200, 200)));
    }

    #[test]
    fn test_png_garbage_is_decode_error() {
        let data = b"\x89PNG\r\n\x1a\nthis is not a png".to_vec();
        assert!(matches!(
            read_png(Cursor::new(data)),
            Err(IoError::DecodeError(_))
        ));
    }
}
