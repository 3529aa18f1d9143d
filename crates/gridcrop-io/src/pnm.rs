//! PNM (Portable Any Map) format support
//!
//! Reads PGM (P5 binary) and PPM (P6 binary) with a maximum sample
//! value of at most 255, and writes PPM (P6). Bilevel and ASCII
//! variants are not supported.

use crate::{IoError, IoResult};
use gridcrop_core::Pix;
use std::io::{Read, Write};

/// Read a PNM image (P5/P6) from a reader.
///
/// # Returns
/// A 3-sample RGB `Pix`; PGM gray values are replicated into R, G, B.
pub fn read_pnm<R: Read>(mut reader: R) -> IoResult<Pix> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;

    let mut cursor = HeaderCursor::new(&buf);
    let magic = cursor.token()?;
    let samples = match magic {
        b"P5" => 1,
        b"P6" => 3,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNM variant: {}",
                String::from_utf8_lossy(other)
            )));
        }
    };
    let width = cursor.number()?;
    let height = cursor.number()?;
    let maxval = cursor.number()?;
    if maxval == 0 || maxval > 255 {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNM maxval: {}",
            maxval
        )));
    }
    // Exactly one whitespace byte separates the header from the raster
    let start = cursor.pos + 1;

    let needed = width as usize * height as usize * samples;
    let raster = buf
        .get(start..start + needed)
        .ok_or_else(|| IoError::InvalidData("PNM raster truncated".to_string()))?;

    let scale = |v: u8| -> u8 {
        if maxval == 255 {
            v
        } else {
            ((v as u32 * 255 + maxval / 2) / maxval) as u8
        }
    };

    let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
    if samples == 1 {
        for &g in raster {
            let g = scale(g);
            rgb.extend_from_slice(&[g, g, g]);
        }
    } else {
        rgb.extend(raster.iter().map(|&v| scale(v)));
    }

    Ok(Pix::from_raw(width, height, 3, rgb)?)
}

/// Write a `Pix` as binary PPM (P6) to a writer.
///
/// Alpha is dropped.
pub fn write_pnm<W: Write>(pix: &Pix, mut writer: W) -> IoResult<()> {
    write!(writer, "P6\n{} {}\n255\n", pix.width(), pix.height())?;
    if pix.spp() == 3 {
        writer.write_all(pix.data())?;
    } else {
        let spp = pix.spp() as usize;
        let mut row = Vec::with_capacity(pix.width() as usize * 3);
        for y in 0..pix.height() {
            row.clear();
            for px in pix.row_data(y).chunks_exact(spp) {
                row.extend_from_slice(&px[..3]);
            }
            writer.write_all(&row)?;
        }
    }
    Ok(())
}

/// Tokenizer over the ASCII PNM header, skipping `#` comments
struct HeaderCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> HeaderCursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn token(&mut self) -> IoResult<&'a [u8]> {
        loop {
            match self.data.get(self.pos) {
                Some(b'#') => {
                    while let Some(&c) = self.data.get(self.pos) {
                        self.pos += 1;
                        if c == b'\n' {
                            break;
                        }
                    }
                }
                Some(c) if c.is_ascii_whitespace() => self.pos += 1,
                Some(_) => break,
                None => {
                    return Err(IoError::InvalidData("PNM header truncated".to_string()));
                }
            }
        }
        let start = self.pos;
        while let Some(c) = self.data.get(self.pos) {
            if c.is_ascii_whitespace() {
                break;
            }
            self.pos += 1;
        }
        Ok(&self.data[start..self.pos])
    }

    fn number(&mut self) -> IoResult<u32> {
        let tok = self.token()?;
        std::str::from_utf8(tok)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| {
                IoError::InvalidData(format!(
                    "invalid PNM header field: {}",
                    String::from_utf8_lossy(tok)
                ))
            })
    }
}
