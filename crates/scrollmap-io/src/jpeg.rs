//! JPEG format support (decode only).
//!
//! Every JPEG pixel format is converted to opaque RGBA8:
//! - `RGB24` gains an opaque alpha channel
//! - `L8` / `L16` are replicated to gray RGB (16-bit keeps the high byte)
//! - `CMYK32` uses the usual approximate `(1 - c) * (1 - k)` conversion

use crate::{IoError, IoResult};
use scrollmap_core::Image;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::trace;

/// Reads a JPEG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let file = File::open(path.as_ref())?;
    decode(file)
}

/// Decodes a JPEG held in memory.
pub fn read_from_memory(data: &[u8]) -> IoResult<Image> {
    decode(data)
}

fn decode<R: Read>(reader: R) -> IoResult<Image> {
    let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(reader));
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;

    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

    let width = info.width as u32;
    let height = info.height as u32;
    trace!(width, height, pixel_format = ?info.pixel_format, "jpeg::decode");

    let rgba: Vec<u8> = match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => pixels
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect(),
        jpeg_decoder::PixelFormat::L8 => pixels.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        jpeg_decoder::PixelFormat::L16 => pixels
            .chunks_exact(2)
            .flat_map(|l16| {
                let g = l16[0];
                [g, g, g, 255]
            })
            .collect(),
        jpeg_decoder::PixelFormat::CMYK32 => pixels
            .chunks_exact(4)
            .flat_map(|cmyk| {
                let c = cmyk[0] as f32 / 255.0;
                let m = cmyk[1] as f32 / 255.0;
                let y = cmyk[2] as f32 / 255.0;
                let k = cmyk[3] as f32 / 255.0;

                let r = ((1.0 - c) * (1.0 - k) * 255.0) as u8;
                let g = ((1.0 - m) * (1.0 - k) * 255.0) as u8;
                let b = ((1.0 - y) * (1.0 - k) * 255.0) as u8;

                [r, g, b, 255]
            })
            .collect(),
    };

    Ok(Image::from_raw(width, height, rgba)?)
}
