//! PNG format support.
//!
//! Reading accepts every PNG color type; palette, low bit depth and 16-bit
//! images are normalized to 8 bits per channel and expanded to RGBA.
//! Writing always produces 8-bit RGBA, which is what tile costumes need.
//!
//! # Example
//!
//! ```rust,ignore
//! use scrollmap_io::png;
//!
//! let world = png::read("world.png")?;
//! let bytes = png::encode(&world)?;
//! ```

use crate::{IoError, IoResult};
use scrollmap_core::Image;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Cursor, Seek, Write};
use std::path::Path;
use tracing::trace;

/// Reads a PNG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let file = File::open(path.as_ref())?;
    decode(BufReader::new(file))
}

/// Decodes a PNG held in memory.
pub fn read_from_memory(data: &[u8]) -> IoResult<Image> {
    decode(Cursor::new(data))
}

fn decode<R: BufRead + Seek>(reader: R) -> IoResult<Image> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let width = info.width;
    let height = info.height;
    let pixels = &buf[..info.buffer_size()];
    trace!(width, height, color_type = ?info.color_type, "png::decode");

    let image = match (info.color_type, info.bit_depth) {
        (png::ColorType::Rgba, png::BitDepth::Eight) => Image::from_raw(width, height, pixels.to_vec())?,
        (png::ColorType::Rgb, png::BitDepth::Eight) => Image::from_rgb(width, height, pixels)?,
        (png::ColorType::Grayscale, png::BitDepth::Eight) => {
            let rgba = pixels.iter().flat_map(|&g| [g, g, g, 255]).collect();
            Image::from_raw(width, height, rgba)?
        }
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => {
            let rgba = pixels
                .chunks_exact(2)
                .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
                .collect();
            Image::from_raw(width, height, rgba)?
        }
        (color_type, bit_depth) => {
            return Err(IoError::UnsupportedBitDepth(format!(
                "{:?} {:?}",
                color_type, bit_depth
            )));
        }
    };

    Ok(image)
}

/// Encodes an image as an 8-bit RGBA PNG in memory.
///
/// ```rust
/// use scrollmap_core::Image;
///
/// let tile = Image::filled(4, 4, [0, 128, 255, 255]);
/// let bytes = scrollmap_io::png::encode(&tile).unwrap();
/// assert_eq!(&bytes[1..4], b"PNG");
/// ```
pub fn encode(image: &Image) -> IoResult<Vec<u8>> {
    let mut bytes = Vec::new();
    encode_into(&mut bytes, image)?;
    Ok(bytes)
}

/// Writes an image to a PNG file.
pub fn write<P: AsRef<Path>>(path: P, image: &Image) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    encode_into(&mut writer, image)?;
    writer.flush()?;
    Ok(())
}

fn encode_into<W: Write>(writer: W, image: &Image) -> IoResult<()> {
    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .write_image_data(image.data())
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    Ok(())
}
