//! Owned RGBA8 image buffer.
//!
//! # Memory Layout
//!
//! Pixels are stored in **row-major** order, top-to-bottom, four interleaved
//! 8-bit channels per pixel:
//!
//! ```text
//! Memory: [R G B A R G B A ...]  ← Row 0
//!         [R G B A R G B A ...]  ← Row 1
//!         ...
//! ```
//!
//! Every decoder in `scrollmap-io` normalizes to this layout, so tiling never
//! has to deal with channel counts or bit depths.
//!
//! # Usage
//!
//! ```rust
//! use scrollmap_core::{Image, Rect};
//!
//! let mut canvas = Image::filled(8, 8, [0, 0, 0, 255]);
//! let dot = Image::filled(2, 2, [255, 0, 0, 255]);
//! canvas.paste(&dot, 3, 3).unwrap();
//!
//! let crop = canvas.crop(Rect::new(3, 3, 2, 2)).unwrap();
//! assert_eq!(crop.data(), dot.data());
//! ```

use crate::{Error, Rect, Result};

/// One RGBA pixel, 8 bits per channel.
pub type Rgba8 = [u8; 4];

/// Fully transparent black.
pub const TRANSPARENT: Rgba8 = [0, 0, 0, 0];

/// Number of interleaved channels per pixel.
pub const CHANNELS: usize = 4;

/// Owned RGBA8 image in pixel space (origin top-left, y down).
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Image {
    /// Creates a fully transparent image.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, TRANSPARENT)
    }

    /// Creates an image with every pixel set to `pixel`.
    ///
    /// ```rust
    /// use scrollmap_core::Image;
    ///
    /// let img = Image::filled(4, 2, [10, 20, 30, 255]);
    /// assert_eq!(img.get_pixel(3, 1), Some([10, 20, 30, 255]));
    /// ```
    pub fn filled(width: u32, height: u32, pixel: Rgba8) -> Self {
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            data.extend_from_slice(&pixel);
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Creates an image from an RGBA8 buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len()` is not
    /// `width * height * 4`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} bytes, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates an opaque image from an RGB8 buffer.
    pub fn from_rgb(width: u32, height: u32, rgb: &[u8]) -> Result<Self> {
        let expected = width as usize * height as usize * 3;
        if rgb.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} RGB bytes, got {}", expected, rgb.len()),
            ));
        }
        let data = rgb
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect();
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw RGBA8 bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Returns the pixel at (x, y), or `None` if outside the image.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        Some([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    /// Sets the pixel at (x, y).
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Rgba8) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        let i = self.offset(x, y);
        self.data[i..i + CHANNELS].copy_from_slice(&pixel);
        Ok(())
    }

    /// Copies a region into a new image.
    ///
    /// The region must lie entirely inside the image; it is never clamped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRegion`] if `rect` extends past any edge.
    pub fn crop(&self, rect: Rect) -> Result<Image> {
        if !rect.fits_within(self.width, self.height) {
            return Err(Error::invalid_region(
                rect.x as i64,
                rect.y as i64,
                rect.width,
                rect.height,
                self.width,
                self.height,
            ));
        }

        let row_bytes = rect.width as usize * CHANNELS;
        let mut data = Vec::with_capacity(row_bytes * rect.height as usize);
        for y in rect.y..rect.y + rect.height {
            let start = self.offset(rect.x, y);
            data.extend_from_slice(&self.data[start..start + row_bytes]);
        }

        Ok(Image {
            data,
            width: rect.width,
            height: rect.height,
        })
    }

    /// Copies `src` into this image with its top-left corner at (x, y).
    ///
    /// Pixels are replaced, not blended.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRegion`] if `src` would not fit entirely.
    pub fn paste(&mut self, src: &Image, x: u32, y: u32) -> Result<()> {
        let target = Rect::new(x, y, src.width, src.height);
        if !target.fits_within(self.width, self.height) {
            return Err(Error::invalid_region(
                x as i64,
                y as i64,
                src.width,
                src.height,
                self.width,
                self.height,
            ));
        }

        let row_bytes = src.width as usize * CHANNELS;
        for row in 0..src.height {
            let dst = self.offset(x, y + row);
            let from = src.offset(0, row);
            self.data[dst..dst + row_bytes].copy_from_slice(&src.data[from..from + row_bytes]);
        }
        Ok(())
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> Image {
        let mut img = Image::new(width, height);
        for y in 0..height {
            for x in 0..width {
                img.set_pixel(x, y, [x as u8, y as u8, 7, 255]).unwrap();
            }
        }
        img
    }

    #[test]
    fn test_from_raw_length_check() {
        assert!(Image::from_raw(2, 2, vec![0; 16]).is_ok());
        let err = Image::from_raw(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions { .. }));
    }

    #[test]
    fn test_from_rgb_adds_opaque_alpha() {
        let img = Image::from_rgb(1, 2, &[1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(img.get_pixel(0, 1), Some([4, 5, 6, 255]));
    }

    #[test]
    fn test_crop() {
        let img = gradient(4, 4);
        let cropped = img.crop(Rect::new(1, 2, 2, 2)).unwrap();
        assert_eq!(cropped.dimensions(), (2, 2));
        assert_eq!(cropped.get_pixel(0, 0), Some([1, 2, 7, 255]));
        assert_eq!(cropped.get_pixel(1, 1), Some([2, 3, 7, 255]));
    }

    #[test]
    fn test_crop_out_of_bounds_is_not_clamped() {
        let img = gradient(4, 4);
        let err = img.crop(Rect::new(3, 3, 2, 2)).unwrap_err();
        assert!(err.is_bounds_error());
    }

    #[test]
    fn test_crop_full_image() {
        let img = gradient(5, 3);
        assert_eq!(img.crop(Rect::new(0, 0, 5, 3)).unwrap(), img);
    }

    #[test]
    fn test_paste() {
        let mut canvas = Image::new(4, 4);
        let src = Image::filled(2, 1, [9, 9, 9, 9]);
        canvas.paste(&src, 2, 3).unwrap();
        assert_eq!(canvas.get_pixel(2, 3), Some([9, 9, 9, 9]));
        assert_eq!(canvas.get_pixel(3, 3), Some([9, 9, 9, 9]));
        assert_eq!(canvas.get_pixel(1, 3), Some(TRANSPARENT));
    }

    #[test]
    fn test_paste_out_of_bounds() {
        let mut canvas = Image::new(4, 4);
        let src = Image::filled(2, 2, [1, 1, 1, 1]);
        assert!(canvas.paste(&src, 3, 0).is_err());
        // Nothing was written.
        assert_eq!(canvas, Image::new(4, 4));
    }

    #[test]
    fn test_set_pixel_out_of_bounds() {
        let mut img = Image::new(2, 2);
        assert!(img.set_pixel(2, 0, [0; 4]).is_err());
    }
}
