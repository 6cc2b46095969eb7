//! Rectangle type for image regions.
//!
//! Used for:
//! - Crop rectangles of map tiles
//! - The paste rectangle of the source image inside the padded canvas
//!
//! # Coordinate System
//!
//! All coordinates use the image convention:
//! - Origin (0, 0) is at the **top-left** corner
//! - X increases to the right
//! - Y increases downward
//!
//! ```text
//! (0,0) ────────► X
//!   │
//!   │   ┌──────────┐
//!   │   │   Tile   │
//!   │   │   Crop   │
//!   │   └──────────┘
//!   ▼
//!   Y
//! ```
//!
//! # Usage
//!
//! ```rust
//! use scrollmap_core::Rect;
//!
//! let rect = Rect::new(10, 20, 100, 50);
//! assert_eq!((rect.right(), rect.bottom()), (110, 70));
//! assert!(rect.fits_within(110, 70));
//! assert!(!rect.fits_within(109, 70));
//! ```

/// A rectangle defined by origin (x, y) and dimensions (width, height).
///
/// All values are in pixels. Left/top edges are inclusive, right/bottom
/// edges exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate of the left edge (inclusive)
    pub x: u32,
    /// Y coordinate of the top edge (inclusive)
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Creates a new rectangle with the given origin and dimensions.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// X coordinate of the right edge (exclusive).
    ///
    /// Computed in `u64` so that rectangles near `u32::MAX` do not wrap.
    #[inline]
    pub const fn right(&self) -> u64 {
        self.x as u64 + self.width as u64
    }

    /// Y coordinate of the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u64 {
        self.y as u64 + self.height as u64
    }

    /// Returns `true` if this rectangle lies within a `width`x`height` image.
    #[inline]
    pub const fn fits_within(&self, width: u32, height: u32) -> bool {
        self.right() <= width as u64 && self.bottom() <= height as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let rect = Rect::new(10, 20, 100, 50);
        assert_eq!(rect.right(), 110);
        assert_eq!(rect.bottom(), 70);
    }

    #[test]
    fn test_fits_within() {
        let rect = Rect::new(460, 340, 480, 360);
        assert!(rect.fits_within(940, 700));
        assert!(!rect.fits_within(939, 700));
        assert!(!rect.fits_within(940, 699));
    }

    #[test]
    fn test_fits_within_no_wrap() {
        let rect = Rect::new(u32::MAX, 0, 10, 1);
        assert!(!rect.fits_within(u32::MAX, 1));
    }
}
