//! Viewport and overlap constants.
//!
//! [`StageGeometry`] is fixed before planning starts and only read afterwards.
//! Everything else in this crate takes it by reference.

use crate::{padded_size, TilingError, TilingResult};

/// Half-extent of the Scratch stage (480x360).
pub const SCRATCH_HALF_WIDTH: i64 = 240;
/// Half-extent of the Scratch stage (480x360).
pub const SCRATCH_HALF_HEIGHT: i64 = 180;
/// Default overlap between neighbouring tiles, in world units.
pub const DEFAULT_OVERLAP: i64 = 20;

/// Viewport half-extents and required tile overlap.
///
/// The constructor enforces `0 < overlap < 2*half` on both axes, so both
/// strides are always positive.
///
/// ```rust
/// use scrollmap_tiling::StageGeometry;
///
/// let geometry = StageGeometry::default();
/// assert_eq!((geometry.stride_u(), geometry.stride_v()), (460, 340));
/// assert!(StageGeometry::new(240, 180, 360).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageGeometry {
    half_width: i64,
    half_height: i64,
    overlap: i64,
}

impl StageGeometry {
    /// Validates and creates a geometry.
    ///
    /// # Errors
    ///
    /// [`TilingError::InvalidGeometry`] if a half-extent is not positive or
    /// too large to double, or the overlap is not strictly between zero and the viewport extent.
    pub fn new(half_width: i64, half_height: i64, overlap: i64) -> TilingResult<Self> {
        if half_width <= 0 || half_height <= 0 {
            return Err(TilingError::InvalidGeometry(format!(
                "viewport half-extent must be positive, got {}x{}",
                half_width, half_height
            )));
        }
        if overlap <= 0 {
            return Err(TilingError::InvalidGeometry(format!(
                "overlap must be positive, got {}",
                overlap
            )));
        }
        // Every viewport and stride computation doubles a half-extent.
        if half_width.max(half_height).checked_mul(2).is_none() {
            return Err(TilingError::InvalidGeometry(format!(
                "viewport half-extent {}x{} is too large",
                half_width, half_height
            )));
        }
        let limit = 2 * half_width.min(half_height);
        if overlap >= limit {
            return Err(TilingError::InvalidGeometry(format!(
                "overlap {} must be smaller than the viewport extent {}",
                overlap, limit
            )));
        }
        Ok(Self {
            half_width,
            half_height,
            overlap,
        })
    }

    /// Half of the viewport width.
    #[inline]
    pub fn half_width(&self) -> i64 {
        self.half_width
    }

    /// Half of the viewport height.
    #[inline]
    pub fn half_height(&self) -> i64 {
        self.half_height
    }

    /// Required overlap between adjacent tiles.
    #[inline]
    pub fn overlap(&self) -> i64 {
        self.overlap
    }

    /// Full viewport width; also the width of every tile.
    #[inline]
    pub fn viewport_width(&self) -> i64 {
        2 * self.half_width
    }

    /// Full viewport height; also the height of every tile.
    #[inline]
    pub fn viewport_height(&self) -> i64 {
        2 * self.half_height
    }

    /// Horizontal center-to-center tile spacing.
    #[inline]
    pub fn stride_u(&self) -> i64 {
        self.viewport_width() - self.overlap
    }

    /// Vertical center-to-center tile spacing.
    #[inline]
    pub fn stride_v(&self) -> i64 {
        self.viewport_height() - self.overlap
    }

    /// Padded canvas size for a raw image of `raw_width`x`raw_height`.
    pub fn padded_dimensions(&self, raw_width: i64, raw_height: i64) -> TilingResult<(i64, i64)> {
        Ok((
            padded_size(raw_width, self.half_width, self.overlap)?,
            padded_size(raw_height, self.half_height, self.overlap)?,
        ))
    }
}

impl Default for StageGeometry {
    fn default() -> Self {
        Self {
            half_width: SCRATCH_HALF_WIDTH,
            half_height: SCRATCH_HALF_HEIGHT,
            overlap: DEFAULT_OVERLAP,
        }
    }
}
