//! Tile descriptors and grid enumeration.
//!
//! Tiles are addressed by their center in **world space** (y-up, origin at
//! the bottom-left of the padded image) while their pixels are cut from the
//! image in **pixel space** (y-down, origin top-left):
//!
//! ```text
//! pixel space                      world space
//! (0,0) ──► x            v ▲
//!   │   ┌──────┐           │   ┌──────┐
//!   │   │  T   │  <====>   │   │  T   │  (u0, v0) = tile center
//!   ▼   └──────┘           │   └──────┘
//!   y                    (0,0) ──► u
//!
//! left = u0 - half_width
//! top  = image_height - (half_height + v0)
//! ```
//!
//! [`TileDescriptor::pixel_rect`] is the only place this conversion happens.

use crate::{StageGeometry, TilingError, TilingResult};
use scrollmap_core::{Error, Image, Rect};
use tracing::{debug, trace};

/// World-space extent of a tile, half-open on the max side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    /// Left edge.
    pub min_u: i64,
    /// Bottom edge.
    pub min_v: i64,
    /// Right edge (exclusive).
    pub max_u: i64,
    /// Top edge (exclusive).
    pub max_v: i64,
}

impl Footprint {
    /// Returns `true` if the world-space pixel whose lower-left corner is
    /// (u, v) lies inside the footprint.
    pub fn contains(&self, u: i64, v: i64) -> bool {
        u >= self.min_u && u < self.max_u && v >= self.min_v && v < self.max_v
    }
}

/// One map tile: a fixed world-space center and the viewport-sized crop
/// of the padded image around it. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileDescriptor {
    /// World-space center, u axis.
    pub u0: i64,
    /// World-space center, v axis.
    pub v0: i64,
    /// `viewport_width` x `viewport_height` pixels centered on (u0, v0).
    pub image: Image,
}

impl TileDescriptor {
    /// Pixel-space crop rectangle for a tile centered at world (u0, v0).
    ///
    /// # Errors
    ///
    /// [`TilingError::Bounds`] if any part of the rectangle falls outside a
    /// `image_width`x`image_height` image. The rectangle is never clamped.
    pub fn pixel_rect(
        u0: i64,
        v0: i64,
        image_width: u32,
        image_height: u32,
        geometry: &StageGeometry,
    ) -> TilingResult<Rect> {
        let left = u0 - geometry.half_width();
        let top = image_height as i64 - (geometry.half_height() + v0);
        let width = geometry.viewport_width();
        let height = geometry.viewport_height();

        let out_of_bounds = left < 0
            || top < 0
            || left + width > image_width as i64
            || top + height > image_height as i64;
        if out_of_bounds {
            return Err(Error::invalid_region(
                left,
                top,
                width as u32,
                height as u32,
                image_width,
                image_height,
            )
            .into());
        }

        Ok(Rect::new(left as u32, top as u32, width as u32, height as u32))
    }

    /// Cuts the tile centered at world (u0, v0) out of `world_image`.
    pub fn from_world_image(
        u0: i64,
        v0: i64,
        world_image: &Image,
        geometry: &StageGeometry,
    ) -> TilingResult<Self> {
        let rect = Self::pixel_rect(u0, v0, world_image.width(), world_image.height(), geometry)?;
        trace!(u0, v0, ?rect, "cropping tile");
        Ok(Self {
            u0,
            v0,
            image: world_image.crop(rect)?,
        })
    }

    /// Enumerates every grid cell of a padded image.
    ///
    /// Order is row-major: `v0` ascending (bottom row first), then `u0`
    /// ascending within a row.
    ///
    /// # Errors
    ///
    /// - [`TilingError::IncompleteCoverage`] if the last tile along an axis
    ///   does not end exactly on the far edge of the image
    /// - [`TilingError::Bounds`] if a crop leaves the image
    pub fn list_from_image(padded_image: &Image, geometry: &StageGeometry) -> TilingResult<Vec<Self>> {
        let us = grid_centers(
            padded_image.width() as i64,
            geometry.half_width(),
            geometry.stride_u(),
            "u",
        )?;
        let vs = grid_centers(
            padded_image.height() as i64,
            geometry.half_height(),
            geometry.stride_v(),
            "v",
        )?;
        debug!(columns = us.len(), rows = vs.len(), "enumerating tile grid");

        let mut tiles = Vec::with_capacity(us.len() * vs.len());
        for &v0 in &vs {
            for &u0 in &us {
                tiles.push(Self::from_world_image(u0, v0, padded_image, geometry)?);
            }
        }
        Ok(tiles)
    }

    /// World-space extent of this tile.
    pub fn footprint(&self) -> Footprint {
        let half_w = self.image.width() as i64 / 2;
        let half_h = self.image.height() as i64 / 2;
        Footprint {
            min_u: self.u0 - half_w,
            min_v: self.v0 - half_h,
            max_u: self.u0 + half_w,
            max_v: self.v0 + half_h,
        }
    }
}

/// Tile centers along one axis: `half + k*stride` while the tile still fits.
///
/// # Errors
///
/// [`TilingError::InvalidDivisor`] for a non-positive stride and
/// [`TilingError::IncompleteCoverage`] if the last tile stops short of
/// `extent`.
pub fn grid_centers(extent: i64, half: i64, stride: i64, axis: &'static str) -> TilingResult<Vec<i64>> {
    if stride <= 0 {
        return Err(TilingError::InvalidDivisor(stride));
    }

    let mut centers = Vec::new();
    let mut center = half;
    while center + half <= extent {
        centers.push(center);
        center += stride;
    }

    let reached = centers.last().map_or(0, |c| c + half);
    if reached != extent {
        return Err(TilingError::IncompleteCoverage {
            axis,
            reached,
            extent,
        });
    }
    Ok(centers)
}
