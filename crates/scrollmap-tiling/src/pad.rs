//! Padding the world image to a whole number of tile steps.

use crate::{StageGeometry, TilingError, TilingResult};
use scrollmap_core::{Image, Rect, Rgba8};
use tracing::debug;

/// Source image embedded at the center of a stride-aligned canvas.
#[derive(Debug, Clone)]
pub struct PaddedImage {
    /// The padded canvas.
    pub image: Image,
    /// Column where the source image starts.
    pub offset_x: u32,
    /// Row where the source image starts.
    pub offset_y: u32,
    /// Source image width.
    pub raw_width: u32,
    /// Source image height.
    pub raw_height: u32,
}

impl PaddedImage {
    /// Rectangle of the original image inside the padded canvas.
    pub fn raw_region(&self) -> Rect {
        Rect::new(self.offset_x, self.offset_y, self.raw_width, self.raw_height)
    }

    /// Padded canvas width.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Padded canvas height.
    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Builds the padded canvas and pastes `world` centered in it.
///
/// Padding is split as evenly as possible; with an odd difference the
/// extra pixel goes to the right / bottom side.
///
/// ```rust
/// use scrollmap_core::{Image, TRANSPARENT};
/// use scrollmap_tiling::{padded_image, StageGeometry};
///
/// let world = Image::filled(500, 400, [1, 2, 3, 255]);
/// let padded = padded_image(&world, &StageGeometry::default(), TRANSPARENT).unwrap();
/// assert_eq!(padded.image.dimensions(), (940, 700));
/// assert_eq!((padded.offset_x, padded.offset_y), (220, 150));
/// ```
pub fn padded_image(world: &Image, geometry: &StageGeometry, fill: Rgba8) -> TilingResult<PaddedImage> {
    let (raw_width, raw_height) = world.dimensions();
    let (padded_w, padded_h) = geometry.padded_dimensions(raw_width as i64, raw_height as i64)?;

    let width = to_extent(padded_w)?;
    let height = to_extent(padded_h)?;
    let offset_x = (width - raw_width) / 2;
    let offset_y = (height - raw_height) / 2;

    debug!(
        raw_width,
        raw_height,
        padded_width = width,
        padded_height = height,
        offset_x,
        offset_y,
        "padding world image"
    );

    let mut image = Image::filled(width, height, fill);
    image.paste(world, offset_x, offset_y)?;

    Ok(PaddedImage {
        image,
        offset_x,
        offset_y,
        raw_width,
        raw_height,
    })
}

fn to_extent(size: i64) -> TilingResult<u32> {
    u32::try_from(size)
        .map_err(|_| TilingError::InvalidGeometry(format!("padded extent {} does not fit in u32", size)))
}
