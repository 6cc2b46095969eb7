//! End-to-end planning: pad, partition, and describe the grid.

use crate::{padded_image, CameraBounds, PaddedImage, Scene, StageGeometry, TileDescriptor, TilingResult};
use scrollmap_core::{Image, Rgba8};
use tracing::info;

/// Output of the tiling planner.
#[derive(Debug, Clone)]
pub struct TilePlan {
    /// Geometry the plan was built with.
    pub geometry: StageGeometry,
    /// Padded world image.
    pub padded: PaddedImage,
    /// Tiles in row-major order (bottom row first).
    pub tiles: Vec<TileDescriptor>,
    /// Tiles per row.
    pub columns: usize,
    /// Number of rows.
    pub rows: usize,
}

/// Pads `world`, partitions it into overlapping tiles and returns the plan.
///
/// ```rust
/// use scrollmap_core::{Image, TRANSPARENT};
/// use scrollmap_tiling::{plan, StageGeometry};
///
/// let world = Image::filled(500, 400, [0, 0, 0, 255]);
/// let plan = plan(&world, &StageGeometry::default(), TRANSPARENT).unwrap();
/// assert_eq!((plan.columns, plan.rows), (2, 2));
/// assert_eq!(plan.tile_id(3), "tile-1-1");
/// ```
pub fn plan(world: &Image, geometry: &StageGeometry, fill: Rgba8) -> TilingResult<TilePlan> {
    // Reject degenerate strides before touching any pixels.
    geometry.padded_dimensions(world.width() as i64, world.height() as i64)?;

    let padded = padded_image(world, geometry, fill)?;
    let tiles = TileDescriptor::list_from_image(&padded.image, geometry)?;

    let columns = tiles.iter().take_while(|t| t.v0 == tiles[0].v0).count();
    let rows = if columns == 0 { 0 } else { tiles.len() / columns };

    info!(
        raw_width = world.width(),
        raw_height = world.height(),
        padded_width = padded.width(),
        padded_height = padded.height(),
        columns,
        rows,
        stride_u = geometry.stride_u(),
        stride_v = geometry.stride_v(),
        "tile plan ready"
    );

    Ok(TilePlan {
        geometry: *geometry,
        padded,
        tiles,
        columns,
        rows,
    })
}

impl TilePlan {
    /// Padded world width.
    pub fn world_width(&self) -> i64 {
        self.padded.width() as i64
    }

    /// Padded world height.
    pub fn world_height(&self) -> i64 {
        self.padded.height() as i64
    }

    /// `(row, column)` of the tile at `index`.
    pub fn grid_position(&self, index: usize) -> (usize, usize) {
        (index / self.columns, index % self.columns)
    }

    /// Stable identifier of the tile at `index`.
    pub fn tile_id(&self, index: usize) -> String {
        let (row, col) = self.grid_position(index);
        format!("tile-{}-{}", row, col)
    }

    /// Viewport centers that keep the whole viewport inside the padded image.
    pub fn camera_bounds(&self) -> CameraBounds {
        let hw = self.geometry.half_width();
        let hh = self.geometry.half_height();
        CameraBounds {
            min_x: hw,
            max_x: self.world_width() - hw,
            min_y: hh,
            max_y: self.world_height() - hh,
        }
    }

    /// Run-time scene for this plan, camera at `start` or the world center.
    pub fn scene(&self, start: Option<(i64, i64)>) -> Scene {
        let bounds = self.camera_bounds();
        let centers = self.tiles.iter().map(|t| (t.u0, t.v0)).collect();
        Scene::new(
            centers,
            self.geometry.stride_u(),
            self.geometry.stride_v(),
            bounds,
            start.unwrap_or_else(|| bounds.center()),
        )
    }
}
