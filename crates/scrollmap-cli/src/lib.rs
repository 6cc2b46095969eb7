//! Image-to-project pipeline behind the `scrollmap` binary.
//!
//! read image -> plan tiles -> encode tiles (parallel) -> write `.sb3`

use anyhow::{Context, Result};
use rayon::prelude::*;
use scrollmap_core::TRANSPARENT;
use scrollmap_project::{write_bundle, BundleRequest, BundleSummary, CameraSetup, ProjectOptions, TileRecord};
use scrollmap_tiling::{plan, StageGeometry, TilePlan};
use std::path::Path;
use tracing::{debug, info};

/// Encodes every tile of `plan` and assembles the writer request.
///
/// Tiles keep plan order; the camera starts at the middle of its range.
pub fn bundle_request(plan: &TilePlan) -> Result<BundleRequest> {
    let tiles = plan
        .tiles
        .par_iter()
        .enumerate()
        .map(|(index, tile)| {
            let tile_id = plan.tile_id(index);
            let image_png = scrollmap_io::png::encode(&tile.image)
                .with_context(|| format!("Failed to encode {}", tile_id))?;
            debug!(tile = %tile_id, bytes = image_png.len(), "encoded tile");
            Ok(TileRecord {
                tile_id,
                center_u: tile.u0,
                center_v: tile.v0,
                image_png,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let bounds = plan.camera_bounds();
    let (start_x, start_y) = bounds.center();

    Ok(BundleRequest {
        stride_u: plan.geometry.stride_u(),
        stride_v: plan.geometry.stride_v(),
        half_width: plan.geometry.half_width(),
        half_height: plan.geometry.half_height(),
        camera: CameraSetup {
            min_x: bounds.min_x,
            max_x: bounds.max_x,
            min_y: bounds.min_y,
            max_y: bounds.max_y,
            start_x,
            start_y,
        },
        tiles,
    })
}

/// Converts the image at `input` into a Scratch project at `output`.
pub fn run(input: &Path, output: &Path) -> Result<BundleSummary> {
    info!(input = %input.display(), "reading image");
    let world = scrollmap_io::read(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let plan = plan(&world, &StageGeometry::default(), TRANSPARENT)
        .with_context(|| format!("Failed to tile {}", input.display()))?;
    let request = bundle_request(&plan)?;

    write_bundle(output, &request, &ProjectOptions::default())
        .with_context(|| format!("Failed to write {}", output.display()))
}
