//! Planner behaviour under non-Scratch stage geometries.

use scrollmap_core::{Image, TRANSPARENT};
use scrollmap_tiling::{plan, StageGeometry, TilingError};

fn numbered(width: u32, height: u32) -> Image {
    let mut img = Image::new(width, height);
    for y in 0..height {
        for x in 0..width {
            img.set_pixel(x, y, [x as u8, y as u8, 1, 255]).unwrap();
        }
    }
    img
}

#[test]
fn test_small_stage_grid() {
    let geometry = StageGeometry::new(10, 6, 4).unwrap();
    assert_eq!((geometry.stride_u(), geometry.stride_v()), (16, 8));

    let plan = plan(&numbered(37, 20), &geometry, TRANSPARENT).unwrap();
    assert_eq!((plan.world_width(), plan.world_height()), (52, 20));
    assert_eq!((plan.columns, plan.rows), (3, 2));

    let centers: Vec<_> = plan.tiles.iter().map(|t| (t.u0, t.v0)).collect();
    assert_eq!(centers, [(10, 6), (26, 6), (42, 6), (10, 14), (26, 14), (42, 14)]);
    for tile in &plan.tiles {
        assert_eq!(tile.image.dimensions(), (20, 12));
    }
}

#[test]
fn test_small_stage_tiles_match_world() {
    let geometry = StageGeometry::new(10, 6, 4).unwrap();
    let plan = plan(&numbered(37, 20), &geometry, TRANSPARENT).unwrap();
    let world = &plan.padded.image;
    let height = plan.world_height();

    for tile in &plan.tiles {
        let left = tile.u0 - geometry.half_width();
        let top = height - (tile.v0 + geometry.half_height());
        for y in 0..tile.image.height() {
            for x in 0..tile.image.width() {
                assert_eq!(
                    tile.image.get_pixel(x, y),
                    world.get_pixel(left as u32 + x, top as u32 + y),
                    "tile ({}, {}) pixel ({}, {})",
                    tile.u0,
                    tile.v0,
                    x,
                    y
                );
            }
        }
    }
}

#[test]
fn test_degenerate_overlap_is_rejected_up_front() {
    for overlap in [0, -1, 12, 13, 40] {
        let result = StageGeometry::new(10, 6, overlap);
        assert!(
            matches!(result, Err(TilingError::InvalidGeometry(_))),
            "overlap {} accepted",
            overlap
        );
    }
}

#[test]
fn test_camera_bounds_follow_geometry() {
    let geometry = StageGeometry::new(10, 6, 4).unwrap();
    let plan = plan(&numbered(37, 20), &geometry, TRANSPARENT).unwrap();
    let bounds = plan.camera_bounds();
    assert_eq!((bounds.min_x, bounds.max_x), (10, 42));
    assert_eq!((bounds.min_y, bounds.max_y), (6, 14));

    let mut scene = plan.scene(None);
    scene.set_center(bounds.max_x, bounds.max_y);
    let shown: Vec<_> = scene.visible_tiles().map(|(i, _)| plan.tile_id(i)).collect();
    assert_eq!(shown, ["tile-1-2"]);
}
