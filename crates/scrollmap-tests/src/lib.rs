//! Integration tests for scrollmap crates.
//!
//! End-to-end checks across image decoding, tiling, the run-time scene and
//! the `.sb3` writer.

#[cfg(test)]
mod tests {
    use scrollmap_core::{Image, Rect, TRANSPARENT};
    use scrollmap_tiling::{plan, StageGeometry, TilePlan};
    use serde_json::Value;
    use std::fs::File;
    use std::io::Read;
    use std::path::Path;
    use tempfile::tempdir;

    fn gradient(width: u32, height: u32) -> Image {
        let mut img = Image::new(width, height);
        for y in 0..height {
            for x in 0..width {
                img.set_pixel(x, y, [(x % 251) as u8, (y % 241) as u8, ((x + y) % 256) as u8, 255])
                    .unwrap();
            }
        }
        img
    }

    fn read_project(path: &Path) -> Value {
        let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
        let mut json = String::new();
        archive
            .by_name("project.json")
            .unwrap()
            .read_to_string(&mut json)
            .unwrap();
        serde_json::from_str(&json).unwrap()
    }

    /// Draws the shown tiles of `plan` with the camera at (cx, cy) and checks
    /// sampled viewport pixels against the padded world directly.
    fn assert_viewport_matches(plan: &TilePlan, cx: i64, cy: i64) {
        let mut scene = plan.scene(None);
        scene.set_center(cx, cy);
        let (cx, cy) = (scene.viewport().center_x, scene.viewport().center_y);

        let vw = plan.geometry.viewport_width();
        let vh = plan.geometry.viewport_height();
        let world = &plan.padded.image;
        let left = cx - plan.geometry.half_width();
        let top = plan.world_height() - (cy + plan.geometry.half_height());
        let shown: Vec<_> = scene.visible_tiles().collect();
        assert!(!shown.is_empty());

        for y in (0..vh).step_by(7).chain([vh - 1]) {
            for x in (0..vw).step_by(7).chain([vw - 1]) {
                let expected = world.get_pixel((left + x) as u32, (top + y) as u32);
                // A tile drawn at offset (s, t) has its top-left at screen (s, -t).
                let drawn = shown.iter().find_map(|&(index, (s, t))| {
                    let (tx, ty) = (x - s, y + t);
                    if (0..vw).contains(&tx) && (0..vh).contains(&ty) {
                        plan.tiles[index].image.get_pixel(tx as u32, ty as u32)
                    } else {
                        None
                    }
                });
                assert_eq!(drawn, expected, "camera ({}, {}) pixel ({}, {})", cx, cy, x, y);
            }
        }
    }

    #[test]
    fn test_scenario_500x400_end_to_end() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("world.png");
        let output = dir.path().join("world.sb3");
        scrollmap_io::png::write(&input, &gradient(500, 400)).unwrap();

        let summary = scrollmap_cli::run(&input, &output).unwrap();
        assert_eq!(summary.tiles, 4);
        assert_eq!(summary.path, output);

        let project = read_project(&output);
        let targets = project["targets"].as_array().unwrap();
        let names: Vec<_> = targets.iter().map(|t| t["name"].as_str().unwrap()).collect();
        assert_eq!(names, ["Stage", "tile-0-0", "tile-0-1", "tile-1-0", "tile-1-1", "Player"]);

        let stage = &targets[0];
        let vars: Vec<_> = stage["variables"]
            .as_object()
            .unwrap()
            .values()
            .map(|v| v[0].as_str().unwrap().to_string())
            .collect();
        assert!(vars.contains(&"camera-x".to_string()));
        assert!(vars.contains(&"camera-y".to_string()));

        // Tile centers baked into the subtract blocks.
        let mut centers = Vec::new();
        for tile in &targets[1..5] {
            let mut nums: Vec<i64> = tile["blocks"]
                .as_object()
                .unwrap()
                .values()
                .filter(|b| b["opcode"] == "operator_subtract")
                .map(|b| b["inputs"]["NUM1"][1][1].as_str().unwrap().parse().unwrap())
                .collect();
            nums.sort();
            centers.push(nums);
        }
        // Each block pair is (v0, u0) sorted, so compare as sets.
        let mut expected = vec![vec![180, 240], vec![180, 700], vec![240, 520], vec![520, 700]];
        expected.sort();
        centers.sort();
        assert_eq!(centers, expected);
    }

    #[test]
    fn test_tile_strides_in_project() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("wide.png");
        let output = dir.path().join("wide.sb3");
        scrollmap_io::png::write(&input, &Image::filled(1500, 300, [9, 9, 9, 255])).unwrap();
        scrollmap_cli::run(&input, &output).unwrap();

        let project = read_project(&output);
        for tile in project["targets"].as_array().unwrap().iter().filter(|t| {
            t["name"].as_str().is_some_and(|n| n.starts_with("tile-"))
        }) {
            let mut limits: Vec<String> = tile["blocks"]
                .as_object()
                .unwrap()
                .values()
                .filter(|b| b["opcode"] == "operator_gt" || b["opcode"] == "operator_lt")
                .map(|b| b["inputs"]["OPERAND2"][1][1].as_str().unwrap().to_string())
                .collect();
            limits.sort();
            assert_eq!(limits, ["-340", "-460", "340", "460"]);
        }
    }

    #[test]
    fn test_viewport_is_seamless() {
        let world = gradient(1000, 800);
        let plan = plan(&world, &StageGeometry::default(), TRANSPARENT).unwrap();
        assert_eq!((plan.world_width(), plan.world_height()), (1400, 1040));
        assert_eq!((plan.columns, plan.rows), (3, 3));

        let bounds = plan.camera_bounds();
        let xs = [bounds.min_x, 469, 699, 700, 701, 930, bounds.max_x];
        let ys = [bounds.min_y, 349, 520, 521, bounds.max_y];
        for &cx in &xs {
            for &cy in &ys {
                assert_viewport_matches(&plan, cx, cy);
            }
        }
    }

    #[test]
    fn test_padded_world_holds_source() {
        let world = gradient(500, 400);
        let plan = plan(&world, &StageGeometry::default(), TRANSPARENT).unwrap();
        let region: Rect = plan.padded.raw_region();
        assert_eq!(plan.padded.image.crop(region).unwrap(), world);
        assert_eq!(plan.padded.image.get_pixel(0, 0), Some(TRANSPARENT));
    }

    #[test]
    fn test_unreadable_input_writes_nothing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("notes.txt");
        let output = dir.path().join("out.sb3");
        std::fs::write(&input, b"not an image").unwrap();

        assert!(scrollmap_cli::run(&input, &output).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_unwritable_output_leaves_nothing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("world.png");
        let output = dir.path().join("missing").join("out.sb3");
        scrollmap_io::png::write(&input, &Image::filled(10, 10, [1, 1, 1, 255])).unwrap();

        let err = scrollmap_cli::run(&input, &output).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to write"));
        assert!(!output.exists());
        assert!(!dir.path().join("missing").exists());
    }
}
