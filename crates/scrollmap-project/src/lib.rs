//! # scrollmap-project
//!
//! Turns a tile plan into a playable Scratch 3 project (`.sb3`).
//!
//! The generated project has:
//!
//! - a **stage** that owns the shared `camera-x` / `camera-y` variables and
//!   the `reposition-map-tiles` broadcast,
//! - one hidden **tile sprite** per map tile, each carrying the reposition
//!   script with its own world center and the grid strides baked in,
//! - a **Player** sprite that owns the camera: it reads the arrow keys,
//!   clamps the center and issues `broadcast and wait` every tick.
//!
//! [`build_project`] produces the in-memory document, [`write_bundle`]
//! builds and writes it atomically.
//!
//! ```rust,no_run
//! use scrollmap_project::{write_bundle, BundleRequest, CameraSetup, ProjectOptions, TileRecord};
//!
//! let request = BundleRequest {
//!     stride_u: 460,
//!     stride_v: 340,
//!     half_width: 240,
//!     half_height: 180,
//!     camera: CameraSetup::fixed(240, 180),
//!     tiles: vec![TileRecord {
//!         tile_id: "tile-0-0".into(),
//!         center_u: 240,
//!         center_v: 180,
//!         image_png: std::fs::read("tile.png")?,
//!     }],
//! };
//! write_bundle("map.sb3", &request, &ProjectOptions::default())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]

pub mod assets;
pub mod blocks;
mod error;
pub mod model;
pub mod scripts;
mod writer;

pub use assets::{AssetRef, AssetStore};
pub use error::{ProjectError, ProjectResult};
pub use model::Project;
pub use writer::{write_bundle, BundleSummary};

use crate::blocks::{BlockGraph, BroadcastRef, VarRef};
use crate::model::{Costume, Meta, SpriteProps, StageProps, Target};
use crate::scripts::{camera_script, tile_script, Globals};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Name of the broadcast that triggers tile repositioning.
pub const REPOSITION_BROADCAST: &str = "reposition-map-tiles";

/// Global variable holding the viewport center x.
pub const CAMERA_X_VAR: &str = "camera-x";

/// Global variable holding the viewport center y.
pub const CAMERA_Y_VAR: &str = "camera-y";

/// Name of the camera sprite.
pub const PLAYER_SPRITE: &str = "Player";

/// One encoded tile.
#[derive(Debug, Clone)]
pub struct TileRecord {
    /// Sprite name, unique within the bundle.
    pub tile_id: String,
    /// World x of the tile center.
    pub center_u: i64,
    /// World y of the tile center.
    pub center_v: i64,
    /// PNG-encoded tile image.
    pub image_png: Vec<u8>,
}

/// Camera range and starting point in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraSetup {
    /// Smallest center x.
    pub min_x: i64,
    /// Largest center x.
    pub max_x: i64,
    /// Smallest center y.
    pub min_y: i64,
    /// Largest center y.
    pub max_y: i64,
    /// Initial center x.
    pub start_x: i64,
    /// Initial center y.
    pub start_y: i64,
}

impl CameraSetup {
    /// A camera that cannot move from (x, y).
    pub fn fixed(x: i64, y: i64) -> Self {
        Self {
            min_x: x,
            max_x: x,
            min_y: y,
            max_y: y,
            start_x: x,
            start_y: y,
        }
    }

    fn validate(&self) -> ProjectResult<()> {
        if self.min_x > self.max_x || self.min_y > self.max_y {
            return Err(ProjectError::InvalidCamera(format!(
                "inverted bounds x {}..{} y {}..{}",
                self.min_x, self.max_x, self.min_y, self.max_y
            )));
        }
        if !(self.min_x..=self.max_x).contains(&self.start_x)
            || !(self.min_y..=self.max_y).contains(&self.start_y)
        {
            return Err(ProjectError::InvalidCamera(format!(
                "start ({}, {}) outside bounds",
                self.start_x, self.start_y
            )));
        }
        Ok(())
    }
}

/// Everything the writer needs to know about the tiled map.
#[derive(Debug, Clone)]
pub struct BundleRequest {
    /// Horizontal distance between tile centers.
    pub stride_u: i64,
    /// Vertical distance between tile centers.
    pub stride_v: i64,
    /// Half the tile width; the costume rotation center x.
    pub half_width: i64,
    /// Half the tile height; the costume rotation center y.
    pub half_height: i64,
    /// Camera range and start.
    pub camera: CameraSetup,
    /// Tiles in sprite layer order.
    pub tiles: Vec<TileRecord>,
}

/// Tunables of the generated project.
#[derive(Debug, Clone, Copy)]
pub struct ProjectOptions {
    /// Stage units the camera moves per tick while an arrow key is held.
    pub camera_speed: i64,
}

impl Default for ProjectOptions {
    fn default() -> Self {
        Self { camera_speed: 10 }
    }
}

fn validate(request: &BundleRequest) -> ProjectResult<()> {
    if request.tiles.is_empty() {
        return Err(ProjectError::EmptyBundle);
    }
    let mut seen = HashSet::with_capacity(request.tiles.len());
    for tile in &request.tiles {
        if !seen.insert(tile.tile_id.as_str()) {
            return Err(ProjectError::DuplicateTile(tile.tile_id.clone()));
        }
    }
    request.camera.validate()
}

fn costume(asset: AssetRef, name: &str, center: (i64, i64), resolution: u32) -> Costume {
    Costume {
        asset_id: asset.asset_id,
        name: name.to_string(),
        bitmap_resolution: resolution,
        md5ext: asset.md5ext,
        data_format: asset.data_format,
        rotation_center_x: center.0,
        rotation_center_y: center.1,
    }
}

fn sprite(
    name: &str,
    variables: BTreeMap<String, (String, Value)>,
    blocks: BlockGraph,
    costume: Costume,
    layer_order: u32,
    props: SpriteProps,
) -> Target {
    Target {
        is_stage: false,
        name: name.to_string(),
        variables,
        lists: BTreeMap::new(),
        broadcasts: BTreeMap::new(),
        blocks: blocks.into_blocks(),
        comments: BTreeMap::new(),
        current_costume: 0,
        costumes: vec![costume],
        sounds: Vec::new(),
        volume: 100,
        layer_order,
        stage: None,
        sprite: Some(props),
    }
}

/// Builds the project document and its assets.
///
/// # Errors
///
/// - [`ProjectError::EmptyBundle`] if there are no tiles
/// - [`ProjectError::DuplicateTile`] if two tiles share an id
/// - [`ProjectError::InvalidCamera`] if the camera setup is inconsistent
pub fn build_project(request: &BundleRequest, options: &ProjectOptions) -> ProjectResult<(Project, AssetStore)> {
    validate(request)?;

    let globals = Globals {
        camera_x: VarRef::new(CAMERA_X_VAR, "var-camera-x"),
        camera_y: VarRef::new(CAMERA_Y_VAR, "var-camera-y"),
        reposition: BroadcastRef::new(REPOSITION_BROADCAST, "msg-reposition-map-tiles"),
    };
    let mut assets = AssetStore::new();
    let mut targets = Vec::with_capacity(request.tiles.len() + 2);

    let backdrop = assets.insert(assets::BACKDROP_SVG.as_bytes().to_vec(), "svg");
    let mut stage_vars = BTreeMap::new();
    stage_vars.insert(
        globals.camera_x.id.clone(),
        (globals.camera_x.name.clone(), Value::from(request.camera.start_x)),
    );
    stage_vars.insert(
        globals.camera_y.id.clone(),
        (globals.camera_y.name.clone(), Value::from(request.camera.start_y)),
    );
    let mut broadcasts = BTreeMap::new();
    broadcasts.insert(globals.reposition.id.clone(), globals.reposition.name.clone());
    targets.push(Target {
        is_stage: true,
        name: "Stage".into(),
        variables: stage_vars,
        lists: BTreeMap::new(),
        broadcasts,
        blocks: BTreeMap::new(),
        comments: BTreeMap::new(),
        current_costume: 0,
        costumes: vec![costume(backdrop, "backdrop1", (240, 180), 1)],
        sounds: Vec::new(),
        volume: 100,
        layer_order: 0,
        stage: Some(StageProps::default()),
        sprite: None,
    });

    let strides = (request.stride_u, request.stride_v);
    let rotation_center = (request.half_width, request.half_height);
    for (index, tile) in request.tiles.iter().enumerate() {
        let s = VarRef::new("s", format!("{}-s", tile.tile_id));
        let t = VarRef::new("t", format!("{}-t", tile.tile_id));

        let mut graph = BlockGraph::new();
        tile_script(&mut graph, &globals, &s, &t, (tile.center_u, tile.center_v), strides);

        let mut variables = BTreeMap::new();
        variables.insert(s.id.clone(), (s.name.clone(), Value::from(0)));
        variables.insert(t.id.clone(), (t.name.clone(), Value::from(0)));

        let asset = assets.insert(tile.image_png.clone(), "png");
        debug!(
            tile = %tile.tile_id,
            u0 = tile.center_u,
            v0 = tile.center_v,
            blocks = graph.len(),
            asset = %asset.md5ext,
            "tile sprite"
        );
        targets.push(sprite(
            &tile.tile_id,
            variables,
            graph,
            costume(asset, &tile.tile_id, rotation_center, 1),
            index as u32 + 1,
            SpriteProps::at(0, 0, false),
        ));
    }

    let mut graph = BlockGraph::new();
    camera_script(&mut graph, &globals, &request.camera, options.camera_speed);
    let marker = assets.insert(assets::PLAYER_SVG.as_bytes().to_vec(), "svg");
    targets.push(sprite(
        PLAYER_SPRITE,
        BTreeMap::new(),
        graph,
        costume(marker, "player", (12, 12), 1),
        request.tiles.len() as u32 + 1,
        SpriteProps::at(0, 0, true),
    ));

    let project = Project {
        targets,
        monitors: Vec::new(),
        extensions: Vec::new(),
        meta: Meta::default(),
    };
    Ok((project, assets))
}
