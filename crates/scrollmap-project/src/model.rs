//! `project.json` document model (Scratch 3 schema subset).
//!
//! Only the fields a generated project needs are modelled. Maps are
//! `BTreeMap` so the serialized document is byte-for-byte reproducible.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Top-level `project.json`.
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    /// Stage first, then sprites.
    pub targets: Vec<Target>,
    /// Variable monitors; always empty.
    pub monitors: Vec<Value>,
    /// Extension ids; always empty.
    pub extensions: Vec<String>,
    /// Writer metadata.
    pub meta: Meta,
}

/// Project metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    /// Schema version.
    pub semver: String,
    /// VM version the project targets.
    pub vm: String,
    /// Producing agent.
    pub agent: String,
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            semver: "3.0.0".into(),
            vm: "0.2.0".into(),
            agent: concat!("scrollmap/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

/// Stage or sprite.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    /// `true` for the stage.
    pub is_stage: bool,
    /// Target name; `"Stage"` for the stage.
    pub name: String,
    /// Variable id -> `[name, value]`.
    pub variables: BTreeMap<String, (String, Value)>,
    /// List id -> `[name, items]`.
    pub lists: BTreeMap<String, Value>,
    /// Broadcast id -> name (stage only).
    pub broadcasts: BTreeMap<String, String>,
    /// Block id -> block.
    pub blocks: BTreeMap<String, Block>,
    /// Comment id -> comment.
    pub comments: BTreeMap<String, Value>,
    /// Index into `costumes`.
    pub current_costume: u32,
    /// Costumes / backdrops.
    pub costumes: Vec<Costume>,
    /// Sounds; always empty.
    pub sounds: Vec<Value>,
    /// Audio volume.
    pub volume: u32,
    /// Draw order, stage is 0.
    pub layer_order: u32,
    /// Stage-only properties.
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub stage: Option<StageProps>,
    /// Sprite-only properties.
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub sprite: Option<SpriteProps>,
}

/// Properties only the stage carries.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageProps {
    /// Music tempo.
    pub tempo: u32,
    /// Video sensing transparency.
    pub video_transparency: u32,
    /// Video sensing state.
    pub video_state: String,
    /// Text to speech language.
    pub text_to_speech_language: Option<String>,
}

impl Default for StageProps {
    fn default() -> Self {
        Self {
            tempo: 60,
            video_transparency: 50,
            video_state: "on".into(),
            text_to_speech_language: None,
        }
    }
}

/// Properties only sprites carry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpriteProps {
    /// Initially visible.
    pub visible: bool,
    /// Stage x.
    pub x: i64,
    /// Stage y.
    pub y: i64,
    /// Size in percent.
    pub size: u32,
    /// Heading in degrees.
    pub direction: i32,
    /// Draggable in player mode.
    pub draggable: bool,
    /// Rotation style.
    pub rotation_style: String,
}

impl SpriteProps {
    /// Sprite at (x, y), unrotated, full size.
    pub fn at(x: i64, y: i64, visible: bool) -> Self {
        Self {
            visible,
            x,
            y,
            size: 100,
            direction: 90,
            draggable: false,
            rotation_style: "don't rotate".into(),
        }
    }
}

/// Costume referencing an asset file in the bundle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Costume {
    /// Asset md5.
    pub asset_id: String,
    /// Costume name.
    pub name: String,
    /// Pixels per stage unit.
    pub bitmap_resolution: u32,
    /// `<md5>.<ext>` file name inside the archive.
    pub md5ext: String,
    /// `"png"` or `"svg"`.
    pub data_format: String,
    /// Rotation center, pixels from the left.
    pub rotation_center_x: i64,
    /// Rotation center, pixels from the top.
    pub rotation_center_y: i64,
}

/// One block.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Block opcode.
    pub opcode: String,
    /// Next block in the stack.
    pub next: Option<String>,
    /// Enclosing or previous block.
    pub parent: Option<String>,
    /// Input name -> encoded input.
    pub inputs: Map<String, Value>,
    /// Field name -> encoded field.
    pub fields: Map<String, Value>,
    /// Shadow (menu) block.
    pub shadow: bool,
    /// Script head.
    pub top_level: bool,
    /// Script position on the canvas (top-level only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<i64>,
    /// Script position on the canvas (top-level only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<i64>,
}
