//! # scrollmap-tiling
//!
//! Virtual scrolling over a world image larger than the viewport.
//!
//! Two halves, used at different times:
//!
//! - **Planner** (build time): [`padded_size`] / [`padded_image`] grow the
//!   world to a whole number of tile steps, [`TileDescriptor::list_from_image`]
//!   cuts it into viewport-sized tiles whose neighbours overlap by exactly
//!   [`StageGeometry::overlap`]. [`plan`] runs the whole thing.
//! - **Viewport controller** (run time): [`evaluate`] decides per tile whether
//!   it is shown and at which screen offset. [`Scene`] owns the viewport and
//!   re-evaluates every tile after each camera update.
//!
//! # Example
//!
//! ```rust
//! use scrollmap_core::{Image, TRANSPARENT};
//! use scrollmap_tiling::{plan, StageGeometry};
//!
//! let world = Image::filled(1200, 900, [30, 90, 30, 255]);
//! let plan = plan(&world, &StageGeometry::default(), TRANSPARENT)?;
//!
//! let mut scene = plan.scene(None);
//! scene.move_camera(15, 0);
//! for (index, (s, t)) in scene.visible_tiles() {
//!     println!("{} at ({}, {})", plan.tile_id(index), s, t);
//! }
//! # Ok::<(), scrollmap_tiling::TilingError>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod arith;
mod error;
pub mod geometry;
pub mod pad;
pub mod plan;
pub mod tile;
pub mod viewport;

pub use arith::{padded_size, round_up_to_multiple};
pub use error::{TilingError, TilingResult};
pub use geometry::StageGeometry;
pub use pad::{padded_image, PaddedImage};
pub use plan::{plan, TilePlan};
pub use tile::{grid_centers, Footprint, TileDescriptor};
pub use viewport::{evaluate, CameraBounds, Scene, TileState, Viewport, Visibility};
