//! # scrollmap-core
//!
//! Core types for the scrollmap tiling pipeline.
//!
//! This crate provides the foundational types used throughout scrollmap:
//!
//! - [`Image`] - Owned RGBA8 raster in pixel space
//! - [`Rect`] - Axis-aligned pixel rectangle
//! - [`Error`] - Bounds and dimension errors shared by all crates
//!
//! ## Coordinate System
//!
//! Everything in this crate lives in **pixel space**: origin at the top-left
//! corner, x to the right, y downward. World space (y-up, origin bottom-left)
//! only exists in `scrollmap-tiling`, which is the single place the two are
//! reconciled.
//!
//! ## Crate Structure
//!
//! ```text
//! scrollmap-core (this crate)
//!    ^
//!    |
//!    +-- scrollmap-io (decode / encode)
//!    +-- scrollmap-tiling (planner, viewport controller)
//!    +-- scrollmap-project (bundle writer)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod rect;

pub use error::*;
pub use image::*;
pub use rect::*;

/// Prelude module for convenient imports.
///
/// ```
/// use scrollmap_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::image::{Image, Rgba8, TRANSPARENT};
    pub use crate::rect::Rect;
}
