//! # scrollmap-io
//!
//! Image I/O for the scrollmap pipeline.
//!
//! - **PNG** - read (any color type / bit depth) and write (RGBA8)
//! - **JPEG** - read
//!
//! Every decoder returns a [`scrollmap_core::Image`] normalized to RGBA8.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use scrollmap_io::{read, png};
//!
//! let world = read("world.jpg")?;
//! let costume = png::encode(&world)?;
//! ```
//!
//! # Feature Flags
//!
//! - `png` - PNG support (default; required for tile encoding)
//! - `jpeg` - JPEG support (default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod detect;
mod error;

#[cfg(feature = "png")]
pub mod png;

#[cfg(feature = "jpeg")]
pub mod jpeg;

pub use detect::Format;
pub use error::{IoError, IoResult};

use scrollmap_core::Image;
use std::path::Path;
use tracing::debug;

/// Reads an image from a file, auto-detecting the format.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The format is not supported
/// - The file is corrupted
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let path = path.as_ref();
    let format = Format::detect(path)?;
    debug!(path = %path.display(), ?format, "reading image");

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::read(path),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::read(path),

        _ => Err(IoError::UnsupportedFormat(
            path.extension()
                .and_then(|e| e.to_str())
                .unwrap_or("unknown")
                .to_string(),
        )),
    }
}

/// Decodes an image held in memory, detecting the format from magic bytes.
pub fn read_from_memory(data: &[u8]) -> IoResult<Image> {
    match Format::from_bytes(data) {
        #[cfg(feature = "png")]
        Format::Png => png::read_from_memory(data),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::read_from_memory(data),

        _ => Err(IoError::UnsupportedFormat("unrecognized header".into())),
    }
}
