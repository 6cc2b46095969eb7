//! Error types for tiling operations.

use thiserror::Error;

/// Error type for planning and tiling.
#[derive(Error, Debug)]
pub enum TilingError {
    /// A stride or other divisor was zero or negative.
    #[error("invalid divisor {0}: expected a positive divisor")]
    InvalidDivisor(i64),

    /// Viewport / overlap parameters cannot produce forward-moving tiles.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Stride arithmetic does not fit in `i64`.
    #[error("arithmetic overflow: {0}")]
    Overflow(String),

    /// The tile grid stops short of the far edge of the padded image.
    #[error("incomplete coverage along {axis}: last tile ends at {reached}, image extent is {extent}")]
    IncompleteCoverage {
        /// `"u"` or `"v"`.
        axis: &'static str,
        /// Far edge of the last tile along the axis.
        reached: i64,
        /// Padded image extent along the axis.
        extent: i64,
    },

    /// A tile rectangle fell outside the padded image.
    #[error("tile crop out of bounds: {0}")]
    Bounds(#[from] scrollmap_core::Error),
}

/// Result type for tiling operations.
pub type TilingResult<T> = Result<T, TilingError>;
