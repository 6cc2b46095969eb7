//! Stride arithmetic.

use crate::{TilingError, TilingResult};

/// Returns the smallest multiple of `d` not less than `n`.
///
/// Works for any sign of `n`; the result always rounds toward positive
/// infinity.
///
/// # Errors
///
/// [`TilingError::InvalidDivisor`] if `d <= 0`, [`TilingError::Overflow`] if
/// the multiple exceeds `i64::MAX`.
///
/// ```rust
/// use scrollmap_tiling::round_up_to_multiple;
///
/// assert_eq!(round_up_to_multiple(20, 460).unwrap(), 460);
/// assert_eq!(round_up_to_multiple(920, 460).unwrap(), 920);
/// assert_eq!(round_up_to_multiple(0, 460).unwrap(), 0);
/// assert!(round_up_to_multiple(5, 0).is_err());
/// ```
pub fn round_up_to_multiple(n: i64, d: i64) -> TilingResult<i64> {
    if d <= 0 {
        return Err(TilingError::InvalidDivisor(d));
    }
    let r = n.rem_euclid(d);
    if r == 0 {
        return Ok(n);
    }
    n.checked_add(d - r)
        .ok_or_else(|| TilingError::Overflow(format!("next multiple of {} above {}", d, n)))
}

/// Padded extent along one axis.
///
/// `2*half + round_up_to_multiple(max(raw, 2*half) - 2*half, 2*half - overlap)`:
/// one full viewport plus a whole number of strides reaching at least `raw`.
///
/// ```rust
/// use scrollmap_tiling::padded_size;
///
/// assert_eq!(padded_size(500, 240, 20).unwrap(), 940);
/// assert_eq!(padded_size(400, 180, 20).unwrap(), 700);
/// // Smaller than the viewport: exactly one viewport.
/// assert_eq!(padded_size(100, 240, 20).unwrap(), 480);
/// ```
pub fn padded_size(raw_size: i64, half_size: i64, overlap: i64) -> TilingResult<i64> {
    let overflow = || TilingError::Overflow(format!("padded extent for {} (half {})", raw_size, half_size));
    let viewport = half_size.checked_mul(2).ok_or_else(overflow)?;
    let stride = viewport.checked_sub(overlap).ok_or_else(overflow)?;
    let extra = raw_size.max(viewport) - viewport;
    viewport
        .checked_add(round_up_to_multiple(extra, stride)?)
        .ok_or_else(overflow)
}
