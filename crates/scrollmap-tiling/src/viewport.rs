//! Per-tile visibility rule and the reposition fan-out.
//!
//! At run time a single camera owner moves the viewport center and then
//! broadcasts a reposition event. Every tile re-reads the center and decides,
//! on its own, whether it is visible and where to draw:
//!
//! ```text
//! s = u0 - center_x
//! t = v0 - center_y
//! shown  <=>  -stride_u < s < stride_u  &&  -stride_v < t < stride_v
//! ```
//!
//! [`Scene`] models that contract in-process. The viewport is owned by the
//! scene and only mutated through [`Scene::set_center`] / [`Scene::move_camera`],
//! both of which finish re-evaluating every tile before they return, so no
//! tile can ever observe a half-applied camera update.

use tracing::trace;

/// Current viewport center in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// Center, u axis.
    pub center_x: i64,
    /// Center, v axis.
    pub center_y: i64,
}

impl Viewport {
    /// Creates a viewport centered at (x, y).
    pub const fn new(center_x: i64, center_y: i64) -> Self {
        Self { center_x, center_y }
    }
}

/// Tile visibility state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Not drawn. Initial state of every tile.
    #[default]
    Hidden,
    /// Drawn at the tile's `(s, t)` offset.
    Shown,
}

/// Result of evaluating one tile against the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileState {
    /// Shown or hidden.
    pub visibility: Visibility,
    /// Screen-space offset from the viewport center, u axis.
    pub s: i64,
    /// Screen-space offset from the viewport center, v axis.
    pub t: i64,
}

impl TileState {
    /// Returns `true` if the tile is shown.
    #[inline]
    pub fn is_shown(&self) -> bool {
        self.visibility == Visibility::Shown
    }

    /// Draw position, only meaningful while shown.
    #[inline]
    pub fn position(&self) -> Option<(i64, i64)> {
        self.is_shown().then_some((self.s, self.t))
    }
}

/// Evaluates the visibility rule for a tile centered at world (u0, v0).
///
/// Both bounds are strict: a tile exactly one stride away is hidden.
///
/// ```rust
/// use scrollmap_tiling::{evaluate, Viewport, Visibility};
///
/// let state = evaluate(100, 50, &Viewport::new(0, 0), 460, 340);
/// assert_eq!(state.visibility, Visibility::Shown);
/// assert_eq!(state.position(), Some((100, 50)));
///
/// let state = evaluate(100, 50, &Viewport::new(600, 0), 460, 340);
/// assert_eq!(state.s, -500);
/// assert_eq!(state.visibility, Visibility::Hidden);
/// ```
pub fn evaluate(u0: i64, v0: i64, viewport: &Viewport, stride_u: i64, stride_v: i64) -> TileState {
    let s = u0 - viewport.center_x;
    let t = v0 - viewport.center_y;
    let visible = -stride_u < s && s < stride_u && -stride_v < t && t < stride_v;
    TileState {
        visibility: if visible { Visibility::Shown } else { Visibility::Hidden },
        s,
        t,
    }
}

/// Range of viewport centers that keeps the viewport inside the padded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraBounds {
    /// Smallest center x.
    pub min_x: i64,
    /// Largest center x.
    pub max_x: i64,
    /// Smallest center y.
    pub min_y: i64,
    /// Largest center y.
    pub max_y: i64,
}

impl CameraBounds {
    /// Clamps a center into the bounds.
    pub fn clamp(&self, x: i64, y: i64) -> (i64, i64) {
        (x.clamp(self.min_x, self.max_x), y.clamp(self.min_y, self.max_y))
    }

    /// Middle of the bounds (rounded toward the min side).
    pub fn center(&self) -> (i64, i64) {
        (
            self.min_x + (self.max_x - self.min_x) / 2,
            self.min_y + (self.max_y - self.min_y) / 2,
        )
    }
}

/// The run-time view of a tile plan: one viewport and every tile's state.
#[derive(Debug, Clone)]
pub struct Scene {
    viewport: Viewport,
    bounds: CameraBounds,
    stride_u: i64,
    stride_v: i64,
    centers: Vec<(i64, i64)>,
    states: Vec<TileState>,
}

impl Scene {
    /// Creates a scene with every tile hidden and the camera at `start`
    /// (clamped). No reposition has happened yet.
    pub fn new(
        centers: Vec<(i64, i64)>,
        stride_u: i64,
        stride_v: i64,
        bounds: CameraBounds,
        start: (i64, i64),
    ) -> Self {
        let (x, y) = bounds.clamp(start.0, start.1);
        let states = vec![TileState::default(); centers.len()];
        Self {
            viewport: Viewport::new(x, y),
            bounds,
            stride_u,
            stride_v,
            centers,
            states,
        }
    }

    /// Read-only access to the current viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Camera bounds used for clamping.
    pub fn bounds(&self) -> &CameraBounds {
        &self.bounds
    }

    /// Current state of every tile, in plan order.
    pub fn states(&self) -> &[TileState] {
        &self.states
    }

    /// Re-evaluates every tile against the current viewport.
    ///
    /// Returns only once all tiles are up to date.
    pub fn reposition(&mut self) {
        let viewport = &self.viewport;
        for (state, &(u0, v0)) in self.states.iter_mut().zip(&self.centers) {
            *state = evaluate(u0, v0, viewport, self.stride_u, self.stride_v);
        }
        trace!(
            center_x = viewport.center_x,
            center_y = viewport.center_y,
            shown = self.states.iter().filter(|s| s.is_shown()).count(),
            "reposition"
        );
    }

    /// Moves the camera to (x, y), clamped to bounds, then repositions.
    pub fn set_center(&mut self, x: i64, y: i64) {
        let (x, y) = self.bounds.clamp(x, y);
        self.viewport = Viewport::new(x, y);
        self.reposition();
    }

    /// Moves the camera by (dx, dy), clamped to bounds, then repositions.
    pub fn move_camera(&mut self, dx: i64, dy: i64) {
        let x = self.viewport.center_x.saturating_add(dx);
        let y = self.viewport.center_y.saturating_add(dy);
        self.set_center(x, y);
    }

    /// Indices and draw positions of the tiles currently shown.
    pub fn visible_tiles(&self) -> impl Iterator<Item = (usize, (i64, i64))> + '_ {
        self.states
            .iter()
            .enumerate()
            .filter_map(|(i, state)| state.position().map(|p| (i, p)))
    }
}
