use std::fmt::Debug;
use std::hash::Hash;

use crate::{
    animation::ease::Ease,
    foundation::core::{Rect, Rgba8, RoundedRectRadii},
};

/// Initial appearance of a tile when it is created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileStyle {
    /// Absolute page rect.
    pub rect: Rect,
    pub radii: RoundedRectRadii,
    pub color: Rgba8,
    pub opacity: f64,
    pub z_index: i32,
    /// Tiles never intercept pointer input; surfaces must honor `false`.
    pub interactive: bool,
}

/// Rendering surface that owns the visual tiles.
///
/// Mutators return `false` when the tile is no longer on the surface; callers treat that
/// as a no-op, never as an error.
pub trait Surface {
    /// Opaque handle to one tile.
    type Handle: Copy + Eq + Hash + Debug;

    fn create_tile(&mut self, style: &TileStyle) -> Self::Handle;

    fn remove_tile(&mut self, tile: Self::Handle) -> bool;

    fn set_rect(&mut self, tile: Self::Handle, rect: Rect) -> bool;

    /// Start a transition to `opacity` lasting `fade_ms` (0 = instant).
    fn set_opacity(&mut self, tile: Self::Handle, opacity: f64, fade_ms: u64, ease: Ease)
    -> bool;

    fn contains(&self, tile: Self::Handle) -> bool;
}
