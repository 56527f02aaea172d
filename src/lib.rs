//! gridveil overlays tagged images with a grid of opaque tiles and takes them away in a
//! choreographed pattern, unveiling the image in stages.
//!
//! # Pipeline overview
//!
//! 1. **Grid**: `GridDims -> Vec<Cell>` (fractional cells, corner flags), then
//!    `Cell + image rect + scroll -> TileGeometry`
//! 2. **Plan**: `RevealConfig + Cell -> TileTimeline` (pure per-tile schedule data)
//! 3. **Schedule**: each timeline event becomes a `TileCommand` on a `TimerQueue`
//! 4. **Apply**: due commands mutate tiles on a [`Surface`], unless their build was
//!    superseded or their tile is gone
//!
//! [`EffectController`] ties the pipeline to a [`Page`] with an explicit
//! `start()`/`stop()` lifecycle.
//!
//! Three disappearance policies are available through [`Policy`]: a single fade, a
//! dual-pass blink, and an earliest-wins hide (the default).
#![forbid(unsafe_code)]

mod animation;
mod choreography;
mod config;
mod controller;
mod foundation;
mod grid;
mod page;
mod runtime;
mod surface;

pub use animation::ease::Ease;
pub use choreography::blink::{BlinkSchedule, BlinkStep};
pub use choreography::choreographer::{Choreographer, SyncMode, TileCommand};
pub use choreography::rank::{Ranks, alt_rank, n_rank, ranks, z_rank};
pub use choreography::timeline::{
    TileAction, TileEvent, TileTimeline, earliest_wins_ms, plan_tile, plan_tiles,
    settle_bound_ms,
};
pub use config::reveal::{Policy, ResizeMode, RevealConfig, TileAppearance, Timing};
pub use controller::effect::{EffectController, Subscription};
pub use foundation::core::{
    CellKey, GridDims, ImageIndex, Point, Rect, Rgba8, RoundedRectRadii, Size, Vec2,
    sanitize_rect, square_corners,
};
pub use foundation::error::{VeilError, VeilResult};
pub use grid::builder::{Cell, CellEdges, TileGeometry, build_cells, layout_cells};
pub use page::memory::{MemoryImage, MemoryPage};
pub use page::observer::{Page, PageEvent};
pub use runtime::timers::{TimerId, TimerQueue};
pub use surface::backend::{Surface, TileStyle};
pub use surface::memory::{MemorySurface, MemoryTile, TileId};
