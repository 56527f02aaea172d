use std::collections::BTreeMap;

use crate::{
    animation::ease::Ease,
    foundation::core::Rect,
    surface::backend::{Surface, TileStyle},
};

/// Handle of a tile on a [`MemorySurface`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(pub u64);

/// State of one tile held by a [`MemorySurface`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MemoryTile {
    pub style: TileStyle,
    /// Duration and curve of the last opacity transition requested.
    pub fade_ms: u64,
    pub ease: Ease,
}

/// In-process surface. Records tile state without drawing anything.
#[derive(Debug, Default)]
pub struct MemorySurface {
    next_id: u64,
    tiles: BTreeMap<TileId, MemoryTile>,
    created: u64,
    removed: u64,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tile(&self, id: TileId) -> Option<&MemoryTile> {
        self.tiles.get(&id)
    }

    pub fn tiles(&self) -> impl Iterator<Item = (TileId, &MemoryTile)> {
        self.tiles.iter().map(|(id, t)| (*id, t))
    }

    /// Number of tiles ever created.
    pub fn created_count(&self) -> u64 {
        self.created
    }

    /// Number of tiles removed through [`Surface::remove_tile`].
    pub fn removed_count(&self) -> u64 {
        self.removed
    }
}

impl Surface for MemorySurface {
    type Handle = TileId;

    fn create_tile(&mut self, style: &TileStyle) -> TileId {
        let id = TileId(self.next_id);
        self.next_id += 1;
        self.created += 1;
        self.tiles.insert(
            id,
            MemoryTile {
                style: *style,
                fade_ms: 0,
                ease: Ease::Linear,
            },
        );
        id
    }

    fn remove_tile(&mut self, tile: TileId) -> bool {
        let existed = self.tiles.remove(&tile).is_some();
        if existed {
            self.removed += 1;
        }
        existed
    }

    fn set_rect(&mut self, tile: TileId, rect: Rect) -> bool {
        match self.tiles.get_mut(&tile) {
            Some(t) => {
                t.style.rect = rect;
                true
            }
            None => false,
        }
    }

    fn set_opacity(&mut self, tile: TileId, opacity: f64, fade_ms: u64, ease: Ease) -> bool {
        match self.tiles.get_mut(&tile) {
            Some(t) => {
                t.style.opacity = opacity.clamp(0.0, 1.0);
                t.fade_ms = fade_ms;
                t.ease = ease;
                true
            }
            None => false,
        }
    }

    fn contains(&self, tile: TileId) -> bool {
        self.tiles.contains_key(&tile)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/memory.rs"]
mod tests;
