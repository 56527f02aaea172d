use std::collections::BTreeMap;

use crate::{
    choreography::timeline::{TileAction, plan_tiles},
    config::reveal::RevealConfig,
    foundation::core::{CellKey, ImageIndex, Rect, sanitize_rect},
    grid::builder::{Cell, build_cells, layout_cells},
    page::observer::Page,
    runtime::timers::TimerQueue,
    surface::backend::{Surface, TileStyle},
};

/// Timer payload: one scheduled action on one tile of one build.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileCommand {
    pub image: ImageIndex,
    pub cell: CellKey,
    /// Build that scheduled the command; stale once the image is rebuilt.
    pub generation: u64,
    pub action: TileAction,
}

/// How [`Choreographer::reposition`] treats tile sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncMode {
    /// Move tiles and keep their current size (scroll).
    Position,
    /// Move and resize tiles (resize).
    PositionAndSize,
}

#[derive(Clone, Copy, Debug)]
struct LiveTile<H> {
    cell: Cell,
    handle: H,
    rect: Rect,
}

#[derive(Clone, Debug)]
struct TileSet<H> {
    generation: u64,
    tiles: BTreeMap<CellKey, LiveTile<H>>,
}

/// Owns every live tile and turns cell plans into scheduled tile commands.
pub struct Choreographer<H> {
    config: RevealConfig,
    cells: Vec<Cell>,
    sets: BTreeMap<ImageIndex, TileSet<H>>,
    next_generation: u64,
}

impl<H> Choreographer<H>
where
    H: Copy + Eq + std::hash::Hash + std::fmt::Debug,
{
    /// The config is expected to be validated by the caller.
    pub fn new(config: RevealConfig) -> Self {
        let cells = build_cells(config.grid);
        Self {
            config,
            cells,
            sets: BTreeMap::new(),
            next_generation: 0,
        }
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// Cell template shared by every image.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Build (or rebuild) the tile set of `image` and schedule its disappearance.
    ///
    /// Any previous set for the image is removed from the surface first, and commands it
    /// left in `timers` become stale. Returns the generation of the new set.
    #[tracing::instrument(skip(self, page, surface, timers))]
    pub fn build<P, S>(
        &mut self,
        page: &P,
        surface: &mut S,
        timers: &mut TimerQueue<TileCommand>,
        image: ImageIndex,
    ) -> u64
    where
        P: Page,
        S: Surface<Handle = H>,
    {
        let cleared = self.clear(surface, image);
        if cleared > 0 {
            tracing::debug!(image = image.0, cleared, "superseded previous tile set");
        }

        let image_rect = match page.image_rect(image) {
            Some(r) => sanitize_rect(r),
            None => {
                tracing::debug!(image = image.0, "image not measurable, using zero rect");
                Rect::ZERO
            }
        };
        let geometry = layout_cells(
            &self.cells,
            image_rect,
            page.scroll_offset(),
            page.border_radii(image),
        );

        let generation = self.next_generation;
        self.next_generation += 1;

        let mut tiles = BTreeMap::new();
        for (cell, geo) in self.cells.iter().zip(&geometry) {
            let handle = surface.create_tile(&TileStyle {
                rect: geo.rect,
                radii: geo.radii,
                color: self.config.tile.color,
                opacity: 1.0,
                z_index: self.config.tile.z_index,
                interactive: false,
            });
            tiles.insert(
                cell.key(),
                LiveTile {
                    cell: *cell,
                    handle,
                    rect: geo.rect,
                },
            );
        }
        self.sets.insert(image, TileSet { generation, tiles });

        let scheduled = self.schedule_disappearance(timers, image, generation);
        tracing::debug!(
            image = image.0,
            generation,
            tiles = self.cells.len(),
            scheduled,
            policy = self.config.policy.name(),
            "built tile set"
        );
        generation
    }

    /// Enqueue every planned event of every cell relative to the queue's current time.
    /// Returns the number of commands scheduled.
    pub fn schedule_disappearance(
        &self,
        timers: &mut TimerQueue<TileCommand>,
        image: ImageIndex,
        generation: u64,
    ) -> usize {
        let mut scheduled = 0usize;
        for timeline in plan_tiles(&self.config, &self.cells) {
            for event in &timeline.events {
                timers.schedule_after(
                    event.at_ms,
                    TileCommand {
                        image,
                        cell: timeline.key,
                        generation,
                        action: event.action,
                    },
                );
                scheduled += 1;
            }
        }
        scheduled
    }

    /// Re-measure `image` and move its live tiles. Opacity and timers are untouched.
    ///
    /// A no-op when the image left the page or has no live tiles. Returns the number of
    /// tiles updated.
    pub fn reposition<P, S>(
        &mut self,
        page: &P,
        surface: &mut S,
        image: ImageIndex,
        mode: SyncMode,
    ) -> usize
    where
        P: Page,
        S: Surface<Handle = H>,
    {
        let Some(set) = self.sets.get_mut(&image) else {
            return 0;
        };
        let Some(image_rect) = page.image_rect(image) else {
            tracing::trace!(image = image.0, "reposition skipped, image gone");
            return 0;
        };
        let image_rect = sanitize_rect(image_rect);
        let scroll = page.scroll_offset();

        let mut updated = 0usize;
        for tile in set.tiles.values_mut() {
            let fresh = tile.cell.page_rect(image_rect, scroll);
            let rect = match mode {
                SyncMode::PositionAndSize => fresh,
                SyncMode::Position => Rect::from_origin_size(fresh.origin(), tile.rect.size()),
            };
            if surface.set_rect(tile.handle, rect) {
                tile.rect = rect;
                updated += 1;
            }
        }
        updated
    }

    /// Timer callback. Applies `cmd` only if its build is still current and its tile is
    /// still on the surface; otherwise does nothing. Returns whether anything changed.
    pub fn apply<S>(&mut self, surface: &mut S, cmd: TileCommand) -> bool
    where
        S: Surface<Handle = H>,
    {
        let Some(set) = self.sets.get_mut(&cmd.image) else {
            tracing::trace!(image = cmd.image.0, cell = %cmd.cell, "no tile set, command dropped");
            return false;
        };
        if set.generation != cmd.generation {
            tracing::trace!(
                image = cmd.image.0,
                cell = %cmd.cell,
                stale = cmd.generation,
                current = set.generation,
                "stale command dropped"
            );
            return false;
        }
        let Some(tile) = set.tiles.get(&cmd.cell).copied() else {
            return false;
        };

        let applied = match cmd.action {
            TileAction::Opacity {
                target,
                fade_ms,
                ease,
            } => surface.set_opacity(tile.handle, target, fade_ms, ease),
            TileAction::Remove => {
                set.tiles.remove(&cmd.cell);
                surface.remove_tile(tile.handle)
            }
        };
        if !applied {
            set.tiles.remove(&cmd.cell);
            tracing::trace!(image = cmd.image.0, cell = %cmd.cell, "tile gone from surface");
        }
        if set.tiles.is_empty() {
            self.sets.remove(&cmd.image);
            tracing::debug!(image = cmd.image.0, "tile set finished");
        }
        applied
    }

    /// Remove the tile set of `image` from the surface. Returns the number of tiles
    /// removed.
    pub fn clear<S>(&mut self, surface: &mut S, image: ImageIndex) -> usize
    where
        S: Surface<Handle = H>,
    {
        let Some(set) = self.sets.remove(&image) else {
            return 0;
        };
        set.tiles
            .values()
            .filter(|t| surface.remove_tile(t.handle))
            .count()
    }

    pub fn clear_all<S>(&mut self, surface: &mut S) -> usize
    where
        S: Surface<Handle = H>,
    {
        let images: Vec<ImageIndex> = self.sets.keys().copied().collect();
        images
            .into_iter()
            .map(|image| self.clear(surface, image))
            .sum()
    }

    /// Handle bound to `(image, cell)`, if that tile is live.
    pub fn tile(&self, image: ImageIndex, cell: CellKey) -> Option<H> {
        self.sets
            .get(&image)
            .and_then(|s| s.tiles.get(&cell))
            .map(|t| t.handle)
    }

    pub fn live_tiles(&self, image: ImageIndex) -> usize {
        self.sets.get(&image).map_or(0, |s| s.tiles.len())
    }

    /// Images that currently have live tiles, in index order.
    pub fn images(&self) -> Vec<ImageIndex> {
        self.sets.keys().copied().collect()
    }

    pub fn generation(&self, image: ImageIndex) -> Option<u64> {
        self.sets.get(&image).map(|s| s.generation)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/choreography/choreographer.rs"]
mod tests;
