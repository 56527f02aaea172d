//! Per-tile schedules as plain data.
//!
//! A [`TileTimeline`] lists every visibility change of one tile in scheduling order.
//! Timers are enqueued from it one event at a time, so nothing reschedules itself and
//! the whole choreography can be inspected without running a clock.

use crate::{
    animation::ease::Ease,
    choreography::rank::{Ranks, ranks},
    config::reveal::{Policy, RevealConfig},
    foundation::core::{CellKey, GridDims},
    grid::builder::Cell,
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// What a scheduled event does to its tile.
pub enum TileAction {
    /// Transition opacity to `target` over `fade_ms` (0 = instant).
    Opacity { target: f64, fade_ms: u64, ease: Ease },
    /// Take the tile off the surface.
    Remove,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// One scheduled change, `at_ms` after the build.
pub struct TileEvent {
    pub at_ms: u64,
    pub action: TileAction,
}

impl TileEvent {
    /// Instant opacity change.
    pub fn opacity(at_ms: u64, target: f64) -> Self {
        Self::fade(at_ms, target, 0, Ease::Linear)
    }

    pub fn fade(at_ms: u64, target: f64, fade_ms: u64, ease: Ease) -> Self {
        Self {
            at_ms,
            action: TileAction::Opacity {
                target,
                fade_ms,
                ease,
            },
        }
    }

    pub fn remove(at_ms: u64) -> Self {
        Self {
            at_ms,
            action: TileAction::Remove,
        }
    }

    /// Time at which this event's effect is complete.
    pub fn end_ms(&self) -> u64 {
        match self.action {
            TileAction::Opacity { fade_ms, .. } => self.at_ms.saturating_add(fade_ms),
            TileAction::Remove => self.at_ms,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Full schedule of one tile.
pub struct TileTimeline {
    pub key: CellKey,
    pub ranks: Ranks,
    /// Events in scheduling order; equal `at_ms` resolve in this order.
    pub events: Vec<TileEvent>,
}

impl TileTimeline {
    /// Events in firing order: by time, ties in scheduling order.
    pub fn firing_order(&self) -> Vec<TileEvent> {
        let mut out = self.events.clone();
        out.sort_by_key(|e| e.at_ms);
        out
    }

    /// Opacity the tile is heading to once every event at or before `t_ms` has fired.
    pub fn target_opacity_at(&self, t_ms: u64) -> f64 {
        self.firing_order()
            .iter()
            .take_while(|e| e.at_ms <= t_ms)
            .filter_map(|e| match e.action {
                TileAction::Opacity { target, .. } => Some(target),
                TileAction::Remove => None,
            })
            .last()
            .unwrap_or(1.0)
    }

    /// Rendered opacity at `t_ms`, including any fade in progress.
    ///
    /// A fade that interrupts another starts from the opacity shown at that instant.
    pub fn opacity_at(&self, t_ms: u64) -> f64 {
        let (mut from, mut to, mut start, mut fade, mut curve) = (1.0, 1.0, 0, 0, Ease::Linear);
        for e in self.firing_order().iter().take_while(|e| e.at_ms <= t_ms) {
            if let TileAction::Opacity {
                target,
                fade_ms,
                ease,
            } = e.action
            {
                from = curve.sample_fade(from, to, e.at_ms - start, fade);
                (to, start, fade, curve) = (target, e.at_ms, fade_ms, ease);
            }
        }
        curve.sample_fade(from, to, t_ms - start, fade)
    }

    /// First time anything happens to the tile.
    pub fn first_change_ms(&self) -> Option<u64> {
        self.events.iter().map(|e| e.at_ms).min()
    }

    /// Time after which no opacity change is pending or in progress.
    pub fn settled_ms(&self) -> u64 {
        self.events
            .iter()
            .filter(|e| matches!(e.action, TileAction::Opacity { .. }))
            .map(TileEvent::end_ms)
            .max()
            .unwrap_or(0)
    }

    pub fn removed_at_ms(&self) -> Option<u64> {
        self.events
            .iter()
            .find(|e| e.action == TileAction::Remove)
            .map(|e| e.at_ms)
    }
}

fn rank_delay(config: &RevealConfig, rank: u32) -> u64 {
    config
        .timing
        .base_delay_ms
        .saturating_add(u64::from(rank).saturating_mul(config.timing.step_delay_ms))
}

/// Hide time of a tile under [`Policy::EarliestWins`].
pub fn earliest_wins_ms(config: &RevealConfig, key: CellKey) -> u64 {
    let r = ranks(key, config.grid);
    rank_delay(config, r.z.min(r.alt))
}

/// Compute the schedule of every cell under the configured policy.
pub fn plan_tiles(config: &RevealConfig, cells: &[Cell]) -> Vec<TileTimeline> {
    cells
        .iter()
        .map(|cell| plan_tile(config, cell.key()))
        .collect()
}

pub fn plan_tile(config: &RevealConfig, key: CellKey) -> TileTimeline {
    let r = ranks(key, config.grid);
    let timing = &config.timing;

    let mut events = match config.policy {
        Policy::SingleFade => vec![TileEvent::fade(
            timing.base_delay_ms,
            0.0,
            timing.fade_duration_ms,
            timing.fade_ease,
        )],
        Policy::DualPassBlink => {
            let first = rank_delay(config, r.z);
            let second = rank_delay(config, r.n).saturating_add(timing.second_pass_offset_ms);
            let mut ev = config.blink.pass_events(first);
            ev.extend(config.blink.pass_events(second));
            ev
        }
        Policy::EarliestWins => vec![TileEvent::opacity(earliest_wins_ms(config, key), 0.0)],
    };

    if config.remove_when_done {
        let done = events.iter().map(TileEvent::end_ms).max().unwrap_or(0);
        events.push(TileEvent::remove(done));
    }

    TileTimeline {
        key,
        ranks: r,
        events,
    }
}

/// Time after which every tile of a grid is guaranteed hidden.
pub fn settle_bound_ms(config: &RevealConfig) -> u64 {
    let timing = &config.timing;
    let last_rank = config.grid.cell_count().saturating_sub(1);
    match config.policy {
        Policy::SingleFade => timing
            .base_delay_ms
            .saturating_add(timing.fade_duration_ms),
        Policy::DualPassBlink => rank_delay(config, last_rank)
            .saturating_add(timing.second_pass_offset_ms)
            .saturating_add(config.blink.total_ms()),
        Policy::EarliestWins => all_keys(config.grid)
            .map(|key| earliest_wins_ms(config, key))
            .max()
            .unwrap_or(timing.base_delay_ms),
    }
}

fn all_keys(dims: GridDims) -> impl Iterator<Item = CellKey> {
    (0..dims.rows).flat_map(move |row| (0..dims.cols).map(move |col| CellKey::new(row, col)))
}

#[cfg(test)]
#[path = "../../tests/unit/choreography/timeline.rs"]
mod tests;
