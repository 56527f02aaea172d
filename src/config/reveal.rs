use crate::{
    animation::ease::Ease,
    choreography::blink::BlinkSchedule,
    foundation::core::{GridDims, Rgba8},
    foundation::error::{VeilError, VeilResult},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Complete configuration of a reveal effect.
///
/// Every field has a default, so `{}` is a valid JSON config that yields the 6×8
/// earliest-wins reveal.
pub struct RevealConfig {
    /// Grid dimensions.
    pub grid: GridDims,
    /// Disappearance policy.
    pub policy: Policy,
    /// Delay constants shared by the policies.
    pub timing: Timing,
    /// Flicker schedule used by [`Policy::DualPassBlink`].
    pub blink: BlinkSchedule,
    /// Tile appearance.
    pub tile: TileAppearance,
    /// Reaction to viewport resize.
    pub resize: ResizeMode,
    /// Remove each tile from the surface once its last transition has finished.
    pub remove_when_done: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// How tiles are driven from opaque to hidden.
pub enum Policy {
    /// One eased fade per tile after a fixed delay; rank is ignored.
    SingleFade,
    /// Two full blink passes per tile, row-major then column-major.
    DualPassBlink,
    /// One instant hide per tile at the earlier of its row-major and boustrophedon ranks.
    #[default]
    EarliestWins,
}

impl Policy {
    pub fn name(self) -> &'static str {
        match self {
            Self::SingleFade => "single_fade",
            Self::DualPassBlink => "dual_pass_blink",
            Self::EarliestWins => "earliest_wins",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Delay constants in milliseconds.
pub struct Timing {
    /// Delay before the first transition of any tile.
    pub base_delay_ms: u64,
    /// Extra delay per traversal rank step.
    pub step_delay_ms: u64,
    /// Offset of the second blink pass relative to the first.
    pub second_pass_offset_ms: u64,
    /// Duration of the single-fade opacity transition.
    pub fade_duration_ms: u64,
    /// Curve of the single-fade opacity transition.
    pub fade_ease: Ease,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            base_delay_ms: 200,
            step_delay_ms: 20,
            second_pass_offset_ms: 600,
            fade_duration_ms: 750,
            fade_ease: Ease::OutQuad,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Visual attributes shared by every tile.
pub struct TileAppearance {
    pub color: Rgba8,
    /// Stacking order; above page content.
    pub z_index: i32,
}

impl Default for TileAppearance {
    fn default() -> Self {
        Self {
            color: Rgba8::WHITE,
            z_index: 10,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Reaction to a viewport resize.
pub enum ResizeMode {
    /// Discard the tile set and build a fresh one (restarts the animation).
    #[default]
    Rebuild,
    /// Move and resize live tiles in place, keeping timers and opacity.
    Resync,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self::earliest_wins()
    }
}

impl RevealConfig {
    /// One tile per image, faded out after the base delay.
    pub fn single_fade() -> Self {
        Self {
            grid: GridDims::SINGLE,
            policy: Policy::SingleFade,
            ..Self::base()
        }
    }

    /// 6×8 tiles, each blinked through the schedule twice.
    pub fn dual_pass_blink() -> Self {
        Self {
            policy: Policy::DualPassBlink,
            ..Self::base()
        }
    }

    /// 6×8 tiles, each hidden once at its earliest traversal rank.
    pub fn earliest_wins() -> Self {
        Self {
            policy: Policy::EarliestWins,
            ..Self::base()
        }
    }

    /// Preset for a policy name as used by the CLI and JSON.
    pub fn preset(policy: Policy) -> Self {
        match policy {
            Policy::SingleFade => Self::single_fade(),
            Policy::DualPassBlink => Self::dual_pass_blink(),
            Policy::EarliestWins => Self::earliest_wins(),
        }
    }

    fn base() -> Self {
        Self {
            grid: GridDims::default(),
            policy: Policy::default(),
            timing: Timing::default(),
            blink: BlinkSchedule::default(),
            tile: TileAppearance::default(),
            resize: ResizeMode::default(),
            remove_when_done: true,
        }
    }

    pub fn from_json_str(s: &str) -> VeilResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json_pretty(&self) -> VeilResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> VeilResult<()> {
        self.grid
            .validate()
            .map_err(|e| VeilError::config(format!("grid: {e}")))?;

        if self.policy == Policy::DualPassBlink && self.blink.is_empty() {
            return Err(VeilError::config(
                "dual_pass_blink requires a non-empty blink schedule",
            ));
        }
        for (i, step) in self.blink.steps().iter().enumerate() {
            if step.hide_ms.saturating_add(step.show_ms) == 0 {
                return Err(VeilError::config(format!(
                    "blink step {i} must last longer than 0ms"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/reveal.rs"]
mod tests;
