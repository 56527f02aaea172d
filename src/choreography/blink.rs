use crate::{
    animation::ease::Ease,
    choreography::timeline::{TileAction, TileEvent},
};

/// One hide-then-show flicker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BlinkStep {
    pub hide_ms: u64,
    pub show_ms: u64,
}

impl BlinkStep {
    pub const fn new(hide_ms: u64, show_ms: u64) -> Self {
        Self { hide_ms, show_ms }
    }
}

/// Ordered flicker sequence shared by every tile.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct BlinkSchedule(Vec<BlinkStep>);

impl Default for BlinkSchedule {
    fn default() -> Self {
        Self(vec![
            BlinkStep::new(20, 30),
            BlinkStep::new(20, 60),
            BlinkStep::new(80, 100),
            BlinkStep::new(40, 50),
        ])
    }
}

impl BlinkSchedule {
    pub fn new(steps: Vec<BlinkStep>) -> Self {
        Self(steps)
    }

    pub fn steps(&self) -> &[BlinkStep] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of every hide and show duration.
    pub fn total_ms(&self) -> u64 {
        self.0
            .iter()
            .map(|s| s.hide_ms.saturating_add(s.show_ms))
            .fold(0u64, u64::saturating_add)
    }

    /// Flatten one pass starting at `start_ms` into instant opacity events.
    ///
    /// The pass ends with a forced hide at `start_ms + total_ms()`, after the last show
    /// has elapsed.
    pub fn pass_events(&self, start_ms: u64) -> Vec<TileEvent> {
        let mut out = Vec::with_capacity(self.0.len() * 2 + 1);
        let mut t = start_ms;
        for step in &self.0 {
            out.push(TileEvent::opacity(t, 0.0));
            t = t.saturating_add(step.hide_ms);
            out.push(TileEvent::opacity(t, 1.0));
            t = t.saturating_add(step.show_ms);
        }
        out.push(TileEvent {
            at_ms: start_ms.saturating_add(self.total_ms()),
            action: TileAction::Opacity {
                target: 0.0,
                fade_ms: 0,
                ease: Ease::Linear,
            },
        });
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/choreography/blink.rs"]
mod tests;
