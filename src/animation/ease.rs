/// Easing curve applied to an opacity fade.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Instant or linear change.
    #[default]
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    OutCubic,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }

    /// Value of a fade from `from` to `to` lasting `duration_ms`, sampled `elapsed_ms`
    /// after it began. A zero duration jumps straight to `to`.
    pub fn sample_fade(self, from: f64, to: f64, elapsed_ms: u64, duration_ms: u64) -> f64 {
        if duration_ms == 0 || elapsed_ms >= duration_ms {
            return to;
        }
        let t = elapsed_ms as f64 / duration_ms as f64;
        from + (to - from) * self.apply(t)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
