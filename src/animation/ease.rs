/// Easing curves used by face animations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Drops linearly from 1 to 0 over the first quarter, then eases back up to 1.
    LinearInEaseOut,
    /// Drops linearly from 1 to 0 over the first half, then rises linearly back to 1.
    LinearInLinearOut,
    /// Exponential ease-out from 0 toward 1.
    OutExpo,
}

impl Ease {
    /// Evaluate the curve at `t`, clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::LinearInEaseOut => {
                if t < 0.25 {
                    1.0 - t * 4.0
                } else {
                    (t - 0.25).powi(2) * 16.0 / 9.0
                }
            }
            Self::LinearInLinearOut => {
                if t < 0.5 {
                    1.0 - t * 2.0
                } else {
                    t * 2.0 - 1.0
                }
            }
            Self::OutExpo => 1.0 - 2f64.powf(-10.0 * t),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
