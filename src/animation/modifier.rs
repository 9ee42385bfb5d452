//! Per-tick face state modifiers.
//!
//! A modifier encapsulates one animation behavior and mutates the renderer's current
//! buffer in place. Modifiers run in registration order; a modifier that writes
//! `eyes.*.open` outright must be registered before [`Blink`], which scales it.

use rand::rngs::StdRng;

use crate::{
    animation::ease::Ease,
    foundation::error::{FaceError, FaceResult},
    foundation::math::{norm_rand, quantize, random_between},
    state::face::FaceState,
};

/// One animation behavior applied to the face state every tick.
pub trait Modifier {
    /// Short name used in logs and error messages.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Advance by `elapsed_ms` and write this behavior's contribution into `face`.
    fn apply(&mut self, elapsed_ms: f64, face: &mut FaceState) -> FaceResult<()>;
}

impl<F> Modifier for F
where
    F: FnMut(f64, &mut FaceState) -> FaceResult<()>,
{
    fn apply(&mut self, elapsed_ms: f64, face: &mut FaceState) -> FaceResult<()> {
        self(elapsed_ms, face)
    }
}

/// Ordered list of modifiers.
#[derive(Default)]
pub struct ModifierPipeline {
    modifiers: Vec<Box<dyn Modifier>>,
}

impl ModifierPipeline {
    /// Empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a modifier; it runs after every modifier already registered.
    pub fn push(&mut self, modifier: impl Modifier + 'static) {
        self.modifiers.push(Box::new(modifier));
    }

    /// Number of registered modifiers.
    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    /// `true` when no modifier is registered.
    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }

    /// Run every modifier in order. Stops at the first failure.
    pub fn run(&mut self, elapsed_ms: f64, face: &mut FaceState) -> FaceResult<()> {
        for m in &mut self.modifiers {
            m.apply(elapsed_ms, face).map_err(|err| {
                tracing::debug!(modifier = m.name(), %err, "modifier failed");
                err
            })?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for ModifierPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.modifiers.iter().map(|m| m.name()))
            .finish()
    }
}

fn check_range(what: &str, min: f64, max: f64) -> FaceResult<()> {
    if !(min.is_finite() && max.is_finite()) || min < 0.0 || max < min {
        return Err(FaceError::config(format!(
            "{what} range must satisfy 0 <= min <= max (got {min}..{max})"
        )));
    }
    Ok(())
}

/// Dwell ranges for [`Blink`], in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BlinkConfig {
    /// Shortest time the eyes stay open.
    pub open_min: f64,
    /// Longest time the eyes stay open.
    pub open_max: f64,
    /// Shortest blink.
    pub close_min: f64,
    /// Longest blink.
    pub close_max: f64,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            open_min: 400.0,
            open_max: 5000.0,
            close_min: 200.0,
            close_max: 400.0,
        }
    }
}

impl BlinkConfig {
    /// Reject inverted or negative ranges and a zero-length blink.
    pub fn validate(&self) -> FaceResult<()> {
        check_range("blink open", self.open_min, self.open_max)?;
        check_range("blink close", self.close_min, self.close_max)?;
        if self.close_min <= 0.0 {
            return Err(FaceError::config("blink close_min must be > 0"));
        }
        Ok(())
    }
}

/// Periodic blinking: fast snap shut, slower reopen.
#[derive(Debug)]
pub struct Blink {
    config: BlinkConfig,
    rng: StdRng,
    closing: bool,
    dwell: f64,
    count: f64,
}

impl Blink {
    /// Eye-open factor at the bottom of a blink.
    pub const MIN_OPEN: f64 = 0.2;

    /// Build a blink modifier starting in the open phase.
    pub fn new(config: BlinkConfig, mut rng: StdRng) -> FaceResult<Self> {
        config.validate()?;
        let dwell = random_between(&mut rng, config.open_min, config.open_max);
        Ok(Self {
            config,
            rng,
            closing: false,
            dwell,
            count: 0.0,
        })
    }

    /// `true` while a blink is in progress.
    pub fn is_closing(&self) -> bool {
        self.closing
    }

    /// Factor applied to eye openness for the current phase position.
    pub fn open_factor(&self) -> f64 {
        if !self.closing {
            return 1.0;
        }
        let fraction = if self.dwell > 0.0 {
            self.count / self.dwell
        } else {
            1.0
        };
        Self::MIN_OPEN + Ease::LinearInEaseOut.apply(fraction) * (1.0 - Self::MIN_OPEN)
    }
}

impl Modifier for Blink {
    fn name(&self) -> &str {
        "blink"
    }

    fn apply(&mut self, elapsed_ms: f64, face: &mut FaceState) -> FaceResult<()> {
        let factor = self.open_factor();
        self.count += elapsed_ms;
        if self.count >= self.dwell {
            self.closing = !self.closing;
            self.count = 0.0;
            self.dwell = if self.closing {
                random_between(&mut self.rng, self.config.close_min, self.config.close_max)
            } else {
                random_between(&mut self.rng, self.config.open_min, self.config.open_max)
            };
        }
        for eye in face.eyes.each_mut() {
            eye.open *= factor;
        }
        Ok(())
    }
}

/// Interval and gain for [`Saccade`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SaccadeConfig {
    /// Shortest hold between gaze jumps, in milliseconds.
    pub update_min: f64,
    /// Longest hold between gaze jumps, in milliseconds.
    pub update_max: f64,
    /// Standard deviation of each jump.
    pub gain: f64,
}

impl Default for SaccadeConfig {
    fn default() -> Self {
        Self {
            update_min: 300.0,
            update_max: 2000.0,
            gain: 0.2,
        }
    }
}

impl SaccadeConfig {
    /// Reject inverted ranges and a negative gain.
    pub fn validate(&self) -> FaceResult<()> {
        check_range("saccade update", self.update_min, self.update_max)?;
        if !self.gain.is_finite() || self.gain < 0.0 {
            return Err(FaceError::config("saccade gain must be finite and >= 0"));
        }
        Ok(())
    }
}

/// Small random gaze jumps.
///
/// The held offset is added onto both eyes every tick. Nothing pulls it back toward
/// zero; when the same state is fed through repeatedly the gaze wanders.
#[derive(Debug)]
pub struct Saccade {
    config: SaccadeConfig,
    rng: StdRng,
    remaining: f64,
    offset: (f64, f64),
}

impl Saccade {
    /// Build a saccade modifier with a zero initial offset.
    pub fn new(config: SaccadeConfig, mut rng: StdRng) -> FaceResult<Self> {
        config.validate()?;
        let remaining = random_between(&mut rng, config.update_min, config.update_max);
        Ok(Self {
            config,
            rng,
            remaining,
            offset: (0.0, 0.0),
        })
    }

    /// Offset currently being held, `(x, y)`.
    pub fn offset(&self) -> (f64, f64) {
        self.offset
    }
}

impl Modifier for Saccade {
    fn name(&self) -> &str {
        "saccade"
    }

    fn apply(&mut self, elapsed_ms: f64, face: &mut FaceState) -> FaceResult<()> {
        self.remaining -= elapsed_ms;
        if self.remaining < 0.0 {
            self.offset = (
                norm_rand(&mut self.rng, 0.0, self.config.gain),
                norm_rand(&mut self.rng, 0.0, self.config.gain),
            );
            self.remaining = random_between(
                &mut self.rng,
                self.config.update_min,
                self.config.update_max,
            );
        }
        for eye in face.eyes.each_mut() {
            eye.gaze_x += self.offset.0;
            eye.gaze_y += self.offset.1;
        }
        Ok(())
    }
}

/// Period for [`Breath`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BreathConfig {
    /// Length of one full breath, in milliseconds.
    pub duration: f64,
}

impl Default for BreathConfig {
    fn default() -> Self {
        Self { duration: 6000.0 }
    }
}

impl BreathConfig {
    /// Reject a non-positive period.
    pub fn validate(&self) -> FaceResult<()> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(FaceError::config("breath duration must be > 0"));
        }
        Ok(())
    }
}

/// Staircased sine breathing in eighths.
#[derive(Debug)]
pub struct Breath {
    duration: f64,
    time: f64,
}

impl Breath {
    /// Number of quantization steps per unit of amplitude.
    pub const STEPS: f64 = 8.0;

    /// Build a breath modifier at phase zero.
    pub fn new(config: BreathConfig) -> FaceResult<Self> {
        config.validate()?;
        Ok(Self {
            duration: config.duration,
            time: 0.0,
        })
    }

    /// Position within the current breath, in `[0, duration)`.
    pub fn phase_ms(&self) -> f64 {
        self.time
    }
}

impl Modifier for Breath {
    fn name(&self) -> &str {
        "breath"
    }

    fn apply(&mut self, elapsed_ms: f64, face: &mut FaceState) -> FaceResult<()> {
        self.time = (self.time + elapsed_ms).rem_euclid(self.duration);
        let wave = (std::f64::consts::TAU * self.time / self.duration).sin();
        face.breath = quantize(wave, Self::STEPS);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/modifier.rs"]
mod tests;
