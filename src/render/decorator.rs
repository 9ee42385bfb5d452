//! Decorators: self-animating overlays drawn on top of the face every tick.
//!
//! A decorator owns a small region of the surface. Every call erases that region with
//! the background color; a normal call then advances the decorator's own animation and
//! draws it, while a teardown call (`end = true`) stops after erasing. Retired
//! decorators get exactly one teardown call, which is how their pixels are reclaimed.

use std::collections::BTreeMap;

use rand::rngs::StdRng;

use crate::{
    foundation::core::{Color, Rect},
    foundation::error::FaceResult,
    render::decorators::{
        Angry, AngryConfig, Balloon, BalloonConfig, Bubble, BubbleConfig, Heart, HeartConfig, Pale,
        PaleConfig, Sweat, SweatConfig,
    },
    state::face::{Emotion, FaceState},
    surface::{Surface, with_region},
};

/// Stateful overlay animation.
pub trait Decorator {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Erase the overlay's region and, unless `end`, advance and draw the overlay.
    fn render(
        &mut self,
        elapsed_ms: f64,
        surface: &mut dyn Surface,
        face: &FaceState,
        end: bool,
    ) -> FaceResult<()>;
}

/// Shared decorator frame: open `rect`, refill it with the background color and, on a
/// normal call, run `draw` with the foreground color.
pub(crate) fn erase_then_draw(
    surface: &mut dyn Surface,
    face: &FaceState,
    rect: Rect,
    end: bool,
    draw: impl FnOnce(&mut dyn Surface, Color) -> FaceResult<()>,
) -> FaceResult<()> {
    with_region(surface, rect, |s| {
        let [r, g, b] = face.theme.secondary;
        let bg = s.make_color(r, g, b);
        s.fill_region(bg, rect)?;
        if end {
            return Ok(());
        }
        let [r, g, b] = face.theme.primary;
        let fg = s.make_color(r, g, b);
        draw(s, fg)
    })
}

/// Serializable description of a decorator, used to build fresh instances.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecoratorSpec {
    /// Speech balloon.
    Balloon(BalloonConfig),
    /// Rising bubbles.
    Bubble(BubbleConfig),
    /// Pulsing heart.
    Heart(HeartConfig),
    /// Anger marks.
    Angry(AngryConfig),
    /// Pallor lines.
    Pale(PaleConfig),
    /// Sweat drop.
    Sweat(SweatConfig),
}

impl DecoratorSpec {
    /// Build a new decorator with fresh animation state.
    pub fn build(&self, rng: StdRng) -> FaceResult<Box<dyn Decorator>> {
        Ok(match self {
            Self::Balloon(c) => Box::new(Balloon::new(c.clone())?),
            Self::Bubble(c) => Box::new(Bubble::new(*c, rng)?),
            Self::Heart(c) => Box::new(Heart::new(*c)?),
            Self::Angry(c) => Box::new(Angry::new(*c)?),
            Self::Pale(c) => Box::new(Pale::new(*c)?),
            Self::Sweat(c) => Box::new(Sweat::new(*c)?),
        })
    }

    /// Check the configuration without building.
    pub fn validate(&self) -> FaceResult<()> {
        self.build(crate::foundation::math::rng_from_seed(Some(0))).map(|_| ())
    }
}

/// Which decorator each emotion shows.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct EmotionTable {
    entries: BTreeMap<Emotion, DecoratorSpec>,
}

impl EmotionTable {
    /// Table with no bindings.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Decorator bound to `emotion`, if any.
    pub fn get(&self, emotion: Emotion) -> Option<&DecoratorSpec> {
        self.entries.get(&emotion)
    }

    /// Bind `emotion` to `spec`, returning the previous binding.
    pub fn bind(&mut self, emotion: Emotion, spec: DecoratorSpec) -> Option<DecoratorSpec> {
        self.entries.insert(emotion, spec)
    }

    /// Remove the binding for `emotion`.
    pub fn unbind(&mut self, emotion: Emotion) -> Option<DecoratorSpec> {
        self.entries.remove(&emotion)
    }

    /// Validate every bound decorator.
    pub fn validate(&self) -> FaceResult<()> {
        self.entries.values().try_for_each(DecoratorSpec::validate)
    }
}

impl Default for EmotionTable {
    /// HAPPY: heart, SLEEPY: bubbles, DOUBTFUL: sweat, SAD: pallor, ANGRY: anger marks.
    fn default() -> Self {
        let mut t = Self::empty();
        t.bind(
            Emotion::Happy,
            DecoratorSpec::Heart(HeartConfig {
                x: 20.0,
                y: 20.0,
                ..HeartConfig::default()
            }),
        );
        t.bind(
            Emotion::Sleepy,
            DecoratorSpec::Bubble(BubbleConfig {
                x: 10.0,
                y: 20.0,
                width: 50.0,
                height: 60.0,
            }),
        );
        t.bind(
            Emotion::Doubtful,
            DecoratorSpec::Sweat(SweatConfig {
                x: 20.0,
                y: 20.0,
                ..SweatConfig::default()
            }),
        );
        t.bind(
            Emotion::Sad,
            DecoratorSpec::Pale(PaleConfig {
                x: 20.0,
                y: 20.0,
                ..PaleConfig::default()
            }),
        );
        t.bind(
            Emotion::Angry,
            DecoratorSpec::Angry(AngryConfig {
                x: 20.0,
                y: 20.0,
                ..AngryConfig::default()
            }),
        );
        t
    }
}
