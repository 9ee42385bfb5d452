//! Stock decorators: speech balloon, sleep bubbles and the four emotion glyphs.

use std::f64::consts::TAU;

use rand::{Rng, rngs::StdRng};

use crate::{
    animation::ease::Ease,
    foundation::core::{BezPath, Color, Font, Point, Rect, region},
    foundation::error::{FaceError, FaceResult},
    geometry::{
        outline::Outline,
        shapes::{self, GLYPH_BOX},
    },
    render::decorator::{Decorator, erase_then_draw},
    state::face::FaceState,
    surface::Surface,
};

fn check_box(kind: &str, width: f64, height: f64) -> FaceResult<()> {
    if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
        return Err(FaceError::decorator(format!(
            "{kind} needs a positive finite size, got {width}x{height}"
        )));
    }
    Ok(())
}

fn check_origin(kind: &str, x: f64, y: f64) -> FaceResult<()> {
    if !(x.is_finite() && y.is_finite()) {
        return Err(FaceError::decorator(format!(
            "{kind} origin must be finite, got ({x}, {y})"
        )));
    }
    Ok(())
}

macro_rules! glyph_config {
    ($(#[$meta:meta])* $name:ident { $($(#[$fmeta:meta])* $field:ident: $ty:ty = $default:expr),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(default)]
        pub struct $name {
            /// Left edge of the region.
            pub x: f64,
            /// Top edge of the region.
            pub y: f64,
            /// Region width; the glyph scales by `width / 40`.
            pub width: f64,
            /// Region height; the glyph scales by `height / 40`.
            pub height: f64,
            $($(#[$fmeta])* pub $field: $ty,)*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    x: 0.0,
                    y: 0.0,
                    width: GLYPH_BOX,
                    height: GLYPH_BOX,
                    $($field: $default,)*
                }
            }
        }

        impl $name {
            fn validate(&self, kind: &str) -> FaceResult<()> {
                check_origin(kind, self.x, self.y)?;
                check_box(kind, self.width, self.height)
            }

            fn scale(&self) -> (f64, f64) {
                (self.width / GLYPH_BOX, self.height / GLYPH_BOX)
            }
        }
    };
}

glyph_config!(
    /// Placement of a [`Heart`].
    HeartConfig {
        /// Fixed rotation in radians.
        angle: f64 = 0.1,
    }
);

glyph_config!(
    /// Placement of an [`Angry`] glyph.
    AngryConfig {
        /// Fixed rotation in radians.
        angle: f64 = 0.1,
    }
);

glyph_config!(
    /// Placement of a [`Pale`] glyph.
    PaleConfig {
        /// Mirror the outer line lengths.
        flip: bool = false,
    }
);

glyph_config!(
    /// Placement of a [`Sweat`] drop.
    SweatConfig {}
);

/// Ticks per half-beat of the pulsing glyphs.
const PULSE_STEPS: f64 = 100.0;

fn pulse_scale(phase: f64) -> f64 {
    phase.sin().abs() / 4.0 + 0.75
}

/// Heart that pulses between 75% and 100% of its size.
#[derive(Debug)]
pub struct Heart {
    config: HeartConfig,
    phase: f64,
}

impl Heart {
    /// New heart at phase zero.
    pub fn new(config: HeartConfig) -> FaceResult<Self> {
        config.validate("heart")?;
        Ok(Self { config, phase: 0.0 })
    }

    /// Current pulse scale factor.
    pub fn pulse(&self) -> f64 {
        pulse_scale(self.phase)
    }
}

impl Decorator for Heart {
    fn name(&self) -> &str {
        "heart"
    }

    fn render(
        &mut self,
        _elapsed_ms: f64,
        surface: &mut dyn Surface,
        face: &FaceState,
        end: bool,
    ) -> FaceResult<()> {
        let c = self.config;
        let rect = region(c.x, c.y, c.width, c.height);
        erase_then_draw(surface, face, rect, end, |s, fg| {
            self.phase = (self.phase + TAU / PULSE_STEPS) % TAU;
            let k = pulse_scale(self.phase);
            let (sx, sy) = c.scale();
            let glyph = Outline::fill(shapes::heart())
                .scale(k * sx, k * sy)
                .rotate(c.angle);
            s.blend_outline(fg, 255, &glyph, Point::new(c.x, c.y))
        })
    }
}

/// Anger marks that pulse like [`Heart`].
#[derive(Debug)]
pub struct Angry {
    config: AngryConfig,
    phase: f64,
}

impl Angry {
    /// Stroke weight of the marks in pixels; unaffected by the glyph scale.
    pub const WEIGHT: f64 = 2.0;

    /// New glyph at phase zero.
    pub fn new(config: AngryConfig) -> FaceResult<Self> {
        config.validate("angry")?;
        Ok(Self { config, phase: 0.0 })
    }
}

impl Decorator for Angry {
    fn name(&self) -> &str {
        "angry"
    }

    fn render(
        &mut self,
        _elapsed_ms: f64,
        surface: &mut dyn Surface,
        face: &FaceState,
        end: bool,
    ) -> FaceResult<()> {
        let c = self.config;
        let rect = region(c.x, c.y, c.width, c.height);
        erase_then_draw(surface, face, rect, end, |s, fg| {
            self.phase = (self.phase + TAU / PULSE_STEPS) % TAU;
            let k = pulse_scale(self.phase);
            let (sx, sy) = c.scale();
            let glyph = Outline::stroke(shapes::angry_marks(), Self::WEIGHT)
                .scale(k * sx, k * sy)
                .rotate(c.angle);
            s.blend_outline(fg, 255, &glyph, Point::new(c.x, c.y))
        })
    }
}

/// Period of the sliding glyphs.
const SLIDE_MS: f64 = 3000.0;
/// Slide distance in design units.
const SLIDE_DISTANCE: f64 = 15.0;

/// Phase accumulator shared by [`Pale`] and [`Sweat`].
#[derive(Debug, Default)]
struct Slide {
    time: f64,
}

impl Slide {
    /// Advance and return the vertical offset for this tick.
    fn advance(&mut self, elapsed_ms: f64, distance: f64) -> f64 {
        self.time = (self.time + elapsed_ms).rem_euclid(SLIDE_MS);
        Ease::OutExpo.apply(self.time / SLIDE_MS) * distance
    }
}

/// Pallor lines that slide down and snap back every three seconds.
#[derive(Debug)]
pub struct Pale {
    config: PaleConfig,
    slide: Slide,
}

impl Pale {
    /// New glyph at the top of its slide.
    pub fn new(config: PaleConfig) -> FaceResult<Self> {
        config.validate("pale")?;
        Ok(Self {
            config,
            slide: Slide::default(),
        })
    }

    fn rect(&self) -> Rect {
        let c = self.config;
        let (_, sy) = c.scale();
        region(c.x, c.y, c.width, c.height + sy * SLIDE_DISTANCE)
    }
}

impl Decorator for Pale {
    fn name(&self) -> &str {
        "pale"
    }

    fn render(
        &mut self,
        elapsed_ms: f64,
        surface: &mut dyn Surface,
        face: &FaceState,
        end: bool,
    ) -> FaceResult<()> {
        let c = self.config;
        let rect = self.rect();
        erase_then_draw(surface, face, rect, end, |s, fg| {
            let (sx, sy) = c.scale();
            let offset = self.slide.advance(elapsed_ms, sy * SLIDE_DISTANCE);
            let glyph = Outline::stroke(shapes::pale_marks(c.flip), 2.0 * sx)
                .scale(sx, sy)
                .translate(0.0, offset);
            s.blend_outline(fg, 255, &glyph, Point::new(c.x, c.y))
        })
    }
}

/// Sweat drop that slides down and snaps back every three seconds.
#[derive(Debug)]
pub struct Sweat {
    config: SweatConfig,
    slide: Slide,
}

impl Sweat {
    /// New drop at the top of its slide.
    pub fn new(config: SweatConfig) -> FaceResult<Self> {
        config.validate("sweat")?;
        Ok(Self {
            config,
            slide: Slide::default(),
        })
    }
}

impl Decorator for Sweat {
    fn name(&self) -> &str {
        "sweat"
    }

    fn render(
        &mut self,
        elapsed_ms: f64,
        surface: &mut dyn Surface,
        face: &FaceState,
        end: bool,
    ) -> FaceResult<()> {
        let c = self.config;
        let (sx, sy) = c.scale();
        let rect = region(c.x, c.y, c.width, c.height + sy * SLIDE_DISTANCE);
        erase_then_draw(surface, face, rect, end, |s, fg| {
            let offset = self.slide.advance(elapsed_ms, sy * SLIDE_DISTANCE);
            let glyph = Outline::fill(shapes::sweat_drop())
                .scale(sx, sy)
                .translate(0.0, offset);
            s.blend_outline(fg, 255, &glyph, Point::new(c.x, c.y))
        })
    }
}

/// Placement of a [`Bubble`] swarm.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BubbleConfig {
    /// Left edge of the region.
    pub x: f64,
    /// Top edge of the region.
    pub y: f64,
    /// Region width.
    pub width: f64,
    /// Region height.
    pub height: f64,
}

impl Default for BubbleConfig {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 50.0,
            height: 60.0,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Particle {
    x: f64,
    vx: f64,
    y: f64,
    r: f64,
}

/// Small circles rising through a region and wrapping back to the bottom.
#[derive(Debug)]
pub struct Bubble {
    config: BubbleConfig,
    particles: Vec<Particle>,
    rng: StdRng,
}

impl Bubble {
    /// Number of bubbles in the swarm.
    pub const COUNT: usize = 4;
    /// Stroke weight of each bubble.
    pub const WEIGHT: f64 = 2.0;
    /// Smallest radius a bubble shrinks to.
    pub const MIN_RADIUS: f64 = 3.0;
    /// Largest radius a bubble grows to; bubbles this big stop rising.
    pub const MAX_RADIUS: f64 = 12.0;

    /// New swarm with randomized positions.
    pub fn new(config: BubbleConfig, mut rng: StdRng) -> FaceResult<Self> {
        check_origin("bubble", config.x, config.y)?;
        check_box("bubble", config.width, config.height)?;
        let particles = (0..Self::COUNT)
            .map(|_| Particle {
                x: rng.r#gen::<f64>() * config.width,
                vx: 0.0,
                y: rng.r#gen::<f64>() * config.height,
                r: 4.0 + rng.r#gen::<f64>() * 3.0,
            })
            .collect();
        Ok(Self {
            config,
            particles,
            rng,
        })
    }

    fn step(&mut self) {
        let BubbleConfig { width, height, .. } = self.config;
        for p in &mut self.particles {
            p.vx = p.vx * 0.85 + 0.1 * (self.rng.r#gen::<f64>() - 0.5);
            p.x = (p.x + p.vx).max(p.r).min(width - p.r);
            p.y += (1.0 - p.r / Self::MAX_RADIUS) * 2.0;
            if p.y > height - p.r {
                p.y = p.r;
                p.x = width * (1.0 - self.rng.r#gen::<f64>() * 0.2);
                p.vx = -3.0;
            }
            p.r = (p.r + 0.2 * (self.rng.r#gen::<f64>() - 0.5))
                .clamp(Self::MIN_RADIUS, Self::MAX_RADIUS);
        }
    }

    /// Bubble centers in surface coordinates.
    pub fn centers(&self) -> impl Iterator<Item = Point> + '_ {
        let c = self.config;
        self.particles
            .iter()
            .map(move |p| Point::new(c.x + p.x, c.y + c.height - p.y))
    }
}

impl Decorator for Bubble {
    fn name(&self) -> &str {
        "bubble"
    }

    fn render(
        &mut self,
        _elapsed_ms: f64,
        surface: &mut dyn Surface,
        face: &FaceState,
        end: bool,
    ) -> FaceResult<()> {
        let c = self.config;
        let rect = region(c.x, c.y, c.width, c.height);
        erase_then_draw(surface, face, rect, end, |s, fg| {
            self.step();
            let mut path = BezPath::new();
            for (center, p) in self.centers().zip(&self.particles) {
                shapes::push_circle(&mut path, center, p.r);
            }
            s.blend_outline(fg, 255, &Outline::stroke(path, Self::WEIGHT), Point::ZERO)
        })
    }
}

/// Placement and content of a [`Balloon`].
///
/// At most one of `left`/`right` and one of `top`/`bottom` is honored; `left` and `top`
/// win. A missing axis centers the balloon on that axis.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BalloonConfig {
    /// Text shown in the balloon.
    pub text: String,
    /// Font for the text.
    pub font: Font,
    /// Distance from the left edge.
    pub left: Option<f64>,
    /// Distance from the right edge.
    pub right: Option<f64>,
    /// Distance from the top edge.
    pub top: Option<f64>,
    /// Distance from the bottom edge.
    pub bottom: Option<f64>,
    /// Balloon width.
    pub width: f64,
    /// Balloon height.
    pub height: f64,
}

impl Default for BalloonConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            font: Font::default(),
            left: None,
            right: None,
            top: None,
            bottom: Some(10.0),
            width: 200.0,
            height: 40.0,
        }
    }
}

/// Speech balloon with text at its top-left corner; text wider than the balloon scrolls
/// horizontally.
#[derive(Debug)]
pub struct Balloon {
    config: BalloonConfig,
    text_x: f64,
}

impl Balloon {
    /// Corner radius of the balloon body.
    pub const RADIUS: f64 = 6.0;
    /// Gap between repeated copies of scrolling text.
    pub const SCROLL_GAP: f64 = 20.0;
    /// Milliseconds per pixel of scroll.
    pub const SCROLL_MS_PER_PX: f64 = 30.0;
    /// Scroll offset the text restarts from after a full lap.
    pub const SCROLL_RESTART: f64 = 2.0;

    /// New balloon.
    pub fn new(config: BalloonConfig) -> FaceResult<Self> {
        check_box("balloon", config.width, config.height)?;
        if !(config.font.size.is_finite() && config.font.size > 0.0) {
            return Err(FaceError::decorator(format!(
                "balloon font size must be positive, got {}",
                config.font.size
            )));
        }
        for edge in [config.left, config.right, config.top, config.bottom]
            .into_iter()
            .flatten()
        {
            check_origin("balloon", edge, 0.0)?;
        }
        Ok(Self {
            config,
            text_x: 0.0,
        })
    }

    /// Replace the text and restart scrolling.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.config.text = text.into();
        self.text_x = 0.0;
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.config.text
    }

    /// Scroll offset of the text.
    pub fn scroll(&self) -> f64 {
        self.text_x
    }

    /// Balloon rectangle on a surface of the given size.
    pub fn placement(&self, surface_width: f64, surface_height: f64) -> Rect {
        let c = &self.config;
        let x = match (c.left, c.right) {
            (Some(l), _) => l,
            (None, Some(r)) => surface_width - r - c.width,
            (None, None) => (surface_width - c.width) / 2.0,
        };
        let y = match (c.top, c.bottom) {
            (Some(t), _) => t,
            (None, Some(b)) => surface_height - b - c.height,
            (None, None) => (surface_height - c.height) / 2.0,
        };
        region(x, y, c.width, c.height)
    }
}

impl Decorator for Balloon {
    fn name(&self) -> &str {
        "balloon"
    }

    fn render(
        &mut self,
        elapsed_ms: f64,
        surface: &mut dyn Surface,
        face: &FaceState,
        end: bool,
    ) -> FaceResult<()> {
        let rect = self.placement(f64::from(surface.width()), f64::from(surface.height()));
        erase_then_draw(surface, face, rect, end, |s, _| {
            let body = Outline::fill(shapes::round_rect(
                0.0,
                0.0,
                rect.width(),
                rect.height(),
                Self::RADIUS,
            ));
            s.blend_outline(Color::WHITE, 255, &body, rect.origin())?;

            let c = &self.config;
            let x = rect.x0 - self.text_x;
            s.draw_text(&c.text, &c.font, Color::BLACK, Point::new(x, rect.y0))?;

            let text_width = s.measure_text_width(&c.text, &c.font);
            if text_width <= rect.width() {
                return Ok(());
            }
            let lap = text_width + Self::SCROLL_GAP;
            if lap >= self.text_x.floor() {
                let next = Point::new(x + lap, rect.y0);
                s.draw_text(&c.text, &c.font, Color::BLACK, next)?;
            }
            self.text_x = if self.text_x >= lap {
                Self::SCROLL_RESTART
            } else {
                self.text_x + elapsed_ms / Self::SCROLL_MS_PER_PX
            };
            Ok(())
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/decorators.rs"]
mod tests;
