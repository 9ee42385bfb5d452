//! stackface composes an animated face onto a small bitmap display and decides, tick by
//! tick, what actually needs to be redrawn.
//!
//! # Pipeline overview
//!
//! 1. **Reference**: the caller hands the renderer a [`FaceState`] every tick.
//! 2. **Modify**: the [`ModifierPipeline`] (blink, saccade, breath, lip-sync, ...) mutates a
//!    private copy of it.
//! 3. **Diff**: the copy is compared with the last drawn state ([`FaceState::diff`]).
//! 4. **Draw**: the base face ([`Layer`]s) is redrawn only when something changed, inside an
//!    inset region unless the theme changed; [`Decorator`]s animate on every tick.
//!
//! Everything is drawn through the [`Surface`] trait. [`PixmapSurface`] rasterizes on the
//! CPU and [`RecordingSurface`] records calls for tests.
//!
//! # Getting started
//!
//! ```no_run
//! use stackface::{FaceConfig, FaceState, PixmapSurface};
//!
//! # fn main() -> stackface::FaceResult<()> {
//! let config = FaceConfig::default();
//! let surface = PixmapSurface::new(config.surface.width, config.surface.height)?;
//! let mut renderer = config.build_renderer(surface)?;
//! renderer.update(16.0, &FaceState::default())?;
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod config;
mod foundation;
mod geometry;
mod render;
mod state;
mod surface;

pub use animation::ease::Ease;
pub use animation::lipsync::{LipSync, LipSyncConfig, LipSyncInput, lip_sync};
pub use animation::modifier::{
    Blink, BlinkConfig, Breath, BreathConfig, Modifier, ModifierPipeline, Saccade, SaccadeConfig,
};
pub use config::{FaceConfig, SurfaceConfig};
pub use foundation::core::{Affine, BezPath, Color, Font, Point, Rect, Rgb, Vec2, region};
pub use foundation::error::{FaceError, FaceResult};
pub use foundation::math::{norm_rand, quantize, random_between, rng_from_seed};
pub use foundation::ticker::Ticker;
pub use geometry::outline::{Outline, OutlineMode};
pub use geometry::shapes::{
    GLYPH_BOX, angry_marks, heart, pale_marks, push_circle, push_ellipse, push_rect, round_rect,
    sweat_drop,
};
pub use render::decorator::{Decorator, DecoratorSpec, EmotionTable};
pub use render::decorators::{
    Angry, AngryConfig, Balloon, BalloonConfig, Bubble, BubbleConfig, Heart, HeartConfig, Pale,
    PaleConfig, Sweat, SweatConfig,
};
pub use render::face::{EyePart, EyeSide, MouthPart, simple_face_layers};
pub use render::layer::{Layer, LayerStyle, Part};
pub use render::renderer::{Renderer, RendererOptions, TickReport};
pub use state::face::{Emotion, EyeState, Eyes, FaceDiff, FaceState, MouthState, Theme, ThemeColor};
pub use surface::cpu::PixmapSurface;
pub use surface::recording::{RecordingSurface, SurfaceOp};
pub use surface::{Surface, with_region};
