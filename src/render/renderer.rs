//! Renderer orchestrator: runs modifiers, diffs state, redraws the base face and drives
//! decorators once per tick.

use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    animation::lipsync::{LipSyncConfig, LipSyncInput, lip_sync},
    animation::modifier::{Modifier, ModifierPipeline},
    foundation::core::{Color, Rect},
    foundation::error::{FaceError, FaceResult},
    foundation::math::rng_from_seed,
    render::decorator::{Decorator, EmotionTable},
    render::layer::Layer,
    state::face::{Emotion, FaceState},
    surface::{Surface, with_region},
};

/// Construction options for [`Renderer`].
#[derive(Clone, Debug)]
pub struct RendererOptions {
    /// Inset in pixels of the region redrawn on a partial redraw.
    pub margin: f64,
    /// Per-tick work budget; overruns are logged.
    pub tick_budget: Option<Duration>,
    /// Seed for decorator randomness; entropy when `None`.
    pub seed: Option<u64>,
    /// Decorator bound to each emotion.
    pub emotions: EmotionTable,
}

impl RendererOptions {
    /// Default inset margin.
    pub const DEFAULT_MARGIN: f64 = 60.0;
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            margin: Self::DEFAULT_MARGIN,
            tick_budget: Some(Duration::from_millis(16)),
            seed: None,
            emotions: EmotionTable::default(),
        }
    }
}

/// What one tick did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The whole surface was repainted because the theme changed.
    pub cleared: bool,
    /// The base face was redrawn.
    pub rendered: bool,
    /// Active decorators drawn this tick.
    pub decorated: usize,
    /// Retired decorators torn down this tick.
    pub retired: usize,
}

/// Owns a surface and composes a face onto it tick by tick.
pub struct Renderer<S: Surface> {
    surface: S,
    layers: Vec<Layer>,
    modifiers: ModifierPipeline,
    active: Vec<Box<dyn Decorator>>,
    removing: Vec<Box<dyn Decorator>>,
    emotions: EmotionTable,
    bound: Emotion,
    current: FaceState,
    last: FaceState,
    margin: f64,
    tick_budget: Option<Duration>,
    rng: StdRng,
    ticks: u64,
}

impl<S: Surface> Renderer<S> {
    /// Take ownership of `surface` and clear it.
    ///
    /// Fails when the surface cannot fit the inset region or any bound decorator is
    /// misconfigured.
    pub fn new(surface: S, options: RendererOptions) -> FaceResult<Self> {
        let RendererOptions {
            margin,
            tick_budget,
            seed,
            emotions,
        } = options;
        if !(margin.is_finite() && margin >= 0.0) {
            return Err(FaceError::config(format!(
                "margin must be finite and non-negative, got {margin}"
            )));
        }
        let (w, h) = (f64::from(surface.width()), f64::from(surface.height()));
        if w <= 2.0 * margin || h <= 2.0 * margin {
            return Err(FaceError::config(format!(
                "surface {}x{} is too small for margin {margin}",
                surface.width(),
                surface.height()
            )));
        }
        emotions.validate()?;

        let mut renderer = Self {
            surface,
            layers: Vec::new(),
            modifiers: ModifierPipeline::new(),
            active: Vec::new(),
            removing: Vec::new(),
            emotions,
            bound: Emotion::Neutral,
            current: FaceState::default(),
            last: FaceState::default(),
            margin,
            tick_budget,
            rng: rng_from_seed(seed),
            ticks: 0,
        };
        renderer.clear(Color::BLACK)?;
        Ok(renderer)
    }

    /// Fill the whole surface with `color`.
    pub fn clear(&mut self, color: Color) -> FaceResult<()> {
        let full = self.surface.bounds();
        with_region(&mut self.surface, full, |s| s.fill_region(color, full))
    }

    /// Append a layer; layers draw in registration order.
    pub fn push_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    /// Registered layers.
    pub fn layers_mut(&mut self) -> &mut Vec<Layer> {
        &mut self.layers
    }

    /// Append a modifier to the pipeline.
    pub fn push_modifier(&mut self, modifier: impl Modifier + 'static) {
        self.modifiers.push(modifier);
    }

    /// Registered modifiers.
    pub fn modifiers(&self) -> &ModifierPipeline {
        &self.modifiers
    }

    /// Register a lip-sync modifier and return the audio-side handle feeding it.
    pub fn attach_lip_sync(&mut self, config: LipSyncConfig) -> FaceResult<LipSyncInput> {
        let (input, modifier) = lip_sync(config)?;
        self.modifiers.push(modifier);
        Ok(input)
    }

    /// Start drawing `decorator` on every tick.
    pub fn push_decorator(&mut self, decorator: impl Decorator + 'static) {
        self.push_boxed_decorator(Box::new(decorator));
    }

    /// Boxed form of [`Renderer::push_decorator`].
    pub fn push_boxed_decorator(&mut self, decorator: Box<dyn Decorator>) {
        tracing::debug!(decorator = decorator.name(), "decorator attached");
        self.active.push(decorator);
    }

    /// Retire every active decorator. Each gets one teardown call on the next tick.
    pub fn detach_decorators(&mut self) -> usize {
        let n = self.active.len();
        self.removing.append(&mut self.active);
        n
    }

    /// Retire the active decorators and attach a fresh one for `emotion`, if bound.
    pub fn bind_emotion(&mut self, emotion: Emotion) -> FaceResult<()> {
        let retired = self.detach_decorators();
        self.bound = emotion;
        let spec = self.emotions.get(emotion).cloned();
        tracing::debug!(%emotion, retired, bound = spec.is_some(), "emotion bound");
        if let Some(spec) = spec {
            let rng = StdRng::seed_from_u64(self.rng.r#gen());
            self.push_boxed_decorator(spec.build(rng)?);
        }
        Ok(())
    }

    /// Emotion whose decorator is currently active.
    pub fn bound_emotion(&self) -> Emotion {
        self.bound
    }

    /// Names of active decorators in draw order.
    pub fn active_decorators(&self) -> impl Iterator<Item = &str> {
        self.active.iter().map(|d| d.name())
    }

    /// Decorators waiting for their teardown call.
    pub fn removing_count(&self) -> usize {
        self.removing.len()
    }

    /// State drawn by the most recent redraw.
    pub fn last_drawn(&self) -> &FaceState {
        &self.last
    }

    /// Ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Region redrawn on a partial redraw.
    pub fn inset_region(&self) -> Rect {
        self.surface.bounds().inset(-self.margin)
    }

    /// The surface being drawn on.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface, e.g. to present a frame.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Give the surface back.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Run one tick against `reference`.
    ///
    /// A modifier failure returns before anything is drawn. A decorator failure aborts
    /// the rest of the decorator pass; retiring decorators are dropped either way.
    #[tracing::instrument(level = "trace", skip(self, reference), fields(tick = self.ticks))]
    pub fn update(&mut self, elapsed_ms: f64, reference: &FaceState) -> FaceResult<TickReport> {
        let started = Instant::now();
        self.ticks += 1;

        if reference.emotion != self.bound {
            self.bind_emotion(reference.emotion)?;
        }

        self.current.copy_from(reference);
        self.modifiers.run(elapsed_ms, &mut self.current)?;

        let diff = self.current.diff(&self.last);
        let mut report = TickReport {
            cleared: diff.should_clear,
            rendered: diff.should_render,
            ..TickReport::default()
        };
        if diff.should_render || diff.should_clear {
            tracing::trace!(clear = diff.should_clear, "redrawing face");
            self.redraw(elapsed_ms, diff.should_clear)?;
        }

        let removing = std::mem::take(&mut self.removing);
        report.retired = removing.len();
        for mut d in removing {
            d.render(elapsed_ms, &mut self.surface, &self.last, true)?;
            tracing::debug!(decorator = d.name(), "decorator retired");
        }
        for d in &mut self.active {
            d.render(elapsed_ms, &mut self.surface, &self.last, false)?;
            report.decorated += 1;
        }

        let spent = started.elapsed();
        if let Some(budget) = self.tick_budget
            && spent > budget
        {
            tracing::warn!(?spent, ?budget, tick = self.ticks, "tick over budget");
        }
        Ok(report)
    }

    fn redraw(&mut self, elapsed_ms: f64, clear: bool) -> FaceResult<()> {
        let rect = if clear {
            self.surface.bounds()
        } else {
            self.inset_region()
        };
        let Self {
            surface,
            layers,
            current,
            ..
        } = self;
        with_region(surface, rect, |s| {
            let [r, g, b] = current.theme.secondary;
            let bg = s.make_color(r, g, b);
            s.fill_region(bg, rect)?;
            for layer in layers.iter_mut() {
                layer.render(elapsed_ms, s, current)?;
            }
            Ok(())
        })?;
        std::mem::swap(&mut self.current, &mut self.last);
        Ok(())
    }
}

impl<S: Surface + std::fmt::Debug> std::fmt::Debug for Renderer<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("surface", &self.surface)
            .field("layers", &self.layers.len())
            .field("modifiers", &self.modifiers)
            .field(
                "active",
                &self.active.iter().map(|d| d.name()).collect::<Vec<_>>(),
            )
            .field("removing", &self.removing.len())
            .field("bound", &self.bound)
            .field("ticks", &self.ticks)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
