//! JSON configuration for a complete face: surface geometry, modifier parameters and the
//! emotion-to-decorator table.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use crate::{
    animation::lipsync::{LipSyncConfig, LipSyncInput},
    animation::modifier::{Blink, BlinkConfig, Breath, BreathConfig, Saccade, SaccadeConfig},
    foundation::error::{FaceError, FaceResult},
    foundation::math::rng_from_seed,
    render::decorator::EmotionTable,
    render::face::simple_face_layers,
    render::renderer::{Renderer, RendererOptions},
    surface::Surface,
};

/// Surface geometry.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Inset of the partial-redraw region.
    pub margin: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            margin: RendererOptions::DEFAULT_MARGIN,
        }
    }
}

/// Everything needed to build a running face.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FaceConfig {
    /// Surface geometry.
    pub surface: SurfaceConfig,
    /// Seed for every random source; entropy when absent.
    pub seed: Option<u64>,
    /// Per-tick work budget in milliseconds; `0` disables the check.
    pub tick_budget_ms: u64,
    /// Blink timing.
    pub blink: BlinkConfig,
    /// Saccade timing.
    pub saccade: SaccadeConfig,
    /// Breath period.
    pub breath: BreathConfig,
    /// Lip-sync analysis.
    pub lip_sync: LipSyncConfig,
    /// Decorator shown for each emotion.
    pub emotions: EmotionTable,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            surface: SurfaceConfig::default(),
            seed: None,
            tick_budget_ms: Self::DEFAULT_TICK_BUDGET_MS,
            blink: BlinkConfig::default(),
            saccade: SaccadeConfig::default(),
            breath: BreathConfig::default(),
            lip_sync: LipSyncConfig::default(),
            emotions: EmotionTable::default(),
        }
    }
}

impl FaceConfig {
    /// Default per-tick budget.
    pub const DEFAULT_TICK_BUDGET_MS: u64 = 16;

    /// Parse a configuration from JSON text.
    pub fn from_json_str(s: &str) -> FaceResult<Self> {
        serde_json::from_str(s).map_err(|e| FaceError::serde(format!("parse face config: {e}")))
    }

    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> FaceResult<Self> {
        serde_json::from_reader(r).map_err(|e| FaceError::serde(format!("parse face config: {e}")))
    }

    /// Parse a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> FaceResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FaceError::config(format!("open face config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize to pretty JSON.
    pub fn to_json_string(&self) -> FaceResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| FaceError::serde(format!("serialize face config: {e}")))
    }

    /// Check every section.
    pub fn validate(&self) -> FaceResult<()> {
        let SurfaceConfig {
            width,
            height,
            margin,
        } = self.surface;
        if !(margin.is_finite() && margin >= 0.0) {
            return Err(FaceError::config(format!(
                "margin must be finite and non-negative, got {margin}"
            )));
        }
        if f64::from(width) <= 2.0 * margin || f64::from(height) <= 2.0 * margin {
            return Err(FaceError::config(format!(
                "surface {width}x{height} is too small for margin {margin}"
            )));
        }
        self.blink.validate()?;
        self.saccade.validate()?;
        self.breath.validate()?;
        self.lip_sync.validate()?;
        self.emotions.validate()
    }

    /// Renderer options derived from this configuration.
    pub fn renderer_options(&self) -> RendererOptions {
        RendererOptions {
            margin: self.surface.margin,
            tick_budget: (self.tick_budget_ms > 0)
                .then(|| Duration::from_millis(self.tick_budget_ms)),
            seed: self.seed,
            emotions: self.emotions.clone(),
        }
    }

    /// Validate, then build a renderer on `surface` with the default face layers and the
    /// blink, saccade and breath modifiers.
    pub fn build_renderer<S: Surface>(&self, surface: S) -> FaceResult<Renderer<S>> {
        self.validate()?;
        let (w, h) = (surface.width(), surface.height());
        if (w, h) != (self.surface.width, self.surface.height) {
            return Err(FaceError::config(format!(
                "surface is {w}x{h} but the configuration expects {}x{}",
                self.surface.width, self.surface.height
            )));
        }

        let stream = |k: u64| rng_from_seed(self.seed.map(|s| s.wrapping_add(k)));
        let mut renderer = Renderer::new(surface, self.renderer_options())?;
        for layer in simple_face_layers(w, h) {
            renderer.push_layer(layer);
        }
        renderer.push_modifier(Blink::new(self.blink, stream(1))?);
        renderer.push_modifier(Saccade::new(self.saccade, stream(2))?);
        renderer.push_modifier(Breath::new(self.breath)?);
        tracing::debug!(
            width = w,
            height = h,
            modifiers = renderer.modifiers().len(),
            "renderer built"
        );
        Ok(renderer)
    }

    /// [`FaceConfig::build_renderer`] plus a lip-sync modifier configured by `lip_sync`.
    ///
    /// The returned input is the audio-side handle; samples pushed into it reach
    /// `mouth.open` on the next tick.
    pub fn build_renderer_with_lip_sync<S: Surface>(
        &self,
        surface: S,
    ) -> FaceResult<(Renderer<S>, LipSyncInput)> {
        let mut renderer = self.build_renderer(surface)?;
        let input = renderer.attach_lip_sync(self.lip_sync)?;
        Ok((renderer, input))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/config.rs"]
mod tests;
