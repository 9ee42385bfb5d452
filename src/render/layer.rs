//! Composition layers: named path contributions merged into one outline per tick.

use crate::{
    foundation::core::{BezPath, Color, Point},
    foundation::error::FaceResult,
    geometry::outline::{Outline, OutlineMode},
    state::face::{FaceState, ThemeColor},
    surface::Surface,
};

/// Contributes path commands for one concern of the face (an eye, the mouth, ...).
pub trait Part {
    /// Append this part's geometry for `face` to `path`.
    fn draw(&mut self, elapsed_ms: f64, path: &mut BezPath, face: &FaceState);
}

impl<F> Part for F
where
    F: FnMut(f64, &mut BezPath, &FaceState),
{
    fn draw(&mut self, elapsed_ms: f64, path: &mut BezPath, face: &FaceState) {
        self(elapsed_ms, path, face)
    }
}

/// Paint settings for a [`Layer`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayerStyle {
    /// Theme color the merged outline is painted with.
    pub color: ThemeColor,
    /// Fill or stroke.
    pub mode: OutlineMode,
    /// Stroke weight, fixed for the layer's lifetime.
    pub weight: f64,
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self {
            color: ThemeColor::Primary,
            mode: OutlineMode::Fill,
            weight: Layer::DEFAULT_STROKE_WEIGHT,
        }
    }
}

/// One visual concern drawn in a single color.
pub struct Layer {
    style: LayerStyle,
    parts: Vec<(String, Box<dyn Part>)>,
}

impl Layer {
    /// Stroke weight used when none is given.
    pub const DEFAULT_STROKE_WEIGHT: f64 = 6.0;
    /// Vertical bob in pixels per unit of breath.
    pub const BREATH_OFFSET: f64 = 3.0;

    /// Empty layer.
    pub fn new(style: LayerStyle) -> Self {
        Self {
            style,
            parts: Vec::new(),
        }
    }

    /// Filled layer in the given theme color.
    pub fn fill(color: ThemeColor) -> Self {
        Self::new(LayerStyle {
            color,
            ..LayerStyle::default()
        })
    }

    /// Stroked layer in the given theme color.
    pub fn stroke(color: ThemeColor, weight: f64) -> Self {
        Self::new(LayerStyle {
            color,
            mode: OutlineMode::Stroke,
            weight,
        })
    }

    /// Paint settings.
    pub fn style(&self) -> LayerStyle {
        self.style
    }

    /// Register `part` under `key`. An existing part with that key is replaced in
    /// place, keeping its drawing position.
    pub fn add_part(&mut self, key: impl Into<String>, part: impl Part + 'static) {
        let key = key.into();
        let part: Box<dyn Part> = Box::new(part);
        match self.parts.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = part,
            None => self.parts.push((key, part)),
        }
    }

    /// Builder form of [`Layer::add_part`].
    pub fn with_part(mut self, key: impl Into<String>, part: impl Part + 'static) -> Self {
        self.add_part(key, part);
        self
    }

    /// Remove the part registered under `key`. Returns `true` when one was removed.
    pub fn remove_part(&mut self, key: &str) -> bool {
        let before = self.parts.len();
        self.parts.retain(|(k, _)| k != key);
        self.parts.len() != before
    }

    /// Registered keys in drawing order.
    pub fn part_keys(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|(k, _)| k.as_str())
    }

    /// Merge every part into one outline, bob it by the breath offset and paint it.
    pub fn render(
        &mut self,
        elapsed_ms: f64,
        surface: &mut dyn Surface,
        face: &FaceState,
    ) -> FaceResult<()> {
        let mut path = BezPath::new();
        for (_, part) in &mut self.parts {
            part.draw(elapsed_ms, &mut path, face);
        }
        let outline = Outline::with_mode(path, self.style.mode, self.style.weight)
            .translate(0.0, face.breath * Self::BREATH_OFFSET);
        let [r, g, b] = face.theme.get(self.style.color);
        let color: Color = surface.make_color(r, g, b);
        surface.blend_outline(color, 255, &outline, Point::ZERO)
    }
}

impl std::fmt::Debug for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Layer")
            .field("style", &self.style)
            .field("parts", &self.part_keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/layer.rs"]
mod tests;
