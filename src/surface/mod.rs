//! Drawing surface capability consumed by the renderer.
//!
//! The renderer never rasterizes anything itself. Everything it draws goes through the
//! [`Surface`] trait, so any bitmap backend can host a face.

pub(crate) mod cpu;
pub(crate) mod recording;

use crate::{
    foundation::core::{Color, Font, Point, Rect},
    foundation::error::FaceResult,
    geometry::outline::Outline,
};

/// 2D drawing capability.
///
/// Regions nest: every [`Surface::begin_region`] must be matched by one
/// [`Surface::end_region`]. Drawing outside the innermost region is clipped.
pub trait Surface {
    /// Surface width in pixels.
    fn width(&self) -> u32;

    /// Surface height in pixels.
    fn height(&self) -> u32;

    /// Opaque color from channels.
    fn make_color(&self, r: u8, g: u8, b: u8) -> Color {
        Color::rgb(r, g, b)
    }

    /// Start a clipped drawing region.
    fn begin_region(&mut self, rect: Rect) -> FaceResult<()>;

    /// Close the innermost region.
    fn end_region(&mut self) -> FaceResult<()>;

    /// Fill an axis-aligned rectangle.
    fn fill_region(&mut self, color: Color, rect: Rect) -> FaceResult<()>;

    /// Draw a single line of text with its top-left corner at `origin`.
    fn draw_text(&mut self, text: &str, font: &Font, color: Color, origin: Point)
    -> FaceResult<()>;

    /// Paint an outline offset by `origin`. `alpha` scales the color's opacity.
    fn blend_outline(
        &mut self,
        color: Color,
        alpha: u8,
        outline: &Outline,
        origin: Point,
    ) -> FaceResult<()>;

    /// Advance width of `text` when drawn with `font`.
    fn measure_text_width(&self, text: &str, font: &Font) -> f64;

    /// Whole-surface rectangle.
    fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width()), f64::from(self.height()))
    }
}

/// Run `draw` inside a region, closing the region even when `draw` fails.
pub fn with_region<S, T>(
    surface: &mut S,
    rect: Rect,
    draw: impl FnOnce(&mut S) -> FaceResult<T>,
) -> FaceResult<T>
where
    S: Surface + ?Sized,
{
    surface.begin_region(rect)?;
    let out = draw(surface);
    let ended = surface.end_region();
    let out = out?;
    ended?;
    Ok(out)
}
