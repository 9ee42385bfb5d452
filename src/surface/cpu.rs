//! CPU raster surface backed by `vello_cpu`.
//!
//! Drawing calls are recorded into a render context and rasterized on
//! [`PixmapSurface::present`]. After each present the finished frame is painted back
//! as the first command of the next batch, so pixels the renderer does not touch
//! survive from tick to tick.

use std::sync::Arc;

use crate::{
    foundation::core::{BezPath, Color, Font, Point, Rect},
    foundation::error::{FaceError, FaceResult},
    geometry::outline::{Outline, OutlineMode},
    surface::Surface,
};

/// Raster surface holding premultiplied RGBA8 pixels.
pub struct PixmapSurface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    depth: usize,
    pending: bool,
}

impl PixmapSurface {
    /// Advance per character as a fraction of the font size.
    pub const CHAR_ADVANCE: f64 = 0.6;

    /// Transparent surface of the given size.
    pub fn new(width: u32, height: u32) -> FaceResult<Self> {
        let width: u16 = width
            .try_into()
            .map_err(|_| FaceError::config("surface width exceeds u16"))?;
        let height: u16 = height
            .try_into()
            .map_err(|_| FaceError::config("surface height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(FaceError::config("surface must be at least 1x1"));
        }
        Ok(Self {
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
            pixmap: vello_cpu::Pixmap::new(width, height),
            depth: 0,
            pending: false,
        })
    }

    /// Rasterize everything drawn since the last present.
    pub fn present(&mut self) -> FaceResult<()> {
        if self.depth != 0 {
            return Err(FaceError::invalid_input(format!(
                "present with {} region(s) still open",
                self.depth
            )));
        }
        if !self.pending {
            return Ok(());
        }
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
        self.ctx.reset();
        self.pending = false;

        let previous = pixmap_image(&self.pixmap, self.width, self.height)?;
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(previous);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
        Ok(())
    }

    /// Premultiplied RGBA8 bytes of the last presented frame.
    pub fn premul_rgba8(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Straight-alpha RGBA8 bytes of the last presented frame.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = self.premul_rgba8().to_vec();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }

    /// Straight-alpha RGBA of one pixel of the last presented frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= u32::from(self.width) || y >= u32::from(self.height) {
            return None;
        }
        let i = (y as usize * usize::from(self.width) + x as usize) * 4;
        let px = self.premul_rgba8().get(i..i + 4)?;
        let a = u16::from(px[3]);
        if a == 0 {
            return Some([0, 0, 0, 0]);
        }
        let un = |c: u8| ((u16::from(c) * 255 + a / 2) / a).min(255) as u8;
        Some([un(px[0]), un(px[1]), un(px[2]), px[3]])
    }

    fn set_color(&mut self, color: Color) {
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
    }
}

impl std::fmt::Debug for PixmapSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixmapSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("depth", &self.depth)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl Surface for PixmapSurface {
    fn width(&self) -> u32 {
        u32::from(self.width)
    }

    fn height(&self) -> u32 {
        u32::from(self.height)
    }

    fn begin_region(&mut self, rect: Rect) -> FaceResult<()> {
        let clip = vello_cpu::kurbo::Rect::new(rect.x0, rect.y0, rect.x1, rect.y1);
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .push_clip_layer(&vello_cpu::kurbo::Shape::to_path(&clip, 0.1));
        self.depth += 1;
        self.pending = true;
        Ok(())
    }

    fn end_region(&mut self) -> FaceResult<()> {
        if self.depth == 0 {
            return Err(FaceError::invalid_input("end_region without begin_region"));
        }
        self.ctx.pop_layer();
        self.depth -= 1;
        Ok(())
    }

    fn fill_region(&mut self, color: Color, rect: Rect) -> FaceResult<()> {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.set_color(color);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            rect.x0, rect.y0, rect.x1, rect.y1,
        ));
        self.pending = true;
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        font: &Font,
        color: Color,
        origin: Point,
    ) -> FaceResult<()> {
        // Shaping is not available here: each visible character becomes a solid cell.
        let advance = font.size * Self::CHAR_ADVANCE;
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.set_color(color);
        for (i, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let x = origin.x + i as f64 * advance;
            let y = origin.y + font.size * 0.15;
            self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                x,
                y,
                x + advance * 0.8,
                y + font.size * 0.7,
            ));
        }
        tracing::trace!(text, "draw_text rendered as glyph cells");
        self.pending = true;
        Ok(())
    }

    fn blend_outline(
        &mut self,
        color: Color,
        alpha: u8,
        outline: &Outline,
        origin: Point,
    ) -> FaceResult<()> {
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));
        self.set_color(color.with_alpha(alpha));
        let path = bezpath_to_cpu(outline.path());
        match outline.mode() {
            OutlineMode::Fill => self.ctx.fill_path(&path),
            OutlineMode::Stroke => {
                self.ctx
                    .set_stroke(vello_cpu::kurbo::Stroke::new(outline.weight()));
                self.ctx.stroke_path(&path);
            }
        }
        self.pending = true;
        Ok(())
    }

    fn measure_text_width(&self, text: &str, font: &Font) -> f64 {
        text.chars().count() as f64 * font.size * Self::CHAR_ADVANCE
    }
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_image(
    pixmap: &vello_cpu::Pixmap,
    width: u16,
    height: u16,
) -> FaceResult<vello_cpu::Image> {
    let bytes = pixmap.data_as_u8_slice();
    if bytes.len() != usize::from(width) * usize::from(height) * 4 {
        return Err(FaceError::invalid_input("pixmap byte length mismatch"));
    }
    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(usize::from(width) * usize::from(height));
    for px in bytes.chunks_exact(4) {
        may_have_opacities |= px[3] != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        });
    }
    let copy =
        vello_cpu::Pixmap::from_parts_with_opacity(pixels, width, height, may_have_opacities);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(copy)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/surface/cpu.rs"]
mod tests;
