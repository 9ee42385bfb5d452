use crate::{
    foundation::core::{Color, Font, Point, Rect},
    foundation::error::{FaceError, FaceResult},
    geometry::outline::Outline,
    surface::Surface,
};

/// One call made against a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceOp {
    /// `begin_region`.
    BeginRegion(Rect),
    /// `end_region`.
    EndRegion,
    /// `fill_region`.
    FillRegion {
        /// Fill color.
        color: Color,
        /// Filled rectangle.
        rect: Rect,
    },
    /// `draw_text`.
    DrawText {
        /// Text drawn.
        text: String,
        /// Text color.
        color: Color,
        /// Top-left corner.
        origin: Point,
    },
    /// `blend_outline`.
    BlendOutline {
        /// Paint color.
        color: Color,
        /// Opacity multiplier.
        alpha: u8,
        /// Outline as passed in.
        outline: Outline,
        /// Draw offset.
        origin: Point,
    },
}

/// In-memory surface that records every call instead of drawing.
///
/// Text advance is `0.6 * font.size` per character.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    depth: usize,
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    /// Advance per character as a fraction of the font size.
    pub const CHAR_ADVANCE: f64 = 0.6;

    /// Empty recording for a surface of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            depth: 0,
            ops: Vec::new(),
        }
    }

    /// Every call recorded so far.
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Take the recorded calls, leaving the recording empty.
    pub fn take_ops(&mut self) -> Vec<SurfaceOp> {
        std::mem::take(&mut self.ops)
    }

    /// Number of regions currently open.
    pub fn open_regions(&self) -> usize {
        self.depth
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn begin_region(&mut self, rect: Rect) -> FaceResult<()> {
        self.depth += 1;
        self.ops.push(SurfaceOp::BeginRegion(rect));
        Ok(())
    }

    fn end_region(&mut self) -> FaceResult<()> {
        if self.depth == 0 {
            return Err(FaceError::invalid_input("end_region without begin_region"));
        }
        self.depth -= 1;
        self.ops.push(SurfaceOp::EndRegion);
        Ok(())
    }

    fn fill_region(&mut self, color: Color, rect: Rect) -> FaceResult<()> {
        self.ops.push(SurfaceOp::FillRegion { color, rect });
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        _font: &Font,
        color: Color,
        origin: Point,
    ) -> FaceResult<()> {
        self.ops.push(SurfaceOp::DrawText {
            text: text.to_string(),
            color,
            origin,
        });
        Ok(())
    }

    fn blend_outline(
        &mut self,
        color: Color,
        alpha: u8,
        outline: &Outline,
        origin: Point,
    ) -> FaceResult<()> {
        self.ops.push(SurfaceOp::BlendOutline {
            color,
            alpha,
            outline: outline.clone(),
            origin,
        });
        Ok(())
    }

    fn measure_text_width(&self, text: &str, font: &Font) -> f64 {
        text.chars().count() as f64 * font.size * Self::CHAR_ADVANCE
    }
}
