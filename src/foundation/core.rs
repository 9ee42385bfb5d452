pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// An `(r, g, b)` triple as stored in a face theme.
pub type Rgb = [u8; 3];

/// Straight-alpha RGBA8 color produced by a surface's `make_color`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, 255 is opaque.
    pub a: u8,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0x00, 0x00, 0x00);

    /// Opaque color from three channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Same color with `alpha` multiplied into the existing alpha.
    pub fn with_alpha(self, alpha: u8) -> Self {
        Self {
            a: crate::foundation::math::mul_div255_u8(u16::from(self.a), u16::from(alpha)),
            ..self
        }
    }
}

/// Font description handed to a surface; metrics and shaping belong to the surface.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Font {
    /// Family name, interpreted by the surface.
    pub family: String,
    /// Pixel size.
    pub size: f64,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 16.0,
        }
    }
}

/// Rectangle from an origin and a size, the shape every region call uses.
pub fn region(x: f64, y: f64, width: f64, height: f64) -> Rect {
    Rect::from_origin_size((x, y), (width, height))
}
