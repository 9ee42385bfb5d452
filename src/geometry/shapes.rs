//! Path builders shared by face parts and decorators.
//!
//! Decorator glyphs are authored in a 40x40 design box with the origin at the top-left.

use kurbo::{Circle, Ellipse, RoundedRect, Shape};

use crate::foundation::core::{BezPath, Point};

/// Side length of the design box decorator glyphs are drawn in.
pub const GLYPH_BOX: f64 = 40.0;

const TOLERANCE: f64 = 0.1;

/// Rounded rectangle with its top-left corner at `(x, y)`.
pub fn round_rect(x: f64, y: f64, width: f64, height: f64, radius: f64) -> BezPath {
    RoundedRect::new(x, y, x + width, y + height, radius).to_path(TOLERANCE)
}

/// Append a full circle as a new sub-path.
pub fn push_circle(path: &mut BezPath, center: Point, radius: f64) {
    path.extend(Circle::new(center, radius).path_elements(TOLERANCE));
}

/// Append an axis-aligned ellipse as a new sub-path.
pub fn push_ellipse(path: &mut BezPath, center: Point, rx: f64, ry: f64) {
    path.extend(Ellipse::new(center, (rx, ry), 0.0).path_elements(TOLERANCE));
}

/// Append an axis-aligned rectangle centered on `center` as a new sub-path.
pub fn push_rect(path: &mut BezPath, center: Point, width: f64, height: f64) {
    let x0 = center.x - width / 2.0;
    let y0 = center.y - height / 2.0;
    path.move_to((x0, y0));
    path.line_to((x0 + width, y0));
    path.line_to((x0 + width, y0 + height));
    path.line_to((x0, y0 + height));
    path.close_path();
}

/// Heart glyph, point down, filling the design box.
pub fn heart() -> BezPath {
    let mut p = BezPath::new();
    p.move_to((20.0, 13.0));
    p.curve_to((18.0, 8.0), (14.0, 5.0), (10.0, 5.0));
    p.curve_to((8.0, 5.0), (0.0, 5.0), (0.0, 15.0));
    p.curve_to((0.0, 30.0), (18.0, 35.0), (20.0, 40.0));
    p.curve_to((22.0, 35.0), (40.0, 30.0), (40.0, 15.0));
    p.curve_to((40.0, 5.0), (32.0, 5.0), (30.0, 5.0));
    p.curve_to((26.0, 5.0), (22.0, 8.0), (20.0, 13.0));
    p.close_path();
    p
}

/// Four curved anger marks bent toward the center of the design box.
pub fn angry_marks() -> BezPath {
    let mut p = BezPath::new();
    for (start, end) in [
        ((15.0, 5.0), (5.0, 15.0)),
        ((25.0, 5.0), (35.0, 15.0)),
        ((5.0, 25.0), (15.0, 35.0)),
        ((25.0, 35.0), (35.0, 25.0)),
    ] {
        p.move_to(start);
        p.quad_to((20.0, 20.0), end);
    }
    p
}

/// Three vertical pallor lines. `flip` mirrors the outer line lengths.
pub fn pale_marks(flip: bool) -> BezPath {
    let mut p = BezPath::new();
    p.move_to((15.0, 5.0));
    p.line_to((15.0, if flip { 25.0 } else { 35.0 }));
    p.move_to((25.0, 5.0));
    p.line_to((25.0, 30.0));
    p.move_to((35.0, 5.0));
    p.line_to((35.0, if flip { 35.0 } else { 25.0 }));
    p
}

/// Sweat drop with its tip at the top of the design box.
pub fn sweat_drop() -> BezPath {
    let mut p = BezPath::new();
    p.move_to((20.0, 30.0));
    p.curve_to((30.0, 30.0), (30.0, 15.0), (20.0, 0.0));
    p.curve_to((10.0, 15.0), (10.0, 30.0), (20.0, 30.0));
    p.close_path();
    p
}
