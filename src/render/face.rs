//! Built-in face parts and the default layer stack.
//!
//! Geometry is authored for a 320x240 surface and scaled to the target size.

use crate::{
    foundation::core::{BezPath, Point},
    geometry::shapes::{push_ellipse, push_rect},
    render::layer::{Layer, Part},
    state::face::{EyeState, FaceState, ThemeColor},
};

const DESIGN_WIDTH: f64 = 320.0;
const DESIGN_HEIGHT: f64 = 240.0;

/// Which eye a part draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EyeSide {
    /// `face.eyes.left`.
    Left,
    /// `face.eyes.right`.
    Right,
}

/// A round eye that squashes vertically as it closes and follows the gaze.
#[derive(Clone, Copy, Debug)]
pub struct EyePart {
    /// Center with zero gaze.
    pub center: Point,
    /// Radius when fully open.
    pub radius: f64,
    /// Pixels moved per unit of gaze.
    pub gaze_scale: f64,
    /// Eye whose state is read.
    pub side: EyeSide,
}

impl EyePart {
    /// Height a fully closed eye is drawn with.
    pub const CLOSED_HEIGHT: f64 = 2.0;

    fn eye<'a>(&self, face: &'a FaceState) -> &'a EyeState {
        match self.side {
            EyeSide::Left => &face.eyes.left,
            EyeSide::Right => &face.eyes.right,
        }
    }
}

impl Part for EyePart {
    fn draw(&mut self, _elapsed_ms: f64, path: &mut BezPath, face: &FaceState) {
        let eye = self.eye(face);
        let center = Point::new(
            self.center.x + eye.gaze_x * self.gaze_scale,
            self.center.y + eye.gaze_y * self.gaze_scale,
        );
        let open = eye.open.clamp(0.0, 1.0);
        let ry = self.radius * open;
        if ry * 2.0 < Self::CLOSED_HEIGHT {
            push_rect(path, center, self.radius * 2.0, Self::CLOSED_HEIGHT);
        } else {
            push_ellipse(path, center, self.radius, ry);
        }
    }
}

/// A rectangular mouth that grows taller and narrower as it opens.
#[derive(Clone, Copy, Debug)]
pub struct MouthPart {
    /// Center of the mouth.
    pub center: Point,
    /// Width when fully open.
    pub min_width: f64,
    /// Width when closed.
    pub max_width: f64,
    /// Height when closed.
    pub min_height: f64,
    /// Height when fully open.
    pub max_height: f64,
}

impl Part for MouthPart {
    fn draw(&mut self, _elapsed_ms: f64, path: &mut BezPath, face: &FaceState) {
        let open = face.mouth.open.clamp(0.0, 1.0);
        let width = self.max_width - (self.max_width - self.min_width) * open;
        let height = self.min_height + (self.max_height - self.min_height) * open;
        push_rect(path, self.center, width, height);
    }
}

/// Default stack: one primary-colored fill layer with both eyes and the mouth.
pub fn simple_face_layers(width: u32, height: u32) -> Vec<Layer> {
    let sx = f64::from(width) / DESIGN_WIDTH;
    let sy = f64::from(height) / DESIGN_HEIGHT;
    let s = sx.min(sy);
    let at = |x: f64, y: f64| Point::new(x * sx, y * sy);

    let face = Layer::fill(ThemeColor::Primary)
        .with_part(
            "leftEye",
            EyePart {
                center: at(90.0, 93.0),
                radius: 8.0 * s,
                gaze_scale: 2.0 * s,
                side: EyeSide::Left,
            },
        )
        .with_part(
            "rightEye",
            EyePart {
                center: at(230.0, 96.0),
                radius: 8.0 * s,
                gaze_scale: 2.0 * s,
                side: EyeSide::Right,
            },
        )
        .with_part(
            "mouth",
            MouthPart {
                center: at(160.0, 148.0),
                min_width: 50.0 * s,
                max_width: 90.0 * s,
                min_height: 8.0 * s,
                max_height: 58.0 * s,
            },
        );
    vec![face]
}
